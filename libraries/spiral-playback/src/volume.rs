//! Volume control with mute memory
//!
//! The gain level is a linear multiplier in 0.0-1.0 applied at the analysis
//! gain stage. Muting forces the level to zero but remembers the level to
//! restore on unmute.

/// Speaker icon shown next to the volume bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    /// Level above one half
    Up,
    /// Audible, at most one half
    Down,
    /// Silent
    Off,
}

impl VolumeIcon {
    /// Icon for a gain level
    pub fn for_level(level: f32) -> Self {
        if level > 0.5 {
            VolumeIcon::Up
        } else if level > 0.0 {
            VolumeIcon::Down
        } else {
            VolumeIcon::Off
        }
    }
}

/// Gain level with mute memory
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Current gain (0.0 while muted)
    level: f32,

    /// Mute state
    muted: bool,

    /// Level restored on unmute (never zero)
    last_level: f32,
}

impl Volume {
    /// Create a volume at `level` (clamped to 0.0-1.0)
    ///
    /// A zero level starts muted with full volume as the restore level.
    pub fn new(level: f32) -> Self {
        let mut volume = Self {
            level: 0.0,
            muted: false,
            last_level: 1.0,
        };
        volume.set_level(level);
        volume
    }

    /// Set the level from a drag ratio
    ///
    /// Clears any previous mute memory: zero mutes with full volume as the
    /// restore level, anything else unmutes and becomes the restore level.
    pub fn set_level(&mut self, level: f32) {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };

        self.level = level;
        self.muted = level == 0.0;
        self.last_level = if level > 0.0 { level } else { 1.0 };
    }

    /// Current gain level (0.0 while muted)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Level that unmuting restores
    pub fn last_level(&self) -> f32 {
        self.last_level
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute, remembering the current level
    pub fn mute(&mut self) {
        if self.muted {
            return;
        }
        if self.level > 0.0 {
            self.last_level = self.level;
        }
        self.level = 0.0;
        self.muted = true;
    }

    /// Unmute, restoring the remembered level
    pub fn unmute(&mut self) {
        if !self.muted {
            return;
        }
        self.level = self.last_level;
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.unmute();
        } else {
            self.mute();
        }
    }

    /// Linear gain multiplier for the gain stage
    pub fn gain(&self) -> f32 {
        self.level
    }

    /// Icon matching the current level
    pub fn icon(&self) -> VolumeIcon {
        VolumeIcon::for_level(self.level)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

//! Widget settings
//!
//! The embedding page supplies one JSON document per widget. It is parsed
//! and validated up front; any problem aborts construction so no partial
//! player is ever built.

use crate::error::{CoreError, Result};
use crate::types::Playlist;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Validated widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Tracks to play, in order
    pub audio: Playlist,

    /// Initial gain (0.0-1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Number of frequency bins; the analyser FFT is twice this (power of two)
    #[serde(default = "default_size")]
    pub size: usize,

    /// Analyser smoothing time constant (0.0-1.0)
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,

    /// Lower bound of the analyser byte scale, in dBFS
    #[serde(default = "default_min_decibels")]
    pub mindecibels: f32,

    /// Upper bound of the analyser byte scale, in dBFS
    #[serde(default = "default_max_decibels")]
    pub maxdecibels: f32,

    /// Start playing as soon as a track is ready
    #[serde(default)]
    pub autoplay: bool,

    /// Sampler interval in milliseconds
    #[serde(default = "default_frame")]
    pub frame: u64,

    /// Inline style for the widget container
    #[serde(default)]
    pub container: String,

    /// Inline style for the controls strip
    #[serde(default)]
    pub controls: String,

    /// Inline style for the title element
    #[serde(default)]
    pub title: String,

    /// Visual effects; the first one drives the sample cap
    #[serde(default = "default_effects")]
    pub effects: Vec<EffectSettings>,
}

fn default_volume() -> f32 {
    0.8
}

fn default_size() -> usize {
    512
}

fn default_smoothing() -> f32 {
    0.8
}

fn default_min_decibels() -> f32 {
    -100.0
}

fn default_max_decibels() -> f32 {
    -30.0
}

fn default_frame() -> u64 {
    33
}

fn default_effects() -> Vec<EffectSettings> {
    vec![EffectSettings::default()]
}

impl Settings {
    /// Settings for `audio` with every other field at its default
    pub fn with_playlist(audio: Playlist) -> Self {
        Self {
            audio,
            volume: default_volume(),
            size: default_size(),
            smoothing: default_smoothing(),
            mindecibels: default_min_decibels(),
            maxdecibels: default_max_decibels(),
            autoplay: false,
            frame: default_frame(),
            container: String::new(),
            controls: String::new(),
            title: String::new(),
            effects: default_effects(),
        }
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text.trim())?;
        settings.validate()?;
        debug!(
            "Loaded settings: {} tracks, fft size {}, frame {}ms",
            settings.audio.len(),
            settings.fft_size(),
            settings.frame
        );
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Check ranges and cross-field consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(CoreError::invalid_settings(format!(
                "volume must be within 0.0-1.0, got {}",
                self.volume
            )));
        }

        if self.size == 0 || !self.size.is_power_of_two() {
            return Err(CoreError::invalid_settings(format!(
                "size must be a power of two, got {}",
                self.size
            )));
        }

        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(CoreError::invalid_settings(format!(
                "smoothing must be within 0.0-1.0, got {}",
                self.smoothing
            )));
        }

        if self.mindecibels >= self.maxdecibels {
            return Err(CoreError::invalid_settings(format!(
                "mindecibels ({}) must be below maxdecibels ({})",
                self.mindecibels, self.maxdecibels
            )));
        }

        if self.frame == 0 {
            return Err(CoreError::invalid_settings("frame must be at least 1ms"));
        }

        if self.effects.is_empty() {
            return Err(CoreError::invalid_settings("at least one effect is required"));
        }

        if let Some(effect) = self.effects.iter().find(|e| e.size.is_nan() || e.size <= 0.0) {
            return Err(CoreError::invalid_settings(format!(
                "effect size must be positive, got {}",
                effect.size
            )));
        }

        Ok(())
    }

    /// Analyser FFT length (two samples per frequency bin)
    pub fn fft_size(&self) -> usize {
        self.size * 2
    }

    /// Sampler tick period
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame)
    }

    /// Effect whose layout sizes the sample frames
    pub fn primary_effect(&self) -> &EffectSettings {
        &self.effects[0]
    }
}

/// Layout of one visual effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSettings {
    /// Inline style for the effect's canvas
    #[serde(default)]
    pub style: String,

    /// Where the effect is anchored
    #[serde(default)]
    pub position: EffectPosition,

    /// Pixel footprint of one sample
    #[serde(default = "default_effect_size")]
    pub size: f64,
}

fn default_effect_size() -> f64 {
    1.0
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            style: String::new(),
            position: EffectPosition::default(),
            size: default_effect_size(),
        }
    }
}

impl EffectSettings {
    /// Largest number of samples this effect can show on a `width` x `height` canvas
    pub fn max_samples(&self, width: f64, height: f64) -> usize {
        self.position.max_samples(width, height, self.size)
    }
}

/// Anchor/orientation of an effect on its canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectPosition {
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    HorizontalRight,
    HorizontalLeft,
    TopMirror,
    BottomMirror,
    HorizontalMirror,
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    VerticalDown,
    VerticalUp,
    LeftMirror,
    RightMirror,
    VerticalMirror,
    #[default]
    Horizontal,
    Vertical,
}

impl EffectPosition {
    /// Sample capacity along the effect's axis
    ///
    /// Edge-anchored effects fit one sample per `size` pixels, mirrored
    /// ones half that, and the plain `horizontal`/`vertical` effects one per
    /// pixel.
    pub fn max_samples(self, width: f64, height: f64, size: f64) -> usize {
        let samples = match self {
            Self::TopRight
            | Self::TopLeft
            | Self::BottomRight
            | Self::BottomLeft
            | Self::HorizontalRight
            | Self::HorizontalLeft => width / size,
            Self::TopMirror | Self::BottomMirror | Self::HorizontalMirror => width / size / 2.0,
            Self::LeftDown
            | Self::LeftUp
            | Self::RightDown
            | Self::RightUp
            | Self::VerticalDown
            | Self::VerticalUp => height / size,
            Self::LeftMirror | Self::RightMirror | Self::VerticalMirror => height / size / 2.0,
            Self::Horizontal => width,
            Self::Vertical => height,
        };

        if samples.is_finite() && samples > 0.0 {
            samples.floor() as usize
        } else {
            0
        }
    }
}

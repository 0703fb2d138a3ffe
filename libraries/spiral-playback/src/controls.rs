//! On-screen controls
//!
//! Turns pointer input on the seek and volume bars into controller calls,
//! and controller events into view state a host can paint.

use crate::{
    backend::MediaBackend,
    controller::PlaybackController,
    drag::{BarGeometry, BarKind, BarRange, DragBar, DragSession, DragTarget, PointerPosition},
    events::PlayerEvent,
    types::PlaybackState,
    volume::VolumeIcon,
};
use tracing::debug;

/// Play/pause button face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    /// Shown while paused
    Play,
    /// Shown while playing
    Pause,
}

/// Everything a host needs to paint the controls
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub seek_button: f64,
    pub played: BarRange,
    pub buffered: BarRange,
    pub time_label: String,
    pub volume_button: f64,
    pub volume_range: BarRange,
    pub volume_icon: VolumeIcon,
    pub toggle_icon: ToggleIcon,
}

/// Seek bar, volume bar and their single drag session
#[derive(Debug, Clone)]
pub struct Controls {
    seek: DragBar,
    volume: DragBar,
    session: Option<DragSession>,
    buffered: BarRange,
    time_label: String,
    volume_icon: VolumeIcon,
    toggle_icon: ToggleIcon,
}

impl Controls {
    /// Create controls with the volume button at `volume`
    pub fn new(seek: BarGeometry, volume_bar: BarGeometry, volume: f32) -> Self {
        let mut volume_drag = DragBar::new(volume_bar);
        volume_drag.place_at_ratio(f64::from(volume));

        Self {
            seek: DragBar::new(seek),
            volume: volume_drag,
            session: None,
            buffered: BarRange::default(),
            time_label: format_time(0.0),
            volume_icon: VolumeIcon::for_level(volume),
            toggle_icon: ToggleIcon::Play,
        }
    }

    /// Drag in progress, if any
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a drag on `bar`; the press counts as the first move
    ///
    /// Ignored while another drag is active. Returns whether a drag started.
    pub fn pointer_down<M: MediaBackend>(
        &mut self,
        bar: BarKind,
        pos: PointerPosition,
        controller: &mut PlaybackController<M>,
    ) -> bool {
        if self.session.is_some() {
            debug!(?bar, "Drag already active, ignoring pointer down");
            return false;
        }

        let target = match bar {
            BarKind::Seek => DragTarget::Seek {
                resume: !controller.is_paused(),
            },
            BarKind::Volume => DragTarget::Volume,
        };
        self.session = Some(DragSession { target });

        self.pointer_move(pos, controller);
        true
    }

    /// Follow the pointer during a drag
    pub fn pointer_move<M: MediaBackend>(
        &mut self,
        pos: PointerPosition,
        controller: &mut PlaybackController<M>,
    ) {
        let Some(session) = self.session else {
            return;
        };

        match session.target {
            DragTarget::Seek { .. } => {
                self.seek.place_at_pointer(pos.x);
                // streams of unknown length cannot be seeked
                let duration = controller.duration().filter(|d| d.is_finite() && *d > 0.0);
                if let Some(duration) = duration {
                    let seconds = (self.seek.ratio() * duration).floor();
                    controller.seek(seconds);
                    self.time_label = format_time(seconds);
                }
            }
            DragTarget::Volume => {
                self.volume.place_at_pointer(pos.x);
                let level = self.volume.ratio() as f32;
                controller.set_volume(level);
                self.volume_icon = controller.volume().icon();
            }
        }
    }

    /// End the drag; a seek drag finishes the seek
    pub fn pointer_up<M: MediaBackend>(&mut self, controller: &mut PlaybackController<M>) {
        if let Some(DragSession {
            target: DragTarget::Seek { resume },
            ..
        }) = self.session.take()
        {
            controller.finish_seek_with(resume);
        }
    }

    /// Mute button: toggle and move the volume button to match
    pub fn toggle_mute<M: MediaBackend>(&mut self, controller: &mut PlaybackController<M>) {
        controller.toggle_mute();

        let volume = controller.volume();
        if volume.is_muted() {
            self.volume.place_button(-1.0);
        } else {
            self.volume.place_at_ratio(f64::from(volume.level()));
        }
        self.volume_icon = volume.icon();
    }

    /// Update view state from a controller event
    pub fn apply_event<M: MediaBackend>(
        &mut self,
        event: &PlayerEvent,
        controller: &PlaybackController<M>,
    ) {
        match event {
            PlayerEvent::Playing => self.toggle_icon = ToggleIcon::Pause,
            PlayerEvent::Pause => self.toggle_icon = ToggleIcon::Play,
            PlayerEvent::TimeUpdate { current_time } => {
                if controller.state() == PlaybackState::Playing {
                    if let Some(duration) = controller.duration().filter(|d| *d > 0.0) {
                        let travel = self.seek.geometry().travel();
                        self.seek
                            .place_button((travel * current_time / duration - 1.0).round());
                    }
                }
                self.time_label = format_time(*current_time);
            }
            PlayerEvent::Progress { buffered } => {
                let span = controller
                    .duration()
                    .and_then(|d| buffered.first().and_then(|r| r.fraction_of(d)));
                if let Some((start, end)) = span {
                    self.buffered = BarRange::new(start, end);
                }
            }
            PlayerEvent::Title { .. } => {
                self.seek.place_button(-1.0);
                self.buffered = BarRange::default();
                self.time_label = format_time(0.0);
            }
            _ => {}
        }
    }

    /// Snapshot for painting
    pub fn view(&self) -> ControlsView {
        ControlsView {
            seek_button: self.seek.button_offset(),
            played: self.seek.fill(),
            buffered: self.buffered,
            time_label: self.time_label.clone(),
            volume_button: self.volume.button_offset(),
            volume_range: self.volume.fill(),
            volume_icon: self.volume_icon,
            toggle_icon: self.toggle_icon,
        }
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

//! Spiral Player - Playback
//!
//! Platform-agnostic playback and visualization driver for Spiral Player.
//!
//! This crate provides:
//! - Named-event emitter (`canplay`, `playing`, `title`, ...)
//! - Playback controller (playlist cursor, play/pause/seek, looping)
//! - Volume with mute memory, applied at the analysis gain stage
//! - Drag-bar controls for seeking and volume
//! - Sampler loop feeding time-domain and frequency data to a renderer
//! - Debounced resize notifier
//! - Software FFT analyser
//!
//! # Architecture
//!
//! `spiral-playback` owns no platform code. The media element, the audio
//! analysis graph and the renderer are provided through the
//! [`MediaBackend`], [`AnalysisBackend`] and [`Renderer`] traits. Commands go
//! in, events come out.
//!
//! # Example
//!
//! ```rust
//! use spiral_core::{MediaSource, Settings};
//! use spiral_playback::{MediaBackend, MediaSignal, PlaybackController, PlaybackState, Result};
//!
//! #[derive(Default)]
//! struct Element {
//!     paused: bool,
//!     time: f64,
//! }
//!
//! impl MediaBackend for Element {
//!     fn load(&mut self, _sources: &[MediaSource], _autoplay: bool) -> Result<()> {
//!         self.paused = true;
//!         self.time = 0.0;
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> {
//!         self.paused = false;
//!         Ok(())
//!     }
//!     fn pause(&mut self) {
//!         self.paused = true;
//!     }
//!     fn is_paused(&self) -> bool {
//!         self.paused
//!     }
//!     fn current_time(&self) -> f64 {
//!         self.time
//!     }
//!     fn set_current_time(&mut self, seconds: f64) {
//!         self.time = seconds;
//!     }
//!     fn duration(&self) -> Option<f64> {
//!         Some(180.0)
//!     }
//! }
//!
//! let settings = Settings::from_json(r#"{"audio": [{"mp3": "a.mp3"}]}"#).unwrap();
//! let mut controller = PlaybackController::new(settings, Element::default(), None);
//!
//! // Nothing plays until the media can play
//! assert!(!controller.play());
//!
//! controller.handle_signal(MediaSignal::CanPlay);
//! assert!(controller.play());
//! assert_eq!(controller.state(), PlaybackState::Playing);
//! ```

pub mod analyser;
pub mod backend;
pub mod controller;
pub mod controls;
pub mod drag;
mod error;
pub mod events;
pub mod player;
pub mod resize;
pub mod sampler;
pub mod types;
mod volume;

// Public exports
pub use analyser::{AnalyserConfig, SoftwareAnalyser};
pub use backend::{AnalysisBackend, MediaBackend, MediaSignal, Renderer};
pub use controller::PlaybackController;
pub use controls::{format_time, Controls, ControlsView, ToggleIcon};
pub use drag::{BarGeometry, BarKind, BarRange, DragBar, PixelSpan, PointerPosition};
pub use error::{PlaybackError, Result};
pub use events::{EventEmitter, EventKind, PlayerEvent};
pub use player::{
    player_channel, BarTransform, Mount, Player, PlayerHandle, PlayerInput, TransportCommand,
};
pub use resize::{ResizeNotifier, Viewport, RESIZE_POLL_INTERVAL};
pub use sampler::{FrameSource, SampleFrame, SamplerLoop, SamplerTick};
pub use types::{PlaybackState, TimeRange};
pub use volume::{Volume, VolumeIcon};

//! Spiral Player Core
//!
//! Configuration and domain types for the Spiral Player widget.
//!
//! The widget is configured by one JSON document. This crate turns that
//! document into a validated [`Settings`] value: a non-empty [`Playlist`] of
//! [`Track`]s plus analyser and layout parameters. Anything malformed is
//! rejected here, before a player exists.
//!
//! # Example
//!
//! ```rust
//! use spiral_core::{Codec, Settings};
//!
//! let settings = Settings::from_json(
//!     r#"{
//!         "audio": [
//!             {"mp3": "/music/a.mp3", "ogg": "/music/a.ogg", "title": "A"},
//!             {"mp3": "/music/b.mp3", "title": "B"}
//!         ],
//!         "volume": 0.5,
//!         "size": 256
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.audio.len(), 2);
//! assert_eq!(settings.fft_size(), 512);
//!
//! let first = settings.audio.get(0).unwrap();
//! assert_eq!(first.title(), Some("A"));
//! assert_eq!(first.sources()[0].codec, Codec::Ogg);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod settings;
pub mod types;

pub use error::{CoreError, Result};
pub use settings::{EffectPosition, EffectSettings, Settings};
pub use types::{Codec, MediaSource, Playlist, Track};

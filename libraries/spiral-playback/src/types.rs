//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Transport state of the current track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded yet
    Idle,

    /// Sources handed to the media backend, waiting for "can play"
    Loading,

    /// Media can play but has not started
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Position is being moved; play requests are ignored
    Seeking,
}

/// Buffered span of the current track, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the span
    pub start: f64,

    /// End of the span
    pub end: f64,
}

impl TimeRange {
    /// Create a span
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Span as fractions of `duration`, for drawing onto a bar
    ///
    /// Returns `None` while the duration is unknown or zero.
    pub fn fraction_of(&self, duration: f64) -> Option<(f64, f64)> {
        if duration.is_finite() && duration > 0.0 {
            Some((self.start / duration, self.end / duration))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_fractions() {
        let range = TimeRange::new(30.0, 90.0);
        assert_eq!(range.fraction_of(120.0), Some((0.25, 0.75)));
        assert_eq!(range.fraction_of(0.0), None);
        assert_eq!(range.fraction_of(f64::NAN), None);
    }
}

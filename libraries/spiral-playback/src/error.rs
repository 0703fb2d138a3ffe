//! Error types for playback management

use spiral_core::CoreError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Settings or playlist were rejected
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Media backend refused an operation
    #[error("Media backend error: {0}")]
    Backend(String),

    /// Audio analysis could not be set up
    #[error("Audio analysis unavailable: {0}")]
    AnalysisUnavailable(String),

    /// Bar must be wider than its button
    #[error("Invalid bar geometry: bar {bar_width}px, button {button_width}px")]
    InvalidGeometry { bar_width: f64, button_width: f64 },

    /// Analyser FFT length must be a power of two
    #[error("Invalid analyser size: {0}")]
    InvalidAnalyserSize(usize),

    /// The player loop is gone; inputs can no longer be delivered
    #[error("Player has stopped")]
    PlayerClosed,
}

impl PlaybackError {
    /// Create a media backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create an analysis unavailable error
    pub fn analysis_unavailable(msg: impl Into<String>) -> Self {
        Self::AnalysisUnavailable(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Core error types for Spiral Player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Spiral Player
///
/// Every variant is a configuration problem: the widget refuses to start
/// rather than building a partial player.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A settings field is out of range or inconsistent
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Playlist has no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Track names a codec label with no known MIME type
    #[error("Unknown codec label: {0}")]
    UnknownCodec(String),

    /// Track has no playable source
    #[error("Track has no sources{}", .0.as_deref().map(|t| format!(": {t}")).unwrap_or_default())]
    NoSources(Option<String>),

    /// Settings could not be parsed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an invalid settings error
    pub fn invalid_settings(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sources_message_includes_title() {
        let err = CoreError::NoSources(Some("Intro".to_string()));
        assert_eq!(err.to_string(), "Track has no sources: Intro");

        let err = CoreError::NoSources(None);
        assert_eq!(err.to_string(), "Track has no sources");
    }
}

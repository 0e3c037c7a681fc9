//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Queue transitions never fail; these cover the audio output and the
/// configuration layer around it.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Audio output refused an operation (e.g. autoplay blocked)
    #[error("Audio output error: {0}")]
    Audio(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stream base URL or track path could not be parsed
    #[error("Invalid stream URL: {0}")]
    InvalidStreamUrl(#[from] url::ParseError),
}

impl PlaybackError {
    /// Create an audio output error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

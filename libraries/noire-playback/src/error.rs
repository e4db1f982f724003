//! Error types for playback management

use noire_core::NoireError;
use thiserror::Error;

/// Playback errors
///
/// Only precondition violations and configuration problems surface here.
/// Policy rejections (lockout) are reported as outcomes, not errors.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Ad asset could not be played
    #[error("Ad audio error: {0}")]
    AdAudio(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error from a core port (storage, catalog)
    #[error(transparent)]
    Core(#[from] NoireError),
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

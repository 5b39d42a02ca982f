//! Error types for playback management

use crate::types::PlaybackState;
use soul_metadata::MetadataError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// File could not be read; the session stays in its prior state
    #[error(transparent)]
    Media(#[from] MetadataError),

    /// Operation needs a loaded file
    #[error("No file loaded")]
    NoFileLoaded,

    /// Operation is not valid in the current state
    #[error("Cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: PlaybackState,
    },

    /// The position ticker needs a tokio runtime
    #[error("No tokio runtime available for the position ticker")]
    NoRuntime,

    /// Background probe task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),

    /// Engine configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlaybackError {
    /// Whether this error came from reading media
    pub fn is_unreadable_media(&self) -> bool {
        matches!(self, Self::Media(MetadataError::UnreadableMedia { .. }))
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Core error types for Soul Player
use thiserror::Error;

/// Result type alias using `SoulError`
pub type Result<T> = std::result::Result<T, SoulError>;

/// Core error type for Soul Player
#[derive(Error, Debug)]
pub enum SoulError {
    /// Audio output errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// File missing, container unsupported, or no audio stream
    #[error("Unreadable media {path}: {reason}")]
    UnreadableMedia { path: String, reason: String },

    /// Platform device enumeration failed
    #[error("Device enumeration failed: {0}")]
    DeviceEnumeration(String),

    /// Device not present in the current enumeration
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SoulError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create an unreadable media error
    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableMedia {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

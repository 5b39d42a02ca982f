/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File missing, unsupported container, or no audio stream
    #[error("Unreadable media {path}: {reason}")]
    UnreadableMedia { path: String, reason: String },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl MetadataError {
    /// Create an unreadable media error
    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableMedia {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<MetadataError> for soul_core::SoulError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::UnreadableMedia { path, reason } => {
                soul_core::SoulError::UnreadableMedia { path, reason }
            }
            other => soul_core::SoulError::metadata(other.to_string()),
        }
    }
}

/// Audio host errors
use thiserror::Error;

/// Result type for audio host operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// Device not found
    #[error("Audio device not found: {0}")]
    DeviceNotFound(String),

    /// Requested host backend cannot be used in this build or on this system
    #[error("Audio backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Device error
    #[error("Device error: {0}")]
    DeviceError(String),

    /// CPAL error
    #[error("CPAL error: {0}")]
    CpalError(String),
}

#[cfg(feature = "cpal")]
impl From<cpal::DevicesError> for AudioError {
    fn from(err: cpal::DevicesError) -> Self {
        AudioError::CpalError(err.to_string())
    }
}

#[cfg(feature = "cpal")]
impl From<cpal::HostUnavailable> for AudioError {
    fn from(err: cpal::HostUnavailable) -> Self {
        AudioError::BackendUnavailable(err.to_string())
    }
}

impl From<AudioError> for soul_core::SoulError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::DeviceNotFound(id) => soul_core::SoulError::DeviceNotFound(id),
            AudioError::CpalError(msg) => soul_core::SoulError::DeviceEnumeration(msg),
            other => soul_core::SoulError::audio(other.to_string()),
        }
    }
}

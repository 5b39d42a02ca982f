/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BitPerfectError>;

#[derive(Debug, Error)]
pub enum BitPerfectError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown output device: {0}")]
    UnknownDevice(String),

    #[error(transparent)]
    Playback(#[from] soul_playback::PlaybackError),

    #[error(transparent)]
    Audio(#[from] soul_audio_desktop::AudioError),
}

impl From<config::ConfigError> for BitPerfectError {
    fn from(err: config::ConfigError) -> Self {
        BitPerfectError::Config(err.to_string())
    }
}

/// Core traits for Soul Player
///
/// These are the seams between the playback core and the platform: reading a
/// file's stream parameters and talking to the OS audio layer.
use crate::error::Result;
use crate::types::{Codec, DeviceCapability, DeviceId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Raw stream description reported by a [`MediaProbe`]
///
/// Fields the container does not carry are left as `None`; normalisation
/// (defaults, bit-depth lookup) is the extractor's job, not the probe's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub sample_rate_hz: Option<u32>,
    pub bits_per_sample: Option<u32>,
    pub channel_count: Option<u16>,
    pub codec: Option<Codec>,
    pub duration: Option<Duration>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Media probe trait
///
/// Implementers open a file and describe its primary audio stream.
pub trait MediaProbe: Send + Sync {
    /// Probe the file at `path`
    ///
    /// # Errors
    /// Returns `SoulError::UnreadableMedia` if the file cannot be opened,
    /// the container is unsupported, or there is no audio stream
    fn probe(&self, path: &Path) -> Result<ProbeReport>;
}

/// OS audio trait
///
/// Implementers enumerate output endpoints and forward device ownership
/// requests to the platform. Methods take `&self`; implementations keep their
/// own interior state so one host can be shared across threads.
pub trait OsAudio: Send + Sync {
    /// Enumerate output devices in platform order
    ///
    /// # Errors
    /// Returns an error if the platform enumeration call fails
    fn enumerate_devices(&self) -> Result<Vec<DeviceCapability>>;

    /// Request or release exclusive access to the selected endpoint
    ///
    /// # Errors
    /// Returns an error if the platform rejects the mode change
    fn set_exclusive(&self, exclusive: bool) -> Result<()>;

    /// Route output to the given endpoint
    ///
    /// # Errors
    /// Returns an error if the platform cannot open the endpoint
    fn select_device(&self, id: &DeviceId) -> Result<()>;

    /// Host name for diagnostics
    fn name(&self) -> &'static str;
}

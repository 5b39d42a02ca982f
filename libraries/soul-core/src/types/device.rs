/// Output device domain types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque output endpoint identifier, unique within one enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a device ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Capabilities of one output endpoint, as reported by the OS.
///
/// Values are snapshots: a refresh of the device list produces new instances
/// and never modifies one that was already handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapability {
    pub id: DeviceId,
    pub display_name: String,
    /// System default endpoint; at most one per enumeration
    pub is_default: bool,
    pub max_sample_rate_hz: u32,
    pub max_bit_depth: u16,
    pub max_channel_count: u16,
}

impl DeviceCapability {
    /// Create a capability snapshot
    pub fn new(
        id: impl Into<DeviceId>,
        display_name: impl Into<String>,
        max_sample_rate_hz: u32,
        max_bit_depth: u16,
        max_channel_count: u16,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_default: false,
            max_sample_rate_hz,
            max_bit_depth,
            max_channel_count,
        }
    }

    /// Mark as the system default device
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

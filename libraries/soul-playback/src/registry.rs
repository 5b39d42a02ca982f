//! Device capability registry
//!
//! Wraps an [`OsAudio`] host and tracks which endpoint the user selected.
//! Every query re-enumerates, so hot-plugged devices are seen on the next
//! call and callers always get a fresh, owned snapshot.

use parking_lot::RwLock;
use soul_core::{DeviceCapability, DeviceId, OsAudio};
use std::sync::Arc;

/// Device registry
pub struct DeviceRegistry {
    host: Arc<dyn OsAudio>,
    selected: RwLock<Option<DeviceId>>,
}

impl DeviceRegistry {
    /// Create a registry over `host` with nothing selected
    pub fn new(host: Arc<dyn OsAudio>) -> Self {
        Self {
            host,
            selected: RwLock::new(None),
        }
    }

    /// Name of the underlying host
    pub fn host_name(&self) -> &'static str {
        self.host.name()
    }

    /// Enumerate output devices in platform order
    ///
    /// Enumeration failure degrades to an empty list. If the platform flags
    /// more than one device as default, only the first keeps the flag.
    pub fn list_devices(&self) -> Vec<DeviceCapability> {
        let mut devices = match self.host.enumerate_devices() {
            Ok(devices) => devices,
            Err(e) => {
                tracing::warn!(host = self.host.name(), error = %e, "device enumeration failed");
                return Vec::new();
            }
        };

        let mut seen_default = false;
        for device in &mut devices {
            if device.is_default {
                if seen_default {
                    tracing::warn!(device = %device.id, "ignoring duplicate default device flag");
                    device.is_default = false;
                }
                seen_default = true;
            }
        }

        devices
    }

    /// Device output currently goes to: the selection if still present,
    /// else the default device, else none
    pub fn current_device(&self) -> Option<DeviceCapability> {
        let devices = self.list_devices();
        let selected = self.selected.read().clone();
        resolve_device(devices, selected.as_ref())
    }

    /// Select `id` for output
    ///
    /// Returns false and keeps the previous selection if `id` is not in the
    /// latest enumeration or the host refuses it.
    pub fn select_device(&self, id: &DeviceId) -> bool {
        if !self.list_devices().iter().any(|d| &d.id == id) {
            tracing::warn!(device = %id, "ignoring selection of unknown device");
            return false;
        }

        if let Err(e) = self.host.select_device(id) {
            tracing::warn!(device = %id, error = %e, "host rejected device selection");
            return false;
        }

        *self.selected.write() = Some(id.clone());
        tracing::info!(device = %id, "output device selected");
        true
    }

    /// Explicit selection, whether or not the device is currently present
    pub fn selected(&self) -> Option<DeviceId> {
        self.selected.read().clone()
    }

    /// Forward an exclusive-mode request to the host
    ///
    /// Host failures are logged; the session-level flag is authoritative.
    pub fn set_exclusive(&self, exclusive: bool) {
        if let Err(e) = self.host.set_exclusive(exclusive) {
            tracing::warn!(exclusive, error = %e, "host rejected exclusive mode change");
        }
    }
}

impl std::fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("host", &self.host.name())
            .field("selected", &*self.selected.read())
            .finish()
    }
}

/// Resolution order over one enumeration: selection, then default, then none
pub fn resolve_device(
    devices: Vec<DeviceCapability>,
    selected: Option<&DeviceId>,
) -> Option<DeviceCapability> {
    let mut default = None;
    for device in devices {
        if Some(&device.id) == selected {
            return Some(device);
        }
        if device.is_default && default.is_none() {
            default = Some(device);
        }
    }
    default
}

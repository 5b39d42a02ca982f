// soul-audio-desktop/src/virtual_host.rs
//
// In-process audio host with a configurable device set.
//
// Used when no system backend is compiled in, and as the deterministic host
// for tests: devices can be plugged/unplugged between enumerations and
// enumeration can be made to fail.

use crate::error::AudioError;
use parking_lot::RwLock;
use soul_core::{DeviceCapability, DeviceId, OsAudio, SampleRate, SoulError};

#[derive(Debug, Default)]
struct VirtualState {
    devices: Vec<DeviceCapability>,
    exclusive: bool,
    selected: Option<DeviceId>,
    fail_enumeration: bool,
    enumerations: usize,
}

/// Virtual output host
#[derive(Debug, Default)]
pub struct VirtualHost {
    state: RwLock<VirtualState>,
}

impl VirtualHost {
    /// Create a host exposing `devices` in the given order
    pub fn new(devices: Vec<DeviceCapability>) -> Self {
        Self {
            state: RwLock::new(VirtualState {
                devices,
                ..VirtualState::default()
            }),
        }
    }

    /// Host with no devices at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The desktop reference set: a default 192k/32 endpoint, a 192k/32 DAC
    /// and 48k/24 built-in speakers
    pub fn with_reference_devices() -> Self {
        Self::new(reference_devices())
    }

    /// Hot-plug a device; replaces an existing one with the same id
    pub fn plug(&self, device: DeviceCapability) {
        let mut state = self.state.write();
        if let Some(slot) = state.devices.iter_mut().find(|d| d.id == device.id) {
            *slot = device;
        } else {
            state.devices.push(device);
        }
    }

    /// Hot-unplug a device; returns false if it was not present
    pub fn unplug(&self, id: &DeviceId) -> bool {
        let mut state = self.state.write();
        let before = state.devices.len();
        state.devices.retain(|d| &d.id != id);
        state.devices.len() != before
    }

    /// Replace the whole device set
    pub fn set_devices(&self, devices: Vec<DeviceCapability>) {
        self.state.write().devices = devices;
    }

    /// Make subsequent enumerations fail (or succeed again)
    pub fn set_enumeration_failure(&self, fail: bool) {
        self.state.write().fail_enumeration = fail;
    }

    /// Last exclusive-mode request received
    pub fn is_exclusive(&self) -> bool {
        self.state.read().exclusive
    }

    /// Last device routed to
    pub fn selected(&self) -> Option<DeviceId> {
        self.state.read().selected.clone()
    }

    /// Number of enumeration calls served (successful or not)
    pub fn enumeration_count(&self) -> usize {
        self.state.read().enumerations
    }
}

impl OsAudio for VirtualHost {
    fn enumerate_devices(&self) -> soul_core::Result<Vec<DeviceCapability>> {
        let mut state = self.state.write();
        state.enumerations += 1;
        if state.fail_enumeration {
            return Err(SoulError::DeviceEnumeration(
                "virtual host enumeration disabled".to_string(),
            ));
        }
        Ok(state.devices.clone())
    }

    fn set_exclusive(&self, exclusive: bool) -> soul_core::Result<()> {
        self.state.write().exclusive = exclusive;
        Ok(())
    }

    fn select_device(&self, id: &DeviceId) -> soul_core::Result<()> {
        let mut state = self.state.write();
        if !state.devices.iter().any(|d| &d.id == id) {
            return Err(AudioError::DeviceNotFound(id.to_string()).into());
        }
        state.selected = Some(id.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Virtual"
    }
}

/// Devices exposed by [`VirtualHost::with_reference_devices`]
pub fn reference_devices() -> Vec<DeviceCapability> {
    vec![
        DeviceCapability::new(
            "default",
            "System Default Output",
            SampleRate::HIGH_RES_192.as_hz(),
            32,
            2,
        )
        .as_default(),
        DeviceCapability::new(
            "dac1",
            "High-Resolution USB DAC",
            SampleRate::HIGH_RES_192.as_hz(),
            32,
            2,
        ),
        DeviceCapability::new(
            "speakers",
            "Speakers (Built-in Audio)",
            SampleRate::DVD_QUALITY.as_hz(),
            24,
            2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_set_has_single_default() {
        let devices = reference_devices();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices.iter().filter(|d| d.is_default).count(), 1);
    }

    #[test]
    fn plug_replaces_same_id() {
        let host = VirtualHost::with_reference_devices();
        host.plug(DeviceCapability::new("dac1", "DAC (firmware 2)", 384_000, 32, 2));

        let devices = host.enumerate_devices().unwrap();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[1].max_sample_rate_hz, 384_000);
    }

    #[test]
    fn select_unknown_device_fails() {
        let host = VirtualHost::with_reference_devices();
        assert!(host.select_device(&DeviceId::new("hdmi")).is_err());
        assert_eq!(host.selected(), None);
    }
}

// soul-audio-desktop/src/cpal_host.rs
//
// System audio host backed by CPAL device enumeration.

use crate::enumeration::{assign_unique_ids, container_bits};
use crate::error::AudioError;
use cpal::traits::{DeviceTrait, HostTrait};
use parking_lot::Mutex;
use soul_core::{DeviceCapability, DeviceId, OsAudio, SoulError};
use std::sync::atomic::{AtomicBool, Ordering};

/// Helper to extract u32 value from cpal::SampleRate
/// In the current CPAL version, SampleRate is a type alias for u32
#[inline]
fn cpal_sample_rate_to_u32(sr: cpal::SampleRate) -> u32 {
    sr
}

/// Output host over the platform's default CPAL host
/// (WASAPI on Windows, CoreAudio on macOS, ALSA on Linux).
///
/// The host is re-opened on every enumeration so a hot-plugged device shows
/// up on the next call. Device ids are display names, suffixed `#2`, `#3`
/// when several endpoints share one. CPAL has no portable exclusive-mode switch; the
/// requested mode is recorded and applied when a stream is opened.
pub struct CpalHost {
    host_id: cpal::HostId,
    exclusive: AtomicBool,
    selected: Mutex<Option<DeviceId>>,
}

impl CpalHost {
    /// Host over the system default CPAL backend
    pub fn new() -> Self {
        Self {
            host_id: cpal::default_host().id(),
            exclusive: AtomicBool::new(true),
            selected: Mutex::new(None),
        }
    }

    /// Whether exclusive access was last requested
    pub fn exclusive_requested(&self) -> bool {
        self.exclusive.load(Ordering::Relaxed)
    }

    /// Device output is currently routed to, if one was selected
    pub fn selected(&self) -> Option<DeviceId> {
        self.selected.lock().clone()
    }

    #[allow(deprecated)]
    fn list(&self) -> Result<Vec<DeviceCapability>, AudioError> {
        let host = cpal::host_from_id(self.host_id)?;

        let default_name = host.default_output_device().and_then(|d| d.name().ok());

        let mut device_list = Vec::new();

        for device in host.output_devices()? {
            let Ok(name) = device.name() else {
                continue;
            };
            let Ok(configs) = device.supported_output_configs() else {
                tracing::debug!(device = %name, "skipping device without output configs");
                continue;
            };

            let mut max_rate = 0u32;
            let mut max_bits = 0u16;
            let mut max_channels = 0u16;
            for config in configs {
                max_rate = max_rate.max(cpal_sample_rate_to_u32(config.max_sample_rate()));
                max_bits = max_bits.max(container_bits(config.sample_format().sample_size()));
                max_channels = max_channels.max(config.channels());
            }

            if max_rate == 0 {
                continue;
            }

            device_list.push(DeviceCapability {
                id: DeviceId::new(name.clone()),
                is_default: Some(&name) == default_name.as_ref(),
                display_name: name,
                max_sample_rate_hz: max_rate,
                max_bit_depth: max_bits,
                max_channel_count: max_channels,
            });
        }

        assign_unique_ids(&mut device_list);
        Ok(device_list)
    }
}

impl Default for CpalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl OsAudio for CpalHost {
    fn enumerate_devices(&self) -> soul_core::Result<Vec<DeviceCapability>> {
        self.list().map_err(SoulError::from)
    }

    fn set_exclusive(&self, exclusive: bool) -> soul_core::Result<()> {
        self.exclusive.store(exclusive, Ordering::Relaxed);
        tracing::debug!(exclusive, "exclusive mode recorded for next stream");
        Ok(())
    }

    fn select_device(&self, id: &DeviceId) -> soul_core::Result<()> {
        let devices = self.enumerate_devices()?;
        if !devices.iter().any(|d| &d.id == id) {
            return Err(AudioError::DeviceNotFound(id.to_string()).into());
        }
        *self.selected.lock() = Some(id.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        #[cfg(target_os = "windows")]
        return "WASAPI";

        #[cfg(target_os = "macos")]
        return "CoreAudio";

        #[cfg(target_os = "linux")]
        return "ALSA";

        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        return "Default";
    }
}

// soul-audio-desktop/src/enumeration.rs
//
// Normalisation of raw platform device listings.

use soul_core::{DeviceCapability, DeviceId};
use std::collections::HashMap;

/// Deepest integer container an endpoint is compared at
const MAX_CONTAINER_BITS: usize = 32;

/// Bit depth of a sample format of `sample_bytes` bytes.
///
/// 64-bit float formats report 32: no file is ever stored deeper, and a
/// 64-bit maximum would make every comparison fail.
pub(crate) fn container_bits(sample_bytes: usize) -> u16 {
    (sample_bytes * 8).min(MAX_CONTAINER_BITS) as u16
}

/// Make ids unique within one enumeration.
///
/// Platforms key devices by display name, and two identical USB DACs share
/// one. The first keeps its name as id; later ones get `name#2`, `name#3`, ...
/// in enumeration order. Only the first device flagged default stays default.
pub(crate) fn assign_unique_ids(devices: &mut [DeviceCapability]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut default_taken = false;

    for device in devices.iter_mut() {
        let name = device.id.as_str().to_string();
        let count = seen.entry(name.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            device.id = DeviceId::new(format!("{name}#{count}"));
        }

        if device.is_default {
            if default_taken {
                device.is_default = false;
            }
            default_taken = true;
        }
    }
}

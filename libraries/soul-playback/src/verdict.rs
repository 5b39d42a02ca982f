//! Bit-perfect evaluation
//!
//! [`evaluate`] is a total, pure function over (file, device, exclusive).
//! Rules are checked in a fixed order and the first match decides the
//! reason, so when several conditions fail at once the reported reason is
//! stable:
//!
//! 1. no file → [`VerdictReason::NoFileLoaded`]
//! 2. shared mode → [`VerdictReason::SharedMode`]
//! 3. no device → [`VerdictReason::NoDeviceResolved`]
//! 4. rate or depth differs from the device maximum → [`VerdictReason::ConversionRequired`]
//! 5. otherwise → [`VerdictReason::BitPerfectActive`]
//!
//! Channel count is not compared: channel remapping is orthogonal to
//! sample-rate and bit-depth fidelity. Both snapshots still carry it for
//! display.

use serde::{Deserialize, Serialize};
use soul_core::{AudioCharacteristics, Codec, DeviceCapability, DeviceId};
use std::fmt;

/// Why a verdict came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictReason {
    NoFileLoaded,
    SharedMode,
    NoDeviceResolved,
    ConversionRequired,
    BitPerfectActive,
}

impl VerdictReason {
    /// Human-diagnostic text
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoFileLoaded => "no file loaded",
            Self::SharedMode => "shared/non-exclusive mode",
            Self::NoDeviceResolved => "no device resolved",
            Self::ConversionRequired => "resample/truncation required",
            Self::BitPerfectActive => "bit-perfect active",
        }
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File side of a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSnapshot {
    pub sample_rate_hz: u32,
    pub bit_depth: u16,
    pub channel_count: u16,
    pub codec: Codec,
    /// Bit depth came from the codec table, not the container
    pub depth_is_nominal: bool,
}

impl From<&AudioCharacteristics> for FileSnapshot {
    fn from(file: &AudioCharacteristics) -> Self {
        Self {
            sample_rate_hz: file.sample_rate_hz,
            bit_depth: file.bit_depth.bits(),
            channel_count: file.channel_count,
            codec: file.codec,
            depth_is_nominal: file.depth_is_nominal(),
        }
    }
}

/// Device side of a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub id: DeviceId,
    pub display_name: String,
    pub max_sample_rate_hz: u32,
    pub max_bit_depth: u16,
    pub max_channel_count: u16,
}

impl From<&DeviceCapability> for DeviceSnapshot {
    fn from(device: &DeviceCapability) -> Self {
        Self {
            id: device.id.clone(),
            display_name: device.display_name.clone(),
            max_sample_rate_hz: device.max_sample_rate_hz,
            max_bit_depth: device.max_bit_depth,
            max_channel_count: device.max_channel_count,
        }
    }
}

/// Result of one bit-perfect evaluation
///
/// Produced fresh on every evaluation; never cache one across a file,
/// device or exclusive-mode change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitPerfectVerdict {
    pub is_bit_perfect: bool,
    pub reason: VerdictReason,
    pub device: Option<DeviceSnapshot>,
    pub file: Option<FileSnapshot>,
}

impl BitPerfectVerdict {
    fn rejected(
        reason: VerdictReason,
        file: Option<&AudioCharacteristics>,
        device: Option<&DeviceCapability>,
    ) -> Self {
        Self {
            is_bit_perfect: false,
            reason,
            device: device.map(DeviceSnapshot::from),
            file: file.map(FileSnapshot::from),
        }
    }

    /// Sample rate of the file, if one was evaluated
    pub fn file_sample_rate(&self) -> Option<u32> {
        self.file.as_ref().map(|f| f.sample_rate_hz)
    }

    /// Maximum sample rate of the device, if one was resolved
    pub fn device_sample_rate(&self) -> Option<u32> {
        self.device.as_ref().map(|d| d.max_sample_rate_hz)
    }

    /// Bit depth of the file, if one was evaluated
    pub fn file_bit_depth(&self) -> Option<u16> {
        self.file.as_ref().map(|f| f.bit_depth)
    }

    /// Maximum bit depth of the device, if one was resolved
    pub fn device_bit_depth(&self) -> Option<u16> {
        self.device.as_ref().map(|d| d.max_bit_depth)
    }
}

impl fmt::Display for BitPerfectVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_bit_perfect { "✓" } else { "✗" };
        write!(f, "{mark} {}", self.reason)?;
        if let (Some(file), Some(device)) = (&self.file, &self.device) {
            write!(
                f,
                " (file {} Hz/{}-bit{}, device {} Hz/{}-bit)",
                file.sample_rate_hz,
                file.bit_depth,
                if file.depth_is_nominal { " nominal" } else { "" },
                device.max_sample_rate_hz,
                device.max_bit_depth
            )?;
        }
        Ok(())
    }
}

/// Decide whether `file` can reach `device` untouched
pub fn evaluate(
    file: Option<&AudioCharacteristics>,
    device: Option<&DeviceCapability>,
    exclusive: bool,
) -> BitPerfectVerdict {
    let Some(file) = file else {
        return BitPerfectVerdict::rejected(VerdictReason::NoFileLoaded, None, None);
    };

    if !exclusive {
        return BitPerfectVerdict::rejected(VerdictReason::SharedMode, Some(file), device);
    }

    let Some(device) = device else {
        return BitPerfectVerdict::rejected(VerdictReason::NoDeviceResolved, Some(file), None);
    };

    if file.sample_rate_hz != device.max_sample_rate_hz
        || file.bit_depth.bits() != device.max_bit_depth
    {
        return BitPerfectVerdict::rejected(
            VerdictReason::ConversionRequired,
            Some(file),
            Some(device),
        );
    }

    BitPerfectVerdict {
        is_bit_perfect: true,
        reason: VerdictReason::BitPerfectActive,
        device: Some(DeviceSnapshot::from(device)),
        file: Some(FileSnapshot::from(file)),
    }
}

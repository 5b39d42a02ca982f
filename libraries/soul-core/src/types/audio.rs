/// Audio-related types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Common sample rates
    pub const CD_QUALITY: Self = Self(44_100);
    pub const DVD_QUALITY: Self = Self(48_000);
    pub const HIGH_RES_88: Self = Self(88_200);
    pub const HIGH_RES_96: Self = Self(96_000);
    pub const HIGH_RES_176: Self = Self(176_400);
    pub const HIGH_RES_192: Self = Self(192_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{} kHz", self.0 / 1000)
        } else {
            write!(f, "{:.1} kHz", f64::from(self.0) / 1000.0)
        }
    }
}

/// Bit depth of a PCM stream as compared against a device.
///
/// Only the three container depths an output endpoint can be opened with are
/// representable. Odd depths (8, 20, ...) are normalised up to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum BitDepth {
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

impl BitDepth {
    /// Number of bits
    pub fn bits(self) -> u16 {
        match self {
            Self::Sixteen => 16,
            Self::TwentyFour => 24,
            Self::ThirtyTwo => 32,
        }
    }

    /// Exact conversion; `None` for anything other than 16, 24 or 32
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            16 => Some(Self::Sixteen),
            24 => Some(Self::TwentyFour),
            32 => Some(Self::ThirtyTwo),
            _ => None,
        }
    }

    /// Round a declared depth up to the nearest container depth
    pub fn normalize(bits: u32) -> Self {
        match bits {
            0..=16 => Self::Sixteen,
            17..=24 => Self::TwentyFour,
            _ => Self::ThirtyTwo,
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = String;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| format!("unsupported bit depth: {bits}"))
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Codec identity of the primary audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Codec {
    /// Signed 16-bit little-endian PCM
    PcmS16,
    /// Signed 24-bit little-endian PCM
    PcmS24,
    /// Signed 32-bit little-endian PCM
    PcmS32,
    /// 32-bit float PCM
    PcmF32,
    Flac,
    Alac,
    Mp3,
    Aac,
    Vorbis,
    Opus,
    /// Anything the extractor does not recognise
    Other,
}

impl Codec {
    /// Parse an ffmpeg-style codec name (`pcm_s16le`, `flac`, `mp3`, ...)
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pcm_s16le" | "pcm_s16be" => Self::PcmS16,
            "pcm_s24le" | "pcm_s24be" => Self::PcmS24,
            "pcm_s32le" | "pcm_s32be" => Self::PcmS32,
            "pcm_f32le" | "pcm_f32be" => Self::PcmF32,
            "flac" => Self::Flac,
            "alac" => Self::Alac,
            "mp3" | "mp3float" => Self::Mp3,
            "aac" => Self::Aac,
            "vorbis" => Self::Vorbis,
            "opus" => Self::Opus,
            _ => Self::Other,
        }
    }

    /// Canonical short name
    pub fn name(self) -> &'static str {
        match self {
            Self::PcmS16 => "pcm_s16le",
            Self::PcmS24 => "pcm_s24le",
            Self::PcmS32 => "pcm_s32le",
            Self::PcmF32 => "pcm_f32le",
            Self::Flac => "flac",
            Self::Alac => "alac",
            Self::Mp3 => "mp3",
            Self::Aac => "aac",
            Self::Vorbis => "vorbis",
            Self::Opus => "opus",
            Self::Other => "unknown",
        }
    }

    /// Whether the codec discards information; lossy streams have no
    /// intrinsic bit depth
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Mp3 | Self::Aac | Self::Vorbis | Self::Opus)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an [`AudioCharacteristics::bit_depth`] value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthOrigin {
    /// Declared by the container for a lossless stream
    Declared,
    /// Looked up from the codec table; an approximation, not a measurement
    Nominal,
}

/// Normalized characteristics of a file's primary audio stream.
///
/// Derived once per file and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioCharacteristics {
    pub sample_rate_hz: u32,
    pub bit_depth: BitDepth,
    pub depth_origin: DepthOrigin,
    pub channel_count: u16,
    pub codec: Codec,
}

impl AudioCharacteristics {
    /// True when the bit depth is a nominal lookup rather than declared
    pub fn depth_is_nominal(&self) -> bool {
        self.depth_origin == DepthOrigin::Nominal
    }
}

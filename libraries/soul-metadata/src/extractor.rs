//! Format extraction
//!
//! Turns a [`ProbeReport`] into normalized [`AudioCharacteristics`]:
//!
//! - sample rate defaults to 44100 Hz and channel count to 2 when the
//!   container omits them, so malformed headers do not fail a load
//! - bit depth for lossless streams is the declared depth (rounded up to
//!   16/24/32) when the container states one
//! - everything else uses the nominal table in [`nominal_bit_depth`]; for lossy
//!   codecs that number is an effective-depth convention, not a measurement,
//!   and the result is tagged [`DepthOrigin::Nominal`] so callers can say so

use crate::error::{MetadataError, Result};
use serde::{Deserialize, Serialize};
use soul_core::{
    AudioCharacteristics, BitDepth, Codec, DepthOrigin, MediaProbe, ProbeReport, SoulError,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Sample rate assumed when the container does not state one
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;

/// Channel count assumed when the container does not state one
pub const DEFAULT_CHANNEL_COUNT: u16 = 2;

/// Artist shown when the file carries no artist tag
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album shown when the file carries no album tag
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Nominal effective bit depth per codec.
///
/// | codec            | depth |
/// |------------------|-------|
/// | PCM s16          | 16    |
/// | PCM s24          | 24    |
/// | PCM s32 / f32    | 32    |
/// | FLAC, ALAC       | 24    |
/// | MP3, AAC, Vorbis, Opus | 16 |
/// | unknown          | 16    |
pub fn nominal_bit_depth(codec: Codec) -> BitDepth {
    match codec {
        Codec::PcmS16 => BitDepth::Sixteen,
        Codec::PcmS24 => BitDepth::TwentyFour,
        Codec::PcmS32 | Codec::PcmF32 => BitDepth::ThirtyTwo,
        Codec::Flac | Codec::Alac => BitDepth::TwentyFour,
        Codec::Mp3 | Codec::Aac | Codec::Vorbis | Codec::Opus | Codec::Other => BitDepth::Sixteen,
    }
}

/// Display tags with fallbacks applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Everything a session needs from one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMedia {
    pub characteristics: AudioCharacteristics,
    pub duration: Duration,
    pub tags: TrackTags,
}

/// Format extractor
///
/// Wraps a [`MediaProbe`] and applies the normalisation policy. Pure read, no
/// side effects; may block on file I/O.
#[derive(Clone)]
pub struct FormatExtractor {
    probe: Arc<dyn MediaProbe>,
}

impl FormatExtractor {
    /// Create an extractor over the given probe
    pub fn new(probe: Arc<dyn MediaProbe>) -> Self {
        Self { probe }
    }

    /// Derive the audio characteristics of `path`
    pub fn extract(&self, path: &Path) -> Result<AudioCharacteristics> {
        self.extract_media(path).map(|media| media.characteristics)
    }

    /// Derive characteristics, duration and display tags of `path`
    pub fn extract_media(&self, path: &Path) -> Result<ExtractedMedia> {
        let report = self.probe.probe(path).map_err(|e| match e {
            SoulError::UnreadableMedia { path, reason } => {
                MetadataError::UnreadableMedia { path, reason }
            }
            other => MetadataError::unreadable(path.display().to_string(), other.to_string()),
        })?;

        let media = normalize(path, report);
        tracing::debug!(
            path = %path.display(),
            sample_rate = media.characteristics.sample_rate_hz,
            bit_depth = media.characteristics.bit_depth.bits(),
            codec = %media.characteristics.codec,
            "extracted audio characteristics"
        );
        Ok(media)
    }
}

/// Apply defaults and the bit-depth policy to a raw probe report
pub fn normalize(path: &Path, report: ProbeReport) -> ExtractedMedia {
    let codec = report.codec.unwrap_or(Codec::Other);

    let declared = report
        .bits_per_sample
        .filter(|bits| *bits > 0 && !codec.is_lossy() && codec != Codec::Other);

    let (bit_depth, depth_origin) = match declared {
        Some(bits) => (BitDepth::normalize(bits), DepthOrigin::Declared),
        None => (nominal_bit_depth(codec), DepthOrigin::Nominal),
    };

    let characteristics = AudioCharacteristics {
        sample_rate_hz: report
            .sample_rate_hz
            .filter(|hz| *hz > 0)
            .unwrap_or(DEFAULT_SAMPLE_RATE_HZ),
        bit_depth,
        depth_origin,
        channel_count: report
            .channel_count
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CHANNEL_COUNT),
        codec,
    };

    let title = report.title.filter(|t| !t.is_empty()).unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    });

    ExtractedMedia {
        characteristics,
        duration: report.duration.unwrap_or(Duration::ZERO),
        tags: TrackTags {
            title,
            artist: report
                .artist
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: report
                .album
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(codec: Codec, bits: Option<u32>) -> ProbeReport {
        ProbeReport {
            sample_rate_hz: Some(96_000),
            bits_per_sample: bits,
            channel_count: Some(2),
            codec: Some(codec),
            duration: Some(Duration::from_secs(240)),
            ..ProbeReport::default()
        }
    }

    #[test]
    fn nominal_table() {
        assert_eq!(nominal_bit_depth(Codec::PcmS16), BitDepth::Sixteen);
        assert_eq!(nominal_bit_depth(Codec::PcmS24), BitDepth::TwentyFour);
        assert_eq!(nominal_bit_depth(Codec::PcmS32), BitDepth::ThirtyTwo);
        assert_eq!(nominal_bit_depth(Codec::PcmF32), BitDepth::ThirtyTwo);
        assert_eq!(nominal_bit_depth(Codec::Flac), BitDepth::TwentyFour);
        assert_eq!(nominal_bit_depth(Codec::Alac), BitDepth::TwentyFour);
        assert_eq!(nominal_bit_depth(Codec::Mp3), BitDepth::Sixteen);
        assert_eq!(nominal_bit_depth(Codec::Aac), BitDepth::Sixteen);
        assert_eq!(nominal_bit_depth(Codec::Other), BitDepth::Sixteen);
    }

    #[test]
    fn declared_depth_wins_for_lossless() {
        let media = normalize(Path::new("/m/a.flac"), report(Codec::Flac, Some(16)));
        assert_eq!(media.characteristics.bit_depth, BitDepth::Sixteen);
        assert_eq!(media.characteristics.depth_origin, DepthOrigin::Declared);
    }

    #[test]
    fn odd_declared_depth_rounds_up() {
        let media = normalize(Path::new("/m/a.wav"), report(Codec::PcmS24, Some(20)));
        assert_eq!(media.characteristics.bit_depth, BitDepth::TwentyFour);
    }

    #[test]
    fn lossy_codecs_ignore_declared_depth() {
        let media = normalize(Path::new("/m/a.mp3"), report(Codec::Mp3, Some(32)));
        assert_eq!(media.characteristics.bit_depth, BitDepth::Sixteen);
        assert!(media.characteristics.depth_is_nominal());
    }

    #[test]
    fn missing_depth_falls_back_to_table() {
        let media = normalize(Path::new("/m/a.flac"), report(Codec::Flac, None));
        assert_eq!(media.characteristics.bit_depth, BitDepth::TwentyFour);
        assert_eq!(media.characteristics.depth_origin, DepthOrigin::Nominal);
    }

    #[test]
    fn missing_rate_and_channels_use_defaults() {
        let media = normalize(
            Path::new("/m/broken.wav"),
            ProbeReport {
                codec: Some(Codec::PcmS16),
                ..ProbeReport::default()
            },
        );
        assert_eq!(media.characteristics.sample_rate_hz, DEFAULT_SAMPLE_RATE_HZ);
        assert_eq!(media.characteristics.channel_count, DEFAULT_CHANNEL_COUNT);
        assert_eq!(media.duration, Duration::ZERO);
    }

    #[test]
    fn missing_codec_is_other_at_sixteen_bits() {
        let media = normalize(Path::new("/m/x.bin"), ProbeReport::default());
        assert_eq!(media.characteristics.codec, Codec::Other);
        assert_eq!(media.characteristics.bit_depth, BitDepth::Sixteen);
    }

    #[test]
    fn tag_fallbacks() {
        let media = normalize(Path::new("/music/Artist/01 - Intro.flac"), report(Codec::Flac, None));
        assert_eq!(media.tags.title, "01 - Intro");
        assert_eq!(media.tags.artist, UNKNOWN_ARTIST);
        assert_eq!(media.tags.album, UNKNOWN_ALBUM);
    }

    #[test]
    fn probe_failures_become_unreadable_media() {
        struct Failing;
        impl MediaProbe for Failing {
            fn probe(&self, _path: &Path) -> soul_core::Result<ProbeReport> {
                Err(SoulError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                )))
            }
        }

        let extractor = FormatExtractor::new(Arc::new(Failing));
        let err = extractor.extract(Path::new("/m/locked.flac")).unwrap_err();
        assert!(matches!(err, MetadataError::UnreadableMedia { ref path, .. } if path == "/m/locked.flac"));
    }
}

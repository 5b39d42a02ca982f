/// Stream probing using Symphonia
use crate::reader::LoftyTagReader;
use soul_core::{Codec, MediaProbe, ProbeReport, SoulError};
use std::path::Path;
use std::time::Duration;
use symphonia::core::codecs::{
    CodecType, CODEC_TYPE_AAC, CODEC_TYPE_ALAC, CODEC_TYPE_FLAC, CODEC_TYPE_MP3, CODEC_TYPE_NULL,
    CODEC_TYPE_OPUS, CODEC_TYPE_PCM_F32BE, CODEC_TYPE_PCM_F32LE, CODEC_TYPE_PCM_S16BE,
    CODEC_TYPE_PCM_S16LE, CODEC_TYPE_PCM_S24BE, CODEC_TYPE_PCM_S24LE, CODEC_TYPE_PCM_S32BE,
    CODEC_TYPE_PCM_S32LE, CODEC_TYPE_VORBIS,
};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// [`MediaProbe`] backed by Symphonia's container readers.
///
/// Stream parameters come from the default audio track's codec parameters;
/// title/artist/album come from lofty, and a tag failure never fails the probe.
pub struct SymphoniaProbe {
    tags: LoftyTagReader,
}

impl SymphoniaProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self {
            tags: LoftyTagReader::new(),
        }
    }
}

impl Default for SymphoniaProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a Symphonia codec type onto the core codec tag
pub fn codec_from_symphonia(codec: CodecType) -> Codec {
    match codec {
        CODEC_TYPE_PCM_S16LE | CODEC_TYPE_PCM_S16BE => Codec::PcmS16,
        CODEC_TYPE_PCM_S24LE | CODEC_TYPE_PCM_S24BE => Codec::PcmS24,
        CODEC_TYPE_PCM_S32LE | CODEC_TYPE_PCM_S32BE => Codec::PcmS32,
        CODEC_TYPE_PCM_F32LE | CODEC_TYPE_PCM_F32BE => Codec::PcmF32,
        CODEC_TYPE_FLAC => Codec::Flac,
        CODEC_TYPE_ALAC => Codec::Alac,
        CODEC_TYPE_MP3 => Codec::Mp3,
        CODEC_TYPE_AAC => Codec::Aac,
        CODEC_TYPE_VORBIS => Codec::Vorbis,
        CODEC_TYPE_OPUS => Codec::Opus,
        _ => Codec::Other,
    }
}

impl MediaProbe for SymphoniaProbe {
    fn probe(&self, path: &Path) -> soul_core::Result<ProbeReport> {
        let shown = path.display().to_string();

        // Open the file
        let file = std::fs::File::open(path)
            .map_err(|e| SoulError::unreadable(shown.clone(), e.to_string()))?;

        // Create media source
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create hint from extension
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| SoulError::unreadable(shown.clone(), format!("probe failed: {e}")))?;

        // Default track, or the first one that actually carries audio
        let track = probed
            .format
            .default_track()
            .filter(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .or_else(|| {
                probed
                    .format
                    .tracks()
                    .iter()
                    .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            })
            .ok_or_else(|| SoulError::unreadable(shown.clone(), "no audio stream"))?;

        let params = &track.codec_params;

        let duration = match (params.time_base, params.n_frames) {
            (Some(time_base), Some(n_frames)) => {
                let time = time_base.calc_time(n_frames);
                Some(Duration::from_secs_f64(time.seconds as f64 + time.frac))
            }
            _ => None,
        }
        .filter(|d| !d.is_zero());

        let mut report = ProbeReport {
            sample_rate_hz: params.sample_rate,
            bits_per_sample: params.bits_per_sample,
            channel_count: params.channels.map(|c| c.count() as u16),
            codec: Some(codec_from_symphonia(params.codec)),
            duration,
            ..ProbeReport::default()
        };

        match self.tags.read(path) {
            Ok(tags) => {
                report.title = tags.title;
                report.artist = tags.artist;
                report.album = tags.album;
                // Containers without a frame count (e.g. streamed FLAC)
                report.duration = report.duration.or(tags.duration);
            }
            Err(e) => tracing::debug!(path = %shown, error = %e, "no readable tags"),
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_pcm_variants() {
        assert_eq!(codec_from_symphonia(CODEC_TYPE_PCM_S16LE), Codec::PcmS16);
        assert_eq!(codec_from_symphonia(CODEC_TYPE_PCM_S24BE), Codec::PcmS24);
        assert_eq!(codec_from_symphonia(CODEC_TYPE_PCM_F32LE), Codec::PcmF32);
    }

    #[test]
    fn maps_unknown_to_other() {
        assert_eq!(codec_from_symphonia(CODEC_TYPE_NULL), Codec::Other);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let probe = SymphoniaProbe::new();
        let result = probe.probe(Path::new("/nonexistent/track.flac"));
        assert!(matches!(result, Err(SoulError::UnreadableMedia { .. })));
    }
}

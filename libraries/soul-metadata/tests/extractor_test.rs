//! Integration tests for format extraction
//!
//! WAV files are synthesised with hound so the probe runs against real
//! containers instead of fixtures checked into the repo.

use soul_core::{BitDepth, Codec, DepthOrigin, MediaProbe};
use soul_metadata::{
    FormatExtractor, LoftyTagReader, MetadataError, SymphoniaProbe, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// ===== Helpers =====

fn write_wav(dir: &Path, name: &str, sample_rate: u32, bits: u16, channels: u16, secs: u32) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    let frames = sample_rate * secs;
    for i in 0..frames {
        for _ in 0..channels {
            let value = ((i % 64) as i32 - 32) * 8;
            writer.write_sample(value).unwrap();
        }
    }
    writer.finalize().unwrap();
    path
}

fn write_float_wav(dir: &Path, name: &str, sample_rate: u32) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..sample_rate {
        let value = (i as f32 / sample_rate as f32) - 0.5;
        writer.write_sample(value).unwrap();
        writer.write_sample(value).unwrap();
    }
    writer.finalize().unwrap();
    path
}

fn extractor() -> FormatExtractor {
    FormatExtractor::new(Arc::new(SymphoniaProbe::new()))
}

// ===== Tests =====

#[test]
fn cd_quality_wav_is_declared_sixteen_bit() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(dir.path(), "cd.wav", 44_100, 16, 2, 1);

    let media = extractor().extract_media(&path).unwrap();

    assert_eq!(media.characteristics.sample_rate_hz, 44_100);
    assert_eq!(media.characteristics.bit_depth, BitDepth::Sixteen);
    assert_eq!(media.characteristics.depth_origin, DepthOrigin::Declared);
    assert_eq!(media.characteristics.channel_count, 2);
    assert_eq!(media.characteristics.codec, Codec::PcmS16);
    assert!((media.duration.as_secs_f64() - 1.0).abs() < 0.01);
}

#[test]
fn hi_res_wav_reports_rate_and_depth() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(dir.path(), "hires.wav", 96_000, 24, 2, 1);

    let characteristics = extractor().extract(&path).unwrap();

    assert_eq!(characteristics.sample_rate_hz, 96_000);
    assert_eq!(characteristics.bit_depth, BitDepth::TwentyFour);
    assert_eq!(characteristics.codec, Codec::PcmS24);
}

#[test]
fn mono_wav_keeps_channel_count() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(dir.path(), "mono.wav", 48_000, 16, 1, 1);

    let characteristics = extractor().extract(&path).unwrap();

    assert_eq!(characteristics.channel_count, 1);
    assert_eq!(characteristics.sample_rate_hz, 48_000);
}

#[test]
fn float_wav_is_thirty_two_bit() {
    let dir = TempDir::new().unwrap();
    let path = write_float_wav(dir.path(), "float.wav", 192_000);

    let characteristics = extractor().extract(&path).unwrap();

    assert_eq!(characteristics.codec, Codec::PcmF32);
    assert_eq!(characteristics.bit_depth, BitDepth::ThirtyTwo);
    assert_eq!(characteristics.sample_rate_hz, 192_000);
}

#[test]
fn untagged_file_gets_fallback_tags() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(dir.path(), "Night Drive.wav", 44_100, 16, 2, 1);

    let media = extractor().extract_media(&path).unwrap();

    assert_eq!(media.tags.title, "Night Drive");
    assert_eq!(media.tags.artist, UNKNOWN_ARTIST);
    assert_eq!(media.tags.album, UNKNOWN_ALBUM);
}

#[test]
fn missing_file_is_unreadable_media() {
    let result = extractor().extract(Path::new("/nonexistent/dir/track.flac"));
    assert!(matches!(result, Err(MetadataError::UnreadableMedia { .. })));
}

#[test]
fn non_audio_file_is_unreadable_media() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.wav");
    std::fs::write(&path, b"this is not a RIFF container at all").unwrap();

    let result = extractor().extract(&path);
    assert!(matches!(result, Err(MetadataError::UnreadableMedia { .. })));
}

#[test]
fn probe_reports_raw_values_without_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(dir.path(), "raw.wav", 88_200, 24, 2, 2);

    let report = SymphoniaProbe::new().probe(&path).unwrap();

    assert_eq!(report.sample_rate_hz, Some(88_200));
    assert_eq!(report.bits_per_sample, Some(24));
    assert_eq!(report.channel_count, Some(2));
    let duration = report.duration.unwrap();
    assert!(duration > Duration::from_millis(1_990) && duration < Duration::from_millis(2_010));
}

#[test]
fn tag_reader_reports_duration_from_properties() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(dir.path(), "props.wav", 48_000, 16, 2, 3);

    let tags = LoftyTagReader::new().read(&path).unwrap();

    let duration = tags.duration.expect("lofty should report a duration");
    assert!(duration > Duration::from_millis(2_900) && duration < Duration::from_millis(3_100));
    assert_eq!(tags.title, None);
}

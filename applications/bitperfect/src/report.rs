//! Human-readable rendering of devices, verdicts and session events

use soul_core::{AudioCharacteristics, DeviceCapability, SampleRate};
use soul_playback::{BitPerfectVerdict, PlaybackEvent};

/// One line per device; the current device is marked with `*`
pub fn device_line(device: &DeviceCapability, current: bool) -> String {
    format!(
        "{} {:<12} {:<32} {:>9} {:>2}-bit {}ch{}",
        if current { "*" } else { " " },
        device.id.as_str(),
        device.display_name,
        SampleRate::new(device.max_sample_rate_hz).to_string(),
        device.max_bit_depth,
        device.max_channel_count,
        if device.is_default { " (default)" } else { "" }
    )
}

/// Stream description of a file
pub fn characteristics_line(file: &AudioCharacteristics) -> String {
    format!(
        "{} / {}{} / {}ch / {}",
        SampleRate::new(file.sample_rate_hz),
        file.bit_depth,
        if file.depth_is_nominal() {
            " (nominal)"
        } else {
            ""
        },
        file.channel_count,
        file.codec
    )
}

/// Multi-line verdict summary
pub fn verdict_block(verdict: &BitPerfectVerdict) -> String {
    let mut out = format!(
        "Bit-perfect: {}\nReason:      {}",
        if verdict.is_bit_perfect { "yes" } else { "no" },
        verdict.reason
    );
    if let Some(file) = &verdict.file {
        out.push_str(&format!(
            "\nFile:        {} Hz / {}-bit{}",
            file.sample_rate_hz,
            file.bit_depth,
            if file.depth_is_nominal {
                " (nominal, not measured)"
            } else {
                ""
            }
        ));
    }
    if let Some(device) = &verdict.device {
        out.push_str(&format!(
            "\nDevice:      {} ({} Hz / {}-bit)",
            device.display_name, device.max_sample_rate_hz, device.max_bit_depth
        ));
    }
    out
}

/// One line per event; position updates are only shown on whole seconds
pub fn event_line(event: &PlaybackEvent) -> Option<String> {
    let line = match event {
        PlaybackEvent::Started { path, verdict } => {
            format!("▶ started {} [{}]", path.display(), verdict.reason)
        }
        PlaybackEvent::Paused => "⏸ paused".to_string(),
        PlaybackEvent::Resumed => "▶ resumed".to_string(),
        PlaybackEvent::Stopped => "⏹ stopped".to_string(),
        PlaybackEvent::Ended { path } => format!("⏹ ended {}", path.display()),
        PlaybackEvent::PositionChanged { seconds } => {
            if seconds.fract() != 0.0 {
                return None;
            }
            format!("  {}", clock(*seconds))
        }
        PlaybackEvent::VolumeChanged { volume } => format!("volume {:.0}%", volume * 100.0),
        PlaybackEvent::FileLoaded {
            path,
            characteristics,
            duration_seconds,
            tags,
        } => format!(
            "loaded {} ({} - {} - {}), {}, {}",
            path.display(),
            tags.artist,
            tags.album,
            tags.title,
            characteristics_line(characteristics),
            clock(*duration_seconds)
        ),
        PlaybackEvent::Error { kind, message } => format!("error ({kind:?}): {message}"),
        PlaybackEvent::ExclusiveModeChanged { exclusive } => {
            format!("exclusive mode {}", if *exclusive { "on" } else { "off" })
        }
        PlaybackEvent::DeviceChanged { id } => format!("device {id}"),
        PlaybackEvent::BitPerfectChanged { verdict } => format!("verdict: {verdict}"),
    };
    Some(line)
}

/// `m:ss` clock
pub fn clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

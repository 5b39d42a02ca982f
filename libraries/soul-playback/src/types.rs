//! Core types for playback management

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use soul_core::{AudioCharacteristics, DeviceId};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Idle; a file may or may not be loaded
    #[default]
    Stopped,

    /// Probing a file
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Track reached its end (immediately followed by Stopped)
    Ended,
}

impl PlaybackState {
    /// Lowercase state name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Position ticker period in milliseconds
    pub tick_interval_ms: u64,

    /// Request exclusive device access at startup
    pub exclusive_mode: bool,

    /// Starting volume (0.0 - 1.0)
    pub initial_volume: f32,

    /// Device to select at startup, if present
    pub preferred_device: Option<DeviceId>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            exclusive_mode: true,
            initial_volume: 1.0,
            preferred_device: None,
        }
    }
}

impl EngineConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Ticker period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Initial volume clamped to [0, 1]; NaN falls back to full volume
    pub fn clamped_volume(&self) -> f32 {
        if self.initial_volume.is_nan() {
            1.0
        } else {
            self.initial_volume.clamp(0.0, 1.0)
        }
    }
}

/// Result of a `load` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    /// File is now the session's current file
    Loaded,

    /// File was already playing; nothing changed
    AlreadyLoaded,

    /// A newer load (or a stop) overtook this one; its result was discarded
    Superseded,
}

/// Consistent copy of session state for readers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: PlaybackState,
    pub current_file: Option<PathBuf>,
    pub characteristics: Option<AudioCharacteristics>,
    pub position: Duration,
    pub duration: Duration,
    pub volume: f32,
    pub selected_device: Option<DeviceId>,
    pub exclusive_mode: bool,
}

impl SessionSnapshot {
    /// Position in seconds
    pub fn position_seconds(&self) -> f64 {
        self.position.as_secs_f64()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

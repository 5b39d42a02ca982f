/// CLI configuration
use crate::error::{BitPerfectError, Result};
use serde::{Deserialize, Serialize};
use soul_audio_desktop::HostBackend;
use soul_playback::EngineConfig;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "bitperfect.toml";

/// Prefix of environment overrides, e.g. `SOUL_ENGINE__EXCLUSIVE_MODE=false`
pub const ENV_PREFIX: &str = "SOUL";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BitPerfectConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputSettings {
    /// `virtual` (reference devices) or `system` (CPAL)
    #[serde(default)]
    pub backend: HostBackend,
}

impl BitPerfectConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `bitperfect.toml` is read
    /// if present. `SOUL_`-prefixed variables override both, with `__`
    /// between nested keys.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings =
                    settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SOUL_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.engine
            .validate()
            .map_err(|e| BitPerfectError::Config(e.to_string()))?;

        if !self.output.backend.is_available() {
            return Err(BitPerfectError::Config(format!(
                "output backend '{}' is not available in this build (enable the `system-audio` feature)",
                self.output.backend.name()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let config = BitPerfectConfig::default();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.output.backend, HostBackend::Virtual);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_tick_fails_validation() {
        let mut config = BitPerfectConfig::default();
        config.engine.tick_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(BitPerfectError::Config(_))
        ));
    }
}

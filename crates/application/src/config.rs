//! Application configuration.
//!
//! Loaded from JSON. Every field has a default, so a partial file (or no file
//! at all) is valid.

use std::path::{Path, PathBuf};

use gestureai_signs::{Language, Mode};
use gestureai_stabilizer::{Acceptance, StabilizerConfig, UnknownPolicy};
use serde::{Deserialize, Serialize};

use crate::constants::{FEEDBACK_DELAY_MS, HOLD_MS, POLL_INTERVAL_MS, SPEECH_DEBOUNCE_MS};
use crate::error::{ConfigError, Result};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub poll_interval_ms: u64,
    pub hold_ms: u64,
    pub feedback_delay_ms: u64,
    pub speech_debounce_ms: u64,
    pub unknown_policy: UnknownPolicy,
    pub language: Language,
    pub mode: Mode,
    /// Symbol bus capacity in frames.
    pub bus_capacity: usize,
    /// Speak displayed symbols automatically.
    pub auto_speak: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_MS,
            hold_ms: HOLD_MS,
            feedback_delay_ms: FEEDBACK_DELAY_MS,
            speech_debounce_ms: SPEECH_DEBOUNCE_MS,
            unknown_policy: UnknownPolicy::Reset,
            language: Language::En,
            mode: Mode::Letters,
            bus_capacity: gestureai_bus::DEFAULT_CAPACITY,
            auto_speak: true,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`default_path`](Self::default_path) when
    /// `None`. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_file(&path)
    }

    /// Load from an existing file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: AppConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |e: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Per-user config file.
    ///
    /// - macOS: ~/Library/Application Support/gestureai/config.json
    /// - Linux: ~/.config/gestureai/config.json
    /// - Windows: %APPDATA%/gestureai/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config| config.join("gestureai").join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "poll_interval_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "bus_capacity",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Stabilizer settings for the translator context.
    pub fn translator_stabilizer(&self) -> StabilizerConfig {
        StabilizerConfig::default()
            .with_hold_ms(self.hold_ms)
            .with_acceptance(Acceptance::AnySign)
            .with_unknown_policy(self.unknown_policy)
    }

    /// Stabilizer settings for the practice context (letters only).
    pub fn practice_stabilizer(&self) -> StabilizerConfig {
        StabilizerConfig::default()
            .with_hold_ms(self.hold_ms)
            .with_acceptance(Acceptance::LettersOnly)
            .with_unknown_policy(self.unknown_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.hold_ms, 1200);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"language": "AR", "hold_ms": 800, "unknown_policy": "freeze"}"#)
            .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.language, Language::Ar);
        assert_eq!(config.hold_ms, 800);
        assert_eq!(config.unknown_policy, UnknownPolicy::Freeze);
        assert_eq!(config.feedback_delay_ms, 1500);
        assert_eq!(config.mode, Mode::Letters);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"poll_interval_ms": 0}"#).unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "poll_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            mode: Mode::Words,
            auto_speak: false,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_stabilizer_configs() {
        let config = AppConfig {
            hold_ms: 900,
            ..AppConfig::default()
        };
        assert_eq!(config.translator_stabilizer().acceptance, Acceptance::AnySign);
        assert_eq!(config.practice_stabilizer().acceptance, Acceptance::LettersOnly);
        assert_eq!(config.practice_stabilizer().hold_ms, 900);
    }
}

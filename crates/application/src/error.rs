//! Error types for the application layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or saving [`AppConfig`](crate::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value '{field}': {message}")]
    Invalid { field: &'static str, message: String },

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// Errors reported by a landmark detector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectorError {
    #[error("Detector initialization failed: {0}")]
    Init(String),

    #[error("Detection failed: {0}")]
    Detect(String),

    #[error(transparent)]
    Landmarks(#[from] gestureai_landmarks::LandmarkError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

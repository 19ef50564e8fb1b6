//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (file-backed storage)
//! - `FURIAMETER_DATA_DIR` - Directory the file store keeps its JSON files in
//!
//! Tests and ephemeral tooling skip the environment entirely and build an
//! [`AppConfig`] directly.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory the file store keeps its data in.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Build a configuration with an explicit data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `FURIAMETER_DATA_DIR` is
    /// unset, or `ConfigError::InvalidEnvVar` if it is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        const DATA_DIR: &str = "FURIAMETER_DATA_DIR";

        let raw = std::env::var(DATA_DIR)
            .map_err(|_| ConfigError::MissingEnvVar(DATA_DIR.to_owned()))?;
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                DATA_DIR.to_owned(),
                "must not be empty".to_owned(),
            ));
        }
        Ok(Self::new(raw))
    }

    /// The configured data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

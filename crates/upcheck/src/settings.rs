use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("ignoring malformed settings {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,

    #[serde(default)]
    pub release_api_base: Option<String>,

    #[serde(default)]
    pub translations_file: Option<PathBuf>,
}

fn default_http_timeout() -> u64 {
    10
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            http_timeout_secs: default_http_timeout(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
            release_api_base: None,
            translations_file: None,
        }
    }
}

impl AppSettings {
    /// Read settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed; the
    /// caller decides whether to fall back to defaults and how to report it.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

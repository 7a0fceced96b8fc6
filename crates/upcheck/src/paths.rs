use std::path::PathBuf;

use thiserror::Error;

const APP_DIR: &str = "upcheck";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
}

pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the per-user directories for this platform.
    ///
    /// # Errors
    /// Returns an error when the platform exposes no config or data directory.
    pub fn new() -> Result<Self, AppPathsError> {
        Ok(Self {
            config_dir: dirs::config_dir()
                .ok_or(AppPathsError::ConfigDirUnavailable)?
                .join(APP_DIR),
            data_dir: dirs::data_dir()
                .ok_or(AppPathsError::DataDirUnavailable)?
                .join(APP_DIR),
        })
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("upcheck.log")
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)
    }
}

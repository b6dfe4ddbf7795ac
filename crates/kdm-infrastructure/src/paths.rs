//! Platform path resolution for tracker files.
//!
//! All paths are resolved through `AppPaths` from the version-migrate crate,
//! so Linux, macOS and Windows each get their conventional locations.

use std::path::PathBuf;
use version_migrate::AppPaths;

const APP_NAME: &str = "kdm-tracker";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for kdm_core::CampaignError {
    fn from(e: PathError) -> Self {
        kdm_core::CampaignError::config(e.to_string())
    }
}

/// Tracker file locations.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/kdm-tracker/       # Config directory
/// └── config.toml              # Tracker configuration
///
/// ~/.local/share/kdm-tracker/  # Data directory
/// └── storage/                 # Document store
///     └── campaign.json
/// ```
pub struct TrackerPaths;

impl TrackerPaths {
    fn app_paths() -> AppPaths {
        AppPaths::new(APP_NAME)
    }

    /// Returns the tracker configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the tracker data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default document store directory.
    pub fn storage_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage"))
    }
}

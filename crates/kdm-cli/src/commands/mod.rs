pub mod inspect;
pub mod migrate;
pub mod resolve;
pub mod versions;

use anyhow::{Context as _, Result};
use kdm_core::config::TrackerConfig;
use kdm_core::version::app_version;
use kdm_infrastructure::{ConfigService, JsonCampaignRepository};
use semver::Version;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Settings shared by every command.
pub struct Context {
    pub config: TrackerConfig,
}

impl Context {
    /// Loads `config.toml` and applies command-line overrides.
    pub fn load(config_path: Option<PathBuf>, storage_dir: Option<PathBuf>) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new().context("Failed to locate config directory")?,
        };

        let mut config = service
            .load()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;
        if storage_dir.is_some() {
            config.storage_dir = storage_dir;
        }

        Ok(Self { config })
    }

    pub fn repository(&self) -> Result<JsonCampaignRepository> {
        JsonCampaignRepository::from_config(&self.config)
            .context("Failed to open campaign storage")
    }

    /// Resolves the migration target: explicit flag, then config, then the
    /// running version.
    pub fn target(&self, explicit: Option<&str>) -> Result<Version> {
        match explicit.or(self.config.target_version.as_deref()) {
            Some(raw) => {
                Version::parse(raw).with_context(|| format!("Invalid target version '{}'", raw))
            }
            None => Ok(app_version()),
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn read_document(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

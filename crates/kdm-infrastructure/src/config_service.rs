//! Configuration service implementation.
//!
//! Loads [`TrackerConfig`] from `config.toml` (by default in the platform
//! config directory) and caches it.

use crate::paths::TrackerPaths;
use kdm_core::config::TrackerConfig;
use kdm_core::{CampaignError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the tracker configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<TrackerConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default `config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(TrackerPaths::config_file()?))
    }

    /// Creates a service reading `path` (for tests and `--config`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A file that cannot be read or parsed is logged and replaced by the
    /// defaults.
    pub fn get_config(&self) -> TrackerConfig {
        if let Ok(guard) = self.config.read() {
            if let Some(cached) = guard.as_ref() {
                return cached.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load {}: {}. Using defaults.", self.path.display(), e);
            TrackerConfig::default()
        });

        if let Ok(mut guard) = self.config.write() {
            *guard = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut guard) = self.config.write() {
            *guard = None;
        }
    }

    /// Reads the configuration file without touching the cache.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(&self) -> Result<TrackerConfig> {
        if !self.path.exists() {
            tracing::debug!("No config at {}, using defaults", self.path.display());
            return Ok(TrackerConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(TrackerConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            CampaignError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }
}

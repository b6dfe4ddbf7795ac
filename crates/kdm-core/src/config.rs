//! Tracker configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every field has a
//! default so a missing or partial file is never an error.

use crate::version::CAMPAIGN_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory of the document store. Defaults to `<data dir>/storage`.
    pub storage_dir: Option<PathBuf>,
    /// Storage key of the campaign document.
    pub campaign_key: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Migration target. Defaults to the running release version.
    pub target_version: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            campaign_key: CAMPAIGN_STORAGE_KEY.to_string(),
            log_filter: "info".to_string(),
            target_version: None,
        }
    }
}

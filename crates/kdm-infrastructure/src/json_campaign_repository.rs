//! Document-store-backed CampaignRepository implementation.

use crate::migration::{CampaignMigrator, MigrationReport};
use crate::paths::TrackerPaths;
use crate::storage::DocumentStore;
use kdm_core::campaign::Campaign;
use kdm_core::config::TrackerConfig;
use kdm_core::repository::CampaignRepository;
use kdm_core::version::app_version;
use kdm_core::{CampaignError, Result};
use semver::Version;
use serde_json::Value;

/// A repository storing the campaign as one JSON document in a [`DocumentStore`].
///
/// Responsibilities:
/// - Load/save the campaign document under its storage key
/// - Migrate loaded documents to the target version
/// - Persist the migrated document so the upgrade runs once
///
/// Does NOT:
/// - Handle file locking or atomic writes (delegated to DocumentStore)
/// - Know about individual schema versions (delegated to CampaignMigrator)
#[derive(Debug, Clone)]
pub struct JsonCampaignRepository {
    store: DocumentStore,
    key: String,
    migrator: CampaignMigrator,
    target: Version,
}

impl JsonCampaignRepository {
    /// Creates a repository over `store` targeting the running version.
    pub fn new(store: DocumentStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            migrator: CampaignMigrator::standard(),
            target: app_version(),
        }
    }

    /// Creates a repository from tracker configuration.
    ///
    /// Falls back to the platform storage directory and the running version
    /// when the configuration leaves them unset.
    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let dir = match &config.storage_dir {
            Some(dir) => dir.clone(),
            None => TrackerPaths::storage_dir()?,
        };

        let mut repository = Self::new(DocumentStore::new(dir), config.campaign_key.clone());
        if let Some(raw) = &config.target_version {
            let target = Version::parse(raw).map_err(|e| {
                CampaignError::config(format!("Invalid target_version '{}': {}", raw, e))
            })?;
            repository = repository.with_target(target);
        }
        Ok(repository)
    }

    pub fn with_target(mut self, target: Version) -> Self {
        self.target = target;
        self
    }

    pub fn with_migrator(mut self, migrator: CampaignMigrator) -> Self {
        self.migrator = migrator;
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn target(&self) -> &Version {
        &self.target
    }

    /// Loads and migrates the stored campaign, reporting what changed.
    ///
    /// Runs under the store's lock for the key. The migrated document is
    /// written back only when a step fired.
    pub fn load_with_report(&self) -> Result<Option<(Value, MigrationReport)>> {
        let loaded = self.store.modify(&self.key, |document| {
            let report = self.migrator.migrate_with_report(document, &self.target);
            let changed = !report.is_noop();
            if changed {
                tracing::info!(
                    "Persisting migrated campaign '{}' ({} -> {})",
                    self.key,
                    report.from,
                    report.to
                );
            }
            ((document.clone(), report), changed)
        })?;
        Ok(loaded)
    }

    /// Reads the stored document as-is, without migrating it.
    ///
    /// Fails with `NotFound` when nothing is stored under the key.
    pub fn load_raw(&self) -> Result<Value> {
        self.store
            .load(&self.key)?
            .ok_or_else(|| CampaignError::not_found("campaign", self.key.clone()))
    }

    /// Stores a raw document as-is, without migrating it.
    pub fn save_raw(&self, document: &Value) -> Result<()> {
        self.store.save(&self.key, document)?;
        Ok(())
    }
}

impl CampaignRepository for JsonCampaignRepository {
    fn load(&self) -> Result<Option<Value>> {
        Ok(self.load_with_report()?.map(|(document, _)| document))
    }

    fn save(&self, campaign: &Campaign) -> Result<()> {
        let mut document = serde_json::to_value(campaign)?;
        if let Some(root) = document.as_object_mut() {
            root.entry("version")
                .or_insert_with(|| Value::String(self.target.to_string()));
        }
        self.save_raw(&document)
    }
}

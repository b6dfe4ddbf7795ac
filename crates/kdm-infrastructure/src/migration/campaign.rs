//! Entry point for upgrading campaign documents.

use super::detect::{DetectedVersion, detect_version};
use super::registry::MigrationRegistry;
use super::traits::{AppliedStep, MigrationChain};
use kdm_core::monster::Bestiary;
use semver::Version;
use serde_json::Value;
use std::sync::Arc;

/// What a migration run did to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version tag before migration.
    pub from: DetectedVersion,
    /// Version tag after migration.
    pub to: DetectedVersion,
    /// Steps that fired, oldest first.
    pub applied: Vec<AppliedStep>,
}

impl MigrationReport {
    /// True when no step fired and the document is byte-for-byte unchanged.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Upgrades campaign documents to a target schema version.
///
/// Holds the step chain and the monster lookup tables the transforms
/// reconcile against. Documents are mutated in place.
#[derive(Debug, Clone)]
pub struct CampaignMigrator {
    registry: MigrationRegistry,
    bestiary: Arc<Bestiary>,
}

impl CampaignMigrator {
    pub fn new(registry: MigrationRegistry, bestiary: Arc<Bestiary>) -> Self {
        Self { registry, bestiary }
    }

    /// The standard chain against the standard bestiary.
    pub fn standard() -> Self {
        Self::new(
            super::build_campaign_registry(),
            Arc::new(Bestiary::standard().clone()),
        )
    }

    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    pub fn bestiary(&self) -> &Bestiary {
        &self.bestiary
    }

    /// Migrates `document` to `target` and hands the same reference back.
    ///
    /// Never fails: documents tagged newer than every known version, or with
    /// a tag that cannot be parsed, come back untouched.
    pub fn migrate<'a>(&self, document: &'a mut Value, target: &Version) -> &'a mut Value {
        self.migrate_with_report(document, target);
        document
    }

    /// Like [`migrate`](Self::migrate), but reports what happened.
    pub fn migrate_with_report(&self, document: &mut Value, target: &Version) -> MigrationReport {
        let from = detect_version(document);

        if !document.is_object() {
            tracing::warn!("Campaign document is not a JSON object, skipping migration");
            return MigrationReport {
                to: from.clone(),
                from,
                applied: Vec::new(),
            };
        }

        tracing::info!(
            "Migrating campaign from {} to {}",
            from.describe(self.registry.oldest_version()),
            target
        );

        let applied = self
            .registry
            .migrate_to(document, target, &self.bestiary);
        let to = detect_version(document);

        if applied.is_empty() {
            tracing::info!("Campaign left at {}", to);
        } else {
            tracing::info!("Campaign migrated to {} ({} steps)", to, applied.len());
        }

        MigrationReport { from, to, applied }
    }
}

impl Default for CampaignMigrator {
    fn default() -> Self {
        Self::standard()
    }
}

/// Migrates `document` with the standard chain and bestiary.
pub fn migrate_campaign<'a>(document: &'a mut Value, target: &Version) -> &'a mut Value {
    CampaignMigrator::standard().migrate(document, target)
}

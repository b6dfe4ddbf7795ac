//! Campaign schema migration framework.
//!
//! Campaign documents are upgraded in place, one version boundary at a time.
//! The framework ensures that:
//!
//! - Steps run in order, never skipping an intermediate version
//! - Every boundary in the lineage is registered, even when nothing changes
//! - Documents newer than, or foreign to, the known lineage are left alone
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CampaignMigrator                          │
//! │  (Detects the version, logs, reports)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  - MigrationRegistry  (0.12.0 → 0.13.0 → ... → 0.16.0)       │
//! │  - Bestiary           (nemesis / quarry lookup tables)       │
//! └─────────────────────────────────────────────────────────────┘
//!          │
//!          V
//!   MigrationStep { from, to, transform }
//!          │
//!          V
//!   transforms::* (one function per structural boundary)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use kdm_infrastructure::migration::CampaignMigrator;
//!
//! let migrator = CampaignMigrator::standard();
//! let migrated = migrator.migrate(&mut document, &kdm_core::version::app_version());
//! ```
//!
//! # Adding a Version
//!
//! 1. Write the transform in `transforms/` (or use a placeholder step)
//! 2. Append the step to [`build_campaign_registry`]
//! 3. Bump the workspace version so the chain ends at the running version

mod campaign;
mod detect;
mod json;
mod registry;
mod step;
mod traits;
pub mod transforms;

// Public API
pub use campaign::{CampaignMigrator, MigrationReport, migrate_campaign};
pub use detect::{DetectedVersion, VERSION_FIELD, detect_version, write_version};
pub use registry::MigrationRegistry;
pub use step::MigrationStep;
pub use traits::{AppliedStep, Migration, MigrationChain, Transform};

use kdm_core::version::oldest_known_version;

/// Builds the campaign migration chain, oldest boundary first.
pub fn build_campaign_registry() -> MigrationRegistry {
    let mut registry = MigrationRegistry::new(oldest_known_version());

    registry.register_all(vec![
        MigrationStep::new(
            "0.12.0",
            "0.13.0",
            "Backfill collections, settings and selections",
            transforms::backfill_defaults,
        ),
        MigrationStep::new(
            "0.13.0",
            "0.13.1",
            "Encounters hold monster lists with tiered AI decks",
            transforms::restructure_ai_decks,
        ),
        MigrationStep::new(
            "0.13.1",
            "0.14.0",
            "Survivors gain wanderer flag and color",
            transforms::backfill_survivors,
        ),
        MigrationStep::new(
            "0.14.0",
            "0.14.1",
            "Settlement monsters reference IDs instead of names",
            transforms::reconcile_settlement_monsters,
        ),
        MigrationStep::placeholder("0.14.1", "0.14.2"),
        MigrationStep::new(
            "0.14.2",
            "0.15.0",
            "Split custom monsters into nemeses and quarries",
            transforms::partition_custom_monsters,
        ),
        MigrationStep::new(
            "0.15.0",
            "0.15.1",
            "Settlement monsters carry name, node and timeline",
            transforms::denormalize_settlement_monsters,
        ),
        MigrationStep::placeholder("0.15.1", "0.15.2"),
        MigrationStep::placeholder("0.15.2", "0.16.0"),
    ]);

    registry
}

/// Builds a [`CampaignMigrator`] over the standard chain and bestiary.
pub fn build_campaign_migrator() -> CampaignMigrator {
    CampaignMigrator::standard()
}

//! Core traits for the migration framework.
//!
//! This module defines the fundamental abstractions for implementing
//! campaign schema migrations as data: a step knows its version boundary,
//! and a chain knows how to walk a document across consecutive steps.

use kdm_core::monster::Bestiary;
use semver::Version;
use serde_json::Value;

/// Structural change applied to a campaign document at one version boundary.
///
/// Transforms never fail: absent fields are defaulted and unresolvable
/// names get sentinel identifiers. The version tag is written by the chain,
/// not by the transform.
pub type Transform = fn(&mut Value, &Bestiary);

/// Base trait for all migrations.
///
/// Provides version information and metadata about a migration step.
pub trait Migration: Send + Sync {
    /// Returns the source version this migration starts from.
    fn from_version(&self) -> Version;

    /// Returns the target version this migration produces.
    fn to_version(&self) -> Version;

    /// Checks if this migration can be applied to the given version.
    fn can_migrate(&self, version: &Version) -> bool {
        version == &self.from_version()
    }

    /// Returns a human-readable description of this migration.
    ///
    /// Used for logging and debugging purposes.
    fn description(&self) -> &str;
}

/// A record of one migration step that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStep {
    pub from: Version,
    pub to: Version,
    pub description: String,
}

/// A chain of migrations that upgrades campaign documents in place.
///
/// Implementations must traverse intermediate steps in order, never skipping
/// one, and must stop when no step starts from the document's version.
pub trait MigrationChain {
    /// Migrates `document` forward until it reaches `target` or no step
    /// matches its version tag.
    ///
    /// Returns the steps that fired, in order. An empty result means the
    /// document was left untouched.
    fn migrate_to(
        &self,
        document: &mut Value,
        target: &Version,
        bestiary: &Bestiary,
    ) -> Vec<AppliedStep>;

    /// Returns the version path from `from` to the newest known version.
    ///
    /// Empty when no step starts from `from`.
    fn available_path(&self, from: &Version) -> Vec<Version>;
}

//! Migration registry for the campaign's linear migration chain.
//!
//! Steps are kept in ascending order and must form a continuous chain. A
//! single generic loop walks a document across them: while the document's
//! version matches some step's `from`, apply it and continue.

use super::detect::{detect_version, write_version};
use super::step::MigrationStep;
use super::traits::{AppliedStep, Migration, MigrationChain};
use kdm_core::monster::Bestiary;
use semver::Version;
use serde_json::Value;

/// Registry for managing a linear chain of migration steps.
///
/// Steps must form a continuous chain starting at the oldest known version:
/// 0.12.0 → 0.13.0 → 0.13.1 → ...
///
/// When adding steps via `register()`, the registry validates that each new
/// step's `from_version()` matches the previous step's `to_version()`.
///
/// # Example
///
/// ```ignore
/// let mut registry = MigrationRegistry::new(Version::parse("0.12.0")?);
/// registry.register(MigrationStep::new("0.12.0", "0.13.0", "Defaults", backfill_defaults));
/// registry.register(MigrationStep::placeholder("0.13.0", "0.13.1"));
///
/// // Cascades through both steps: 0.12.0 → 0.13.0 → 0.13.1
/// let applied = registry.migrate_to(&mut doc, &Version::parse("0.13.1")?, bestiary);
/// ```
#[derive(Debug, Clone)]
pub struct MigrationRegistry {
    /// Steps in order, forming a linear chain.
    steps: Vec<MigrationStep>,
    /// Version assumed for documents without a version tag.
    oldest_version: Version,
}

impl MigrationRegistry {
    /// Creates an empty registry whose chain starts at `oldest_version`.
    pub fn new(oldest_version: Version) -> Self {
        Self {
            steps: Vec::new(),
            oldest_version,
        }
    }

    /// Registers a single step, validating chain continuity.
    ///
    /// # Panics
    ///
    /// Panics if the step doesn't connect to the existing chain, if the first
    /// step doesn't start at the oldest version, or if the step doesn't move
    /// strictly forward.
    pub fn register(&mut self, step: MigrationStep) {
        let expected_from = self
            .steps
            .last()
            .map(|last| last.to_version())
            .unwrap_or_else(|| self.oldest_version.clone());

        assert_eq!(
            expected_from,
            step.from_version(),
            "Migration chain broken: expected step from {}, but got step from {} ('{}')",
            expected_from,
            step.from_version(),
            step.description()
        );

        assert!(
            step.to_version() > step.from_version(),
            "Migration step must move forward: {} -> {} ('{}')",
            step.from_version(),
            step.to_version(),
            step.description()
        );

        self.steps.push(step);
    }

    /// Registers multiple steps at once.
    ///
    /// The steps must be provided in order and form a continuous chain.
    ///
    /// # Panics
    ///
    /// Panics if any step breaks the chain continuity.
    pub fn register_all(&mut self, steps: Vec<MigrationStep>) {
        for step in steps {
            self.register(step);
        }
    }

    /// Returns the version assumed for untagged documents.
    pub fn oldest_version(&self) -> &Version {
        &self.oldest_version
    }

    /// Returns the newest version this chain can produce.
    pub fn latest_version(&self) -> Version {
        self.steps
            .last()
            .map(|step| step.to_version())
            .unwrap_or_else(|| self.oldest_version.clone())
    }

    /// Returns the registered steps in chain order.
    pub fn steps(&self) -> &[MigrationStep] {
        &self.steps
    }

    /// Returns true if no steps are registered.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Finds the step that starts from the given version.
    fn find_step(&self, version: &Version) -> Option<&MigrationStep> {
        self.steps.iter().find(|step| step.can_migrate(version))
    }
}

impl MigrationChain for MigrationRegistry {
    fn migrate_to(
        &self,
        document: &mut Value,
        target: &Version,
        bestiary: &Bestiary,
    ) -> Vec<AppliedStep> {
        let mut applied = Vec::new();

        if !document.is_object() {
            return applied;
        }

        loop {
            let detected = detect_version(document);
            let Some(current) = detected.effective(&self.oldest_version) else {
                tracing::debug!("Unrecognized campaign version {}, leaving as-is", detected);
                break;
            };

            if &current >= target {
                break;
            }

            let Some(step) = self.find_step(&current) else {
                tracing::debug!("No migration step starts from {}", current);
                break;
            };

            tracing::info!(
                "Migration step {} -> {} ({})",
                step.from_version(),
                step.to_version(),
                step.description()
            );

            step.apply(document, bestiary);
            write_version(document, &step.to_version());

            applied.push(AppliedStep {
                from: step.from_version(),
                to: step.to_version(),
                description: step.description().to_string(),
            });
        }

        applied
    }

    fn available_path(&self, from: &Version) -> Vec<Version> {
        let Some(start_idx) = self.steps.iter().position(|step| step.can_migrate(from)) else {
            return vec![];
        };

        let mut path = vec![from.clone()];
        path.extend(self.steps[start_idx..].iter().map(|step| step.to_version()));
        path
    }
}

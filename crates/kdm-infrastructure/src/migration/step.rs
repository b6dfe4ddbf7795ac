//! A single version boundary of the campaign migration chain.

use super::traits::{Migration, Transform};
use kdm_core::monster::Bestiary;
use semver::Version;
use serde_json::Value;

/// One `(from, transform, to)` entry of the migration chain.
///
/// A step without a transform is a placeholder: it only advances the version
/// tag, keeping the full version lineage explicit.
#[derive(Debug, Clone)]
pub struct MigrationStep {
    from: Version,
    to: Version,
    description: &'static str,
    transform: Option<Transform>,
}

impl MigrationStep {
    /// Creates a step that applies `transform` at the `from → to` boundary.
    ///
    /// # Panics
    ///
    /// Panics if either version is not valid semver. Versions are literals
    /// in the chain definition, so this is a programming error.
    pub fn new(from: &str, to: &str, description: &'static str, transform: Transform) -> Self {
        Self {
            from: Version::parse(from).expect("Invalid migration source version"),
            to: Version::parse(to).expect("Invalid migration target version"),
            description,
            transform: Some(transform),
        }
    }

    /// Creates a step that performs no structural change.
    pub fn placeholder(from: &str, to: &str) -> Self {
        Self {
            from: Version::parse(from).expect("Invalid migration source version"),
            to: Version::parse(to).expect("Invalid migration target version"),
            description: "No structural change",
            transform: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.transform.is_none()
    }

    /// Runs the transform, if any. Does not touch the version tag.
    pub fn apply(&self, document: &mut Value, bestiary: &Bestiary) {
        if let Some(transform) = self.transform {
            transform(document, bestiary);
        }
    }
}

impl Migration for MigrationStep {
    fn from_version(&self) -> Version {
        self.from.clone()
    }

    fn to_version(&self) -> Version {
        self.to.clone()
    }

    fn description(&self) -> &str {
        self.description
    }
}

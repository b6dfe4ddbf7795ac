//! Version detection for campaign documents.

use semver::Version;
use serde_json::Value;
use std::fmt;

/// Field holding the schema version tag.
pub const VERSION_FIELD: &str = "version";

/// What a document says about its own schema version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedVersion {
    /// No tag (the oldest documents never had one).
    Absent,
    /// A valid semver tag.
    Known(Version),
    /// A tag that is not semver, or a document that is not a JSON object.
    Unrecognized(String),
}

impl DetectedVersion {
    /// The version used for step matching; absent tags count as `oldest`.
    pub fn effective(&self, oldest: &Version) -> Option<Version> {
        match self {
            DetectedVersion::Absent => Some(oldest.clone()),
            DetectedVersion::Known(version) => Some(version.clone()),
            DetectedVersion::Unrecognized(_) => None,
        }
    }

    /// Renders the version for logs, showing an absent tag as `oldest`.
    pub fn describe(&self, oldest: &Version) -> String {
        match self {
            DetectedVersion::Absent => format!("{} (untagged)", oldest),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for DetectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedVersion::Absent => f.write_str("<untagged>"),
            DetectedVersion::Known(version) => write!(f, "{}", version),
            DetectedVersion::Unrecognized(raw) => write!(f, "{} (unrecognized)", raw),
        }
    }
}

/// Reads the version tag of `document` without modifying it.
pub fn detect_version(document: &Value) -> DetectedVersion {
    let Some(root) = document.as_object() else {
        return DetectedVersion::Unrecognized(format!("<{} document>", json_kind(document)));
    };

    match root.get(VERSION_FIELD) {
        None | Some(Value::Null) => DetectedVersion::Absent,
        Some(Value::String(raw)) => match Version::parse(raw.trim()) {
            Ok(version) => DetectedVersion::Known(version),
            Err(_) => DetectedVersion::Unrecognized(raw.clone()),
        },
        Some(other) => DetectedVersion::Unrecognized(other.to_string()),
    }
}

/// Writes `version` into the document's tag. Non-object documents are left alone.
pub fn write_version(document: &mut Value, version: &Version) {
    if let Some(root) = document.as_object_mut() {
        root.insert(VERSION_FIELD.to_string(), Value::String(version.to_string()));
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Campaign schema version constants.

use semver::Version;

/// The running software's release version, read from build metadata.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The oldest campaign schema the migration chain understands.
///
/// Documents without a `version` tag are treated as this version.
pub const OLDEST_KNOWN_VERSION: &str = "0.12.0";

/// Key of the campaign document in client-side storage.
pub const CAMPAIGN_STORAGE_KEY: &str = "campaign";

/// Returns [`APP_VERSION`] as a parsed version.
pub fn app_version() -> Version {
    Version::parse(APP_VERSION).expect("Invalid CARGO_PKG_VERSION")
}

/// Returns [`OLDEST_KNOWN_VERSION`] as a parsed version.
pub fn oldest_known_version() -> Version {
    Version::parse(OLDEST_KNOWN_VERSION).expect("Invalid OLDEST_KNOWN_VERSION")
}

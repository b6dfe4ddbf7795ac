pub mod campaign;
pub mod config;
pub mod error;
pub mod monster;
pub mod repository;
pub mod version;

// Re-export common error type
pub use error::{CampaignError, Result};
pub use repository::CampaignRepository;
pub use version::{APP_VERSION, CAMPAIGN_STORAGE_KEY, OLDEST_KNOWN_VERSION};

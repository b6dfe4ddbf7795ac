pub mod config_service;
pub mod json_campaign_repository;
pub mod migration;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_campaign_repository::JsonCampaignRepository;
pub use crate::migration::{CampaignMigrator, MigrationReport, migrate_campaign};
pub use crate::storage::{DocumentStore, StorageError, write_atomic};

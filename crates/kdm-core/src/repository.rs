//! Campaign persistence abstraction.

use crate::campaign::Campaign;
use crate::error::Result;
use serde_json::Value;

/// Storage of the single campaign document.
///
/// Implementations are expected to hand out documents already migrated to
/// the current schema.
pub trait CampaignRepository: Send + Sync {
    /// Loads the stored campaign as raw JSON.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Value))`: The migrated campaign document
    /// - `Ok(None)`: Nothing stored yet
    /// - `Err(CampaignError)`: Error if retrieval fails
    fn load(&self) -> Result<Option<Value>>;

    /// Loads the stored campaign and decodes it.
    fn load_typed(&self) -> Result<Option<Campaign>> {
        match self.load()? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    /// Saves `campaign`, replacing the stored document.
    fn save(&self, campaign: &Campaign) -> Result<()>;
}

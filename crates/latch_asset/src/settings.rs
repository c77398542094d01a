//! Asset pipeline settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Queued container loads completed per [`update`](crate::AssetRegistry::update).
    /// `0` completes everything that is queued.
    pub loads_per_update: usize,
}

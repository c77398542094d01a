use crate::AssetId;
use thiserror::Error;

/// Errors raised at the edges of the asset pipeline (registry, loaders, parsing).
///
/// Binding itself never fails: a missing container or render entry is treated
/// as "not available yet" rather than as an error.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{id}' is already registered")]
    DuplicateAsset { id: AssetId },

    #[error("asset '{id}' not found")]
    NotFound { id: AssetId },

    #[error("invalid data for asset '{id}': {source}")]
    InvalidData {
        id: AssetId,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid event key '{key}'")]
    InvalidEventKey { key: String },

    #[error("failed to load asset '{id}': {reason}")]
    LoadFailed { id: AssetId, reason: String },
}

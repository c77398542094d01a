//! Resource handlers
//!
//! The asset framework creates a resource with `open` and then calls `patch`
//! so the handler can resolve the asset's dependencies.

use crate::{
    binder, AssetError, AssetId, AssetStore, RenderAsset, RenderAssetData, RenderAssetRef,
    RenderResource,
};

pub trait ResourceHandler {
    type Resource;
    type Asset;

    /// Create the (empty) runtime resource for an asset.
    fn open(&self, locator: &str, config: &serde_json::Value) -> Self::Resource;

    /// Resolve the asset's dependencies against `store`.
    fn patch(&self, asset: &Self::Asset, store: &dyn AssetStore);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderHandler;

impl RenderHandler {
    /// Parse a render asset description and open its resource.
    pub fn instantiate(
        &self,
        id: AssetId,
        config: &serde_json::Value,
    ) -> Result<RenderAssetRef, AssetError> {
        let data = RenderAssetData::from_value(&id, config)?;
        let resource = self.open(id.as_str(), config);
        Ok(RenderAsset::new(id, data, Some(resource)).into_ref())
    }
}

impl ResourceHandler for RenderHandler {
    type Resource = RenderResource;
    type Asset = RenderAssetRef;

    fn open(&self, _locator: &str, _config: &serde_json::Value) -> RenderResource {
        RenderResource::new()
    }

    fn patch(&self, asset: &RenderAssetRef, store: &dyn AssetStore) {
        binder::bind(asset, store);
    }
}

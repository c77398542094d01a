//! Container loaders

use crate::{AssetError, AssetId, ContainerAsset, ContainerData, ContainerResource};
use std::collections::HashMap;

/// Produces the resource of a container asset.
pub trait ContainerLoader {
    fn load(&self, asset: &ContainerAsset) -> Result<ContainerResource, AssetError>;
}

/// Serves container contents registered up front, keyed by asset id.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    sources: HashMap<AssetId, ContainerData>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AssetId, data: ContainerData) {
        self.sources.insert(id, data);
    }

    pub fn with(mut self, id: AssetId, data: ContainerData) -> Self {
        self.insert(id, data);
        self
    }
}

impl ContainerLoader for MemoryLoader {
    fn load(&self, asset: &ContainerAsset) -> Result<ContainerResource, AssetError> {
        let data = self.sources.get(asset.id()).ok_or_else(|| AssetError::NotFound {
            id: asset.id().clone(),
        })?;
        if data.renders.is_empty() {
            return Err(AssetError::LoadFailed {
                id: asset.id().clone(),
                reason: "container has no renders".to_string(),
            });
        }
        Ok(ContainerResource::from_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mesh, RenderData};

    #[test]
    fn test_loads_registered_data() {
        let id = AssetId::from("C1");
        let data = ContainerData {
            renders: vec![RenderData {
                meshes: Some(vec![Mesh::new("m1")]),
            }],
        };
        let loader = MemoryLoader::new().with(id.clone(), data);

        let resource = loader.load(&ContainerAsset::new(id, "c1.glb")).unwrap();
        assert_eq!(resource.render_meshes(0).map(|meshes| meshes.len()), Some(1));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let loader = MemoryLoader::new();
        let err = loader.load(&ContainerAsset::new(AssetId::from("C1"), "c1.glb"));
        assert!(matches!(err, Err(AssetError::NotFound { .. })));
    }

    #[test]
    fn test_empty_container_fails_validation() {
        let id = AssetId::from("C1");
        let loader = MemoryLoader::new().with(id.clone(), ContainerData { renders: vec![] });

        let err = loader.load(&ContainerAsset::new(id.clone(), "c1.glb"));
        match err {
            Err(AssetError::LoadFailed { id: failed, .. }) => assert_eq!(failed, id),
            other => panic!("expected LoadFailed, got {other:?}"),
        }
    }
}

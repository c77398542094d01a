//! Container assets
//!
//! A container is a bundled resource (an imported scene file) owning an
//! ordered list of render entries. Render assets alias the meshes of one entry.

use crate::{AssetId, Mesh, RenderResource, SharedMeshes};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// One entry of a container's render list.
#[derive(Debug, Default)]
pub struct ContainerRender {
    pub resource: Option<RenderResource>,
}

impl ContainerRender {
    pub fn meshes(&self) -> Option<&SharedMeshes> {
        self.resource.as_ref().and_then(RenderResource::meshes)
    }
}

/// Loaded payload of a container asset.
#[derive(Debug, Default)]
pub struct ContainerResource {
    pub renders: Vec<ContainerRender>,
}

impl ContainerResource {
    /// Build a resource with freshly allocated mesh lists.
    pub fn from_data(data: &ContainerData) -> Self {
        let renders = data
            .renders
            .iter()
            .map(|render| ContainerRender {
                resource: render
                    .meshes
                    .as_ref()
                    .map(|meshes| RenderResource::with_meshes(Rc::from(meshes.as_slice()))),
            })
            .collect();

        Self { renders }
    }

    /// Meshes of the render entry at `index`, if that entry exists and is populated.
    pub fn render_meshes(&self, index: usize) -> Option<&SharedMeshes> {
        self.renders.get(index).and_then(ContainerRender::meshes)
    }
}

/// Serialized container contents, as produced by the import step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerData {
    #[serde(default)]
    pub renders: Vec<RenderData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderData {
    #[serde(default)]
    pub meshes: Option<Vec<Mesh>>,
}

/// A container asset as tracked by the registry.
#[derive(Debug)]
pub struct ContainerAsset {
    id: AssetId,
    url: String,
    pub(crate) resource: Option<ContainerResource>,
    pub(crate) loading: bool,
}

pub type ContainerRef = Rc<RefCell<ContainerAsset>>;

impl ContainerAsset {
    pub fn new(id: AssetId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            resource: None,
            loading: false,
        }
    }

    /// Create an asset whose resource is already present.
    pub fn loaded(id: AssetId, url: impl Into<String>, resource: ContainerResource) -> Self {
        let mut asset = Self::new(id, url);
        asset.resource = Some(resource);
        asset
    }

    pub fn into_ref(self) -> ContainerRef {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn id(&self) -> &AssetId {
        &self.id
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn resource(&self) -> Option<&ContainerResource> {
        self.resource.as_ref()
    }

    pub fn set_resource(&mut self, resource: Option<ContainerResource>) {
        self.resource = resource;
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.resource.is_some()
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

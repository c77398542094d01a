//! Render resources and render assets

use crate::{AssetError, AssetId, Subscriptions};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Geometry buffer owned by a container and aliased by render resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    #[serde(default)]
    pub positions: Vec<Vec3>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Mesh list shared between a container entry and every resource bound to it.
///
/// Binding clones the `Rc`, never the meshes; compare with [`Rc::ptr_eq`].
pub type SharedMeshes = Rc<[Mesh]>;

/// Runtime object wrapped by a render asset.
#[derive(Debug, Default)]
pub struct RenderResource {
    meshes: Option<SharedMeshes>,
    assignments: u32,
}

impl RenderResource {
    /// Create an empty resource with no meshes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meshes(meshes: SharedMeshes) -> Self {
        let mut resource = Self::new();
        resource.set_meshes(Some(meshes));
        resource
    }

    pub fn meshes(&self) -> Option<&SharedMeshes> {
        self.meshes.as_ref()
    }

    pub fn set_meshes(&mut self, meshes: Option<SharedMeshes>) {
        if meshes.is_some() {
            self.assignments += 1;
        }
        self.meshes = meshes;
    }

    /// Number of times a mesh list has been assigned.
    pub fn assignment_count(&self) -> u32 {
        self.assignments
    }

    /// Release this resource's alias of its mesh list.
    ///
    /// The meshes themselves stay alive for as long as any other owner
    /// (usually the container) still references them.
    pub fn destroy(&mut self) {
        self.meshes = None;
    }
}

/// Serialized description of a render asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderAssetData {
    /// Container whose render list holds the meshes. `None` means the asset
    /// has no dependency and stays unbound.
    #[serde(default)]
    pub container_asset: Option<AssetId>,
    #[serde(default)]
    pub render_index: usize,
}

impl RenderAssetData {
    /// Parse asset data. `null` (no data at all) yields the defaults.
    pub fn from_value(id: &AssetId, value: &serde_json::Value) -> Result<Self, AssetError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(value).map_err(|source| AssetError::InvalidData {
            id: id.clone(),
            source,
        })
    }
}

/// Binding progress of a render asset against its container.
///
/// ```text
/// Unbound -> WaitingForContainerAsset -> WaitingForContainerLoad -> Bound -> Destroyed
/// ```
///
/// Either waiting state can jump straight to `Bound` when the container is
/// already loaded. `Destroyed` is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BindState {
    Unbound,
    WaitingForContainerAsset,
    WaitingForContainerLoad,
    Bound,
    Destroyed,
}

/// A render asset: container reference, render index and (once opened) its resource.
#[derive(Debug)]
pub struct RenderAsset {
    id: AssetId,
    data: RenderAssetData,
    pub resource: Option<RenderResource>,
    pub(crate) state: BindState,
    pub(crate) subscriptions: Subscriptions,
}

pub type RenderAssetRef = Rc<RefCell<RenderAsset>>;

impl RenderAsset {
    pub fn new(id: AssetId, data: RenderAssetData, resource: Option<RenderResource>) -> Self {
        Self {
            id,
            data,
            resource,
            state: BindState::Unbound,
            subscriptions: Subscriptions::new(),
        }
    }

    pub fn into_ref(self) -> RenderAssetRef {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn id(&self) -> &AssetId {
        &self.id
    }

    #[inline]
    pub fn data(&self) -> &RenderAssetData {
        &self.data
    }

    #[inline]
    pub fn container_asset(&self) -> Option<&AssetId> {
        self.data.container_asset.as_ref()
    }

    #[inline]
    pub fn render_index(&self) -> usize {
        self.data.render_index
    }

    /// Point this asset at another container entry. Takes effect on the next bind.
    pub fn set_data(&mut self, data: RenderAssetData) {
        self.data = data;
    }

    #[inline]
    pub fn state(&self) -> BindState {
        self.state
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// Meshes currently bound to this asset's resource.
    pub fn meshes(&self) -> Option<&SharedMeshes> {
        self.resource.as_ref().and_then(RenderResource::meshes)
    }
}

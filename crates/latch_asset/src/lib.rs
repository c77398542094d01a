//! Latch Asset Pipeline
//!
//! Asset registry, container loading, and render asset binding.
//!
//! A render asset is a lightweight descriptor pointing at one entry of a
//! container asset (an imported scene file). The container owns the mesh
//! data; the render asset's resource aliases it once both are available.
//! Binding is driven entirely by registry events (`add:<id>`, `load:<id>`,
//! `remove:<id>`), so the two assets can arrive in any order.
//!
//! # Usage
//!
//! ```ignore
//! use latch_asset::{AssetRegistry, ContainerAsset, MemoryLoader, RenderHandler};
//!
//! let registry = AssetRegistry::new(Box::new(loader));
//! let render = RenderHandler.instantiate("R1".into(), &json!({ "containerAsset": "C1" }))?;
//! RenderHandler.patch(&render, &registry);
//!
//! registry.add(ContainerAsset::new("C1".into(), "scene.glb"))?;
//! registry.update(); // completes the load, render is now bound
//! ```

pub mod binder;
pub mod bus;
pub mod container;
pub mod error;
pub mod event;
pub mod handler;
pub mod id;
pub mod loader;
pub mod registry;
pub mod render;
pub mod settings;
pub mod store;
pub mod subscription;

pub use binder::{bind, unbind};
pub use bus::{listener, EventBus, Listener, ListenerId};
pub use container::{
    ContainerAsset, ContainerData, ContainerRef, ContainerRender, ContainerResource, RenderData,
};
pub use error::AssetError;
pub use event::{AssetEvent, EventKey};
pub use handler::{RenderHandler, ResourceHandler};
pub use id::AssetId;
pub use loader::{ContainerLoader, MemoryLoader};
pub use registry::AssetRegistry;
pub use render::{
    BindState, Mesh, RenderAsset, RenderAssetData, RenderAssetRef, RenderResource, SharedMeshes,
};
pub use settings::AssetSettings;
pub use store::AssetStore;
pub use subscription::{Delivery, Subscriptions};

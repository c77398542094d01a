//! Replays a manifest's event script against a live asset registry

use crate::manifest::Manifest;
use anyhow::{bail, Context, Result};
use latch_asset::{
    AssetEvent, AssetId, AssetRegistry, BindState, ContainerAsset, EventKey, MemoryLoader, Mesh,
    RenderAssetRef, RenderHandler, ResourceHandler,
};

/// Final binding state of one render asset.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub id: AssetId,
    pub state: BindState,
    pub mesh_count: usize,
    pub triangle_count: usize,
}

pub struct Scenario {
    manifest: Manifest,
    registry: AssetRegistry,
    renders: Vec<RenderAssetRef>,
}

impl Scenario {
    /// Build the registry and open + patch every render asset of the manifest.
    pub fn new(manifest: Manifest) -> Result<Self> {
        let mut loader = MemoryLoader::new();
        for entry in &manifest.containers {
            loader.insert(entry.id.clone(), entry.data.clone());
        }
        let registry = AssetRegistry::with_settings(Box::new(loader), manifest.settings.clone());

        let handler = RenderHandler;
        let mut renders = Vec::with_capacity(manifest.renders.len());
        for entry in &manifest.renders {
            let render = handler
                .instantiate(entry.id.clone(), &entry.data)
                .with_context(|| format!("failed to open render asset '{}'", entry.id))?;
            handler.patch(&render, &registry);
            renders.push(render);
        }

        Ok(Self {
            manifest,
            registry,
            renders,
        })
    }

    /// Apply one script step.
    pub fn step(&self, step: &str) -> Result<()> {
        let key: EventKey = step.parse()?;
        tracing::info!("Step {}", key);

        match key.event {
            AssetEvent::Add => {
                let entry = self
                    .manifest
                    .container(&key.id)
                    .with_context(|| format!("container '{}' is not in the manifest", key.id))?;
                self.registry
                    .add(ContainerAsset::new(entry.id.clone(), entry.url.clone()))?;
            }
            AssetEvent::Load => {
                if !self.registry.finish_load(&key.id)? {
                    tracing::warn!("No load queued for '{}'", key.id);
                }
            }
            AssetEvent::Remove => {
                if self.registry.remove(&key.id).is_none() {
                    tracing::warn!("Container '{}' is not registered", key.id);
                }
            }
            AssetEvent::Error => bail!("'{}' cannot be scripted", key),
        }
        Ok(())
    }

    pub fn run(&self) -> Result<()> {
        for step in &self.manifest.script {
            self.step(step)?;
        }
        // Anything queued but not explicitly completed by the script.
        self.registry.update();
        Ok(())
    }

    pub fn reports(&self) -> Vec<RenderReport> {
        self.renders
            .iter()
            .map(|render| {
                let render = render.borrow();
                let meshes = render.meshes().map(|meshes| &meshes[..]).unwrap_or(&[]);
                RenderReport {
                    id: render.id().clone(),
                    state: render.state(),
                    mesh_count: meshes.len(),
                    triangle_count: meshes.iter().map(Mesh::triangle_count).sum(),
                }
            })
            .collect()
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }
}

impl Drop for Scenario {
    fn drop(&mut self) {
        for render in &self.renders {
            latch_asset::unbind(render, &self.registry);
        }
    }
}

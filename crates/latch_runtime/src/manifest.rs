//! Scene manifest: containers, render assets and the event script to replay

use anyhow::{Context, Result};
use latch_asset::{AssetId, AssetSettings, ContainerData};
use serde::Deserialize;
use std::path::Path;

/// Manifest used when no path is given on the command line.
pub const DEMO_MANIFEST: &str = include_str!("../assets/demo_manifest.json");

#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub settings: AssetSettings,
    #[serde(default)]
    pub containers: Vec<ContainerEntry>,
    #[serde(default)]
    pub renders: Vec<RenderEntry>,
    /// Event keys replayed in order: `add:<id>`, `load:<id>`, `remove:<id>`.
    #[serde(default)]
    pub script: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContainerEntry {
    pub id: AssetId,
    pub url: String,
    #[serde(default)]
    pub data: ContainerData,
}

#[derive(Debug, Deserialize)]
pub struct RenderEntry {
    pub id: AssetId,
    /// Raw render asset data, parsed by the render handler.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Manifest {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse manifest")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("in {}", path.display()))
    }

    pub fn demo() -> Result<Self> {
        Self::parse(DEMO_MANIFEST)
    }

    pub fn container(&self, id: &AssetId) -> Option<&ContainerEntry> {
        self.containers.iter().find(|entry| &entry.id == id)
    }
}

//! Latch Engine Runtime
//!
//! Loads a scene manifest, replays its asset event script and reports how
//! each render asset ended up bound.
//!
//! Usage: `latch [manifest.json]` (defaults to the built-in demo manifest)

mod manifest;
mod scenario;

use anyhow::Result;
use manifest::Manifest;
use scenario::Scenario;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Latch Engine v{}", env!("CARGO_PKG_VERSION"));

    let manifest = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            tracing::info!("Loading manifest {}", path.display());
            Manifest::from_path(&path)?
        }
        None => {
            tracing::info!("No manifest given, using demo manifest");
            Manifest::demo()?
        }
    };

    let scenario = Scenario::new(manifest)?;
    scenario.run()?;

    for report in scenario.reports() {
        tracing::info!(
            "Render asset '{}': {:?} ({} meshes, {} triangles)",
            report.id,
            report.state,
            report.mesh_count,
            report.triangle_count
        );
    }

    Ok(())
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::TerrainConfig;
use crate::error::Result;
use crate::generator::BathymetryGenerator;
use crate::grid::Region;
use crate::heightmap::{HeightmapKind, HeightmapTerrain};

/// Anything that can answer "how deep is the seabed here?".
/// Heights are metres, negative below datum. Implementations must be total
/// and cheap enough to call per frame.
pub trait TerrainHeightSource: Send + Sync {
    fn terrain_height(&self, x: f64, z: f64) -> f64;

    /// Alias kept for physics and depth-gauge callers.
    fn seabed_height(&self, x: f64, z: f64) -> f64 {
        self.terrain_height(x, z)
    }

    fn name(&self) -> &'static str;
}

/// Which backend a session uses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    #[default]
    Procedural,
    Noaa { path: PathBuf, region: Region },
    RealBathymetry { path: PathBuf, region: Region },
}

pub fn open_source(backend: &BackendConfig, terrain: &TerrainConfig) -> Result<Box<dyn TerrainHeightSource>> {
    let source: Box<dyn TerrainHeightSource> = match backend {
        BackendConfig::Procedural => Box::new(BathymetryGenerator::new(terrain.clone())?),
        BackendConfig::Noaa { path, region } => open_heightmap(path, *region, HeightmapKind::Noaa)?,
        BackendConfig::RealBathymetry { path, region } => open_heightmap(path, *region, HeightmapKind::RealBathymetry)?,
    };
    tracing::debug!(backend = source.name(), "terrain source ready");
    Ok(source)
}

fn open_heightmap(path: &Path, region: Region, kind: HeightmapKind) -> Result<Box<dyn TerrainHeightSource>> {
    let terrain = HeightmapTerrain::open(path, region, kind)?;
    let r = terrain.region();
    tracing::info!(
        kind = terrain.kind().name(),
        x_min = r.x_min,
        x_max = r.x_max,
        z_min = r.z_min,
        z_max = r.z_max,
        "heightmap covers region"
    );
    Ok(Box::new(terrain))
}

pub mod config;
pub mod error;
pub mod features;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod heightmap;
pub mod layers;
pub mod render;
pub mod rng;
pub mod source;

use std::time::Instant;

use rayon::prelude::*;

pub use config::TerrainConfig;
pub use error::{Result, TerrainError};
pub use generator::{BathymetryGenerator, LayerBreakdown};
pub use geometry::WorldPoint;
pub use grid::{Grid, Region};
pub use layers::Province;
pub use source::{BackendConfig, TerrainHeightSource, open_source};

use heightmap::HeightmapKind;

/// A rasterised look at one region of the seabed.
pub struct Survey {
    pub w: usize,
    pub h: usize,
    pub region: Region,
    pub height: Grid<f32>,
    pub province: Grid<u8>,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Sample any backend on a w×h raster of pixel centres, rows in parallel.
pub fn sample_heights(source: &dyn TerrainHeightSource, region: &Region, w: usize, h: usize) -> Grid<f32> {
    let mut height = Grid::<f32>::new(w, h);
    height.data.par_chunks_mut(w.max(1)).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            let (wx, wz) = region.world_at(x, y, w, h);
            *cell = source.terrain_height(wx, wz) as f32;
        }
    });
    height
}

pub fn classify_region(generator: &BathymetryGenerator, region: &Region, w: usize, h: usize) -> Grid<u8> {
    let mut province = Grid::<u8>::new(w, h);
    // Provinces depend on x only: classify one row, copy it down.
    let first: Vec<u8> = (0..w)
        .map(|x| {
            let (wx, _) = region.world_at(x, 0, w, h);
            render::province_code(generator.province_at(wx))
        })
        .collect();
    for row in province.data.chunks_mut(w.max(1)) {
        row.copy_from_slice(&first);
    }
    province
}

pub fn survey(generator: &BathymetryGenerator, region: Region, w: usize, h: usize) -> (Survey, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let t = Instant::now();
    let province = classify_region(generator, &region, w, h);
    timings.push(Timing {
        name: "provinces",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let height = sample_heights(generator, &region, w, h);
    timings.push(Timing {
        name: "heights",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let cell = ((region.x_max - region.x_min) / w.max(1) as f64) as f32;
    let rgba = render::render_bathymetry(&height, cell);
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });
    for timing in &timings {
        tracing::debug!(phase = timing.name, ms = timing.ms, "survey phase");
    }

    let survey = Survey {
        w,
        h,
        region,
        height,
        province,
        rgba,
    };

    (survey, timings)
}

impl Survey {
    /// Grayscale PNG payload in the NOAA brightness convention.
    pub fn depth_brightness(&self) -> image::GrayImage {
        render::encode_depth_brightness(&self.height, &HeightmapKind::Noaa.curve())
    }
}

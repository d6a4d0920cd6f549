//! Image-derived seabeds. A grayscale PNG covers a world `Region`; pixel
//! brightness maps to height through a backend-specific piecewise-linear curve.

use std::path::Path;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::{Grid, Region};
use crate::source::TerrainHeightSource;

/// Sorted (brightness, height) knots. Brightness is 0–255, height in metres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrightnessCurve {
    knots: Vec<(f32, f32)>,
}

impl BrightnessCurve {
    pub fn new(knots: Vec<(f32, f32)>) -> Result<Self> {
        if knots.len() < 2 {
            return Err(TerrainError::InvalidConfig("brightness curve needs at least two knots".into()));
        }
        for pair in knots.windows(2) {
            let ((b0, h0), (b1, h1)) = (pair[0], pair[1]);
            if !(b1 > b0) || h1 < h0 {
                return Err(TerrainError::InvalidConfig(format!(
                    "brightness curve must rise in both brightness and height ({b0},{h0}) -> ({b1},{h1})"
                )));
            }
        }
        Ok(Self { knots })
    }

    pub fn knots(&self) -> &[(f32, f32)] {
        &self.knots
    }

    /// Height for a brightness value, clamped to the end knots.
    pub fn height(&self, brightness: f32) -> f32 {
        interpolate(&self.knots, brightness, |k| k.0, |k| k.1)
    }

    /// Inverse mapping used when writing a survey out as a heightmap.
    pub fn brightness(&self, height: f32) -> f32 {
        interpolate(&self.knots, height, |k| k.1, |k| k.0)
    }
}

fn interpolate(knots: &[(f32, f32)], v: f32, key: impl Fn(&(f32, f32)) -> f32, out: impl Fn(&(f32, f32)) -> f32) -> f32 {
    let first = &knots[0];
    let last = &knots[knots.len() - 1];
    if v <= key(first) {
        return out(first);
    }
    if v >= key(last) {
        return out(last);
    }
    for pair in knots.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if v <= key(b) {
            let span = key(b) - key(a);
            let t = if span > 0.0 { (v - key(a)) / span } else { 0.0 };
            return out(a) + (out(b) - out(a)) * t;
        }
    }
    out(last)
}

/// Which brightness convention an image follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightmapKind {
    /// NOAA/GEBCO grayscale export: full trench-depth range.
    Noaa,
    /// Satellite-derived imagery: compressed to abyssal depths.
    RealBathymetry,
}

impl HeightmapKind {
    pub fn curve(self) -> BrightnessCurve {
        let knots = match self {
            HeightmapKind::Noaa => vec![
                (0.0, -11_000.0),
                (40.0, -8_000.0),
                (90.0, -6_000.0),
                (160.0, -4_000.0),
                (220.0, -1_000.0),
                (250.0, -100.0),
                (255.0, 0.0),
            ],
            HeightmapKind::RealBathymetry => vec![
                (0.0, -6_500.0),
                (60.0, -5_000.0),
                (120.0, -3_000.0),
                (180.0, -1_000.0),
                (230.0, -200.0),
                (255.0, 0.0),
            ],
        };
        BrightnessCurve { knots }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeightmapKind::Noaa => "noaa",
            HeightmapKind::RealBathymetry => "real_bathymetry",
        }
    }
}

pub struct HeightmapTerrain {
    brightness: Grid<f32>,
    region: Region,
    curve: BrightnessCurve,
    kind: HeightmapKind,
}

impl HeightmapTerrain {
    pub fn open(path: impl AsRef<Path>, region: Region, kind: HeightmapKind) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?.to_luma8();
        tracing::debug!(path = %path.display(), w = img.width(), h = img.height(), kind = kind.name(), "heightmap loaded");
        Self::from_image(&img, region, kind)
    }

    pub fn from_image(img: &GrayImage, region: Region, kind: HeightmapKind) -> Result<Self> {
        let (w, h) = (img.width() as usize, img.height() as usize);
        let data = img.as_raw().iter().map(|&b| b as f32).collect();
        Self::from_grid(Grid { data, w, h }, region, kind, kind.curve())
    }

    pub fn from_grid(brightness: Grid<f32>, region: Region, kind: HeightmapKind, curve: BrightnessCurve) -> Result<Self> {
        if brightness.w == 0 || brightness.h == 0 {
            return Err(TerrainError::EmptyHeightmap);
        }
        Ok(Self { brightness, region, curve, kind })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn kind(&self) -> HeightmapKind {
        self.kind
    }
}

impl TerrainHeightSource for HeightmapTerrain {
    fn terrain_height(&self, x: f64, z: f64) -> f64 {
        let (px, py) = self.region.pixel_at(x, z, self.brightness.w, self.brightness.h);
        let b = self.brightness.sample_bilinear(px, py);
        self.curve.height(b) as f64
    }

    fn name(&self) -> &'static str {
        self.kind.name()
    }
}

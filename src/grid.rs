use serde::{Deserialize, Serialize};

/// Row-major flat grid. No per-cell objects, f32 friendly.
/// Row `y` runs along world z, column `x` along world x.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Edge-clamped lookup for signed coordinates.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> T {
        let cx = x.clamp(0, self.w as i64 - 1) as usize;
        let cy = y.clamp(0, self.h as i64 - 1) as usize;
        self.get(cx, cy)
    }
}

impl Grid<f32> {
    /// Bilinear sample at continuous pixel coordinates, clamped at the edges.
    pub fn sample_bilinear(&self, px: f64, py: f64) -> f32 {
        // Past one cell outside, every tap clamps to the edge anyway; bounding
        // here keeps the i64 cast and the +1 neighbours from overflowing.
        let px = px.clamp(-1.0, self.w as f64);
        let py = py.clamp(-1.0, self.h as f64);
        let x0 = px.floor();
        let y0 = py.floor();
        let fx = (px - x0) as f32;
        let fy = (py - y0) as f32;
        let (ix, iy) = (x0 as i64, y0 as i64);
        let a = self.get_clamped(ix, iy);
        let b = self.get_clamped(ix + 1, iy);
        let c = self.get_clamped(ix, iy + 1);
        let d = self.get_clamped(ix + 1, iy + 1);
        let top = a + (b - a) * fx;
        let bottom = c + (d - c) * fx;
        top + (bottom - top) * fy
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// Axis-aligned rectangle of the world plane, metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x_min: f64,
    pub x_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl Region {
    pub const fn new(x_min: f64, x_max: f64, z_min: f64, z_max: f64) -> Self {
        Self { x_min, x_max, z_min, z_max }
    }

    /// World position of the centre of pixel (px, py) in a w×h raster.
    #[inline]
    pub fn world_at(&self, px: usize, py: usize, w: usize, h: usize) -> (f64, f64) {
        let u = (px as f64 + 0.5) / w as f64;
        let v = (py as f64 + 0.5) / h as f64;
        (
            self.x_min + (self.x_max - self.x_min) * u,
            self.z_min + (self.z_max - self.z_min) * v,
        )
    }

    /// Continuous pixel coordinates of a world point (inverse of `world_at`).
    #[inline]
    pub fn pixel_at(&self, x: f64, z: f64, w: usize, h: usize) -> (f64, f64) {
        let sx = self.x_max - self.x_min;
        let sz = self.z_max - self.z_min;
        let u = if sx != 0.0 { (x - self.x_min) / sx } else { 0.0 };
        let v = if sz != 0.0 { (z - self.z_min) / sz } else { 0.0 };
        (u * w as f64 - 0.5, v * h as f64 - 0.5)
    }
}

impl Default for Region {
    /// The continental-to-trench traverse, 30 km either side of z = 0.
    fn default() -> Self {
        Self::new(-50_000.0, 50_000.0, -30_000.0, 30_000.0)
    }
}

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::{AbyssalPlain, ContinentalMargin, ProvinceConfig, TrenchProfile};

// Segment boundaries across the continental margin, as fractions of its width.
pub const SHELF_BREAK_T: f64 = 0.3;
pub const SLOPE_FOOT_T: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Province {
    Continental,
    Abyssal,
    Trench,
}

impl Province {
    pub const ALL: [Province; 3] = [Province::Continental, Province::Abyssal, Province::Trench];

    pub fn name(self) -> &'static str {
        match self {
            Province::Continental => "continental",
            Province::Abyssal => "abyssal",
            Province::Trench => "trench",
        }
    }
}

/// Closed-interval membership, first match wins; anything unclaimed is abyssal.
pub fn classify_province(provinces: &ProvinceConfig, x: f64) -> Province {
    if provinces.continental.extent.contains(x) {
        Province::Continental
    } else if provinces.abyssal.extent.contains(x) {
        Province::Abyssal
    } else if provinces.trench.extent.contains(x) {
        Province::Trench
    } else {
        Province::Abyssal
    }
}

/// Smooth base height (negative = below datum) of `province` at (x, z).
pub fn base_depth(provinces: &ProvinceConfig, x: f64, z: f64, province: Province) -> f64 {
    match province {
        Province::Continental => continental_depth(&provinces.continental, x, z),
        Province::Abyssal => abyssal_depth(&provinces.abyssal, x, z),
        Province::Trench => trench_depth(&provinces.trench, x, z),
    }
}

/// Adjoining provinces and the smoothstep weight of the right-hand one when
/// `x` lies within `seam_blend_width / 2` of a seam. `None` outside every band.
pub fn seam_blend(provinces: &ProvinceConfig, x: f64) -> Option<(Province, Province, f64)> {
    let half = provinces.seam_blend_width * 0.5;
    if half <= 0.0 {
        return None;
    }
    let seams = [
        (provinces.continental.extent.x_max, Province::Continental, Province::Abyssal),
        (provinces.abyssal.extent.x_max, Province::Abyssal, Province::Trench),
    ];
    seams.into_iter().find_map(|(seam, left, right)| {
        let offset = x - seam;
        (offset.abs() < half).then(|| (left, right, smoothstep((offset + half) / (2.0 * half))))
    })
}

/// Base depth with a smoothstep cross-fade of `seam_blend_width` across each
/// province seam. Identical to the classified profile when the width is 0.
pub fn blended_base_depth(provinces: &ProvinceConfig, x: f64, z: f64) -> f64 {
    match seam_blend(provinces, x) {
        Some((left, right, w)) => {
            let a = base_depth(provinces, x, z, left);
            let b = base_depth(provinces, x, z, right);
            a + (b - a) * w
        }
        None => base_depth(provinces, x, z, classify_province(provinces, x)),
    }
}

fn continental_depth(c: &ContinentalMargin, x: f64, z: f64) -> f64 {
    let t = c.extent.normalize(x);
    if t < SHELF_BREAK_T {
        let s = t / SHELF_BREAK_T;
        lerp(c.shelf_depth, c.shelf_break_depth, s)
    } else if t < SLOPE_FOOT_T {
        let s = (t - SHELF_BREAK_T) / (SLOPE_FOOT_T - SHELF_BREAK_T);
        // Gullies and slumps, pinned to zero at the shelf break and slope foot.
        let irregular = (x * 0.0011).sin() * (z * 0.0007).cos();
        lerp(c.shelf_break_depth, c.slope_foot_depth, s)
            + c.slope_irregularity * (PI * s).sin() * irregular
    } else {
        let s = (t - SLOPE_FOOT_T) / (1.0 - SLOPE_FOOT_T);
        let fans = (z * 0.0004).sin() * (x * 0.00025).cos();
        lerp(c.slope_foot_depth, c.rise_foot_depth, s) + c.rise_fan_relief * (PI * s).sin() * fans
    }
}

fn abyssal_depth(a: &AbyssalPlain, x: f64, z: f64) -> f64 {
    let hills = (x * 0.00031).sin() * (z * 0.00023).cos();
    let knolls = (x * 0.00087 + 1.7).sin() * (z * 0.00061 + 0.4).cos();
    a.base_depth + a.variation * hills + a.variation * 0.5 * knolls
}

fn trench_depth(t: &TrenchProfile, x: f64, z: f64) -> f64 {
    let from_axis = (x - t.axis_position).abs();
    let half_wall = t.wall_width * 0.5;
    if half_wall > 0.0 && from_axis < half_wall {
        let n = from_axis / half_wall;
        let v = 1.0 - n.powf(1.5);
        lerp(t.forearc_depth, t.axis_depth, v) + t.axis_perturbation * (z * 0.00013).sin()
    } else {
        t.forearc_depth + t.forearc_perturbation * (z * 0.00019).sin() * (x * 0.00047).cos()
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

use image::GrayImage;
use rayon::prelude::*;

use crate::grid::Grid;
use crate::heightmap::BrightnessCurve;
use crate::layers::Province;

// Bathymetric palette, shallow shelf to hadal trench.
const SHELF: [u8; 4] = [120, 190, 210, 255];
const SLOPE: [u8; 4] = [60, 130, 180, 255];
const RISE: [u8; 4] = [38, 88, 145, 255];
const ABYSS: [u8; 4] = [22, 48, 96, 255];
const HADAL: [u8; 4] = [8, 14, 40, 255];
const EMERGENT: [u8; 4] = [190, 175, 130, 255];

const CONTINENTAL_TINT: [u8; 4] = [210, 160, 90, 255];
const ABYSSAL_TINT: [u8; 4] = [70, 110, 190, 255];
const TRENCH_TINT: [u8; 4] = [150, 60, 140, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

#[inline]
fn depth_color(height: f32) -> [u8; 4] {
    if height > 0.0 {
        return EMERGENT;
    }
    let depth = -height;
    if depth < 200.0 {
        lerp_color(SHELF, SLOPE, depth / 200.0)
    } else if depth < 2_000.0 {
        lerp_color(SLOPE, RISE, (depth - 200.0) / 1_800.0)
    } else if depth < 6_000.0 {
        lerp_color(RISE, ABYSS, (depth - 2_000.0) / 4_000.0)
    } else {
        lerp_color(ABYSS, HADAL, ((depth - 6_000.0) / 4_000.0).min(1.0))
    }
}

/// Coloured depth chart with a simple north-west hillshade.
pub fn render_bathymetry(height: &Grid<f32>, cell_size: f32) -> Vec<u8> {
    let w = height.w;
    let h = height.h;
    let mut rgba = vec![0u8; w * h * 4];
    if w == 0 {
        return rgba;
    }
    let cell = cell_size.max(1.0);

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let elev = height.get(x, y);
            let west = height.get(x.saturating_sub(1), y);
            let north = height.get(x, y.saturating_sub(1));
            let slope = ((elev - west) + (elev - north)) / cell;
            let shade = (1.0 + slope * 0.5).clamp(0.6, 1.3);
            let base = depth_color(elev);
            let out = &mut row[x * 4..x * 4 + 4];
            for c in 0..3 {
                out[c] = (base[c] as f32 * shade).clamp(0.0, 255.0) as u8;
            }
            out[3] = 255;
        }
    });

    rgba
}

/// Diagnostic: grayscale heightmap, stretched to the grid's own range.
pub fn render_heightmap(height: &Grid<f32>) -> Vec<u8> {
    let (min_h, max_h) = height.min_max();
    let range = (max_h - min_h).max(1.0);
    let mut rgba = vec![0u8; height.w * height.h * 4];
    for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
        let t = (height.data[i] - min_h) / range;
        let v = (t * 255.0).clamp(0.0, 255.0) as u8;
        px.copy_from_slice(&[v, v, v, 255]);
    }
    rgba
}

/// Diagnostic: province map.
pub fn render_provinces(provinces: &Grid<u8>) -> Vec<u8> {
    let mut rgba = vec![0u8; provinces.w * provinces.h * 4];
    for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
        let color = match province_from_code(provinces.data[i]) {
            Province::Continental => CONTINENTAL_TINT,
            Province::Abyssal => ABYSSAL_TINT,
            Province::Trench => TRENCH_TINT,
        };
        px.copy_from_slice(&color);
    }
    rgba
}

pub fn province_code(p: Province) -> u8 {
    match p {
        Province::Continental => 0,
        Province::Abyssal => 1,
        Province::Trench => 2,
    }
}

pub fn province_from_code(code: u8) -> Province {
    match code {
        0 => Province::Continental,
        2 => Province::Trench,
        _ => Province::Abyssal,
    }
}

/// Depth-as-brightness export readable by the image backends.
pub fn encode_depth_brightness(height: &Grid<f32>, curve: &BrightnessCurve) -> GrayImage {
    let pixels: Vec<u8> = height
        .data
        .par_iter()
        .map(|&v| curve.brightness(v).round().clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(height.w as u32, height.h as u32, pixels)
        .unwrap_or_else(|| GrayImage::new(height.w as u32, height.h as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::HeightmapKind;

    #[test]
    fn deeper_water_is_darker() {
        let shallow = depth_color(-100.0);
        let deep = depth_color(-9_000.0);
        let lum = |c: [u8; 4]| c[0] as u32 + c[1] as u32 + c[2] as u32;
        assert!(lum(shallow) > lum(deep));
        assert_eq!(depth_color(10.0), EMERGENT);
    }

    #[test]
    fn heightmap_spans_full_gray_range() {
        let grid = Grid { data: vec![-9_000.0, -4_500.0, 0.0], w: 3, h: 1 };
        let rgba = render_heightmap(&grid);
        assert_eq!(rgba[0], 0);
        assert_eq!(rgba[8], 255);
    }

    #[test]
    fn province_codes_round_trip() {
        for p in Province::ALL {
            assert_eq!(province_from_code(province_code(p)), p);
        }
    }

    #[test]
    fn brightness_export_uses_curve() {
        let curve = HeightmapKind::Noaa.curve();
        let grid = Grid { data: vec![-11_000.0, -6_000.0, 0.0], w: 3, h: 1 };
        let img = encode_depth_brightness(&grid, &curve);
        assert_eq!(img.as_raw(), &vec![0u8, 90, 255]);
    }

    #[test]
    fn bathymetry_buffer_is_opaque() {
        let grid = Grid { data: vec![-100.0, -3_000.0, -8_000.0, -50.0], w: 2, h: 2 };
        let rgba = render_bathymetry(&grid, 100.0);
        assert_eq!(rgba.len(), 16);
        assert!(rgba.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn empty_raster_renders_nothing() {
        let grid = Grid::<f32>::new(0, 3);
        assert!(render_bathymetry(&grid, 100.0).is_empty());
        assert!(render_heightmap(&grid).is_empty());
    }
}

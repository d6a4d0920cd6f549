use crate::config::{ProvinceConfig, SedimentModel};
use crate::features::{CanyonSystem, VolcanicFeature};
use crate::geometry::WorldPoint;
use crate::layers::province::{Province, classify_province, seam_blend};

/// Sediment blanket at (x, z) as negative relief. Thickness is carried as
/// extra depth, so the result is always ≤ 0.
pub fn sediment_thickness(
    model: &SedimentModel,
    provinces: &ProvinceConfig,
    canyons: &[CanyonSystem],
    seamounts: &[VolcanicFeature],
    x: f64,
    z: f64,
) -> f64 {
    let p = WorldPoint::new(x, z);
    // Blankets cross-fade over the same seam band as the base profiles.
    let cover = match seam_blend(provinces, x) {
        Some((left, right, w)) => {
            let a = blanket(model, provinces, canyons, left, p);
            let b = blanket(model, provinces, canyons, right, p);
            a + (b - a) * w
        }
        None => blanket(model, provinces, canyons, classify_province(provinces, x), p),
    };
    -(cover + ash_apron(model, seamounts, p))
}

fn blanket(model: &SedimentModel, provinces: &ProvinceConfig, canyons: &[CanyonSystem], province: Province, p: WorldPoint) -> f64 {
    match province {
        Province::Continental => {
            let t = provinces.continental.extent.normalize(p.x).clamp(0.0, 1.0);
            model.shelf_thickness * (1.0 - t)
        }
        Province::Abyssal | Province::Trench => model.abyssal_thickness + turbidite_fans(model, canyons, p),
    }
}

/// Fans spread from every canyon mouth within the cutoff radius.
pub fn turbidite_fans(model: &SedimentModel, canyons: &[CanyonSystem], p: WorldPoint) -> f64 {
    if model.turbidite_decay <= 0.0 {
        return 0.0;
    }
    canyons
        .iter()
        .map(|c| p.distance(c.mouth))
        .filter(|&d| d < model.turbidite_cutoff)
        .map(|d| model.turbidite_thickness * (-d / model.turbidite_decay).exp())
        .sum()
}

/// Ash falls off linearly around each seamount in the chain.
pub fn ash_apron(model: &SedimentModel, seamounts: &[VolcanicFeature], p: WorldPoint) -> f64 {
    if model.ash_radius <= 0.0 {
        return 0.0;
    }
    seamounts
        .iter()
        .map(|s| p.distance(s.position))
        .filter(|&d| d < model.ash_radius)
        .map(|d| model.ash_thickness * (1.0 - d / model.ash_radius))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use approx::assert_abs_diff_eq;

    fn thickness(config: &TerrainConfig, x: f64, z: f64) -> f64 {
        sediment_thickness(
            &config.sediment,
            &config.provinces,
            &config.canyons,
            &config.seamount_chain,
            x,
            z,
        )
    }

    #[test]
    fn shelf_blanket_thins_offshore() {
        let config = TerrainConfig::default();
        let shore = config.provinces.continental.extent.x_min;
        assert_abs_diff_eq!(thickness(&config, shore, 0.0), -config.sediment.shelf_thickness);
        let mid = thickness(&config, shore + 15_000.0, -50_000.0);
        assert_abs_diff_eq!(mid, -config.sediment.shelf_thickness * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn open_plain_carries_base_thickness() {
        let config = TerrainConfig::default();
        assert_abs_diff_eq!(thickness(&config, 5_000.0, 0.0), -config.sediment.abyssal_thickness);
    }

    #[test]
    fn fans_thicken_near_canyon_mouths() {
        let config = TerrainConfig::default();
        let mouth = config.canyons[0].mouth;
        let at_mouth = thickness(&config, mouth.x, mouth.z);
        let s = &config.sediment;
        assert!(at_mouth <= -(s.abyssal_thickness + s.turbidite_thickness) + 1e-9);
        let fan = turbidite_fans(s, &config.canyons, WorldPoint::new(mouth.x + 5_000.0, mouth.z));
        assert_abs_diff_eq!(fan, s.turbidite_thickness * (-1.0f64).exp(), epsilon = 1e-9);
        assert_eq!(turbidite_fans(s, &config.canyons, WorldPoint::new(mouth.x + 10_000.0, mouth.z)), 0.0);
    }

    #[test]
    fn ash_aprons_surround_seamounts() {
        let config = TerrainConfig::default();
        let s = &config.sediment;
        let one = &config.seamount_chain[..1];
        let peak = one[0].position;
        assert_abs_diff_eq!(ash_apron(s, one, peak), s.ash_thickness);
        let half = WorldPoint::new(peak.x, peak.z - s.ash_radius * 0.5);
        assert_abs_diff_eq!(ash_apron(s, one, half), s.ash_thickness * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn blanket_fades_across_the_margin_seam() {
        let config = TerrainConfig::default();
        let seam = config.provinces.continental.extent.x_max;
        let left = thickness(&config, seam - 50.0, 0.0);
        let right = thickness(&config, seam + 50.0, 0.0);
        assert!((left - right).abs() < 1.0, "{left} vs {right}");

        let mut hard = config.clone();
        hard.provinces.seam_blend_width = 0.0;
        assert_abs_diff_eq!(thickness(&hard, seam, 0.0), 0.0);
        assert_abs_diff_eq!(thickness(&hard, seam + 1.0, 0.0), -hard.sediment.abyssal_thickness);
    }

    #[test]
    fn never_positive() {
        let config = TerrainConfig::default();
        for i in -30..=30 {
            for j in -30..=30 {
                let v = thickness(&config, i as f64 * 2_000.0, j as f64 * 2_000.0);
                assert!(v <= 0.0);
            }
        }
    }
}

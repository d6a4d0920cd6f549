use std::f64::consts::TAU;

use crate::config::RoughnessBand;

/// Micro-texture: one sin·cos cross term per band.
pub fn roughness(bands: &[RoughnessBand], x: f64, z: f64) -> f64 {
    bands
        .iter()
        .filter(|b| b.wavelength > 0.0)
        .map(|b| {
            let f = TAU / b.wavelength;
            b.amplitude * (x * f).sin() * (z * f * b.cross_ratio).cos()
        })
        .sum()
}

/// Upper bound on |roughness| for a band set.
pub fn amplitude_bound(bands: &[RoughnessBand]) -> f64 {
    bands.iter().filter(|b| b.wavelength > 0.0).map(|b| b.amplitude.abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_roughness;

    #[test]
    fn bounded_by_band_amplitudes() {
        let bands = default_roughness();
        let bound = amplitude_bound(&bands);
        assert_eq!(bound, 39.0);
        for i in 0..500 {
            let x = i as f64 * 37.3 - 9_000.0;
            let z = i as f64 * 11.9 + 400.0;
            assert!(roughness(&bands, x, z).abs() <= bound);
        }
    }

    #[test]
    fn vanishes_on_whole_wavelengths_of_x() {
        let bands = default_roughness();
        assert!(roughness(&bands, 0.0, 1_234.0).abs() < 1e-12);
        assert!(roughness(&bands, 5_000.0, 0.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_band_is_skipped() {
        let bands = [RoughnessBand::new(0.0, 50.0, 1.0)];
        assert_eq!(roughness(&bands, 10.0, 10.0), 0.0);
        assert_eq!(amplitude_bound(&bands), 0.0);
    }
}

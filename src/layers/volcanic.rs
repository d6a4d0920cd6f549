use crate::features::{VentField, VolcanicFeature};
use crate::geometry::WorldPoint;

/// Gaussian sharpness for seamounts and intraplate volcanoes. Intraplate
/// edifices use the smaller exponent, giving them the broader shoulders.
pub const SEAMOUNT_SHARPNESS: f64 = 5.0;
pub const INTRAPLATE_SHARPNESS: f64 = 4.0;

/// Height of the tallest edifice covering (x, z). Features do not stack.
pub fn volcanic_effect(seamounts: &[VolcanicFeature], intraplate: &[VolcanicFeature], x: f64, z: f64) -> f64 {
    let p = WorldPoint::new(x, z);
    let seamount_peak = seamounts
        .iter()
        .map(|v| edifice_height(v, p, SEAMOUNT_SHARPNESS) * v.erosion_factor())
        .fold(0.0, f64::max);
    intraplate
        .iter()
        .map(|v| edifice_height(v, p, INTRAPLATE_SHARPNESS))
        .fold(seamount_peak, f64::max)
}

/// Uneroded Gaussian edifice, zero at and beyond one diameter.
pub fn edifice_height(v: &VolcanicFeature, p: WorldPoint, sharpness: f64) -> f64 {
    if v.diameter <= 0.0 {
        return 0.0;
    }
    let d = p.distance(v.position);
    if d >= v.diameter {
        return 0.0;
    }
    let r = d / v.diameter;
    v.height * (-r * r * sharpness).exp()
}

/// Chimney mounds of every vent field covering (x, z), summed.
pub fn vent_relief(vents: &[VentField], x: f64, z: f64) -> f64 {
    let p = WorldPoint::new(x, z);
    vents
        .iter()
        .filter(|v| v.radius > 0.0)
        .map(|v| {
            let d = p.distance(v.position);
            if d >= v.radius {
                0.0
            } else {
                let u = 1.0 - d / v.radius;
                v.relief * u * u * (3.0 - 2.0 * u)
            }
        })
        .sum()
}

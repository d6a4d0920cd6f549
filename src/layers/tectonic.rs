use crate::features::{FaultSegment, SpreadingRidge};
use crate::geometry::{WorldPoint, distance_to_line, distance_to_segment};

/// Faults stop influencing the seabed beyond this distance from their trace.
pub const FAULT_REACH: f64 = 5_000.0;
/// e-folding distance of fault throw away from the trace.
pub const FAULT_DECAY: f64 = 2_000.0;

/// Vertical displacement from every fault plus the spreading-ridge crest.
pub fn tectonic_effect(faults: &[FaultSegment], ridge: Option<&SpreadingRidge>, x: f64, z: f64) -> f64 {
    let p = WorldPoint::new(x, z);
    let throw: f64 = faults.iter().map(|f| fault_throw(f, p)).sum();
    throw + ridge.map_or(0.0, |r| ridge_relief(r, p))
}

pub fn fault_throw(fault: &FaultSegment, p: WorldPoint) -> f64 {
    let (a, b) = fault.endpoints();
    let d = distance_to_segment(p, a, b);
    if d < FAULT_REACH {
        fault.signed_throw() * (-d / FAULT_DECAY).exp()
    } else {
        0.0
    }
}

/// Tent-shaped crest: `relief` high on the axis, gone `relief` metres off it.
pub fn ridge_relief(ridge: &SpreadingRidge, p: WorldPoint) -> f64 {
    if ridge.relief <= 0.0 {
        return 0.0;
    }
    let d = distance_to_line(p, ridge.position, ridge.orientation);
    if d < ridge.relief {
        ridge.relief * (1.0 - d / ridge.relief)
    } else {
        0.0
    }
}

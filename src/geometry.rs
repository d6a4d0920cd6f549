use serde::{Deserialize, Serialize};

/// A point on the horizontal world plane, metres. x runs shore → trench, z along the margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub z: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn distance(self, other: WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

/// Parameter of the projection of `p` onto segment a→b, clamped to [0, 1].
/// A degenerate segment projects onto its start.
#[inline]
pub fn project_onto_segment(p: WorldPoint, a: WorldPoint, b: WorldPoint) -> f64 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    let len_sq = dx * dx + dz * dz;
    if len_sq <= 0.0 {
        return 0.0;
    }
    (((p.x - a.x) * dx + (p.z - a.z) * dz) / len_sq).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp_point(a: WorldPoint, b: WorldPoint, t: f64) -> WorldPoint {
    WorldPoint::new(a.x + (b.x - a.x) * t, a.z + (b.z - a.z) * t)
}

/// Euclidean distance from `p` to the finite segment a→b.
#[inline]
pub fn distance_to_segment(p: WorldPoint, a: WorldPoint, b: WorldPoint) -> f64 {
    let t = project_onto_segment(p, a, b);
    p.distance(lerp_point(a, b, t))
}

/// Perpendicular distance from `p` to the infinite line through `origin`
/// with direction (cos θ, sin θ) in the x–z plane.
#[inline]
pub fn distance_to_line(p: WorldPoint, origin: WorldPoint, orientation: f64) -> f64 {
    let (sin, cos) = orientation.sin_cos();
    (-(p.x - origin.x) * sin + (p.z - origin.z) * cos).abs()
}

/// Endpoints of a segment of `length` centred on `center` along `orientation`.
#[inline]
pub fn segment_endpoints(center: WorldPoint, orientation: f64, length: f64) -> (WorldPoint, WorldPoint) {
    let (sin, cos) = orientation.sin_cos();
    let hx = cos * length * 0.5;
    let hz = sin * length * 0.5;
    (
        WorldPoint::new(center.x - hx, center.z - hz),
        WorldPoint::new(center.x + hx, center.z + hz),
    )
}

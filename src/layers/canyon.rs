use crate::features::{CanyonSystem, Tributary};
use crate::geometry::{WorldPoint, distance_to_segment, lerp_point, project_onto_segment};

/// Half-width of every tributary channel.
pub const TRIBUTARY_WIDTH: f64 = 1_000.0;

/// Deepest cut of any canyon or tributary at (x, z). Always ≤ 0.
pub fn canyon_depth(canyons: &[CanyonSystem], x: f64, z: f64) -> f64 {
    let p = WorldPoint::new(x, z);
    let mut deepest = 0.0f64;
    for canyon in canyons {
        deepest = deepest.min(axis_cut(canyon, p));
        for trib in &canyon.tributaries {
            deepest = deepest.min(tributary_cut(canyon, trib, p));
        }
    }
    deepest.min(0.0)
}

/// Parabolic U cross-section: full depth on the thalweg, zero at `width`.
#[inline]
fn u_profile(distance: f64, width: f64, depth: f64) -> f64 {
    if width <= 0.0 || distance >= width {
        return 0.0;
    }
    let r = distance / width;
    -depth * (1.0 - r * r)
}

pub fn axis_cut(canyon: &CanyonSystem, p: WorldPoint) -> f64 {
    let d = distance_to_segment(p, canyon.head, canyon.mouth);
    u_profile(d, canyon.width, canyon.max_depth)
}

/// Where a tributary meets its parent thalweg.
pub fn confluence(canyon: &CanyonSystem, trib: &Tributary) -> WorldPoint {
    let t = project_onto_segment(trib.branch_point, canyon.head, canyon.mouth);
    lerp_point(canyon.head, canyon.mouth, t)
}

pub fn tributary_cut(canyon: &CanyonSystem, trib: &Tributary, p: WorldPoint) -> f64 {
    let d = distance_to_segment(p, trib.branch_point, confluence(canyon, trib));
    u_profile(d, TRIBUTARY_WIDTH, trib.depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn canyon() -> CanyonSystem {
        CanyonSystem {
            name: "test canyon".into(),
            head: WorldPoint::new(0.0, 0.0),
            mouth: WorldPoint::new(20_000.0, 0.0),
            width: 2_000.0,
            max_depth: 800.0,
            tributaries: vec![Tributary { branch_point: WorldPoint::new(10_000.0, 6_000.0), depth: 300.0 }],
        }
    }

    #[test]
    fn thalweg_takes_full_depth() {
        let c = [canyon()];
        assert_abs_diff_eq!(canyon_depth(&c, 5_000.0, 0.0), -800.0);
    }

    #[test]
    fn cross_section_is_parabolic() {
        let c = [canyon()];
        assert_abs_diff_eq!(canyon_depth(&c, 5_000.0, 1_000.0), -600.0, epsilon = 1e-9);
    }

    #[test]
    fn nothing_beyond_width() {
        let c = [canyon()];
        assert_eq!(canyon_depth(&c, 5_000.0, 2_000.0), 0.0);
        assert_eq!(canyon_depth(&c, -2_500.0, 0.0), 0.0);
        assert_eq!(canyon_depth(&c, 14_000.0, -3_000.0), 0.0);
    }

    #[test]
    fn tributary_joins_the_thalweg() {
        let c = canyon();
        let join = confluence(&c, &c.tributaries[0]);
        assert_abs_diff_eq!(join.x, 10_000.0);
        assert_abs_diff_eq!(join.z, 0.0);
        // Halfway up the tributary, well outside the main cut.
        assert_abs_diff_eq!(canyon_depth(&[c.clone()], 10_000.0, 4_000.0), -300.0);
        assert_eq!(canyon_depth(&[c], 11_500.0, 4_000.0), 0.0);
    }

    #[test]
    fn overlapping_cuts_take_the_deepest() {
        let mut shallow = canyon();
        shallow.max_depth = 100.0;
        let deep = canyon();
        assert_abs_diff_eq!(canyon_depth(&[shallow, deep], 1_000.0, 0.0), -800.0);
    }

    #[test]
    fn zero_width_canyon_is_skipped() {
        let mut c = canyon();
        c.width = 0.0;
        c.tributaries.clear();
        let cut = canyon_depth(&[c], 5_000.0, 0.0);
        assert_eq!(cut, 0.0);
        assert!(cut.is_finite());
    }
}

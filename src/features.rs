//! Static geological features. Plain records: all behaviour lives in `layers`.

use serde::{Deserialize, Serialize};

use crate::geometry::{WorldPoint, segment_endpoints};

/// Direction of vertical throw on the hanging-wall side of a fault.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowSense {
    #[default]
    Up,
    Down,
}

impl ThrowSense {
    #[inline]
    pub fn signum(self) -> f64 {
        match self {
            ThrowSense::Up => 1.0,
            ThrowSense::Down => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaultSegment {
    pub center: WorldPoint,
    /// Radians, direction (cos, sin) in the x–z plane.
    pub orientation: f64,
    pub length: f64,
    /// Magnitude of vertical throw in metres.
    pub displacement: f64,
    #[serde(default)]
    pub sense: ThrowSense,
}

impl FaultSegment {
    pub fn endpoints(&self) -> (WorldPoint, WorldPoint) {
        segment_endpoints(self.center, self.orientation, self.length)
    }

    /// Signed throw applied at the fault trace.
    #[inline]
    pub fn signed_throw(&self) -> f64 {
        self.displacement * self.sense.signum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpreadingRidge {
    pub position: WorldPoint,
    pub orientation: f64,
    /// Both the crest height and the half-width of the ridge, metres.
    pub relief: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tributary {
    pub branch_point: WorldPoint,
    pub depth: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanyonSystem {
    pub name: String,
    pub head: WorldPoint,
    pub mouth: WorldPoint,
    /// Half-width of the cut measured from the thalweg.
    pub width: f64,
    pub max_depth: f64,
    #[serde(default)]
    pub tributaries: Vec<Tributary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolcanicFeature {
    pub position: WorldPoint,
    pub diameter: f64,
    pub height: f64,
    /// 0 = young and tall; each unit erodes 10% of the edifice.
    #[serde(default)]
    pub age: f64,
}

impl VolcanicFeature {
    /// `1 - 0.1 * age`, clamped so very old edifices never invert into pits.
    #[inline]
    pub fn erosion_factor(&self) -> f64 {
        (1.0 - self.age * 0.1).clamp(0.0, 1.0)
    }
}

/// A cluster of hydrothermal chimneys and sulphide mounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VentField {
    pub position: WorldPoint,
    pub radius: f64,
    pub relief: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn volcano(age: f64) -> VolcanicFeature {
        VolcanicFeature {
            position: WorldPoint::default(),
            diameter: 1000.0,
            height: 500.0,
            age,
        }
    }

    #[test]
    fn erosion_factor_is_clamped() {
        assert_abs_diff_eq!(volcano(0.0).erosion_factor(), 1.0);
        assert_abs_diff_eq!(volcano(4.0).erosion_factor(), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(volcano(10.0).erosion_factor(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(volcano(25.0).erosion_factor(), 0.0);
    }

    #[test]
    fn throw_sense_sets_sign() {
        let mut fault = FaultSegment {
            center: WorldPoint::default(),
            orientation: 0.0,
            length: 100.0,
            displacement: 40.0,
            sense: ThrowSense::Up,
        };
        assert_abs_diff_eq!(fault.signed_throw(), 40.0);
        fault.sense = ThrowSense::Down;
        assert_abs_diff_eq!(fault.signed_throw(), -40.0);
    }
}

use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::features::{
    CanyonSystem, FaultSegment, SpreadingRidge, ThrowSense, Tributary, VentField, VolcanicFeature,
};
use crate::geometry::WorldPoint;

/// Closed x-interval owned by one province.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProvinceExtent {
    pub x_min: f64,
    pub x_max: f64,
}

impl ProvinceExtent {
    pub const fn new(x_min: f64, x_max: f64) -> Self {
        Self { x_min, x_max }
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Normalised position across the extent. A zero-width extent maps everything to 0.
    #[inline]
    pub fn normalize(&self, x: f64) -> f64 {
        let w = self.width();
        if w > 0.0 { (x - self.x_min) / w } else { 0.0 }
    }
}

/// Shelf → slope → rise. Depths are signed heights (negative = below datum).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinentalMargin {
    pub extent: ProvinceExtent,
    pub shelf_depth: f64,
    pub shelf_break_depth: f64,
    pub slope_foot_depth: f64,
    pub rise_foot_depth: f64,
    pub slope_irregularity: f64,
    pub rise_fan_relief: f64,
}

impl Default for ContinentalMargin {
    fn default() -> Self {
        Self {
            extent: ProvinceExtent::new(-50_000.0, -20_000.0),
            shelf_depth: -150.0,
            shelf_break_depth: -200.0,
            slope_foot_depth: -2_000.0,
            rise_foot_depth: -4_500.0,
            slope_irregularity: 120.0,
            rise_fan_relief: 150.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbyssalPlain {
    pub extent: ProvinceExtent,
    pub base_depth: f64,
    /// Amplitude of the longer abyssal-hill term; the shorter one runs at half this.
    pub variation: f64,
}

impl Default for AbyssalPlain {
    fn default() -> Self {
        Self {
            extent: ProvinceExtent::new(-20_000.0, 35_000.0),
            base_depth: -6_000.0,
            variation: 40.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrenchProfile {
    pub extent: ProvinceExtent,
    pub axis_position: f64,
    pub axis_depth: f64,
    pub forearc_depth: f64,
    /// Full width of the V; each wall spans half of it.
    pub wall_width: f64,
    pub axis_perturbation: f64,
    pub forearc_perturbation: f64,
}

impl Default for TrenchProfile {
    fn default() -> Self {
        Self {
            extent: ProvinceExtent::new(35_000.0, 50_000.0),
            axis_position: 42_000.0,
            axis_depth: -9_000.0,
            forearc_depth: -6_000.0,
            wall_width: 10_000.0,
            axis_perturbation: 150.0,
            forearc_perturbation: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvinceConfig {
    pub continental: ContinentalMargin,
    pub abyssal: AbyssalPlain,
    pub trench: TrenchProfile,
    /// Width of the smoothstep blend across each province seam. 0 keeps hard seams.
    pub seam_blend_width: f64,
}

impl Default for ProvinceConfig {
    fn default() -> Self {
        Self {
            continental: ContinentalMargin::default(),
            abyssal: AbyssalPlain::default(),
            trench: TrenchProfile::default(),
            // The rise foot sits 1500 m above the plain; spread that over 8 km.
            seam_blend_width: 8_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SedimentModel {
    pub shelf_thickness: f64,
    pub abyssal_thickness: f64,
    pub turbidite_thickness: f64,
    pub turbidite_decay: f64,
    pub turbidite_cutoff: f64,
    pub ash_thickness: f64,
    pub ash_radius: f64,
}

impl Default for SedimentModel {
    fn default() -> Self {
        Self {
            shelf_thickness: 25.0,
            abyssal_thickness: 20.0,
            turbidite_thickness: 60.0,
            turbidite_decay: 5_000.0,
            turbidite_cutoff: 10_000.0,
            ash_thickness: 15.0,
            ash_radius: 12_000.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoughnessBand {
    pub wavelength: f64,
    pub amplitude: f64,
    /// z-frequency relative to x-frequency; keeps the bands from lining up.
    pub cross_ratio: f64,
}

impl RoughnessBand {
    pub const fn new(wavelength: f64, amplitude: f64, cross_ratio: f64) -> Self {
        Self { wavelength, amplitude, cross_ratio }
    }
}

pub fn default_roughness() -> Vec<RoughnessBand> {
    vec![
        RoughnessBand::new(1_000.0, 20.0, 0.83),
        RoughnessBand::new(400.0, 10.0, 1.21),
        RoughnessBand::new(100.0, 5.0, 0.91),
        RoughnessBand::new(40.0, 3.0, 1.13),
        RoughnessBand::new(10.0, 1.0, 0.97),
    ]
}

/// The whole static world. Built once per session and shared read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub provinces: ProvinceConfig,
    pub faults: Vec<FaultSegment>,
    pub ridge: Option<SpreadingRidge>,
    pub canyons: Vec<CanyonSystem>,
    pub seamount_chain: Vec<VolcanicFeature>,
    pub intraplate_volcanoes: Vec<VolcanicFeature>,
    pub vent_fields: Vec<VentField>,
    pub sediment: SedimentModel,
    pub roughness: Vec<RoughnessBand>,
    /// When set, fault throw senses are re-drawn from this seed at construction.
    pub fault_sense_seed: Option<u64>,
}

fn pt(x: f64, z: f64) -> WorldPoint {
    WorldPoint::new(x, z)
}

fn fault(x: f64, z: f64, orientation: f64, length: f64, displacement: f64, sense: ThrowSense) -> FaultSegment {
    FaultSegment { center: pt(x, z), orientation, length, displacement, sense }
}

fn volcano(x: f64, z: f64, diameter: f64, height: f64, age: f64) -> VolcanicFeature {
    VolcanicFeature { position: pt(x, z), diameter, height, age }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            provinces: ProvinceConfig::default(),
            faults: vec![
                fault(-8_000.0, 22_000.0, 0.35, 16_000.0, 180.0, ThrowSense::Up),
                fault(24_000.0, -16_000.0, 1.15, 20_000.0, 220.0, ThrowSense::Down),
                fault(38_500.0, 24_000.0, FRAC_PI_2, 26_000.0, 260.0, ThrowSense::Down),
                fault(-30_000.0, -32_000.0, 0.1, 12_000.0, 120.0, ThrowSense::Up),
            ],
            ridge: Some(SpreadingRidge {
                position: pt(15_000.0, 0.0),
                orientation: FRAC_PI_2,
                relief: 400.0,
            }),
            canyons: vec![
                CanyonSystem {
                    name: "major canyon".into(),
                    head: pt(-40_500.0, 8_000.0),
                    mouth: pt(-17_000.0, 13_000.0),
                    width: 2_000.0,
                    max_depth: 850.0,
                    tributaries: vec![
                        Tributary { branch_point: pt(-34_000.0, 3_500.0), depth: 420.0 },
                        Tributary { branch_point: pt(-28_000.0, 15_500.0), depth: 360.0 },
                    ],
                },
                CanyonSystem {
                    name: "secondary canyon".into(),
                    head: pt(-39_500.0, -15_000.0),
                    mouth: pt(-21_000.0, -21_000.0),
                    width: 1_500.0,
                    max_depth: 550.0,
                    tributaries: vec![Tributary {
                        branch_point: pt(-33_000.0, -11_500.0),
                        depth: 300.0,
                    }],
                },
            ],
            seamount_chain: vec![
                volcano(9_000.0, 21_000.0, 6_000.0, 2_600.0, 0.0),
                volcano(14_000.0, 27_500.0, 5_000.0, 2_100.0, 3.0),
                volcano(19_500.0, 33_000.0, 4_500.0, 1_500.0, 6.0),
                volcano(25_500.0, 38_000.0, 4_000.0, 900.0, 12.0),
            ],
            intraplate_volcanoes: vec![
                volcano(-6_000.0, -26_000.0, 8_000.0, 2_800.0, 2.0),
                volcano(27_000.0, -38_000.0, 6_000.0, 1_800.0, 5.0),
            ],
            vent_fields: vec![
                VentField { position: pt(11_200.0, 20_400.0), radius: 900.0, relief: 30.0 },
                VentField { position: pt(-4_200.0, -25_100.0), radius: 700.0, relief: 22.0 },
            ],
            sediment: SedimentModel::default(),
            roughness: default_roughness(),
            fault_sense_seed: None,
        }
    }
}

impl TerrainConfig {
    /// Parse JSON; missing fields fall back to the built-in world.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TerrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects configs that would produce NaN or overlapping provinces.
    /// Zero-sized features are legal: they simply contribute nothing.
    pub fn validate(&self) -> Result<()> {
        let p = &self.provinces;
        let extents = [
            ("continental", p.continental.extent),
            ("abyssal", p.abyssal.extent),
            ("trench", p.trench.extent),
        ];
        for (name, e) in extents {
            finite(name, &[e.x_min, e.x_max])?;
            if e.x_min > e.x_max {
                return Err(invalid(format!("{name} extent is inverted ({} > {})", e.x_min, e.x_max)));
            }
        }
        for pair in extents.windows(2) {
            let (a_name, a) = pair[0];
            let (b_name, b) = pair[1];
            if a.x_max > b.x_min {
                return Err(invalid(format!("{a_name} extent overlaps {b_name}")));
            }
        }

        let c = &p.continental;
        finite(
            "continental margin",
            &[c.shelf_depth, c.shelf_break_depth, c.slope_foot_depth, c.rise_foot_depth, c.slope_irregularity, c.rise_fan_relief],
        )?;
        finite("abyssal plain", &[p.abyssal.base_depth, p.abyssal.variation])?;
        let t = &p.trench;
        finite(
            "trench",
            &[t.axis_position, t.axis_depth, t.forearc_depth, t.axis_perturbation, t.forearc_perturbation],
        )?;
        non_negative("trench wall_width", t.wall_width)?;
        non_negative("seam_blend_width", p.seam_blend_width)?;

        for (i, f) in self.faults.iter().enumerate() {
            finite(&format!("fault {i}"), &[f.center.x, f.center.z, f.orientation, f.displacement])?;
            non_negative(&format!("fault {i} length"), f.length)?;
        }
        if let Some(r) = &self.ridge {
            finite("ridge", &[r.position.x, r.position.z, r.orientation])?;
            non_negative("ridge relief", r.relief)?;
        }
        for c in &self.canyons {
            finite(&c.name, &[c.head.x, c.head.z, c.mouth.x, c.mouth.z, c.max_depth])?;
            non_negative(&format!("{} width", c.name), c.width)?;
            for t in &c.tributaries {
                finite(&c.name, &[t.branch_point.x, t.branch_point.z, t.depth])?;
            }
        }
        for (i, v) in self.seamount_chain.iter().chain(&self.intraplate_volcanoes).enumerate() {
            finite(&format!("volcano {i}"), &[v.position.x, v.position.z, v.height, v.age])?;
            non_negative(&format!("volcano {i} diameter"), v.diameter)?;
        }
        for (i, v) in self.vent_fields.iter().enumerate() {
            finite(&format!("vent field {i}"), &[v.position.x, v.position.z, v.relief])?;
            non_negative(&format!("vent field {i} radius"), v.radius)?;
        }

        let s = &self.sediment;
        for (name, value) in [
            ("shelf_thickness", s.shelf_thickness),
            ("abyssal_thickness", s.abyssal_thickness),
            ("turbidite_thickness", s.turbidite_thickness),
            ("turbidite_decay", s.turbidite_decay),
            ("turbidite_cutoff", s.turbidite_cutoff),
            ("ash_thickness", s.ash_thickness),
            ("ash_radius", s.ash_radius),
        ] {
            non_negative(&format!("sediment {name}"), value)?;
        }

        for (i, b) in self.roughness.iter().enumerate() {
            finite(&format!("roughness band {i}"), &[b.amplitude, b.cross_ratio])?;
            non_negative(&format!("roughness band {i} wavelength"), b.wavelength)?;
        }
        Ok(())
    }

    /// Nominal x-range the provinces cover; outside it the abyssal fallback governs.
    pub fn installed_range(&self) -> ProvinceExtent {
        let p = &self.provinces;
        ProvinceExtent::new(p.continental.extent.x_min, p.trench.extent.x_max)
    }
}

fn invalid(msg: String) -> TerrainError {
    TerrainError::InvalidConfig(msg)
}

fn finite(what: &str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(invalid(format!("{what} has a non-finite value")))
    }
}

fn non_negative(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{what} must be a finite, non-negative number (got {value})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        TerrainConfig::default().validate().unwrap();
    }

    #[test]
    fn default_extents_partition_the_traverse() {
        let p = ProvinceConfig::default();
        assert_eq!(p.continental.extent.x_max, p.abyssal.extent.x_min);
        assert_eq!(p.abyssal.extent.x_max, p.trench.extent.x_min);
        let range = TerrainConfig::default().installed_range();
        assert_eq!(range.width(), 100_000.0);
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config = TerrainConfig::from_json_str(
            r#"{ "provinces": { "abyssal": { "base_depth": -5000.0 } }, "faults": [] }"#,
        )
        .unwrap();
        assert_eq!(config.provinces.abyssal.base_depth, -5000.0);
        assert_eq!(config.provinces.abyssal.variation, AbyssalPlain::default().variation);
        assert!(config.faults.is_empty());
        assert_eq!(config.canyons.len(), 2);
    }

    #[test]
    fn json_round_trip_preserves_world() {
        let config = TerrainConfig::default();
        let text = config.to_json_string().unwrap();
        let back = TerrainConfig::from_json_str(&text).unwrap();
        assert_eq!(back.canyons.len(), config.canyons.len());
        assert_eq!(back.canyons[0].name, "major canyon");
        assert_eq!(back.faults[1].sense, ThrowSense::Down);
        assert_eq!(back.provinces.trench.axis_depth, -9_000.0);
        assert_eq!(back.roughness.len(), 5);
    }

    #[test]
    fn overlapping_extents_are_rejected() {
        let mut config = TerrainConfig::default();
        config.provinces.abyssal.extent.x_max = 40_000.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("overlaps"), "{err}");
    }

    #[test]
    fn negative_canyon_width_is_rejected() {
        let mut config = TerrainConfig::default();
        config.canyons[0].width = -1.0;
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn zero_width_features_are_accepted() {
        let mut config = TerrainConfig::default();
        config.canyons[0].width = 0.0;
        config.seamount_chain[0].diameter = 0.0;
        config.provinces.trench.wall_width = 0.0;
        config.validate().unwrap();
    }

    #[test]
    fn non_finite_depth_is_rejected() {
        let mut config = TerrainConfig::default();
        config.provinces.abyssal.base_depth = f64::NAN;
        assert!(config.validate().is_err());
    }
}

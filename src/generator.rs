use serde::Serialize;

use crate::config::TerrainConfig;
use crate::error::Result;
use crate::layers::{self, Province};
use crate::rng::throw_sense;
use crate::source::TerrainHeightSource;

/// Procedural seabed. Owns an immutable, validated `TerrainConfig`; every
/// query is a pure read, so one generator can be shared across threads.
#[derive(Clone, Debug)]
pub struct BathymetryGenerator {
    config: TerrainConfig,
}

/// Every layer's contribution at one point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayerBreakdown {
    pub x: f64,
    pub z: f64,
    pub province: Province,
    pub base: f64,
    pub tectonic: f64,
    pub canyon: f64,
    pub volcanic: f64,
    pub vents: f64,
    pub sediment: f64,
    pub roughness: f64,
    pub height: f64,
}

impl BathymetryGenerator {
    pub fn new(mut config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        if let Some(seed) = config.fault_sense_seed {
            for (i, fault) in config.faults.iter_mut().enumerate() {
                fault.sense = throw_sense(seed, i);
            }
        }
        warn_degenerate(&config);
        tracing::debug!(
            faults = config.faults.len(),
            canyons = config.canyons.len(),
            seamounts = config.seamount_chain.len(),
            intraplate = config.intraplate_volcanoes.len(),
            vent_fields = config.vent_fields.len(),
            roughness_bound = layers::roughness::amplitude_bound(&config.roughness),
            "bathymetry generator built"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn province_at(&self, x: f64) -> Province {
        layers::classify_province(&self.config.provinces, x)
    }

    pub fn base_depth(&self, x: f64, z: f64) -> f64 {
        layers::blended_base_depth(&self.config.provinces, x, z)
    }

    pub fn tectonic_effect(&self, x: f64, z: f64) -> f64 {
        layers::tectonic_effect(&self.config.faults, self.config.ridge.as_ref(), x, z)
    }

    pub fn canyon_depth(&self, x: f64, z: f64) -> f64 {
        layers::canyon_depth(&self.config.canyons, x, z)
    }

    pub fn volcanic_effect(&self, x: f64, z: f64) -> f64 {
        layers::volcanic_effect(&self.config.seamount_chain, &self.config.intraplate_volcanoes, x, z)
    }

    pub fn vent_relief(&self, x: f64, z: f64) -> f64 {
        layers::vent_relief(&self.config.vent_fields, x, z)
    }

    pub fn sediment_thickness(&self, x: f64, z: f64) -> f64 {
        let c = &self.config;
        layers::sediment_thickness(&c.sediment, &c.provinces, &c.canyons, &c.seamount_chain, x, z)
    }

    pub fn roughness(&self, x: f64, z: f64) -> f64 {
        layers::roughness(&self.config.roughness, x, z)
    }

    pub fn breakdown(&self, x: f64, z: f64) -> LayerBreakdown {
        let base = self.base_depth(x, z);
        let tectonic = self.tectonic_effect(x, z);
        let canyon = self.canyon_depth(x, z);
        let volcanic = self.volcanic_effect(x, z);
        let vents = self.vent_relief(x, z);
        let sediment = self.sediment_thickness(x, z);
        let roughness = self.roughness(x, z);
        LayerBreakdown {
            x,
            z,
            province: self.province_at(x),
            base,
            tectonic,
            canyon,
            volcanic,
            vents,
            sediment,
            roughness,
            height: base + tectonic + canyon + volcanic + vents + sediment + roughness,
        }
    }
}

impl TerrainHeightSource for BathymetryGenerator {
    fn terrain_height(&self, x: f64, z: f64) -> f64 {
        self.breakdown(x, z).height
    }

    fn name(&self) -> &'static str {
        "procedural"
    }
}

/// Zero-sized features are legal but almost always a typo in a config file.
fn warn_degenerate(config: &TerrainConfig) {
    for c in config.canyons.iter().filter(|c| c.width <= 0.0) {
        tracing::warn!(canyon = %c.name, "canyon has zero width and will not cut");
    }
    let volcanoes = config.seamount_chain.iter().chain(&config.intraplate_volcanoes);
    for v in volcanoes.filter(|v| v.diameter <= 0.0) {
        tracing::warn!(x = v.position.x, z = v.position.z, "volcano has zero diameter and is skipped");
    }
    if config.ridge.as_ref().is_some_and(|r| r.relief <= 0.0) {
        tracing::warn!("spreading ridge has zero relief");
    }
    let p = &config.provinces;
    for (province, extent) in [
        (Province::Continental, p.continental.extent),
        (Province::Abyssal, p.abyssal.extent),
        (Province::Trench, p.trench.extent),
    ] {
        if extent.width() <= 0.0 {
            tracing::warn!(province = province.name(), "province extent has zero width");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ThrowSense;

    #[test]
    fn breakdown_sums_to_height() {
        let g = BathymetryGenerator::new(TerrainConfig::default()).unwrap();
        for (x, z) in [(-45_000.0, 0.0), (-30_000.0, 9_000.0), (9_000.0, 21_000.0), (42_000.0, -3_000.0)] {
            let b = g.breakdown(x, z);
            let sum = b.base + b.tectonic + b.canyon + b.volcanic + b.vents + b.sediment + b.roughness;
            assert_eq!(b.height, sum);
            assert_eq!(g.terrain_height(x, z), b.height);
        }
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut config = TerrainConfig::default();
        config.sediment.ash_radius = -5.0;
        assert!(BathymetryGenerator::new(config).is_err());
    }

    #[test]
    fn seeded_fault_senses_are_fixed_at_construction() {
        let mut config = TerrainConfig::default();
        config.fault_sense_seed = Some(99);
        let a = BathymetryGenerator::new(config.clone()).unwrap();
        let b = BathymetryGenerator::new(config).unwrap();
        let senses = |g: &BathymetryGenerator| g.config().faults.iter().map(|f| f.sense).collect::<Vec<_>>();
        assert_eq!(senses(&a), senses(&b));
        for (i, fault) in a.config().faults.iter().enumerate() {
            assert_eq!(fault.sense, throw_sense(99, i));
        }
    }

    #[test]
    fn unseeded_faults_keep_configured_sense() {
        let g = BathymetryGenerator::new(TerrainConfig::default()).unwrap();
        assert_eq!(g.config().faults[0].sense, ThrowSense::Up);
        assert_eq!(g.config().faults[1].sense, ThrowSense::Down);
    }

    #[test]
    fn province_follows_classifier() {
        let g = BathymetryGenerator::new(TerrainConfig::default()).unwrap();
        assert_eq!(g.province_at(-45_000.0), Province::Continental);
        assert_eq!(g.province_at(90_000.0), Province::Abyssal);
    }
}

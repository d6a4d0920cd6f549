//! Independent geological layers. Each is a pure function of static config
//! and world coordinates; `generator` sums them.

pub mod canyon;
pub mod province;
pub mod roughness;
pub mod sediment;
pub mod tectonic;
pub mod volcanic;

pub use canyon::canyon_depth;
pub use province::{Province, base_depth, blended_base_depth, classify_province, seam_blend};
pub use roughness::roughness;
pub use sediment::sediment_thickness;
pub use tectonic::tectonic_effect;
pub use volcanic::{vent_relief, volcanic_effect};

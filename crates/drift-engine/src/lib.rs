pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use crate::api::config::{EngineConfig, HueMode, VariantConfig};
pub use crate::core::engine::FlowFieldEngine;
pub use crate::core::field::FlowField;
pub use crate::core::lut::{fast_cos, fast_sin, LUT_RESOLUTION};
pub use crate::core::rng::Rng;
pub use crate::input::queue::{ControlEvent, ControlQueue};
pub use crate::renderer::color::Hsla;
pub use crate::renderer::traits::Surface;
pub use crate::systems::particle::{Particle, Variant};
pub use crate::systems::trail::{Trail, TrailPoint};

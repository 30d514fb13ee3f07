pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{PortraitConfig, SamplerConfig, ParticleConfig, RippleConfig, RippleParams, Palette};
pub use api::types::{Glyph, Viewport};
pub use assets::{AssetError, ImageLibrary, RasterImage};
pub use core::scene::PortraitScene;
pub use core::time::{FixedTimestep, PeriodicTrigger, EmissionSchedule};
pub use input::queue::{SceneEvent, EventQueue};
pub use renderer::frame::{FrameBuffer, GlyphInstance, Overlay};
pub use systems::field::{Particle, ParticleField, Modulation};
pub use systems::ripple::{Ripple, RippleKind, RippleSet};
pub use systems::rng::Rng;
pub use systems::sampler::{sample_homes, contain_fit, grid_step, Fit};

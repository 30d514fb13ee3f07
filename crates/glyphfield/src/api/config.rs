use serde::{Deserialize, Deserializer, Serialize};

/// Top-level configuration for the portrait, provided by the host.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortraitConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Viewport width (CSS px) separating narrow from wide layouts (default: 768).
    pub breakpoint: f32,
    /// RNG seed. `None` lets the host pick one from an entropy source.
    pub seed: Option<u64>,
    pub sampler: SamplerConfig,
    pub particle: ParticleConfig,
    pub ripple: RippleConfig,
    pub palette: Palette,
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            breakpoint: 768.0,
            seed: None,
            sampler: SamplerConfig::default(),
            particle: ParticleConfig::default(),
            ripple: RippleConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl PortraitConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// How source images are turned into particle homes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Fraction of the viewport the fitted image may occupy on each axis.
    pub fit_fraction: f32,
    /// Grid step in image pixels below the breakpoint (denser).
    pub narrow_step: u32,
    /// Grid step in image pixels at or above the breakpoint.
    pub wide_step: u32,
    /// Minimum brightness (0–100) a pixel must exceed to spawn a particle.
    pub brightness_threshold: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            fit_fraction: 0.9,
            narrow_step: 15,
            wide_step: 24,
            brightness_threshold: 10.0,
        }
    }
}

/// Particle physics and glyph sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Pointer distance below which particles are pushed away.
    pub interaction_radius: f32,
    /// Numerator of the `strength / distance` repulsion magnitude.
    pub repulsion_strength: f32,
    /// Floor applied to the pointer distance before dividing.
    pub min_pointer_distance: f32,
    /// Spring constant pulling a particle back to its home.
    pub spring: f32,
    pub max_speed: f32,
    /// Per-step velocity multiplier.
    pub damping: f32,
    /// Glyph size with no ripple nearby.
    pub base_size: f32,
    /// Extra size at the inner edge of a ripple band.
    pub ripple_size_gain: f32,
    /// Maximum jitter offset on each axis at the inner edge of a ripple band.
    pub ripple_jitter: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            interaction_radius: 80.0,
            repulsion_strength: 5.0,
            min_pointer_distance: 1.0,
            spring: 0.05,
            max_speed: 3.0,
            damping: 0.95,
            base_size: 14.0,
            ripple_size_gain: 10.0,
            ripple_jitter: 5.0,
        }
    }
}

/// Speed range and band width for one kind of ripple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleParams {
    pub speed_min: f32,
    pub speed_max: f32,
    pub thickness: f32,
}

impl RippleParams {
    /// Click ripples: fast and narrow.
    pub const MANUAL: Self = Self {
        speed_min: 2.0,
        speed_max: 8.0,
        thickness: 10.0,
    };

    /// Timer ripples: slower and wider.
    pub const AUTO: Self = Self {
        speed_min: 2.0,
        speed_max: 5.0,
        thickness: 15.0,
    };
}

/// A `RippleParams` object where any field may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialRippleParams {
    speed_min: Option<f32>,
    speed_max: Option<f32>,
    thickness: Option<f32>,
}

impl PartialRippleParams {
    fn over(self, base: RippleParams) -> RippleParams {
        RippleParams {
            speed_min: self.speed_min.unwrap_or(base.speed_min),
            speed_max: self.speed_max.unwrap_or(base.speed_max),
            thickness: self.thickness.unwrap_or(base.thickness),
        }
    }
}

fn manual_params<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RippleParams, D::Error> {
    PartialRippleParams::deserialize(deserializer).map(|p| p.over(RippleParams::MANUAL))
}

fn auto_params<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RippleParams, D::Error> {
    PartialRippleParams::deserialize(deserializer).map(|p| p.over(RippleParams::AUTO))
}

/// Ripple emission and capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    /// An insert evicts the oldest ripple when more than this many are live.
    pub capacity: usize,
    #[serde(deserialize_with = "manual_params")]
    pub manual: RippleParams,
    #[serde(deserialize_with = "auto_params")]
    pub auto: RippleParams,
    /// Periods of the independent auto-emission triggers, in milliseconds.
    pub auto_intervals_ms: Vec<f32>,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            manual: RippleParams::MANUAL,
            auto: RippleParams::AUTO,
            auto_intervals_ms: vec![2000.0, 2700.0, 3500.0],
        }
    }
}

/// Colors of the per-frame output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Color of the translucent full-canvas fill drawn each frame.
    pub background: [u8; 3],
    /// Alpha of that fill (0–255); lower values leave longer trails.
    pub overlay_alpha: u8,
    pub glyph: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [10, 10, 20],
            overlay_alpha: 100,
            glyph: [150, 200, 255],
        }
    }
}

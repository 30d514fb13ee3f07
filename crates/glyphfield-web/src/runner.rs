use glyphfield::{
    GlyphInstance, PortraitConfig, PortraitScene, RasterImage, SceneEvent, Viewport,
};

/// Parse the host-supplied config, falling back to defaults on bad JSON.
pub fn resolve_config(json: Option<&str>) -> PortraitConfig {
    match json {
        None => PortraitConfig::default(),
        Some(json) => PortraitConfig::from_json(json).unwrap_or_else(|e| {
            log::error!("invalid portrait config, using defaults: {}", e);
            PortraitConfig::default()
        }),
    }
}

/// Wires the portrait scene to the browser host.
///
/// Owns the one `PortraitScene`, turns fetched asset bytes into images, and
/// hands out raw pointers into the frame buffer for zero-copy reads from JS.
pub struct PortraitRunner {
    scene: PortraitScene,
}

impl PortraitRunner {
    /// `seed` is used unless the config pins one.
    pub fn new(config: PortraitConfig, width: f32, height: f32, seed: u64) -> Self {
        let seed = config.seed.unwrap_or(seed);
        Self {
            scene: PortraitScene::new(config, Viewport::new(width, height), seed),
        }
    }

    /// Decode and install the primary image. Returns false if it could not be
    /// decoded; the portrait then stays empty.
    pub fn load_primary(&mut self, bytes: &[u8]) -> bool {
        match RasterImage::decode(bytes) {
            Ok(image) => {
                self.scene.set_primary_image(image);
                true
            }
            Err(e) => {
                log::error!("primary image failed to load: {}", e);
                false
            }
        }
    }

    /// Install the primary image from raw RGBA (e.g. canvas `ImageData`).
    pub fn load_primary_rgba(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> bool {
        match RasterImage::from_rgba(width, height, rgba) {
            Ok(image) => {
                self.scene.set_primary_image(image);
                true
            }
            Err(e) => {
                log::error!("primary image rejected: {}", e);
                false
            }
        }
    }

    /// Decode and install the optional narrow image; failures fall back.
    pub fn load_narrow(&mut self, bytes: &[u8]) {
        self.scene.set_narrow_image(RasterImage::decode(bytes));
    }

    /// The host could not fetch the narrow image.
    pub fn narrow_missing(&mut self, reason: &str) {
        self.scene.narrow_image_failed(reason);
    }

    pub fn push_event(&mut self, event: SceneEvent) {
        self.scene.push_event(event);
    }

    /// Run one animation frame.
    pub fn tick(&mut self, dt: f32) {
        self.scene.tick(dt);
    }

    pub fn scene(&self) -> &PortraitScene {
        &self.scene
    }

    // ---- Frame accessors for zero-copy reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.scene.frame().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.scene.frame().instance_count()
    }

    pub fn instance_floats(&self) -> u32 {
        GlyphInstance::FLOATS as u32
    }

    pub fn frame_counter(&self) -> u32 {
        self.scene.frame_counter()
    }

    pub fn particle_count(&self) -> u32 {
        self.scene.field().len() as u32
    }

    pub fn ripple_count(&self) -> u32 {
        self.scene.ripples().len() as u32
    }

    pub fn overlay_rgb(&self) -> [u8; 3] {
        self.scene.frame().overlay.rgb
    }

    pub fn overlay_alpha(&self) -> f32 {
        self.scene.frame().overlay.alpha_fraction()
    }

    pub fn glyph_rgb(&self) -> [u8; 3] {
        self.scene.frame().glyph_color
    }
}

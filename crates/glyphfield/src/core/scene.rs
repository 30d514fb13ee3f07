use glam::Vec2;

use crate::api::config::PortraitConfig;
use crate::api::types::Viewport;
use crate::assets::error::AssetError;
use crate::assets::library::ImageLibrary;
use crate::assets::raster::RasterImage;
use crate::core::time::{EmissionSchedule, FixedTimestep};
use crate::input::queue::{EventQueue, SceneEvent};
use crate::renderer::frame::FrameBuffer;
use crate::systems::field::{Particle, ParticleField};
use crate::systems::ripple::RippleSet;
use crate::systems::rng::Rng;
use crate::systems::sampler::sample_homes;

/// All mutable state of one portrait view.
///
/// Nothing outside this struct changes between frames: the host pushes
/// events and assets in, calls `tick`, and reads `frame()` back out.
pub struct PortraitScene {
    config: PortraitConfig,
    viewport: Viewport,
    /// Last known pointer position; `None` before the first move or after leaving.
    pointer: Option<Vec2>,
    images: ImageLibrary,
    field: ParticleField,
    ripples: RippleSet,
    rng: Rng,
    schedule: EmissionSchedule,
    timestep: FixedTimestep,
    events: EventQueue,
    frame: FrameBuffer,
    frame_counter: u32,
    resample_pending: bool,
}

impl PortraitScene {
    pub fn new(mut config: PortraitConfig, viewport: Viewport, seed: u64) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        if timestep.dt() != config.fixed_dt {
            log::warn!(
                "fixed_dt {} is not a usable step, clamped to {}",
                config.fixed_dt,
                timestep.dt()
            );
            config.fixed_dt = timestep.dt();
        }

        Self {
            viewport,
            pointer: None,
            images: ImageLibrary::new(),
            field: ParticleField::new(config.particle.clone()),
            ripples: RippleSet::new(config.ripple.clone()),
            rng: Rng::new(seed),
            schedule: EmissionSchedule::from_millis(&config.ripple.auto_intervals_ms),
            timestep,
            events: EventQueue::new(),
            frame: FrameBuffer::new(&config.palette),
            frame_counter: 0,
            resample_pending: false,
            config,
        }
    }

    /// Queue a host event. Applied at the start of the next `tick`.
    pub fn push_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    pub fn set_primary_image(&mut self, image: RasterImage) {
        self.images.set_primary(image);
        self.resample_pending = true;
    }

    /// Accept the outcome of loading the optional narrow image.
    /// A failure falls back to the primary image.
    pub fn set_narrow_image(&mut self, result: Result<RasterImage, AssetError>) {
        self.images.load_narrow(result);
        self.resample_pending = true;
    }

    /// The narrow image could not be fetched at all.
    pub fn narrow_image_failed(&mut self, reason: &str) {
        self.images.narrow_unavailable(reason);
        self.resample_pending = true;
    }

    /// Advance by a wall-clock delta in seconds. Returns the number of
    /// physics steps run.
    ///
    /// Order within a tick: due emissions are queued, the queue is drained,
    /// a pending re-sample replaces the particle set, physics steps run, and
    /// the frame is rebuilt if anything moved.
    pub fn tick(&mut self, dt: f32) -> u32 {
        for _ in 0..self.schedule.advance(dt) {
            self.events.push(SceneEvent::AutoRipple);
        }

        for event in self.events.drain() {
            self.apply(event);
        }

        if self.resample_pending {
            self.resample();
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ripples.tick(self.viewport);
            self.field.advance(self.pointer);
        }

        if steps > 0 {
            self.field.render_into(&self.ripples, &mut self.rng, &mut self.frame);
            self.frame_counter = self.frame_counter.wrapping_add(1);
        }

        steps
    }

    fn apply(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
            SceneEvent::PointerLeave => self.pointer = None,
            SceneEvent::Click { x, y } => self.ripples.add_manual(Vec2::new(x, y), &mut self.rng),
            SceneEvent::AutoRipple => self.ripples.add_auto(self.viewport, &mut self.rng),
            SceneEvent::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.resample_pending = true;
            }
        }
    }

    /// Rebuild the particle set from the image that fits the current viewport.
    /// Without an image, or with a degenerate viewport, the current set stays.
    fn resample(&mut self) {
        self.resample_pending = false;

        if self.viewport.is_degenerate() {
            log::warn!(
                "skipping re-sample for degenerate viewport {}x{}",
                self.viewport.width,
                self.viewport.height
            );
            return;
        }

        let Some(image) = self.images.select(self.viewport.width, self.config.breakpoint) else {
            log::debug!("no image loaded yet, nothing to sample");
            return;
        };

        let homes = sample_homes(image, self.viewport, &self.config.sampler, self.config.breakpoint);
        self.field.reset(&homes, &mut self.rng);
        log::info!(
            "sampled {} particles for {}x{} viewport",
            self.field.len(),
            self.viewport.width,
            self.viewport.height
        );
    }

    pub fn config(&self) -> &PortraitConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn ripples(&self) -> &RippleSet {
        &self.ripples
    }

    pub fn images(&self) -> &ImageLibrary {
        &self.images
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Bumped every time the frame buffer is rebuilt.
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }
}

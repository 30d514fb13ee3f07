//! Glyph particles: spring-to-home physics with pointer repulsion, plus the
//! per-frame ripple modulation that decides how each glyph is drawn.

use glam::Vec2;

use crate::api::config::ParticleConfig;
use crate::api::types::Glyph;
use crate::renderer::frame::{FrameBuffer, GlyphInstance};
use crate::systems::rng::Rng;
use crate::systems::ripple::RippleSet;

/// A single glyph particle anchored to a sampled home position.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    home: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Forces accumulated this step; zeroed after integration.
    pub acceleration: Vec2,
    glyph: Glyph,
}

impl Particle {
    /// A particle at rest on its home position.
    pub fn new(home: Vec2, glyph: Glyph) -> Self {
        Self {
            home,
            position: home,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            glyph,
        }
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Push away from the pointer when it is inside the interaction radius.
    /// Magnitude is `strength / d`, with `d` floored to avoid blow-up.
    fn repel(&mut self, pointer: Vec2, config: &ParticleConfig) {
        let d = self.position.distance(pointer);
        if d < config.interaction_radius {
            let d = d.max(config.min_pointer_distance);
            let away = (self.position - pointer).normalize_or_zero();
            self.apply_force(away * (config.repulsion_strength / d));
        }
    }

    /// One physics step: repulsion, home spring, integrate, clamp, damp.
    pub fn update(&mut self, pointer: Option<Vec2>, config: &ParticleConfig) {
        if let Some(pointer) = pointer {
            self.repel(pointer, config);
        }

        let spring = (self.home - self.position) * config.spring;
        self.apply_force(spring);

        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_length_max(config.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;

        self.velocity *= config.damping;
    }
}

/// How a particle is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulation {
    pub size: f32,
    pub jitter: Vec2,
}

/// Visual modulation of `particle` by every ripple band it sits in.
///
/// Size grows additively across overlapping bands; jitter is re-rolled per
/// band, so the newest band containing the particle decides it.
pub fn modulation(
    particle: &Particle,
    ripples: &RippleSet,
    rng: &mut Rng,
    config: &ParticleConfig,
) -> Modulation {
    let mut size = config.base_size;
    let mut jitter = Vec2::ZERO;

    for ripple in ripples.iter() {
        if let Some(effect) = ripple.effect_at(particle.position) {
            size += config.ripple_size_gain * effect;
            let j = config.ripple_jitter;
            jitter = Vec2::new(rng.range(-j, j), rng.range(-j, j)) * effect;
        }
    }

    Modulation { size, jitter }
}

/// Owns the current particle set.
pub struct ParticleField {
    particles: Vec<Particle>,
    config: ParticleConfig,
}

impl ParticleField {
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            particles: Vec::new(),
            config,
        }
    }

    /// Replace every particle with a fresh one resting on each point.
    pub fn reset(&mut self, points: &[Vec2], rng: &mut Rng) {
        self.particles = points
            .iter()
            .map(|&home| Particle::new(home, Glyph::random(rng)))
            .collect();
    }

    /// Advance every particle by one step.
    pub fn advance(&mut self, pointer: Option<Vec2>) {
        for particle in &mut self.particles {
            particle.update(pointer, &self.config);
        }
    }

    /// Write one glyph instance per particle into `frame`.
    /// Reads particle state only; randomness goes to jitter.
    pub fn render_into(&self, ripples: &RippleSet, rng: &mut Rng, frame: &mut FrameBuffer) {
        frame.clear();
        for particle in &self.particles {
            let m = modulation(particle, ripples, rng, &self.config);
            let at = particle.position + m.jitter;
            frame.push(GlyphInstance {
                x: at.x,
                y: at.y,
                size: m.size,
                glyph: particle.glyph.code(),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::RippleConfig;
    use crate::systems::ripple::{Ripple, RippleKind};

    fn displaced(home: Vec2, position: Vec2) -> Particle {
        let mut p = Particle::new(home, Glyph::Zero);
        p.position = position;
        p
    }

    fn ripples_with(list: &[Ripple]) -> RippleSet {
        let mut set = RippleSet::new(RippleConfig::default());
        for r in list {
            set.push(r.clone());
        }
        set
    }

    #[test]
    fn spring_step_arithmetic() {
        let config = ParticleConfig::default();
        let mut p = displaced(Vec2::ZERO, Vec2::new(10.0, 0.0));
        p.update(None, &config);
        assert!((p.position.x - 9.5).abs() < 1e-5, "pos {:?}", p.position);
        assert!((p.velocity.x + 0.475).abs() < 1e-5, "vel {:?}", p.velocity);
        assert_eq!(p.acceleration, Vec2::ZERO);
    }

    #[test]
    fn velocity_never_exceeds_max_speed() {
        let config = ParticleConfig::default();
        let mut rng = Rng::new(2024);
        let mut field = ParticleField::new(config.clone());
        let homes: Vec<Vec2> = (0..20).map(|i| Vec2::new(i as f32 * 7.0, 50.0)).collect();
        field.reset(&homes, &mut rng);

        for step in 0..500 {
            let pointer = Vec2::new(rng.range(-20.0, 160.0), rng.range(0.0, 100.0));
            field.advance(Some(pointer));
            for p in field.particles() {
                assert!(
                    p.velocity.length() <= config.max_speed + 1e-4,
                    "step {} speed {}",
                    step,
                    p.velocity.length()
                );
            }
        }
    }

    #[test]
    fn far_pointer_exerts_no_force() {
        let config = ParticleConfig::default();
        let start = displaced(Vec2::ZERO, Vec2::new(3.0, 4.0));

        let mut with_pointer = start.clone();
        with_pointer.update(Some(Vec2::new(3.0, 84.0)), &config); // distance exactly 80
        let mut without = start.clone();
        without.update(None, &config);

        assert_eq!(with_pointer, without);
    }

    #[test]
    fn near_pointer_pushes_away() {
        let config = ParticleConfig::default();
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Glyph::One);
        p.update(Some(Vec2::new(90.0, 100.0)), &config);
        assert!(p.position.x > 100.0, "pos {:?}", p.position);
        assert!((p.position.y - 100.0).abs() < 1e-5);
        // 5 / 10 = 0.5, minus nothing from the spring on the first step
        assert!((p.position.x - 100.5).abs() < 1e-5);
    }

    #[test]
    fn close_pointer_distance_is_floored() {
        let config = ParticleConfig::default();
        let mut p = Particle::new(Vec2::ZERO, Glyph::One);
        p.update(Some(Vec2::new(-0.25, 0.0)), &config);
        // Force is 5 / 1, then clamped to max speed
        assert!((p.position.x - config.max_speed).abs() < 1e-5, "pos {:?}", p.position);
    }

    #[test]
    fn pointer_on_top_of_particle_is_harmless() {
        let config = ParticleConfig::default();
        let mut p = Particle::new(Vec2::new(5.0, 5.0), Glyph::One);
        p.update(Some(Vec2::new(5.0, 5.0)), &config);
        assert!(p.position.is_finite());
        assert_eq!(p.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn displaced_particle_settles_home() {
        let config = ParticleConfig::default();
        let mut p = displaced(Vec2::new(200.0, 200.0), Vec2::new(260.0, 150.0));
        for _ in 0..600 {
            p.update(None, &config);
        }
        assert!(p.position.distance(p.home()) < 0.01, "pos {:?}", p.position);
        assert!(p.velocity.length() < 0.01);
    }

    #[test]
    fn reset_places_particles_at_rest() {
        let mut rng = Rng::new(1);
        let mut field = ParticleField::new(ParticleConfig::default());
        field.reset(&[Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)], &mut rng);
        field.advance(Some(Vec2::new(1.0, 10.0)));

        field.reset(&[Vec2::new(7.0, 8.0)], &mut rng);
        assert_eq!(field.len(), 1);
        let p = &field.particles()[0];
        assert_eq!(p.home(), Vec2::new(7.0, 8.0));
        assert_eq!(p.position, p.home());
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.acceleration, Vec2::ZERO);
    }

    #[test]
    fn no_ripples_means_base_size() {
        let mut rng = Rng::new(1);
        let config = ParticleConfig::default();
        let p = Particle::new(Vec2::new(10.0, 10.0), Glyph::Zero);
        let m = modulation(&p, &ripples_with(&[]), &mut rng, &config);
        assert_eq!(m.size, 14.0);
        assert_eq!(m.jitter, Vec2::ZERO);
    }

    #[test]
    fn ripple_band_enlarges_and_jitters() {
        let mut rng = Rng::new(9);
        let config = ParticleConfig::default();
        let mut ripple = Ripple::new(Vec2::ZERO, 1.0, 10.0, RippleKind::Manual);
        ripple.radius = 80.0;
        let p = Particle::new(Vec2::new(85.0, 0.0), Glyph::Zero);

        let m = modulation(&p, &ripples_with(&[ripple]), &mut rng, &config);
        assert!((m.size - 19.0).abs() < 1e-4, "size {}", m.size);
        assert!(m.jitter.x.abs() <= 2.5 && m.jitter.y.abs() <= 2.5, "jitter {:?}", m.jitter);
    }

    #[test]
    fn jitter_reaches_rendered_position() {
        let mut rng = Rng::new(9);
        let mut field = ParticleField::new(ParticleConfig::default());
        field.reset(&[Vec2::new(85.0, 0.0)], &mut rng);
        let mut ripple = Ripple::new(Vec2::ZERO, 1.0, 10.0, RippleKind::Manual);
        ripple.radius = 80.0;

        // Same draws the band will make: effect 0.5 scales [-5, 5) per axis
        let mut expected = rng.clone();
        let jitter = Vec2::new(expected.range(-5.0, 5.0), expected.range(-5.0, 5.0)) * 0.5;
        assert_ne!(jitter, Vec2::ZERO);

        let mut frame = FrameBuffer::default();
        field.render_into(&ripples_with(&[ripple]), &mut rng, &mut frame);
        let p = &field.particles()[0];
        let inst = frame.instances[0];
        assert_eq!((inst.x, inst.y), (p.position.x + jitter.x, p.position.y + jitter.y));
        assert!((inst.size - 19.0).abs() < 1e-4);
    }

    #[test]
    fn newest_band_decides_jitter() {
        let mut rng = Rng::new(21);
        let config = ParticleConfig::default();
        let mut older = Ripple::new(Vec2::ZERO, 1.0, 10.0, RippleKind::Manual);
        older.radius = 80.0;
        let mut newer = Ripple::new(Vec2::new(170.0, 0.0), 1.0, 10.0, RippleKind::Auto);
        newer.radius = 80.0;
        let p = Particle::new(Vec2::new(85.0, 0.0), Glyph::One);

        // The older band rolls first, then the newer band re-rolls
        let mut expected = rng.clone();
        expected.range(-5.0, 5.0);
        expected.range(-5.0, 5.0);
        let last = Vec2::new(expected.range(-5.0, 5.0), expected.range(-5.0, 5.0)) * 0.5;

        let m = modulation(&p, &ripples_with(&[older, newer]), &mut rng, &config);
        assert_eq!(m.jitter, last);
        assert!((m.size - 24.0).abs() < 1e-4, "size {}", m.size);
    }

    #[test]
    fn overlapping_bands_add_size() {
        let mut rng = Rng::new(9);
        let config = ParticleConfig::default();
        let mut a = Ripple::new(Vec2::ZERO, 1.0, 10.0, RippleKind::Manual);
        a.radius = 80.0;
        let mut b = Ripple::new(Vec2::new(170.0, 0.0), 1.0, 10.0, RippleKind::Auto);
        b.radius = 80.0;
        let p = Particle::new(Vec2::new(85.0, 0.0), Glyph::Zero);

        let m = modulation(&p, &ripples_with(&[a, b]), &mut rng, &config);
        assert!((m.size - 24.0).abs() < 1e-4, "size {}", m.size);
    }

    #[test]
    fn render_writes_one_instance_per_particle() {
        let mut rng = Rng::new(4);
        let mut field = ParticleField::new(ParticleConfig::default());
        field.reset(&[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0)], &mut rng);

        let mut frame = FrameBuffer::default();
        frame.push(GlyphInstance::default());
        field.render_into(&ripples_with(&[]), &mut rng, &mut frame);

        assert_eq!(frame.instance_count(), 3);
        for (inst, p) in frame.instances.iter().zip(field.particles()) {
            assert_eq!((inst.x, inst.y), (p.position.x, p.position.y));
            assert_eq!(inst.size, 14.0);
            assert_eq!(inst.glyph, p.glyph().code());
        }
    }
}

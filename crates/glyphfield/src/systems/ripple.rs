//! Expanding ripple bands that modulate glyph size and jitter.

use std::collections::VecDeque;

use glam::Vec2;

use crate::api::config::{RippleConfig, RippleParams};
use crate::api::types::Viewport;
use crate::systems::rng::Rng;

/// Where a ripple came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RippleKind {
    /// Spawned by a click.
    Manual,
    /// Spawned by the emission schedule.
    Auto,
}

/// An expanding circular band.
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    /// Inner radius; grows by `speed` every tick and never shrinks.
    pub radius: f32,
    pub speed: f32,
    /// Width of the band beyond `radius`.
    pub thickness: f32,
    pub kind: RippleKind,
}

impl Ripple {
    pub fn new(center: Vec2, speed: f32, thickness: f32, kind: RippleKind) -> Self {
        Self {
            center,
            radius: 0.0,
            speed,
            thickness,
            kind,
        }
    }

    fn spawn(center: Vec2, params: &RippleParams, kind: RippleKind, rng: &mut Rng) -> Self {
        let speed = rng.range(params.speed_min, params.speed_max);
        Self::new(center, speed, params.thickness, kind)
    }

    /// Band strength at `point`: 1.0 at the inner edge falling toward 0.0 at
    /// the outer edge, `None` outside the open annulus
    /// `radius < d < radius + thickness`.
    pub fn effect_at(&self, point: Vec2) -> Option<f32> {
        let d_sq = point.distance_squared(self.center);
        let outer = self.radius + self.thickness;
        if d_sq > self.radius * self.radius && d_sq < outer * outer {
            Some(1.0 - (d_sq.sqrt() - self.radius) / self.thickness)
        } else {
            None
        }
    }
}

/// Insertion-ordered, softly capped collection of live ripples.
///
/// Inserting when more than `capacity` ripples are live evicts the oldest
/// first, so the set holds at most `capacity + 1` ripples.
#[derive(Debug, Clone)]
pub struct RippleSet {
    ripples: VecDeque<Ripple>,
    config: RippleConfig,
}

impl RippleSet {
    pub fn new(config: RippleConfig) -> Self {
        Self {
            ripples: VecDeque::with_capacity(config.capacity + 1),
            config,
        }
    }

    /// Insert a ripple, evicting the oldest one if the set is over capacity.
    pub fn push(&mut self, ripple: Ripple) {
        if self.ripples.len() > self.config.capacity {
            self.ripples.pop_front();
        }
        log::debug!(
            "ripple {:?} at ({:.0}, {:.0}) speed {:.2}",
            ripple.kind,
            ripple.center.x,
            ripple.center.y,
            ripple.speed
        );
        self.ripples.push_back(ripple);
    }

    /// Start a click ripple at `at`.
    pub fn add_manual(&mut self, at: Vec2, rng: &mut Rng) {
        let ripple = Ripple::spawn(at, &self.config.manual, RippleKind::Manual, rng);
        self.push(ripple);
    }

    /// Start an autonomous ripple at a random point inside the viewport.
    pub fn add_auto(&mut self, viewport: Viewport, rng: &mut Rng) {
        let center = Vec2::new(rng.range(0.0, viewport.width), rng.range(0.0, viewport.height));
        let ripple = Ripple::spawn(center, &self.config.auto, RippleKind::Auto, rng);
        self.push(ripple);
    }

    /// Grow every ripple by its speed and drop the ones past the viewport
    /// horizon. Returns how many expired.
    pub fn tick(&mut self, viewport: Viewport) -> usize {
        let horizon = viewport.ripple_horizon();
        let before = self.ripples.len();
        for ripple in self.ripples.iter_mut() {
            ripple.radius += ripple.speed;
        }
        self.ripples.retain(|r| r.radius <= horizon);
        before - self.ripples.len()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }
}

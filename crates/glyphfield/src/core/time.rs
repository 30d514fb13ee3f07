/// Fixed timestep accumulator.
/// Ensures the simulation runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// Smallest accepted step (1 ms). Zero, negative or NaN steps clamp to it.
    pub const MIN_DT: f32 = 0.001;

    pub fn new(dt: f32) -> Self {
        Self {
            dt: dt.max(Self::MIN_DT),
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// A repeating trigger driven by a virtual clock.
///
/// Behaves like a browser interval timer, except time only moves when
/// `advance` is called, so firing is deterministic and single-threaded.
#[derive(Debug, Clone)]
pub struct PeriodicTrigger {
    interval: f32,
    elapsed: f32,
}

impl PeriodicTrigger {
    /// Fires at most this many times per `advance`, so a long stall
    /// (e.g. a backgrounded tab) does not unload a burst of events.
    pub const MAX_CATCH_UP: u32 = 3;

    /// `interval` is in seconds.
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Move the clock forward by `dt` seconds. Returns how many times the
    /// trigger fired.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.elapsed += dt.max(0.0);
        let due = (self.elapsed / self.interval) as u32;
        self.elapsed -= due as f32 * self.interval;
        due.min(Self::MAX_CATCH_UP)
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}

/// The set of independent auto-ripple triggers.
///
/// Periods that share no common beat (2.0 s, 2.7 s, 3.5 s by default) make
/// the combined emission feel irregular.
#[derive(Debug, Clone)]
pub struct EmissionSchedule {
    triggers: Vec<PeriodicTrigger>,
}

impl EmissionSchedule {
    pub fn from_millis(intervals_ms: &[f32]) -> Self {
        Self {
            triggers: intervals_ms
                .iter()
                .map(|ms| PeriodicTrigger::new(ms / 1000.0))
                .collect(),
        }
    }

    /// Advance every trigger by `dt` seconds. Returns the total number of
    /// emissions due.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.triggers.iter_mut().map(|t| t.advance(dt)).sum()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0); // 60 frames worth, but capped at 10
        assert_eq!(steps, 10);
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        // Nothing was banked by the negative delta
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn bad_step_sizes_are_clamped() {
        for dt in [0.0, -0.5, f32::NAN] {
            let mut ts = FixedTimestep::new(dt);
            assert_eq!(ts.dt(), FixedTimestep::MIN_DT);
            assert_eq!(ts.accumulate(0.0), 0, "dt {}", dt);
            assert_eq!(ts.accumulate(0.0025), 2, "dt {}", dt);
        }
    }

    #[test]
    fn trigger_fires_on_interval() {
        let mut t = PeriodicTrigger::new(2.0);
        assert_eq!(t.advance(1.5), 0);
        assert_eq!(t.advance(0.5), 1);
        assert_eq!(t.advance(1.9), 0);
        assert_eq!(t.advance(0.2), 1);
    }

    #[test]
    fn trigger_catch_up_is_capped() {
        let mut t = PeriodicTrigger::new(1.0);
        assert_eq!(t.advance(60.0), PeriodicTrigger::MAX_CATCH_UP);
        // The backlog is dropped, not deferred
        assert_eq!(t.advance(0.5), 0);
    }

    #[test]
    fn schedule_matches_interval_counts() {
        let mut schedule = EmissionSchedule::from_millis(&[2000.0, 2700.0, 3500.0]);
        assert_eq!(schedule.len(), 3);

        // 10.3 s in 100 ms ticks: 5 + 3 + 2 emissions
        let mut total = 0;
        for _ in 0..103 {
            total += schedule.advance(0.1);
        }
        assert_eq!(total, 10);
    }
}

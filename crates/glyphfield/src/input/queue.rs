/// Events the scene understands, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// The cursor/touch moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The pointer left the drawing surface.
    PointerLeave,
    /// A click/tap at (x, y). Starts a manual ripple.
    Click { x: f32, y: f32 },
    /// The drawing surface was resized.
    Resize { width: f32, height: f32 },
    /// An emission trigger fired. Starts an auto ripple.
    AutoRipple,
}

/// A FIFO of scene events.
/// The host and the emission schedule push; the scene drains once per tick,
/// before any physics runs.
pub struct EventQueue {
    events: Vec<SceneEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order and clear the queue.
    pub fn drain(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

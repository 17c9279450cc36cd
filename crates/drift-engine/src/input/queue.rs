use glam::Vec2;

/// Input event types the display understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click/tap at canvas coordinates (x, y).
    PointerDown { x: f32, y: f32 },
}

impl InputEvent {
    /// Canvas position for pointer events.
    pub fn position(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y } => Vec2::new(x, y),
        }
    }
}

/// A queue of input events.
/// The host pushes events between frames; the display drains them at the
/// start of the next frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

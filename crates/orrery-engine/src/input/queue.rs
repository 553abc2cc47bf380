/// Control-panel commands. Queued like pointer input so they apply at the
/// next tick boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    TogglePlaying,
    SetSpeed(f64),
    /// Aim the camera at a body by name and select it.
    FocusOn(String),
    /// Restore the home view and clear the selection.
    ResetView,
}

/// Input events the engine understands. Pointer coordinates are screen
/// pixels, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A press ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor left the surface.
    PointerLeave,
    /// Wheel scroll. Positive zooms out.
    Wheel { delta_y: f32 },
    /// A click, delivered by the host after the release.
    Click { x: f32, y: f32 },
    /// The drawing surface changed size.
    Resize { width: f32, height: f32 },
    Control(ControlCommand),
}

/// A queue of input events.
/// JS writes events into the queue; the scheduler drains it each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
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

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Drop everything pending.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

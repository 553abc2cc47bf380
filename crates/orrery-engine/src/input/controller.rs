//! Camera controller: pointer drag, wheel zoom, one-shot focus and reset.
//!
//! Drag handling is a two-state machine driven by [`transition`]. The
//! controller applies the deltas it emits and keeps the camera distance
//! inside the configured bounds.

use glam::{Vec2, Vec3};

use crate::api::config::CameraConfig;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;

/// Pointer input as the drag state machine sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { start: Vec2, last: Vec2 },
}

/// One step of the drag state machine. Returns the next state and, for a
/// move while dragging, the pointer delta since the previous move.
pub fn transition(state: DragState, event: PointerEvent) -> (DragState, Option<Vec2>) {
    match (state, event) {
        (_, PointerEvent::Down(p)) => (DragState::Dragging { start: p, last: p }, None),
        (DragState::Idle, PointerEvent::Move(_)) => (DragState::Idle, None),
        (DragState::Dragging { start, last }, PointerEvent::Move(p)) => {
            (DragState::Dragging { start, last: p }, Some(p - last))
        }
        (_, PointerEvent::Up | PointerEvent::Leave) => (DragState::Idle, None),
    }
}

/// Owns the camera and everything user input does to it.
pub struct CameraController {
    camera: PerspectiveCamera,
    config: CameraConfig,
    state: DragState,
    /// Body the last `focus_on` aimed at. Drags re-pin the target to it.
    focus: Option<String>,
    /// Set when the last press travelled far enough to count as a drag.
    suppress_click: bool,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            camera: PerspectiveCamera::from_config(&config),
            config,
            state: DragState::Idle,
            focus: None,
            suppress_click: false,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Name of the body the camera was last focused on.
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Feed a pointer event. Drag deltas move the camera in screen-aligned
    /// world axes; the target is then re-pinned to the focused body (or the
    /// origin without a focus).
    pub fn handle_pointer(&mut self, event: PointerEvent, scene: &Scene) {
        let previous = self.state;
        let (next, delta) = transition(previous, event);
        self.state = next;

        match (previous, event) {
            (_, PointerEvent::Down(_)) => self.suppress_click = false,
            (DragState::Dragging { start, last }, PointerEvent::Up | PointerEvent::Leave) => {
                self.suppress_click = start.distance(last) > self.config.click_drag_threshold;
            }
            _ => {}
        }

        if let Some(delta) = delta {
            self.apply_drag(delta, self.anchor(scene));
        }
    }

    fn anchor(&self, scene: &Scene) -> Vec3 {
        self.focus
            .as_deref()
            .and_then(|name| scene.find_by_name(name))
            .map(|body| body.world_position())
            .unwrap_or(Vec3::ZERO)
    }

    fn apply_drag(&mut self, delta: Vec2, anchor: Vec3) {
        let sensitivity = self.config.drag_sensitivity;
        let mut position = self.camera.position;
        position.x += delta.x * sensitivity;
        position.y -= delta.y * sensitivity;

        let offset = position - anchor;
        if offset.length_squared() < 1e-12 {
            log::debug!("camera: drag would collapse onto target, ignored");
            return;
        }
        self.camera.target = anchor;
        self.camera.position = anchor + self.clamp_offset(offset);
    }

    /// Zoom about the current target. A positive delta moves away by
    /// `zoom_step`, a negative one moves closer by its reciprocal.
    pub fn wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let factor = if delta_y > 0.0 {
            self.config.zoom_step
        } else {
            self.config.zoom_step.recip()
        };
        let offset = self.camera.position - self.camera.target;
        if offset.length_squared() < 1e-12 {
            return;
        }
        self.camera.position = self.camera.target + self.clamp_offset(offset * factor);
    }

    fn clamp_offset(&self, offset: Vec3) -> Vec3 {
        let distance = offset.length();
        let clamped = distance.clamp(self.config.min_distance, self.config.max_distance);
        if clamped == distance {
            offset
        } else {
            offset * (clamped / distance)
        }
    }

    /// Aim at a body's current position from a fixed diagonal offset.
    /// Returns false, leaving the camera untouched, if no body has `name`.
    pub fn focus_on(&mut self, name: &str, scene: &Scene) -> bool {
        let Some(body) = scene.find_by_name(name) else {
            return false;
        };
        let target = body.world_position();
        let d = body.orbital_radius + self.config.focus_margin;
        let offset = Vec3::new(d, self.config.focus_elevation, d);
        self.camera.target = target;
        self.camera.position = target + self.clamp_offset(offset);
        self.focus = Some(body.name.clone());
        true
    }

    /// Home position and target; forgets the focus.
    pub fn reset(&mut self) {
        self.camera.position = Vec3::from_array(self.config.home_position);
        self.camera.target = Vec3::from_array(self.config.home_target);
        self.focus = None;
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.camera.set_viewport(width, height)
    }

    /// Whether a click arriving now should select. False right after a drag.
    pub fn accepts_click(&self) -> bool {
        !self.suppress_click
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

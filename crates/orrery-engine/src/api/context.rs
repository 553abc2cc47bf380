use glam::Vec2;

use crate::api::config::OrreryConfig;
use crate::api::error::OrreryResult;
use crate::api::types::{BodyInfo, SimEvent};
use crate::core::clock::SimulationClock;
use crate::core::scene::Scene;
use crate::input::controller::{CameraController, PointerEvent};
use crate::input::queue::{ControlCommand, InputEvent};
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::{orbit, picking};

/// All mutable simulation state, passed explicitly to every operation.
pub struct SimContext {
    pub scene: Scene,
    pub clock: SimulationClock,
    controller: CameraController,
    selected: Option<String>,
    events: Vec<SimEvent>,
}

impl SimContext {
    pub fn new(config: &OrreryConfig, scene: Scene) -> Self {
        Self {
            scene,
            clock: SimulationClock::new(config.initial_speed, config.start_playing),
            controller: CameraController::new(config.camera.clone()),
            selected: None,
            events: Vec::new(),
        }
    }

    /// Apply one queued input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.controller
                    .handle_pointer(PointerEvent::Down(Vec2::new(x, y)), &self.scene);
            }
            InputEvent::PointerMove { x, y } => {
                self.controller
                    .handle_pointer(PointerEvent::Move(Vec2::new(x, y)), &self.scene);
            }
            InputEvent::PointerUp { .. } => {
                self.controller.handle_pointer(PointerEvent::Up, &self.scene);
            }
            InputEvent::PointerLeave => {
                self.controller.handle_pointer(PointerEvent::Leave, &self.scene);
            }
            InputEvent::Wheel { delta_y } => self.controller.wheel(delta_y),
            InputEvent::Click { x, y } => {
                self.select_at(Vec2::new(x, y));
            }
            InputEvent::Resize { width, height } => {
                if !self.controller.resize(width, height) {
                    log::warn!("context: ignoring resize to {width}x{height}");
                }
            }
            InputEvent::Control(command) => self.apply_command(command),
        }
    }

    pub fn apply_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::TogglePlaying => {
                self.toggle_playing();
            }
            ControlCommand::SetSpeed(multiplier) => {
                if let Err(err) = self.set_speed(multiplier) {
                    log::warn!("context: {err}");
                }
            }
            ControlCommand::FocusOn(name) => {
                self.focus_on(&name);
            }
            ControlCommand::ResetView => self.reset_view(),
        }
    }

    /// Flip play/pause. Returns the new state.
    pub fn toggle_playing(&mut self) -> bool {
        let playing = self.clock.toggle_playing();
        self.emit_playback();
        playing
    }

    /// Change the speed multiplier. The previous value is kept on error.
    pub fn set_speed(&mut self, multiplier: f64) -> OrreryResult<()> {
        self.clock.set_speed(multiplier)?;
        self.emit_playback();
        Ok(())
    }

    fn emit_playback(&mut self) {
        self.events.push(SimEvent::Playback {
            playing: self.clock.is_playing(),
            speed: self.clock.speed(),
        });
    }

    /// Aim the camera at a body and select it. Unknown names change nothing.
    pub fn focus_on(&mut self, name: &str) -> bool {
        if !self.controller.focus_on(name, &self.scene) {
            log::debug!("context: no body named `{name}` to focus on");
            return false;
        }
        log::debug!("context: focused on `{name}`");
        self.events.push(SimEvent::Focus {
            name: Some(name.to_string()),
        });
        self.set_selection(Some(name.to_string()));
        true
    }

    /// Home view, no focus, no selection.
    pub fn reset_view(&mut self) {
        self.controller.reset();
        self.events.push(SimEvent::Focus { name: None });
        self.set_selection(None);
    }

    /// Handle a click at a screen position. A hit replaces the selection;
    /// a miss, or a click that ends a drag, leaves it alone.
    pub fn select_at(&mut self, screen: Vec2) -> Option<String> {
        if !self.controller.accepts_click() {
            return None;
        }
        let hit = picking::pick(self.controller.camera(), screen, &self.scene)?;
        self.set_selection(Some(hit.clone()));
        Some(hit)
    }

    fn set_selection(&mut self, name: Option<String>) {
        if self.selected == name {
            return;
        }
        log::debug!("context: selection is now {name:?}");
        self.selected = name.clone();
        self.events.push(SimEvent::Selection { name });
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Panel attributes of the selected body.
    pub fn selected_info(&self) -> Option<BodyInfo> {
        let name = self.selected.as_deref()?;
        self.scene.find_by_name(name).map(|body| body.info())
    }

    /// Run one integrator step of `dt` simulation units, gated by the clock.
    pub fn advance(&mut self, dt: f64) {
        if self.clock.step(dt).is_some() {
            orbit::advance(&mut self.scene, &self.clock, dt);
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        self.controller.camera()
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    /// Events emitted since the last `clear_events`.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::system_def::{BodyDef, SystemDef};
    use glam::Vec3;

    fn context() -> SimContext {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0).with_moon(
                BodyDef::new("Earth", 0.8)
                    .with_orbit(16.0, 0.02)
                    .with_phase(0.0)
                    .with_moon(BodyDef::new("Moon", 0.2).with_orbit(2.0, 0.1).with_phase(0.0)),
            ),
        );
        SimContext::new(&OrreryConfig::default(), Scene::build(&def).unwrap())
    }

    fn screen_of(ctx: &SimContext, name: &str) -> Vec2 {
        let center = ctx.scene.find_by_name(name).unwrap().world_position();
        ctx.camera().project(center).unwrap()
    }

    #[test]
    fn click_on_body_selects_it() {
        let mut ctx = context();
        let screen = screen_of(&ctx, "Earth");
        ctx.handle_input(InputEvent::Click { x: screen.x, y: screen.y });
        assert_eq!(ctx.selected(), Some("Earth"));
        assert_eq!(
            ctx.events(),
            [SimEvent::Selection { name: Some("Earth".into()) }]
        );

        let info = ctx.selected_info().unwrap();
        assert_eq!(info.speed_label, "20.0 km/s");
        assert_eq!(info.moon_count, 1);
    }

    #[test]
    fn miss_keeps_selection() {
        let mut ctx = context();
        let screen = screen_of(&ctx, "Sun");
        ctx.select_at(screen);
        assert_eq!(ctx.select_at(Vec2::new(1.0, 1.0)), None);
        assert_eq!(ctx.selected(), Some("Sun"));
    }

    #[test]
    fn click_after_drag_is_ignored() {
        let mut ctx = context();
        let screen = screen_of(&ctx, "Sun");
        ctx.handle_input(InputEvent::PointerDown { x: screen.x, y: screen.y });
        ctx.handle_input(InputEvent::PointerMove { x: screen.x + 40.0, y: screen.y });
        ctx.handle_input(InputEvent::PointerUp { x: screen.x + 40.0, y: screen.y });
        ctx.handle_input(InputEvent::Click { x: screen.x, y: screen.y });
        assert_eq!(ctx.selected(), None);
    }

    #[test]
    fn focus_selects_and_reset_clears() {
        let mut ctx = context();
        ctx.apply_command(ControlCommand::FocusOn("Moon".into()));
        assert_eq!(ctx.selected(), Some("Moon"));
        assert_eq!(ctx.controller().focus(), Some("Moon"));

        ctx.clear_events();
        ctx.apply_command(ControlCommand::ResetView);
        assert_eq!(ctx.selected(), None);
        assert_eq!(ctx.controller().focus(), None);
        assert_eq!(ctx.camera().position, Vec3::new(0.0, 30.0, 60.0));
        assert_eq!(
            ctx.events(),
            [
                SimEvent::Focus { name: None },
                SimEvent::Selection { name: None }
            ]
        );
    }

    #[test]
    fn focus_on_unknown_changes_nothing() {
        let mut ctx = context();
        assert!(!ctx.focus_on("Pluto"));
        assert!(ctx.events().is_empty());
        assert_eq!(ctx.selected(), None);
    }

    #[test]
    fn bad_speed_keeps_previous_value() {
        let mut ctx = context();
        ctx.apply_command(ControlCommand::SetSpeed(4.0));
        ctx.apply_command(ControlCommand::SetSpeed(-1.0));
        assert_eq!(ctx.clock.speed(), 4.0);
        assert!(ctx.set_speed(f64::NAN).is_err());
        assert_eq!(ctx.events().len(), 1);
    }

    #[test]
    fn paused_advance_is_a_no_op() {
        let mut ctx = context();
        ctx.toggle_playing();
        let before = ctx.scene.find_by_name("Earth").unwrap().phase();
        ctx.advance(100.0);
        assert_eq!(ctx.scene.find_by_name("Earth").unwrap().phase(), before);
        assert_eq!(ctx.clock.elapsed(), 0.0);

        ctx.toggle_playing();
        ctx.advance(10.0);
        assert!((ctx.scene.find_by_name("Earth").unwrap().phase() - 0.2).abs() < 1e-12);
    }
}

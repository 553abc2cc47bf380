use glam::Vec2;

use crate::api::config::OrreryConfig;
use crate::api::context::SimContext;
use crate::core::clock::StepAccumulator;
use crate::core::scene::Scene;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::SnapshotBuffer;
use crate::renderer::traits::Renderer;
use crate::systems::render::build_snapshot;

/// Drives the simulation from display refreshes.
///
/// The host calls `tick` once per frame with the wall-clock delta. Input
/// pushed between ticks is applied at the start of the next one, before
/// the orbits move.
pub struct Scheduler<R: Renderer> {
    ctx: SimContext,
    input: InputQueue,
    timestep: StepAccumulator,
    units_per_step: f64,
    renderer: R,
    /// Renderer size at the last sync, so only real surface changes
    /// override a queued `Resize`.
    synced_size: Vec2,
    snapshot: SnapshotBuffer,
    torn_down: bool,
    frame_count: u64,
}

impl<R: Renderer> Scheduler<R> {
    pub fn new(config: &OrreryConfig, scene: Scene, renderer: R) -> Self {
        Self {
            ctx: SimContext::new(config, scene),
            input: InputQueue::new(),
            timestep: StepAccumulator::new(config.fixed_dt, config.max_steps_per_tick),
            units_per_step: config.units_per_step,
            renderer,
            synced_size: Vec2::ZERO,
            snapshot: SnapshotBuffer::new(),
            torn_down: false,
            frame_count: 0,
        }
    }

    /// Queue an input event for the next tick. Dropped after teardown.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.torn_down {
            return;
        }
        self.input.push(event);
    }

    /// Run one frame. Returns false, doing nothing, after teardown.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.torn_down {
            return false;
        }

        self.ctx.clear_events();

        // Follow the renderer when its surface changes size.
        let size = self.renderer.viewport_size();
        if size != self.synced_size && size.x > 0.0 && size.y > 0.0 {
            self.synced_size = size;
            self.ctx.handle_input(InputEvent::Resize {
                width: size.x,
                height: size.y,
            });
        }

        for event in self.input.drain() {
            self.ctx.handle_input(event);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.advance(self.units_per_step);
        }

        build_snapshot(&self.ctx.scene, self.ctx.selected(), &mut self.snapshot);
        self.renderer.present(&self.snapshot.instances, self.ctx.camera());

        self.frame_count += 1;
        true
    }

    /// Stop ticking and drop pending input. Safe to call more than once;
    /// returns true only the first time.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.input.clear();
        log::info!("scheduler: torn down after {} frames", self.frame_count);
        true
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn snapshot(&self) -> &SnapshotBuffer {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::system_def::{BodyDef, SystemDef};
    use crate::input::queue::ControlCommand;
    use crate::renderer::camera::PerspectiveCamera;
    use crate::renderer::instance::BodyInstance;

    const FRAME: f64 = 1.0 / 60.0;

    #[derive(Default)]
    struct Recording {
        frames: Vec<Vec<BodyInstance>>,
        size: Vec2,
    }

    impl Renderer for Recording {
        fn present(&mut self, bodies: &[BodyInstance], _camera: &PerspectiveCamera) {
            self.frames.push(bodies.to_vec());
        }

        fn viewport_size(&self) -> Vec2 {
            self.size
        }
    }

    fn scheduler() -> Scheduler<Recording> {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0)
                .with_moon(BodyDef::new("Earth", 0.8).with_orbit(16.0, 0.02).with_phase(0.0)),
        );
        let scene = Scene::build(&def).unwrap();
        Scheduler::new(&OrreryConfig::default(), scene, Recording::default())
    }

    fn earth_phase(s: &Scheduler<Recording>) -> f64 {
        s.context().scene.find_by_name("Earth").unwrap().phase()
    }

    #[test]
    fn tick_advances_and_presents() {
        let mut s = scheduler();
        assert!(s.tick(FRAME));
        assert!((earth_phase(&s) - 0.02).abs() < 1e-12);
        assert_eq!(s.renderer().frames.len(), 1);
        assert_eq!(s.renderer().frames[0].len(), 2);
    }

    #[test]
    fn input_applies_before_integration() {
        let mut s = scheduler();
        s.push_input(InputEvent::Control(ControlCommand::TogglePlaying));
        s.tick(FRAME);
        assert_eq!(earth_phase(&s), 0.0);

        s.push_input(InputEvent::Control(ControlCommand::TogglePlaying));
        s.push_input(InputEvent::Control(ControlCommand::SetSpeed(3.0)));
        s.tick(FRAME);
        assert!((earth_phase(&s) - 0.06).abs() < 1e-12);
    }

    #[test]
    fn events_last_one_tick() {
        let mut s = scheduler();
        s.push_input(InputEvent::Control(ControlCommand::FocusOn("Earth".into())));
        s.tick(FRAME);
        assert_eq!(s.context().events().len(), 2);
        s.tick(FRAME);
        assert!(s.context().events().is_empty());
    }

    #[test]
    fn selection_is_flagged_in_snapshot() {
        let mut s = scheduler();
        s.push_input(InputEvent::Control(ControlCommand::FocusOn("Earth".into())));
        s.tick(FRAME);
        let frame = s.renderer().frames.last().unwrap();
        assert_eq!(frame[0].selected, 0.0);
        assert_eq!(frame[1].selected, 1.0);
    }

    #[test]
    fn step_count_is_capped() {
        let mut s = scheduler();
        s.tick(10.0);
        assert!((earth_phase(&s) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn renderer_size_reaches_camera() {
        let mut s = scheduler();
        s.renderer.size = Vec2::new(1280.0, 720.0);
        s.tick(FRAME);
        assert_eq!(s.context().camera().viewport, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn queued_resize_survives_later_ticks() {
        let mut s = scheduler();
        s.renderer.size = Vec2::new(1280.0, 720.0);
        s.tick(FRAME);

        s.push_input(InputEvent::Resize {
            width: 640.0,
            height: 480.0,
        });
        s.tick(FRAME);
        s.tick(FRAME);
        assert_eq!(s.context().camera().viewport, Vec2::new(640.0, 480.0));

        s.renderer.size = Vec2::new(1920.0, 1080.0);
        s.tick(FRAME);
        assert_eq!(s.context().camera().viewport, Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn teardown_is_idempotent_and_final() {
        let mut s = scheduler();
        s.tick(FRAME);
        assert!(s.teardown());
        assert!(!s.teardown());

        let phase = earth_phase(&s);
        s.push_input(InputEvent::Control(ControlCommand::TogglePlaying));
        assert!(!s.tick(FRAME));
        assert_eq!(earth_phase(&s), phase);
        assert_eq!(s.renderer().frames.len(), 1);
        assert_eq!(s.frame_count(), 1);
        assert!(s.context().clock.is_playing());
    }
}

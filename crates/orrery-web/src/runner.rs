use orrery_engine::{
    ControlCommand, InputEvent, OrreryConfig, OrreryResult, Scene, Scheduler, SystemDef,
};
use orrery_engine::systems::render::describe_bodies;

use crate::surface::SharedSurface;

/// Owns the scheduler behind the wasm exports.
///
/// The exported free functions in `export_orrery!` keep one of these in a
/// `thread_local!`, because wasm-bindgen cannot export generic structs.
pub struct OrreryRunner {
    scheduler: Scheduler<SharedSurface>,
}

impl OrreryRunner {
    /// Validate the configuration, build the scene and size the surface.
    pub fn new(def: &SystemDef, config: OrreryConfig, width: f32, height: f32) -> OrreryResult<Self> {
        config.validate()?;
        let scene = Scene::build(def)?;
        let surface = SharedSurface::new(width, height);
        Ok(Self {
            scheduler: Scheduler::new(&config, scene, surface),
        })
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        self.scheduler.tick(dt)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.scheduler.push_input(event);
    }

    pub fn push_command(&mut self, command: ControlCommand) {
        self.scheduler.push_input(InputEvent::Control(command));
    }

    /// New canvas size. The camera follows at the start of the next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.scheduler.renderer_mut().set_viewport(width, height);
    }

    pub fn teardown(&mut self) -> bool {
        self.scheduler.teardown()
    }

    pub fn scheduler(&self) -> &Scheduler<SharedSurface> {
        &self.scheduler
    }

    // ---- Pointer accessors for reads from wasm memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.scheduler.renderer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.scheduler.renderer().instance_count()
    }

    pub fn view_projection_ptr(&self) -> *const f32 {
        self.scheduler.renderer().view_projection_ptr()
    }

    // ---- JSON accessors for the control panel ----

    pub fn names_json(&self) -> String {
        serde_json::to_string(self.scheduler.context().scene.names()).unwrap_or_else(|err| {
            log::error!("runner: names: {err}");
            "[]".into()
        })
    }

    pub fn bodies_json(&self) -> String {
        serde_json::to_string(&describe_bodies(&self.scheduler.context().scene)).unwrap_or_else(
            |err| {
                log::error!("runner: bodies: {err}");
                "[]".into()
            },
        )
    }

    /// `null` when nothing is selected.
    pub fn selected_info_json(&self) -> String {
        serde_json::to_string(&self.scheduler.context().selected_info()).unwrap_or_else(|err| {
            log::error!("runner: selected info: {err}");
            "null".into()
        })
    }

    /// Events from the most recent tick.
    pub fn events_json(&self) -> String {
        serde_json::to_string(self.scheduler.context().events()).unwrap_or_else(|err| {
            log::error!("runner: events: {err}");
            "[]".into()
        })
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.context().clock.is_playing()
    }

    pub fn speed(&self) -> f64 {
        self.scheduler.context().clock.speed()
    }
}

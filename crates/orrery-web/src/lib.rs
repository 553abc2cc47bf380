pub mod runner;
pub mod surface;

pub use runner::OrreryRunner;
pub use surface::SharedSurface;

// Re-exported so `export_orrery!` expands without the caller naming the
// engine crate.
pub use orrery_engine;

/// Generate all `#[wasm_bindgen]` exports for an orrery.
///
/// Generates:
/// - `thread_local!` storage for the OrreryRunner
/// - `with_runner()` helper returning `None` before init and after teardown
/// - All wasm-bindgen exports (init, tick, input handlers, controls, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod bodies;
///
/// orrery_web::export_orrery!(bodies::solar_system, bodies::config, "solar-system");
/// ```
///
/// # Arguments
///
/// - `$system_fn`: `fn() -> orrery_engine::SystemDef`
/// - `$config_fn`: `fn() -> orrery_engine::OrreryConfig`
/// - `$name`: A string literal used in log messages
#[macro_export]
macro_rules! export_orrery {
    ($system_fn:path, $config_fn:path, $name:literal) => {
        use std::cell::RefCell;
        use $crate::orrery_engine::{ControlCommand, InputEvent};

        thread_local! {
            static RUNNER: RefCell<Option<$crate::OrreryRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::OrreryRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Build the system and start a session. Returns false if the
        /// definition or configuration is invalid.
        #[wasm_bindgen]
        pub fn orrery_init(width: f32, height: f32) -> bool {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            match $crate::OrreryRunner::new(&$system_fn(), $config_fn(), width, height) {
                Ok(runner) => {
                    RUNNER.with(|cell| {
                        *cell.borrow_mut() = Some(runner);
                    });
                    log::info!("{}: initialized", $name);
                    true
                }
                Err(err) => {
                    log::error!("{}: init failed: {}", $name, err);
                    false
                }
            }
        }

        #[wasm_bindgen]
        pub fn orrery_tick(dt: f64) -> bool {
            with_runner(|r| r.tick(dt)).unwrap_or(false)
        }

        /// Stop the session and release it. Later calls do nothing.
        #[wasm_bindgen]
        pub fn orrery_teardown() -> bool {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            match runner {
                Some(mut r) => {
                    r.teardown();
                    log::info!("{}: torn down", $name);
                    true
                }
                None => false,
            }
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn orrery_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_leave() {
            with_runner(|r| r.push_input(InputEvent::PointerLeave));
        }

        #[wasm_bindgen]
        pub fn orrery_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn orrery_click(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::Click { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        // ---- Control panel ----

        #[wasm_bindgen]
        pub fn orrery_toggle_playing() {
            with_runner(|r| r.push_command(ControlCommand::TogglePlaying));
        }

        #[wasm_bindgen]
        pub fn orrery_set_speed(multiplier: f64) {
            with_runner(|r| r.push_command(ControlCommand::SetSpeed(multiplier)));
        }

        #[wasm_bindgen]
        pub fn orrery_focus_on(name: &str) {
            with_runner(|r| r.push_command(ControlCommand::FocusOn(name.to_string())));
        }

        #[wasm_bindgen]
        pub fn orrery_reset_view() {
            with_runner(|r| r.push_command(ControlCommand::ResetView));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_view_projection_ptr() -> *const f32 {
            with_runner(|r| r.view_projection_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_body_names() -> String {
            with_runner(|r| r.names_json()).unwrap_or_else(|| "[]".to_string())
        }

        #[wasm_bindgen]
        pub fn get_bodies() -> String {
            with_runner(|r| r.bodies_json()).unwrap_or_else(|| "[]".to_string())
        }

        #[wasm_bindgen]
        pub fn get_selected_info() -> String {
            with_runner(|r| r.selected_info_json()).unwrap_or_else(|| "null".to_string())
        }

        #[wasm_bindgen]
        pub fn get_events() -> String {
            with_runner(|r| r.events_json()).unwrap_or_else(|| "[]".to_string())
        }

        #[wasm_bindgen]
        pub fn get_is_playing() -> bool {
            with_runner(|r| r.is_playing()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn get_speed() -> f64 {
            with_runner(|r| r.speed()).unwrap_or(0.0)
        }
    };
}

pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, OrreryConfig};
pub use api::context::SimContext;
pub use api::error::{OrreryError, OrreryResult};
pub use api::types::{BodyInfo, BodyVisual, SimEvent};
pub use assets::system_def::{BodyDef, SystemDef};
pub use components::body::CelestialBody;
pub use core::clock::{SimulationClock, StepAccumulator};
pub use core::scene::Scene;
pub use core::scheduler::Scheduler;
pub use input::controller::{CameraController, DragState, PointerEvent};
pub use input::queue::{ControlCommand, InputEvent, InputQueue};
pub use renderer::camera::{CameraUniform, PerspectiveCamera, Ray};
pub use renderer::instance::{BodyInstance, SnapshotBuffer};
pub use renderer::traits::Renderer;
pub use systems::picking::pick;

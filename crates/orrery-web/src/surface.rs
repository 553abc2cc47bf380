use glam::{Mat4, Vec2};
use orrery_engine::{BodyInstance, CameraUniform, PerspectiveCamera, Renderer};

/// Renderer backed by plain memory the JavaScript side reads after each
/// tick: the body instances and the camera's view-projection matrix.
pub struct SharedSurface {
    instances: Vec<BodyInstance>,
    camera: CameraUniform,
    viewport: Vec2,
}

impl SharedSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            instances: Vec::with_capacity(32),
            camera: CameraUniform {
                view_projection: [[0.0; 4]; 4],
            },
            viewport: Vec2::new(width, height),
        }
    }

    /// Record a new canvas size. Picked up at the start of the next tick.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Column-major view-projection matrix.
    pub fn view_projection(&self) -> [f32; 16] {
        Mat4::from_cols_array_2d(&self.camera.view_projection).to_cols_array()
    }

    /// Points at 16 column-major floats.
    pub fn view_projection_ptr(&self) -> *const f32 {
        self.camera.view_projection.as_ptr() as *const f32
    }
}

impl Renderer for SharedSurface {
    fn present(&mut self, bodies: &[BodyInstance], camera: &PerspectiveCamera) {
        self.instances.clear();
        self.instances.extend_from_slice(bodies);
        self.camera = camera.uniform();
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}

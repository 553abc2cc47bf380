use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::api::config::CameraConfig;

/// Perspective camera looking from `position` at `target`, Y-up.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
}

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first point on the sphere, or `None`
    /// if the ray misses it or the sphere is entirely behind the origin.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere: report the exit point.
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl PerspectiveCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::from_array(config.home_position),
            target: Vec3::from_array(config.home_target),
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            viewport: Vec2::from_array(config.viewport),
        }
    }

    /// Distance from the camera to its look-at target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// Resize the viewport. Zero or negative sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.viewport = Vec2::new(width, height);
        true
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = (self.target - self.position).normalize_or_zero();
        // Looking straight up or down the Y axis: Y can't be "up".
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-10 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
        }
    }

    /// Screen pixel to normalized device coordinates (Y up).
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x / self.viewport.x) * 2.0 - 1.0,
            -(screen.y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    /// Project a world point to screen pixels. `None` if it is behind the
    /// camera.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Ray from the near plane through the given screen pixel.
    /// `None` if the viewport or camera is degenerate.
    pub fn screen_ray(&self, screen: Vec2) -> Option<Ray> {
        if !(self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            return None;
        }
        let inverse = self.view_projection().inverse();
        let ndc = self.screen_to_ndc(screen);
        // glam's perspective_rh maps depth to [0, 1].
        let near = inverse * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inverse * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        if near.w.abs() < f32::EPSILON || far.w.abs() < f32::EPSILON {
            return None;
        }
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO || !direction.is_finite() {
            return None;
        }
        Some(Ray {
            origin: near,
            direction,
        })
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

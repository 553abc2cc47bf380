//! Screen-space picking against body bounding spheres.

use glam::Vec2;

use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;

/// The body under `screen` (pixels, origin top-left), if any.
///
/// Every body's render sphere at its current world position is tested and
/// the nearest hit along the ray wins. On an exact tie the body visited
/// first in traversal order is kept.
pub fn pick(camera: &PerspectiveCamera, screen: Vec2, scene: &Scene) -> Option<String> {
    let ray = camera.screen_ray(screen)?;

    let mut best: Option<(f32, &str)> = None;
    scene.for_each_body(|body, _| {
        let Some(t) = ray.intersect_sphere(body.world_position(), body.radius) else {
            return;
        };
        if best.map_or(true, |(nearest, _)| t < nearest) {
            best = Some((t, body.name.as_str()));
        }
    });
    best.map(|(_, name)| name.to_string())
}

//! Rendering surface contract.
//!
//! The engine never draws. Each tick it hands the renderer the body
//! snapshot and the camera; the web crate's surface stores both for the
//! JavaScript side, tests use a recording implementation.

use glam::Vec2;

use super::camera::PerspectiveCamera;
use super::instance::BodyInstance;

pub trait Renderer {
    /// Take this tick's snapshot. Called once per tick, after integration.
    fn present(&mut self, bodies: &[BodyInstance], camera: &PerspectiveCamera);

    /// Current drawing surface size in pixels.
    fn viewport_size(&self) -> Vec2;
}

//! Orbit integrator.
//!
//! Circular orbits only: each body sits at a polar offset from its parent's
//! resolved position. Positions are recomputed from scratch every pass, so
//! moons follow their planet within the same tick.

use std::f64::consts::TAU;

use glam::Vec3;

use crate::core::clock::SimulationClock;
use crate::core::scene::Scene;

/// Offset from the parent for a body at `phase` on a circle of `radius`,
/// in the XZ plane.
pub fn orbital_offset(radius: f32, phase: f64) -> Vec3 {
    let r = radius as f64;
    Vec3::new((r * phase.cos()) as f32, 0.0, (r * phase.sin()) as f32)
}

/// Wrap an angle into [0, 2π). `rem_euclid` alone can round up to
/// exactly 2π for tiny negative inputs.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Advance every body by `dt` simulated time units, scaled by the clock's
/// speed. Does nothing while the clock is paused.
pub fn advance(scene: &mut Scene, clock: &SimulationClock, dt: f64) {
    if !clock.is_playing() {
        return;
    }
    let scaled = clock.speed() * dt;
    scene.for_each_body_mut(|body, parent| {
        body.phase = wrap_angle(body.phase + body.angular_speed * scaled);
        body.spin = wrap_angle(body.spin + body.spin_rate * scaled);
        body.world_position = match parent {
            Some(parent_pos) => parent_pos + orbital_offset(body.orbital_radius, body.phase),
            None => Vec3::ZERO,
        };
    });
}

/// Recompute world positions from current phases without advancing time.
pub fn resolve(scene: &mut Scene) {
    scene.for_each_body_mut(|body, parent| {
        body.world_position = match parent {
            Some(parent_pos) => parent_pos + orbital_offset(body.orbital_radius, body.phase),
            None => Vec3::ZERO,
        };
    });
}

use glam::Vec3;

use crate::api::types::BodyInfo;

/// A body in the orbital tree.
///
/// Static parameters are public; orbital state (phase, spin, world
/// position) is owned by the integrator. Moons are owned by value, so a
/// parent and its children never alias.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    /// Unique name within the scene.
    pub name: String,
    /// Render radius in world units (> 0).
    pub radius: f32,
    /// Distance from the parent's world position (0 for the root).
    pub orbital_radius: f32,
    /// Radians per simulated time unit; the sign gives the direction.
    pub angular_speed: f64,
    /// Spin in radians per simulated time unit.
    pub spin_rate: f64,
    /// Appearance tag, opaque to the engine.
    pub color: String,
    pub(crate) phase: f64,
    pub(crate) spin: f64,
    pub(crate) world_position: Vec3,
    pub(crate) moons: Vec<CelestialBody>,
}

impl CelestialBody {
    pub(crate) fn new(name: String, radius: f32) -> Self {
        Self {
            name,
            radius,
            orbital_radius: 0.0,
            angular_speed: 0.0,
            spin_rate: 0.0,
            color: String::new(),
            phase: 0.0,
            spin: 0.0,
            world_position: Vec3::ZERO,
            moons: Vec::new(),
        }
    }

    /// Current orbital phase in radians, in [0, 2π).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Current spin angle in radians, in [0, 2π).
    pub fn spin(&self) -> f64 {
        self.spin
    }

    /// World position as resolved by the last integrator pass.
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    /// Moons in definition order.
    pub fn moons(&self) -> &[CelestialBody] {
        &self.moons
    }

    /// Attributes shown by the control panel for a selected body.
    pub fn info(&self) -> BodyInfo {
        BodyInfo {
            name: self.name.clone(),
            size: self.radius,
            distance: self.orbital_radius,
            speed_label: format!("{:.1} km/s", self.angular_speed * 1000.0),
            moon_count: self.moons.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_formats_speed_like_the_panel() {
        let mut earth = CelestialBody::new("Earth".into(), 0.8);
        earth.orbital_radius = 16.0;
        earth.angular_speed = 0.02;
        earth.moons.push(CelestialBody::new("Moon".into(), 0.2));

        let info = earth.info();
        assert_eq!(info.name, "Earth");
        assert_eq!(info.size, 0.8);
        assert_eq!(info.distance, 16.0);
        assert_eq!(info.speed_label, "20.0 km/s");
        assert_eq!(info.moon_count, 1);
    }

    #[test]
    fn slow_bodies_keep_one_decimal() {
        let mut neptune = CelestialBody::new("Neptune".into(), 1.4);
        neptune.angular_speed = 0.003;
        assert_eq!(neptune.info().speed_label, "3.0 km/s");
    }
}

//! The solar system preset: the Sun, eight planets and four moons.
//!
//! Sizes and distances are diagram units, not to scale. Angular speeds are
//! radians per simulated unit (one unit is one 60 Hz frame at speed 1).

use orrery_engine::{BodyDef, OrreryConfig, SystemDef};

pub const SUN_RADIUS: f32 = 3.0;
pub const SUN_COLOR: &str = "#FFD700";

/// Seed for the initial orbital phases. Any value gives a valid layout;
/// fixing it keeps reloads identical.
pub const PHASE_SEED: u64 = 0x5EED_0F_0ABB17;

/// One planet row: name, radius, orbital radius, angular speed, color.
struct Planet {
    name: &'static str,
    radius: f32,
    distance: f32,
    speed: f64,
    color: &'static str,
}

const PLANETS: [Planet; 8] = [
    Planet { name: "Mercury", radius: 0.4, distance: 8.0, speed: 0.04, color: "#8C7853" },
    Planet { name: "Venus", radius: 0.7, distance: 12.0, speed: 0.03, color: "#FFC649" },
    Planet { name: "Earth", radius: 0.8, distance: 16.0, speed: 0.02, color: "#6B93D6" },
    Planet { name: "Mars", radius: 0.6, distance: 20.0, speed: 0.015, color: "#CD5C5C" },
    Planet { name: "Jupiter", radius: 2.5, distance: 28.0, speed: 0.008, color: "#D8CA9D" },
    Planet { name: "Saturn", radius: 2.2, distance: 36.0, speed: 0.006, color: "#FAD5A5" },
    Planet { name: "Uranus", radius: 1.5, distance: 44.0, speed: 0.004, color: "#4FD0E7" },
    Planet { name: "Neptune", radius: 1.4, distance: 52.0, speed: 0.003, color: "#4B70DD" },
];

fn moons_of(planet: &str) -> Vec<BodyDef> {
    match planet {
        "Earth" => vec![BodyDef::new("Moon", 0.2).with_orbit(2.0, 0.1).with_color("#C0C0C0")],
        "Jupiter" => vec![
            BodyDef::new("Io", 0.3).with_orbit(4.0, 0.05).with_color("#FFFF99"),
            BodyDef::new("Europa", 0.25).with_orbit(5.0, 0.04).with_color("#87CEEB"),
        ],
        "Saturn" => vec![BodyDef::new("Titan", 0.4).with_orbit(5.0, 0.03).with_color("#F4A460")],
        _ => Vec::new(),
    }
}

pub fn solar_system() -> SystemDef {
    let mut sun = BodyDef::new("Sun", SUN_RADIUS).with_color(SUN_COLOR);
    for planet in &PLANETS {
        let mut def = BodyDef::new(planet.name, planet.radius)
            .with_orbit(planet.distance, planet.speed)
            .with_color(planet.color);
        for moon in moons_of(planet.name) {
            def = def.with_moon(moon);
        }
        sun = sun.with_moon(def);
    }
    SystemDef::new(sun).with_seed(PHASE_SEED)
}

/// Engine defaults already carry this diagram's camera and timing.
pub fn config() -> OrreryConfig {
    OrreryConfig::default()
}

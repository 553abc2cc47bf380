use serde::{Deserialize, Serialize};

use crate::api::error::OrreryResult;

/// Static description of an orbital system: a root body and its tree of
/// orbiting bodies. Loaded from JSON or built in code at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDef {
    /// The central body, fixed at the origin.
    pub root: BodyDef,
    /// Seed for initial phases of bodies that don't specify one.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Static parameters for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    /// Unique name, used for lookup, focus and selection.
    pub name: String,
    /// Render radius in world units.
    pub radius: f32,
    /// Distance from the parent body. Ignored for the root.
    #[serde(default)]
    pub orbital_radius: f32,
    /// Radians per simulated time unit; negative orbits clockwise.
    #[serde(default)]
    pub angular_speed: f64,
    /// Appearance tag handed through to the renderer (e.g. "#6B93D6").
    #[serde(default)]
    pub color: String,
    /// Starting phase in radians. Drawn from the system seed when absent.
    #[serde(default)]
    pub phase: Option<f64>,
    /// Spin in radians per simulated time unit. Defaults by depth.
    #[serde(default)]
    pub spin_rate: Option<f64>,
    /// Bodies orbiting this one, in display order.
    #[serde(default)]
    pub moons: Vec<BodyDef>,
}

impl BodyDef {
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            radius,
            orbital_radius: 0.0,
            angular_speed: 0.0,
            color: String::new(),
            phase: None,
            spin_rate: None,
            moons: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_orbit(mut self, orbital_radius: f32, angular_speed: f64) -> Self {
        self.orbital_radius = orbital_radius;
        self.angular_speed = angular_speed;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_spin_rate(mut self, spin_rate: f64) -> Self {
        self.spin_rate = Some(spin_rate);
        self
    }

    pub fn with_moon(mut self, moon: BodyDef) -> Self {
        self.moons.push(moon);
        self
    }
}

impl SystemDef {
    pub fn new(root: BodyDef) -> Self {
        Self { root, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a system definition from a JSON string.
    pub fn from_json(json: &str) -> OrreryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

use serde::Serialize;

/// Panel read-out for one body. Static attributes only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyInfo {
    pub name: String,
    /// Render radius, shown as "size".
    pub size: f32,
    /// Orbital radius, shown as "distance".
    pub distance: f32,
    /// Derived label, e.g. "20.0 km/s".
    pub speed_label: String,
    pub moon_count: usize,
}

/// What the host needs to build a body's mesh once at startup.
/// `index` matches `BodyInstance::body_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyVisual {
    pub index: usize,
    pub name: String,
    pub radius: f32,
    pub orbital_radius: f32,
    /// CSS-style hex color, e.g. "#6B93D6".
    pub color: String,
    /// 0 for the root, 1 for planets, 2 for moons.
    pub depth: usize,
}

/// An event emitted by the simulation for the host UI.
/// Collected during a tick and cleared at the start of the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    /// The selected body changed (`None` after a view reset).
    Selection { name: Option<String> },
    /// The camera was focused on a body, or the focus was cleared.
    Focus { name: Option<String> },
    /// Play/pause or speed changed.
    Playback { playing: bool, speed: f64 },
}

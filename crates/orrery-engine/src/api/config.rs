use serde::{Deserialize, Serialize};

use crate::api::error::{OrreryError, OrreryResult};

/// Engine configuration, provided by the host application.
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Wall-clock seconds per simulation step (default: 1/60).
    pub fixed_dt: f64,
    /// Upper bound on simulation steps run by a single tick (default: 10).
    pub max_steps_per_tick: u32,
    /// Simulated time units advanced per step at speed 1.0 (default: 1.0).
    /// Angular speeds are expressed in radians per unit.
    pub units_per_step: f64,
    /// Speed multiplier at startup (default: 1.0).
    pub initial_speed: f64,
    /// Whether the clock starts playing (default: true).
    pub start_playing: bool,
    /// Camera and pointer settings.
    pub camera: CameraConfig,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_tick: 10,
            units_per_step: 1.0,
            initial_speed: 1.0,
            start_playing: true,
            camera: CameraConfig::default(),
        }
    }
}

/// Camera placement, projection and input response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position restored by reset (default: (0, 30, 60)).
    pub home_position: [f32; 3],
    /// Look-at target restored by reset (default: origin).
    pub home_target: [f32; 3],
    /// Vertical field of view in degrees (default: 75).
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial viewport size in pixels, replaced by the first resize.
    pub viewport: [f32; 2],
    /// World units of camera travel per pixel of drag (default: 0.01).
    pub drag_sensitivity: f32,
    /// Distance multiplier per wheel notch when zooming out; zooming in
    /// uses the reciprocal (default: 1.1).
    pub zoom_step: f32,
    /// Closest the camera may get to its target.
    pub min_distance: f32,
    /// Farthest the camera may get from its target.
    pub max_distance: f32,
    /// Added to a body's orbital radius to get the focus offset (default: 10).
    pub focus_margin: f32,
    /// Height of the focus viewpoint above the body (default: 10).
    pub focus_elevation: f32,
    /// Pixels a press may travel and still count as a click (default: 5).
    pub click_drag_threshold: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            home_position: [0.0, 30.0, 60.0],
            home_target: [0.0, 0.0, 0.0],
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            viewport: [800.0, 600.0],
            drag_sensitivity: 0.01,
            zoom_step: 1.1,
            min_distance: 2.0,
            max_distance: 600.0,
            focus_margin: 10.0,
            focus_elevation: 10.0,
            click_drag_threshold: 5.0,
        }
    }
}

impl OrreryConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> OrreryResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> OrreryResult<()> {
        let cam = &self.camera;
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if self.max_steps_per_tick == 0 {
            return Err(OrreryError::InvalidConfig(
                "max_steps_per_tick must be at least 1".into(),
            ));
        }
        if !(self.units_per_step.is_finite() && self.units_per_step > 0.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "units_per_step must be positive, got {}",
                self.units_per_step
            )));
        }
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(OrreryError::InvalidSpeed(self.initial_speed));
        }
        if !(cam.zoom_step.is_finite() && cam.zoom_step > 1.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "camera.zoom_step must be greater than 1, got {}",
                cam.zoom_step
            )));
        }
        if !(cam.min_distance > 0.0 && cam.min_distance <= cam.max_distance) {
            return Err(OrreryError::InvalidConfig(format!(
                "camera distance bounds [{}, {}] are not a valid range",
                cam.min_distance, cam.max_distance
            )));
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            return Err(OrreryError::InvalidConfig(format!(
                "camera clip planes near={} far={} are not a valid range",
                cam.near, cam.far
            )));
        }
        let home = cam.home_position;
        let target = cam.home_target;
        if !home.iter().chain(target.iter()).all(|v| v.is_finite()) {
            return Err(OrreryError::InvalidConfig(
                "camera home position and target must be finite".into(),
            ));
        }
        if home == target {
            return Err(OrreryError::InvalidConfig(
                "camera home position must differ from its target".into(),
            ));
        }
        if !(cam.drag_sensitivity.is_finite() && cam.drag_sensitivity > 0.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "camera.drag_sensitivity must be positive, got {}",
                cam.drag_sensitivity
            )));
        }
        if !(cam.click_drag_threshold.is_finite() && cam.click_drag_threshold >= 0.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "camera.click_drag_threshold must be non-negative, got {}",
                cam.click_drag_threshold
            )));
        }
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "camera.fov_y_degrees must be in (0, 180), got {}",
                cam.fov_y_degrees
            )));
        }
        Ok(())
    }
}

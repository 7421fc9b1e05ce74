use glam::DVec3;

// Shared bounds, defaults and tuning constants used by the model, store and frontends.

// Sphere bounds
pub const RADIUS_MIN: f64 = 1.0;
pub const RADIUS_MAX: f64 = 200.0;
pub const ROTATION_SPEED_MIN: f64 = -5.0;
pub const ROTATION_SPEED_MAX: f64 = 5.0;
pub const SHININESS_MIN: f64 = 0.0;
pub const SHININESS_MAX: f64 = 1000.0;
pub const METALLIC_MIN: f64 = 0.0;
pub const METALLIC_MAX: f64 = 1.0;

// Sphere defaults
pub const DEFAULT_RADIUS: f64 = 50.0;
pub const DEFAULT_ROTATION_SPEED: f64 = 1.0;
pub const DEFAULT_COLOR_START: &str = "#ff6b6b";
pub const DEFAULT_COLOR_END: &str = "#4ecdc4";
pub const DEFAULT_SHININESS: f64 = 100.0;
pub const DEFAULT_METALLIC: f64 = 0.5;
pub const DEFAULT_NAME_PREFIX: &str = "Sphere";
pub const DEFAULT_NAME_ID_CHARS: usize = 4; // trailing id characters used in default names
pub const COPY_NAME_SUFFIX: &str = " Copy";

// Scene defaults
pub const DEFAULT_CAMERA_POSITION: [f64; 3] = [0.0, 0.0, 200.0];
pub const DEFAULT_CAMERA_ROTATION: [f64; 2] = [0.0, 0.0];
pub const DEFAULT_AMBIENT: f64 = 0.3;
pub const DEFAULT_DIRECTIONAL: f64 = 0.7;
pub const LIGHTING_MIN: f64 = 0.0;
pub const LIGHTING_MAX: f64 = 1.0;

// Store
pub const DUPLICATE_OFFSET: [f64; 3] = [20.0, 20.0, 0.0]; // translation applied to duplicates
pub const DEFAULT_LEFT_PANEL_WIDTH: f64 = 300.0;

// Animation
pub const X_AXIS_COUPLING: f64 = 0.3; // share of the Y delta applied to X each tick
pub const MS_PER_SECOND: f64 = 1000.0;

// Picking
pub const DEFAULT_ORBIT_DISTANCE: f64 = 0.0; // camera sits on its position unless orbiting

#[inline]
pub fn duplicate_offset_vec3() -> DVec3 {
    DVec3::from(DUPLICATE_OFFSET)
}

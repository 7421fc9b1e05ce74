use instant::Instant;
use std::f64::consts::TAU;

use crate::color::{gradient_color, Rgb};
use crate::constants::{MS_PER_SECOND, X_AXIS_COUPLING};
use crate::geometry::Vector3;
use crate::scene::Scene;
use crate::sphere::{Material, Sphere, SphereId};

#[inline]
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped < 0.0 {
        // -0.0 and tiny negatives can land exactly on TAU after the shift
        let shifted = wrapped + TAU;
        if shifted >= TAU {
            0.0
        } else {
            shifted
        }
    } else {
        wrapped
    }
}

/// Spins every sphere with a nonzero speed by `elapsed_ms`, ignoring the pause flag.
///
/// Y receives the full delta and X a fixed share of it; Z and every other
/// field are left alone. Both angles end in [0, 2π).
pub fn step_sphere_rotations(spheres: &mut [Sphere], elapsed_ms: f64) {
    if !elapsed_ms.is_finite() {
        return;
    }
    for sphere in spheres.iter_mut() {
        if sphere.rotation_speed == 0.0 {
            continue;
        }
        let delta = sphere.rotation_speed * elapsed_ms * TAU / MS_PER_SECOND;
        sphere.rotation.y = wrap_angle(sphere.rotation.y + delta);
        sphere.rotation.x = wrap_angle(sphere.rotation.x + delta * X_AXIS_COUPLING);
    }
}

/// One frame tick. Does nothing while the scene is paused.
pub fn advance_rotations(scene: &mut Scene, elapsed_ms: f64) {
    if scene.is_paused() {
        return;
    }
    step_sphere_rotations(scene.spheres_mut(), elapsed_ms);
}

/// Fill color for the sphere's current rotation phase. Never cached.
pub fn resolve_fill(sphere: &Sphere) -> Rgb {
    let colors = sphere.colors();
    gradient_color(&colors.start, &colors.end, sphere.rotation().y)
}

/// Elapsed-time source for host frame loops.
pub struct FrameClock {
    last_instant: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
        }
    }

    /// Milliseconds since the previous tick (or since construction).
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        dt.as_secs_f64() * MS_PER_SECOND
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// What the renderer needs to draw one visible sphere this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    pub id: SphereId,
    pub position: Vector3,
    pub rotation: Vector3,
    pub radius: f64,
    pub fill: Rgb,
    pub material: Material,
    pub selected: bool,
}

impl RenderItem {
    pub fn from_sphere(sphere: &Sphere) -> Self {
        Self {
            id: sphere.id().clone(),
            position: sphere.position(),
            rotation: sphere.rotation(),
            radius: sphere.radius(),
            fill: resolve_fill(sphere),
            material: sphere.material(),
            selected: sphere.is_selected(),
        }
    }

    pub fn instance(&self) -> RenderInstance {
        RenderInstance {
            pos: [
                self.position.x as f32,
                self.position.y as f32,
                self.position.z as f32,
            ],
            radius: self.radius as f32,
            rotation: [
                self.rotation.x as f32,
                self.rotation.y as f32,
                self.rotation.z as f32,
            ],
            selected: if self.selected { 1.0 } else { 0.0 },
            color: self.fill.to_unit_rgba(),
            shininess: self.material.shininess as f32,
            metallic: self.material.metallic as f32,
            _pad: [0.0; 2],
        }
    }
}

/// GPU instance layout for one render item.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderInstance {
    pub pos: [f32; 3],
    pub radius: f32,
    pub rotation: [f32; 3],
    pub selected: f32,
    pub color: [f32; 4],
    pub shininess: f32,
    pub metallic: f32,
    pub _pad: [f32; 2],
}

/// Render items for the visible spheres, in insertion order.
pub fn render_items(scene: &Scene) -> Vec<RenderItem> {
    scene.visible_spheres().map(RenderItem::from_sphere).collect()
}

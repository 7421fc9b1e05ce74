//! Pointer-to-sphere picking.
//!
//! The screen ray is an approximation rather than an inverse view-projection:
//! the camera sits on an orbit around its position, and the pointer's device
//! coordinates are offset against the orbit direction. Hit testing elsewhere
//! is tuned against this exact construction, so it must not be swapped for a
//! true unprojection.

use glam::{DVec2, DVec3};

use crate::constants::DEFAULT_ORBIT_DISTANCE;
use crate::geometry::{ray_sphere, Ray, RayHit};
use crate::scene::{Camera, Scene};
use crate::sphere::{Sphere, SphereId};

/// Canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pointer pixels to device coordinates in [-1, 1]², +Y up.
    pub fn to_ndc(&self, pointer: DVec2) -> Option<DVec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(DVec2::new(
            (2.0 * pointer.x / self.width) - 1.0,
            1.0 - (2.0 * pointer.y / self.height),
        ))
    }
}

/// Camera parameterized by its position, orbit angles and orbit distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub position: DVec3,
    pub rotation: DVec2,
    pub distance: f64,
}

impl OrbitCamera {
    pub fn from_camera(camera: &Camera, distance: f64) -> Self {
        Self {
            position: camera.position.into(),
            rotation: DVec2::new(camera.rotation.x, camera.rotation.y),
            distance,
        }
    }

    /// Unit vector from the orbit center towards the eye.
    pub fn orbit_direction(&self) -> DVec3 {
        let (sx, cx) = self.rotation.x.sin_cos();
        let (sy, cy) = self.rotation.y.sin_cos();
        DVec3::new(cx * sy, sx, cx * cy)
    }

    pub fn eye(&self) -> DVec3 {
        self.position + self.orbit_direction() * self.distance
    }
}

impl From<&Camera> for OrbitCamera {
    fn from(camera: &Camera) -> Self {
        OrbitCamera::from_camera(camera, DEFAULT_ORBIT_DISTANCE)
    }
}

/// Builds the picking ray for a pointer position; `None` for an empty viewport.
pub fn screen_to_ray(pointer: DVec2, viewport: Viewport, camera: &OrbitCamera) -> Option<Ray> {
    let ndc = viewport.to_ndc(pointer)?;
    let direction = DVec3::new(ndc.x, ndc.y, 0.0) - camera.orbit_direction();
    Some(Ray::new(camera.eye(), direction))
}

#[derive(Clone, Debug, PartialEq)]
pub struct PickHit {
    pub id: SphereId,
    pub hit: RayHit,
}

/// Front-most visible sphere along `ray`.
pub fn closest_sphere<'a, I>(ray: &Ray, spheres: I) -> Option<PickHit>
where
    I: IntoIterator<Item = &'a Sphere>,
{
    let mut best: Option<(&Sphere, RayHit)> = None;
    for sphere in spheres.into_iter().filter(|s| s.is_visible()) {
        let center: DVec3 = sphere.position().into();
        if let Some(hit) = ray_sphere(ray, center, sphere.radius()) {
            match best {
                Some((_, b)) if hit.distance >= b.distance => {}
                _ => best = Some((sphere, hit)),
            }
        }
    }
    best.map(|(sphere, hit)| PickHit {
        id: sphere.id().clone(),
        hit,
    })
}

/// Resolves a pointer position against the scene's visible spheres.
pub fn pick_sphere(
    scene: &Scene,
    pointer: DVec2,
    viewport: Viewport,
    camera: &OrbitCamera,
) -> Option<PickHit> {
    let ray = screen_to_ray(pointer, viewport, camera)?;
    let hit = closest_sphere(&ray, scene.spheres());
    match &hit {
        Some(h) => log::debug!("[pick] hit {} at t={:.3}", h.id, h.hit.distance),
        None => log::trace!("[pick] miss at ({:.1},{:.1})", pointer.x, pointer.y),
    }
    hit
}

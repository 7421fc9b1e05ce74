//! Vector helpers and ray/sphere intersection.
//!
//! `Vector3` is the serializable `{x, y, z}` triple stored in scene documents;
//! the arithmetic is done with glam's `DVec3` and converted at the edges.

use glam::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn has_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(a: [f64; 3]) -> Self {
        Vector3::new(a[0], a[1], a[2])
    }
}

pub fn add(a: Vector3, b: Vector3) -> Vector3 {
    (DVec3::from(a) + DVec3::from(b)).into()
}

pub fn subtract(a: Vector3, b: Vector3) -> Vector3 {
    (DVec3::from(a) - DVec3::from(b)).into()
}

pub fn scale(v: Vector3, s: f64) -> Vector3 {
    (DVec3::from(v) * s).into()
}

pub fn dot(a: Vector3, b: Vector3) -> f64 {
    DVec3::from(a).dot(b.into())
}

pub fn magnitude(v: Vector3) -> f64 {
    DVec3::from(v).length()
}

/// Unit vector in the direction of `v`; the zero vector maps to itself.
pub fn normalize(v: Vector3) -> Vector3 {
    DVec3::from(v).normalize_or_zero().into()
}

pub fn distance(a: Vector3, b: Vector3) -> f64 {
    DVec3::from(a).distance(b.into())
}

#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Builds a ray with a normalized direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the hit; always strictly positive.
    pub distance: f64,
    pub point: DVec3,
    pub normal: DVec3,
}

/// Nearest intersection in front of the ray origin.
///
/// Solves `a t² + b t + c = 0` and reports the smallest strictly positive root,
/// so a ray starting inside the sphere hits the far wall and a sphere entirely
/// behind the origin is a miss.
pub fn ray_sphere(ray: &Ray, center: DVec3, radius: f64) -> Option<RayHit> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    let t = if t1 > 0.0 {
        t1
    } else if t2 > 0.0 {
        t2
    } else {
        return None;
    };
    let point = ray.at(t);
    Some(RayHit {
        distance: t,
        point,
        normal: (point - center).normalize_or_zero(),
    })
}

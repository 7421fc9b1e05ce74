//! Scene aggregate: owns the spheres, the camera and the lighting, and keeps
//! the single-selection invariant.

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, SceneError};
use crate::geometry::{clamp, Vector3};
use crate::sphere::{Sphere, ValidationReport};

/// Orbit angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitAngles {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vector3,
    pub rotation: OrbitAngles,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vector3::from(DEFAULT_CAMERA_POSITION),
            rotation: OrbitAngles {
                x: DEFAULT_CAMERA_ROTATION[0],
                y: DEFAULT_CAMERA_ROTATION[1],
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient: f64,
    pub directional: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT,
            directional: DEFAULT_DIRECTIONAL,
        }
    }
}

/// Plain serialized form of a scene; the export/import document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneData {
    pub spheres: Vec<Sphere>,
    pub camera: Camera,
    pub lighting: Lighting,
    pub is_paused: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    spheres: Vec<Sphere>,
    camera: Camera,
    lighting: Lighting,
    is_paused: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub(crate) fn spheres_mut(&mut self) -> &mut [Sphere] {
        &mut self.spheres
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn lighting(&self) -> Lighting {
        self.lighting
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Appends a sphere. Rejects spheres that fail validation or reuse an id.
    pub fn add_sphere(&mut self, sphere: Sphere) -> Result<()> {
        let report = sphere.validate();
        if !report.is_valid {
            return Err(SceneError::invalid("sphere", report.errors.join("; ")));
        }
        if self.find_sphere(sphere.id().as_str()).is_some() {
            return Err(SceneError::invalid(
                "sphere",
                format!("id {} already exists in the scene", sphere.id()),
            ));
        }
        if sphere.is_selected() {
            self.clear_selections();
        }
        log::debug!("[scene] add sphere {} ({})", sphere.id(), sphere.name());
        self.spheres.push(sphere);
        Ok(())
    }

    pub fn remove_sphere(&mut self, id: &str) -> Result<Sphere> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| SceneError::not_found(id))?;
        log::debug!("[scene] remove sphere {id}");
        Ok(self.spheres.remove(idx))
    }

    pub fn find_sphere(&self, id: &str) -> Option<&Sphere> {
        self.spheres.iter().find(|s| s.id() == id)
    }

    pub(crate) fn find_sphere_mut(&mut self, id: &str) -> Option<&mut Sphere> {
        self.spheres.iter_mut().find(|s| s.id() == id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.spheres.iter().position(|s| s.id() == id)
    }

    pub fn visible_spheres(&self) -> impl Iterator<Item = &Sphere> {
        self.spheres.iter().filter(|s| s.is_visible())
    }

    pub fn selected_sphere(&self) -> Option<&Sphere> {
        self.spheres.iter().find(|s| s.is_selected())
    }

    /// Selects `id` and deselects everything else; unchanged when `id` is absent.
    pub fn select_sphere(&mut self, id: &str) -> Result<()> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| SceneError::not_found(id))?;
        for (i, sphere) in self.spheres.iter_mut().enumerate() {
            sphere.set_selected(i == idx);
        }
        Ok(())
    }

    pub fn clear_selections(&mut self) {
        for sphere in &mut self.spheres {
            sphere.set_selected(false);
        }
    }

    pub fn set_camera_position(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let position = Vector3::new(x, y, z);
        if position.has_nan() {
            return Err(SceneError::invalid(
                "camera.position",
                "coordinates cannot be NaN",
            ));
        }
        self.camera.position = position;
        Ok(())
    }

    pub fn set_camera_rotation(&mut self, x: f64, y: f64) -> Result<()> {
        if x.is_nan() || y.is_nan() {
            return Err(SceneError::invalid(
                "camera.rotation",
                "angles cannot be NaN",
            ));
        }
        self.camera.rotation = OrbitAngles { x, y };
        Ok(())
    }

    /// Each channel is optional; both are checked before either is written.
    pub fn set_lighting(&mut self, ambient: Option<f64>, directional: Option<f64>) -> Result<()> {
        for (field, value) in [
            ("lighting.ambient", ambient),
            ("lighting.directional", directional),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(SceneError::invalid(
                        field,
                        format!("must be a finite number, got {v}"),
                    ));
                }
            }
        }
        if let Some(a) = ambient {
            self.lighting.ambient = clamp(a, LIGHTING_MIN, LIGHTING_MAX);
        }
        if let Some(d) = directional {
            self.lighting.directional = clamp(d, LIGHTING_MIN, LIGHTING_MAX);
        }
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn reset(&mut self) {
        *self = Scene::default();
    }

    /// Aggregate-level check; per-sphere ranges are left to [`Sphere::validate`].
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();
        if !self.camera.position.is_finite() {
            errors.push("Camera position must be finite".to_owned());
        }
        if !(self.camera.rotation.x.is_finite() && self.camera.rotation.y.is_finite()) {
            errors.push("Camera rotation must be finite".to_owned());
        }
        for (name, v) in [
            ("Ambient", self.lighting.ambient),
            ("Directional", self.lighting.directional),
        ] {
            if !(v.is_finite() && (LIGHTING_MIN..=LIGHTING_MAX).contains(&v)) {
                errors.push(format!(
                    "{name} lighting must be between {LIGHTING_MIN} and {LIGHTING_MAX}"
                ));
            }
        }
        let mut seen = FnvHashSet::default();
        for sphere in &self.spheres {
            if !seen.insert(sphere.id().as_str()) {
                errors.push(format!("Duplicate sphere id {}", sphere.id()));
            }
        }
        let selected = self.spheres.iter().filter(|s| s.is_selected()).count();
        if selected > 1 {
            errors.push(format!("At most one sphere may be selected, found {selected}"));
        }
        ValidationReport::from_errors(errors)
    }

    /// Deep copy where every sphere is re-created under a fresh id.
    pub fn duplicate(&self) -> Scene {
        Scene {
            spheres: self.spheres.iter().map(Sphere::duplicate).collect(),
            camera: self.camera,
            lighting: self.lighting,
            is_paused: self.is_paused,
        }
    }

    pub fn to_data(&self) -> SceneData {
        SceneData {
            spheres: self.spheres.clone(),
            camera: self.camera,
            lighting: self.lighting,
            is_paused: self.is_paused,
        }
    }

    /// Rebuilds a scene as-is; run [`Scene::validate`] on untrusted input.
    pub fn from_data(data: SceneData) -> Scene {
        Scene {
            spheres: data.spheres,
            camera: data.camera,
            lighting: data.lighting,
            is_paused: data.is_paused,
        }
    }

    /// serde_json writes NaN and infinities as `null`, which does not load back.
    fn ensure_json_numbers(&self) -> Result<()> {
        if !(self.lighting.ambient.is_finite() && self.lighting.directional.is_finite()) {
            return Err(SceneError::invalid(
                "lighting",
                "cannot serialize non-finite intensities",
            ));
        }
        if !self.camera.position.is_finite() {
            return Err(SceneError::invalid(
                "camera.position",
                "cannot serialize non-finite coordinates",
            ));
        }
        if !(self.camera.rotation.x.is_finite() && self.camera.rotation.y.is_finite()) {
            return Err(SceneError::invalid(
                "camera.rotation",
                "cannot serialize non-finite angles",
            ));
        }
        for sphere in &self.spheres {
            let material = sphere.material();
            let scalars = [
                sphere.radius(),
                sphere.rotation_speed(),
                material.shininess,
                material.metallic,
            ];
            if !sphere.position().is_finite()
                || !sphere.rotation().is_finite()
                || scalars.iter().any(|v| !v.is_finite())
            {
                return Err(SceneError::invalid(
                    "spheres",
                    format!("sphere {} holds a non-finite number", sphere.id()),
                ));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        self.ensure_json_numbers()?;
        Ok(serde_json::to_string(&self.to_data())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        self.ensure_json_numbers()?;
        Ok(serde_json::to_string_pretty(&self.to_data())?)
    }

    pub fn from_json(json: &str) -> Result<Scene> {
        let data: SceneData = serde_json::from_str(json)?;
        Ok(Scene::from_data(data))
    }
}

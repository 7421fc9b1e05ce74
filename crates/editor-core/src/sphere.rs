//! The sphere entity and its mutation contract.
//!
//! Setters validate their own input and fail fast with
//! [`SceneError::InvalidArgument`]; numeric ranges are clamped once the value
//! is known to be a usable number. Data that arrives through deserialization
//! bypasses the setters and is checked afterwards with [`Sphere::validate`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

use crate::color::is_valid_hex_color;
use crate::constants::*;
use crate::error::{Result, SceneError};
use crate::geometry::{clamp, Vector3};

/// Field names of the typed sphere record. Raw overrides may not use them.
pub const SPHERE_FIELDS: &[&str] = &[
    "id",
    "name",
    "position",
    "radius",
    "rotation",
    "rotationSpeed",
    "colors",
    "material",
    "visible",
    "selected",
];

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SphereId(String);

impl SphereId {
    pub fn generate() -> Self {
        SphereId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SphereId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SphereId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SphereId {
    fn from(s: &str) -> Self {
        SphereId(s.to_owned())
    }
}

impl From<String> for SphereId {
    fn from(s: String) -> Self {
        SphereId(s)
    }
}

impl PartialEq<str> for SphereId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SphereId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub start: String,
    pub end: String,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            start: DEFAULT_COLOR_START.to_owned(),
            end: DEFAULT_COLOR_END.to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub shininess: f64,
    pub metallic: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shininess: DEFAULT_SHININESS,
            metallic: DEFAULT_METALLIC,
        }
    }
}

/// Partial material update; absent fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialPatch {
    pub shininess: Option<f64>,
    pub metallic: Option<f64>,
}

/// Outcome of a read-only invariant check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Construction properties and the on-the-wire sphere record.
///
/// Every field is optional; missing ones take the sphere defaults. Keys that
/// are not part of the typed record are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SphereProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<SphereId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vector3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SphereProps {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SphereProps")]
pub struct Sphere {
    pub(crate) id: SphereId,
    pub(crate) name: String,
    pub(crate) position: Vector3,
    pub(crate) radius: f64,
    pub(crate) rotation: Vector3,
    pub(crate) rotation_speed: f64,
    pub(crate) colors: ColorPair,
    pub(crate) material: Material,
    pub(crate) visible: bool,
    pub(crate) selected: bool,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

fn default_name(id: &SphereId) -> String {
    let chars: Vec<char> = id.as_str().chars().collect();
    let tail: String = chars[chars.len().saturating_sub(DEFAULT_NAME_ID_CHARS)..]
        .iter()
        .collect();
    format!("{DEFAULT_NAME_PREFIX} {tail}")
}

fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SceneError::invalid(field, format!("must be a finite number, got {value}")))
    }
}

impl Sphere {
    fn blank(id: Option<SphereId>) -> Self {
        let id = id
            .filter(|id| !id.as_str().is_empty())
            .unwrap_or_else(SphereId::generate);
        let name = default_name(&id);
        Self {
            id,
            name,
            position: Vector3::ZERO,
            radius: DEFAULT_RADIUS,
            rotation: Vector3::ZERO,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            colors: ColorPair::default(),
            material: Material::default(),
            visible: true,
            selected: false,
            extra: Map::new(),
        }
    }

    /// Validated constructor: every provided property goes through its setter.
    pub fn new(props: SphereProps) -> Result<Self> {
        let mut sphere = Sphere::blank(props.id);
        if let Some(name) = props.name.filter(|n| !n.is_empty()) {
            sphere.set_name(name);
        }
        if let Some(p) = props.position {
            sphere.set_position(p.x, p.y, p.z)?;
        }
        if let Some(r) = props.radius {
            sphere.set_radius(r)?;
        }
        if let Some(rot) = props.rotation {
            sphere.set_rotation(rot.x, rot.y, rot.z)?;
        }
        if let Some(s) = props.rotation_speed {
            sphere.set_rotation_speed(s)?;
        }
        if let Some(c) = props.colors {
            sphere.set_colors(Some(&c.start), Some(&c.end))?;
        }
        if let Some(m) = props.material {
            sphere.set_material(MaterialPatch {
                shininess: Some(m.shininess),
                metallic: Some(m.metallic),
            })?;
        }
        if let Some(v) = props.visible {
            sphere.set_visible(v);
        }
        if let Some(s) = props.selected {
            sphere.set_selected(s);
        }
        for (key, value) in props.extra {
            sphere.set_raw_field(key, value)?;
        }
        Ok(sphere)
    }

    /// Unchecked construction used for deserialized records; see [`Sphere::validate`].
    pub fn from_record(props: SphereProps) -> Self {
        let mut sphere = Sphere::blank(props.id);
        if let Some(name) = props.name.filter(|n| !n.is_empty()) {
            sphere.name = name;
        }
        sphere.position = props.position.unwrap_or(sphere.position);
        sphere.radius = props.radius.unwrap_or(sphere.radius);
        sphere.rotation = props.rotation.unwrap_or(sphere.rotation);
        sphere.rotation_speed = props.rotation_speed.unwrap_or(sphere.rotation_speed);
        if let Some(c) = props.colors {
            sphere.colors = c;
        }
        sphere.material = props.material.unwrap_or(sphere.material);
        sphere.visible = props.visible.unwrap_or(sphere.visible);
        sphere.selected = props.selected.unwrap_or(sphere.selected);
        sphere.extra = props.extra;
        sphere
    }

    pub fn id(&self) -> &SphereId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn rotation(&self) -> Vector3 {
        self.rotation
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    pub fn colors(&self) -> &ColorPair {
        &self.colors
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Values written through the raw override; never validated.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        let radius = require_finite("radius", radius)?;
        self.radius = clamp(radius, RADIUS_MIN, RADIUS_MAX);
        Ok(())
    }

    pub fn set_rotation_speed(&mut self, speed: f64) -> Result<()> {
        let speed = require_finite("rotationSpeed", speed)?;
        self.rotation_speed = clamp(speed, ROTATION_SPEED_MIN, ROTATION_SPEED_MAX);
        Ok(())
    }

    pub fn set_position(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let position = Vector3::new(x, y, z);
        if position.has_nan() {
            return Err(SceneError::invalid(
                "position",
                "coordinates cannot be NaN",
            ));
        }
        self.position = position;
        Ok(())
    }

    /// Euler angles in radians. Frame updates wrap them back into [0, 2π).
    pub fn set_rotation(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let rotation = Vector3::new(x, y, z);
        if !rotation.is_finite() {
            return Err(SceneError::invalid(
                "rotation",
                "angles must be finite numbers",
            ));
        }
        self.rotation = rotation;
        Ok(())
    }

    /// Both colors are checked before either is written.
    pub fn set_colors(&mut self, start: Option<&str>, end: Option<&str>) -> Result<()> {
        if let Some(start) = start {
            if !is_valid_hex_color(start) {
                return Err(SceneError::invalid(
                    "colors.start",
                    format!("'{start}' is not a valid hex color"),
                ));
            }
        }
        if let Some(end) = end {
            if !is_valid_hex_color(end) {
                return Err(SceneError::invalid(
                    "colors.end",
                    format!("'{end}' is not a valid hex color"),
                ));
            }
        }
        if let Some(start) = start {
            self.colors.start = start.to_owned();
        }
        if let Some(end) = end {
            self.colors.end = end.to_owned();
        }
        Ok(())
    }

    pub fn set_material(&mut self, patch: MaterialPatch) -> Result<()> {
        let shininess = patch
            .shininess
            .map(|s| require_finite("material.shininess", s))
            .transpose()?;
        let metallic = patch
            .metallic
            .map(|m| require_finite("material.metallic", m))
            .transpose()?;
        if let Some(s) = shininess {
            self.material.shininess = clamp(s, SHININESS_MIN, SHININESS_MAX);
        }
        if let Some(m) = metallic {
            self.material.metallic = clamp(m, METALLIC_MIN, METALLIC_MAX);
        }
        Ok(())
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Scene-level uniqueness is not enforced here; go through the scene or store.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Unchecked escape hatch for keys outside the typed record.
    pub fn set_raw_field(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(SceneError::invalid("key", "raw field name cannot be empty"));
        }
        if SPHERE_FIELDS.contains(&key.as_str()) {
            return Err(SceneError::invalid(
                "key",
                format!("'{key}' is a typed field; use its dedicated update"),
            ));
        }
        self.extra.insert(key, value);
        Ok(())
    }

    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();
        let in_range = |v: f64, lo: f64, hi: f64| v.is_finite() && (lo..=hi).contains(&v);

        if !in_range(self.radius, RADIUS_MIN, RADIUS_MAX) {
            errors.push(format!("Radius must be between {RADIUS_MIN} and {RADIUS_MAX}"));
        }
        if !in_range(self.rotation_speed, ROTATION_SPEED_MIN, ROTATION_SPEED_MAX) {
            errors.push(format!(
                "Rotation speed must be between {ROTATION_SPEED_MIN} and {ROTATION_SPEED_MAX}"
            ));
        }
        if !is_valid_hex_color(&self.colors.start) {
            errors.push("Start color must be a valid hex color".to_owned());
        }
        if !is_valid_hex_color(&self.colors.end) {
            errors.push("End color must be a valid hex color".to_owned());
        }
        if self.position.has_nan() {
            errors.push("Position coordinates must be valid numbers".to_owned());
        }
        if !self.rotation.is_finite() {
            errors.push("Rotation angles must be finite numbers".to_owned());
        }
        if !in_range(self.material.shininess, SHININESS_MIN, SHININESS_MAX) {
            errors.push(format!(
                "Shininess must be between {SHININESS_MIN} and {SHININESS_MAX}"
            ));
        }
        if !in_range(self.material.metallic, METALLIC_MIN, METALLIC_MAX) {
            errors.push(format!(
                "Metallic must be between {METALLIC_MIN} and {METALLIC_MAX}"
            ));
        }
        ValidationReport::from_errors(errors)
    }

    /// Deep copy under a fresh id, renamed with a copy suffix and unselected.
    pub fn duplicate(&self) -> Sphere {
        let mut copy = self.clone();
        copy.id = SphereId::generate();
        copy.name = format!("{}{COPY_NAME_SUFFIX}", self.name);
        copy.selected = false;
        copy
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere::blank(None)
    }
}

impl From<SphereProps> for Sphere {
    fn from(props: SphereProps) -> Self {
        Sphere::from_record(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_uses_id_tail() {
        let s = Sphere::new(SphereProps {
            id: Some("abcdef123".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(s.name(), "Sphere f123");
    }

    #[test]
    fn empty_id_is_replaced() {
        let s = Sphere::from_record(SphereProps {
            id: Some("".into()),
            ..Default::default()
        });
        assert!(!s.id().as_str().is_empty());
    }
}

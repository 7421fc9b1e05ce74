//! The externally facing editor state.
//!
//! `SceneStore` owns one [`Scene`], a cached copy of the selected sphere id and
//! a few UI-only fields. The cache is only written after the scene accepted the
//! matching change, so the two never disagree.

use glam::{DVec2, DVec3};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::constants::{duplicate_offset_vec3, DEFAULT_LEFT_PANEL_WIDTH};
use crate::error::{Result, SceneError};
use crate::frame::{advance_rotations, render_items, RenderItem};
use crate::geometry::Vector3;
use crate::picking::{pick_sphere, OrbitCamera, Viewport};
use crate::scene::{Camera, Lighting, Scene, SceneData};
use crate::sphere::{MaterialPatch, Sphere, SphereId, SphereProps};

/// Partial color update carried by [`SphereUpdate::Colors`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorsPatch {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// One property mutation on a sphere.
///
/// Typed variants go through the sphere's validating setters. `Raw` is the
/// unchecked escape hatch for keys outside the typed record; it has to be
/// constructed explicitly and [`SphereUpdate::parse`] never produces it.
#[derive(Clone, Debug, PartialEq)]
pub enum SphereUpdate {
    Name(String),
    Radius(f64),
    RotationSpeed(f64),
    Position(Vector3),
    Rotation(Vector3),
    Colors(ColorsPatch),
    Material(MaterialPatch),
    Visible(bool),
    Selected(bool),
    Raw { key: String, value: Value },
}

fn from_json_value<T: for<'de> Deserialize<'de>>(field: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| SceneError::invalid(field, e.to_string()))
}

impl SphereUpdate {
    /// Document key this update targets.
    pub fn key(&self) -> &str {
        match self {
            SphereUpdate::Name(_) => "name",
            SphereUpdate::Radius(_) => "radius",
            SphereUpdate::RotationSpeed(_) => "rotationSpeed",
            SphereUpdate::Position(_) => "position",
            SphereUpdate::Rotation(_) => "rotation",
            SphereUpdate::Colors(_) => "colors",
            SphereUpdate::Material(_) => "material",
            SphereUpdate::Visible(_) => "visible",
            SphereUpdate::Selected(_) => "selected",
            SphereUpdate::Raw { key, .. } => key,
        }
    }

    /// Maps a string-keyed property to a typed update. Unknown keys are rejected.
    pub fn parse(key: &str, value: Value) -> Result<SphereUpdate> {
        Ok(match key {
            "name" => SphereUpdate::Name(from_json_value("name", value)?),
            "radius" => SphereUpdate::Radius(from_json_value("radius", value)?),
            "rotationSpeed" => {
                SphereUpdate::RotationSpeed(from_json_value("rotationSpeed", value)?)
            }
            "position" => SphereUpdate::Position(from_json_value("position", value)?),
            "rotation" => SphereUpdate::Rotation(from_json_value("rotation", value)?),
            "colors" => SphereUpdate::Colors(from_json_value("colors", value)?),
            "material" => SphereUpdate::Material(from_json_value("material", value)?),
            "visible" => SphereUpdate::Visible(from_json_value("visible", value)?),
            "selected" => SphereUpdate::Selected(from_json_value("selected", value)?),
            other => {
                return Err(SceneError::invalid(
                    "key",
                    format!("unknown sphere property '{other}'"),
                ))
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiState {
    pub left_panel_width: f64,
    pub show_layers: bool,
    pub export_dialog_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            left_panel_width: DEFAULT_LEFT_PANEL_WIDTH,
            show_layers: true,
            export_dialog_open: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneStore {
    scene: Scene,
    selected_sphere_id: Option<SphereId>,
    ui: UiState,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing scene; its selection flags are cleared.
    pub fn with_scene(mut scene: Scene) -> Self {
        scene.clear_selections();
        Self {
            scene,
            selected_sphere_id: None,
            ui: UiState::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn spheres(&self) -> &[Sphere] {
        self.scene.spheres()
    }

    pub fn visible_spheres(&self) -> impl Iterator<Item = &Sphere> {
        self.scene.visible_spheres()
    }

    pub fn sphere_count(&self) -> usize {
        self.scene.len()
    }

    pub fn sphere(&self, id: &str) -> Option<&Sphere> {
        self.scene.find_sphere(id)
    }

    pub fn selected_sphere_id(&self) -> Option<&SphereId> {
        self.selected_sphere_id.as_ref()
    }

    pub fn selected_sphere(&self) -> Option<&Sphere> {
        self.selected_sphere_id
            .as_ref()
            .and_then(|id| self.scene.find_sphere(id.as_str()))
    }

    pub fn has_selection(&self) -> bool {
        self.selected_sphere_id.is_some()
    }

    pub fn camera(&self) -> Camera {
        self.scene.camera()
    }

    pub fn lighting(&self) -> Lighting {
        self.scene.lighting()
    }

    pub fn is_paused(&self) -> bool {
        self.scene.is_paused()
    }

    fn require(&self, id: &str) -> Result<()> {
        match self.scene.find_sphere(id) {
            Some(_) => Ok(()),
            None => Err(SceneError::not_found(id)),
        }
    }

    /// Creates a sphere from `props`, appends it and selects it.
    pub fn add_sphere(&mut self, props: SphereProps) -> Result<SphereId> {
        let sphere = Sphere::new(props)?;
        let id = sphere.id().clone();
        self.scene.add_sphere(sphere)?;
        self.select_sphere(Some(id.as_str()))?;
        log::debug!("[store] added sphere {id}");
        Ok(id)
    }

    pub fn update_sphere_property(&mut self, id: &str, update: SphereUpdate) -> Result<()> {
        self.require(id)?;
        log::debug!("[store] update {id}.{}", update.key());
        let sphere = match update {
            SphereUpdate::Selected(true) => return self.select_sphere(Some(id)),
            SphereUpdate::Selected(false) => {
                if self.selected_sphere_id.as_ref().is_some_and(|s| s == id) {
                    self.deselect_all();
                }
                return Ok(());
            }
            _ => self
                .scene
                .find_sphere_mut(id)
                .ok_or_else(|| SceneError::not_found(id))?,
        };
        match update {
            SphereUpdate::Name(name) => sphere.set_name(name),
            SphereUpdate::Radius(r) => sphere.set_radius(r)?,
            SphereUpdate::RotationSpeed(s) => sphere.set_rotation_speed(s)?,
            SphereUpdate::Position(p) => sphere.set_position(p.x, p.y, p.z)?,
            SphereUpdate::Rotation(r) => sphere.set_rotation(r.x, r.y, r.z)?,
            SphereUpdate::Colors(c) => sphere.set_colors(c.start.as_deref(), c.end.as_deref())?,
            SphereUpdate::Material(m) => sphere.set_material(m)?,
            SphereUpdate::Visible(v) => sphere.set_visible(v),
            SphereUpdate::Raw { key, value } => sphere.set_raw_field(key, value)?,
            SphereUpdate::Selected(_) => {}
        }
        Ok(())
    }

    /// Applies `updates` in order and stops at the first failure.
    ///
    /// Not atomic: updates before the failing one stay applied. Returns the
    /// number of applied updates.
    pub fn update_sphere<I>(&mut self, id: &str, updates: I) -> Result<usize>
    where
        I: IntoIterator<Item = SphereUpdate>,
    {
        self.require(id)?;
        let mut applied = 0;
        for update in updates {
            let key = update.key().to_owned();
            self.update_sphere_property(id, update)
                .map_err(|e| batch_failure(key, applied, e))?;
            applied += 1;
        }
        Ok(applied)
    }

    /// String-keyed form of [`SceneStore::update_sphere`]; entries apply in map order.
    pub fn update_sphere_json(&mut self, id: &str, props: &Map<String, Value>) -> Result<usize> {
        self.require(id)?;
        let mut applied = 0;
        for (key, value) in props {
            SphereUpdate::parse(key, value.clone())
                .and_then(|update| self.update_sphere_property(id, update))
                .map_err(|e| batch_failure(key.clone(), applied, e))?;
            applied += 1;
        }
        Ok(applied)
    }

    pub fn delete_sphere(&mut self, id: &str) -> Result<Sphere> {
        self.require(id)?;
        if self.selected_sphere_id.as_ref().is_some_and(|s| s == id) {
            self.selected_sphere_id = None;
        }
        let removed = self.scene.remove_sphere(id)?;
        log::debug!("[store] deleted sphere {id}");
        Ok(removed)
    }

    /// Copies a sphere, shifts the copy by the duplicate offset and selects it.
    pub fn duplicate_sphere(&mut self, id: &str) -> Result<SphereId> {
        let source = self
            .scene
            .find_sphere(id)
            .ok_or_else(|| SceneError::not_found(id))?;
        let mut copy = source.duplicate();
        let pos = DVec3::from(copy.position()) + duplicate_offset_vec3();
        copy.set_position(pos.x, pos.y, pos.z)?;
        let new_id = copy.id().clone();
        self.scene.add_sphere(copy)?;
        self.select_sphere(Some(new_id.as_str()))?;
        log::debug!("[store] duplicated {id} -> {new_id}");
        Ok(new_id)
    }

    /// Flips visibility and returns the new value.
    pub fn toggle_sphere_visibility(&mut self, id: &str) -> Result<bool> {
        let sphere = self
            .scene
            .find_sphere_mut(id)
            .ok_or_else(|| SceneError::not_found(id))?;
        let visible = !sphere.is_visible();
        sphere.set_visible(visible);
        Ok(visible)
    }

    /// `None` clears the selection. On failure the cached id is left as it was.
    pub fn select_sphere(&mut self, id: Option<&str>) -> Result<()> {
        match id {
            None => {
                self.deselect_all();
                Ok(())
            }
            Some(id) => {
                self.scene.select_sphere(id)?;
                self.selected_sphere_id = Some(SphereId::from(id));
                Ok(())
            }
        }
    }

    pub fn deselect_all(&mut self) {
        self.scene.clear_selections();
        self.selected_sphere_id = None;
    }

    pub fn update_camera_position(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        self.scene.set_camera_position(x, y, z)
    }

    pub fn update_camera_rotation(&mut self, x: f64, y: f64) -> Result<()> {
        self.scene.set_camera_rotation(x, y)
    }

    pub fn update_lighting(&mut self, ambient: Option<f64>, directional: Option<f64>) -> Result<()> {
        self.scene.set_lighting(ambient, directional)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.scene.toggle_pause()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.scene.set_paused(paused);
    }

    pub fn reset_scene(&mut self) {
        self.scene.reset();
        self.selected_sphere_id = None;
        log::info!("[store] scene reset");
    }

    /// Replaces the scene. Loaded scenes always start with nothing selected.
    pub fn load_scene(&mut self, data: SceneData) {
        let mut scene = Scene::from_data(data);
        let report = scene.validate();
        if !report.is_valid {
            log::warn!("[store] loaded scene has issues: {}", report.errors.join("; "));
        }
        scene.clear_selections();
        self.scene = scene;
        self.selected_sphere_id = None;
        log::info!("[store] loaded scene with {} spheres", self.scene.len());
    }

    pub fn load_scene_json(&mut self, json: &str) -> Result<()> {
        let data: SceneData = serde_json::from_str(json)?;
        self.load_scene(data);
        Ok(())
    }

    pub fn scene_data(&self) -> SceneData {
        self.scene.to_data()
    }

    pub fn scene_json(&self) -> Result<String> {
        self.scene.to_json_pretty()
    }

    /// One frame tick; skipped while paused.
    pub fn advance_frame(&mut self, elapsed_ms: f64) {
        advance_rotations(&mut self.scene, elapsed_ms);
    }

    pub fn render_items(&self) -> Vec<RenderItem> {
        render_items(&self.scene)
    }

    /// Front-most visible sphere under the pointer, if any.
    pub fn pick(&self, pointer: DVec2, viewport: Viewport, orbit_distance: f64) -> Option<SphereId> {
        let camera = OrbitCamera::from_camera(&self.scene.camera(), orbit_distance);
        pick_sphere(&self.scene, pointer, viewport, &camera).map(|h| h.id)
    }

    /// Click-to-select: selects the picked sphere, or clears the selection on a miss.
    pub fn select_at(
        &mut self,
        pointer: DVec2,
        viewport: Viewport,
        orbit_distance: f64,
    ) -> Result<Option<SphereId>> {
        let hit = self.pick(pointer, viewport, orbit_distance);
        self.select_sphere(hit.as_ref().map(SphereId::as_str))?;
        Ok(hit)
    }

    /// Non-positive or non-finite widths are ignored.
    pub fn set_left_panel_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.ui.left_panel_width = width;
        } else {
            log::warn!("[ui] ignoring panel width {width}");
        }
    }

    pub fn toggle_layers_visibility(&mut self) -> bool {
        self.ui.show_layers = !self.ui.show_layers;
        self.ui.show_layers
    }

    pub fn set_export_dialog_open(&mut self, open: bool) {
        self.ui.export_dialog_open = open;
    }
}

fn batch_failure(key: String, applied: usize, source: SceneError) -> SceneError {
    log::debug!("[store] batch update stopped at '{key}' after {applied}");
    SceneError::UpdateFailed {
        key,
        applied,
        source: Box::new(source),
    }
}

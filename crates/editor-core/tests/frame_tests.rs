// Host-side tests for the per-frame rotation step and gradient evaluation.

use editor_core::*;
use std::f64::consts::{PI, TAU};

fn spinning(speed: f64, rotation: Vector3) -> Sphere {
    Sphere::new(SphereProps {
        rotation_speed: Some(speed),
        rotation: Some(rotation),
        ..Default::default()
    })
    .unwrap()
}

fn scene_of(spheres: Vec<Sphere>) -> Scene {
    let mut scene = Scene::new();
    for s in spheres {
        scene.add_sphere(s).unwrap();
    }
    scene
}

#[test]
fn delta_applies_full_to_y_and_coupled_share_to_x() {
    let mut scene = scene_of(vec![spinning(1.0, Vector3::ZERO)]);
    advance_rotations(&mut scene, 100.0);
    let rot = scene.spheres()[0].rotation();
    let delta = TAU / 10.0;
    assert!((rot.y - delta).abs() < 1e-12);
    assert!((rot.x - delta * 0.3).abs() < 1e-12);
    assert_eq!(rot.z, 0.0);
}

#[test]
fn rotation_wraps_into_range() {
    let mut scene = scene_of(vec![spinning(5.0, Vector3::new(0.0, TAU - 0.01, 0.0))]);
    advance_rotations(&mut scene, 1000.0);
    let rot = scene.spheres()[0].rotation();
    assert!((0.0..TAU).contains(&rot.y), "y = {}", rot.y);
    assert!((0.0..TAU).contains(&rot.x), "x = {}", rot.x);
}

#[test]
fn negative_speed_wraps_to_positive_angles() {
    let mut scene = scene_of(vec![spinning(-2.0, Vector3::new(0.1, 0.1, 0.0))]);
    for _ in 0..37 {
        advance_rotations(&mut scene, 16.7);
        let rot = scene.spheres()[0].rotation();
        assert!((0.0..TAU).contains(&rot.y));
        assert!((0.0..TAU).contains(&rot.x));
    }
}

#[test]
fn pause_gate_freezes_rotation() {
    let mut scene = scene_of(vec![
        spinning(3.0, Vector3::new(0.5, 1.0, 0.25)),
        spinning(-4.0, Vector3::ZERO),
    ]);
    scene.set_paused(true);
    let before: Vec<_> = scene.spheres().iter().map(|s| s.rotation()).collect();
    for elapsed in [0.0, 16.0, 1000.0, 1e6] {
        advance_rotations(&mut scene, elapsed);
    }
    let after: Vec<_> = scene.spheres().iter().map(|s| s.rotation()).collect();
    assert_eq!(before, after);
}

#[test]
fn zero_speed_and_other_fields_untouched() {
    let mut still = spinning(0.0, Vector3::new(7.0, 8.0, 9.0));
    still.set_position(1.0, 2.0, 3.0).unwrap();
    let mut scene = scene_of(vec![still.clone(), spinning(2.0, Vector3::new(0.0, 0.0, 1.5))]);
    advance_rotations(&mut scene, 250.0);

    assert_eq!(scene.spheres()[0], still);
    let moving = &scene.spheres()[1];
    assert_eq!(moving.rotation().z, 1.5);
    assert_eq!(moving.position(), Vector3::ZERO);
    assert_eq!(moving.radius(), 50.0);
}

#[test]
fn step_kernel_ignores_pause_flag() {
    let mut spheres = vec![spinning(1.0, Vector3::ZERO)];
    step_sphere_rotations(&mut spheres, 250.0);
    assert!((spheres[0].rotation().y - PI / 2.0).abs() < 1e-12);
}

#[test]
fn gradient_follows_sine_of_y() {
    assert!((gradient_t(0.0) - 0.5).abs() < 1e-12);
    assert!((gradient_t(PI / 2.0) - 1.0).abs() < 1e-12);
    assert!((gradient_t(3.0 * PI / 2.0) - 0.0).abs() < 1e-12);

    assert_eq!(gradient_color("#000000", "#ffffff", PI / 2.0), Rgb::new(255, 255, 255));
    assert_eq!(gradient_color("#000000", "#ffffff", 3.0 * PI / 2.0), Rgb::new(0, 0, 0));
    assert_eq!(gradient_color("#000", "#c8c8c8", 0.0), Rgb::new(100, 100, 100));
}

#[test]
fn fill_is_recomputed_from_current_rotation() {
    let mut scene = scene_of(vec![Sphere::new(SphereProps {
        colors: Some(ColorPair {
            start: "#000000".into(),
            end: "#ffffff".into(),
        }),
        ..Default::default()
    })
    .unwrap()]);
    let first = resolve_fill(&scene.spheres()[0]);
    assert_eq!(first, Rgb::new(128, 128, 128));
    advance_rotations(&mut scene, 250.0); // y = π/2
    let second = resolve_fill(&scene.spheres()[0]);
    assert_eq!(second, Rgb::new(255, 255, 255));
}

#[test]
fn render_items_cover_visible_spheres_only() {
    let mut hidden = spinning(1.0, Vector3::ZERO);
    hidden.set_visible(false);
    let shown = spinning(1.0, Vector3::ZERO);
    let shown_id = shown.id().clone();
    let scene = scene_of(vec![hidden, shown]);

    let items = render_items(&scene);
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.id, shown_id);
    assert_eq!(item.radius, 50.0);
    assert_eq!(item.material, Material::default());

    let instance = item.instance();
    assert_eq!(instance.radius, 50.0);
    assert_eq!(instance.color[3], 1.0);
    let bytes: &[u8] = bytemuck::bytes_of(&instance);
    assert_eq!(bytes.len(), std::mem::size_of::<RenderInstance>());
}

#[test]
fn frame_clock_reports_non_negative_elapsed() {
    let mut clock = FrameClock::new();
    let a = clock.tick();
    let b = clock.tick();
    assert!(a >= 0.0 && b >= 0.0);
}

// Host-side tests for the sphere entity and its setters.

use editor_core::*;
use serde_json::json;

fn sphere() -> Sphere {
    Sphere::new(SphereProps::default()).unwrap()
}

#[test]
fn new_sphere_has_documented_defaults() {
    let s = sphere();
    assert!(!s.id().as_str().is_empty());
    assert!(s.name().starts_with("Sphere "));
    assert_eq!(s.position(), Vector3::ZERO);
    assert_eq!(s.radius(), 50.0);
    assert_eq!(s.rotation(), Vector3::ZERO);
    assert_eq!(s.rotation_speed(), 1.0);
    assert_eq!(s.colors().start, "#ff6b6b");
    assert_eq!(s.colors().end, "#4ecdc4");
    assert_eq!(s.material().shininess, 100.0);
    assert_eq!(s.material().metallic, 0.5);
    assert!(s.is_visible());
    assert!(!s.is_selected());
    assert!(s.validate().is_valid);
}

#[test]
fn generated_ids_are_unique() {
    let a = sphere();
    let b = sphere();
    assert_ne!(a.id(), b.id());
}

#[test]
fn constructor_routes_props_through_setters() {
    let s = Sphere::new(SphereProps {
        id: Some("sphere1".into()),
        name: Some("Custom".into()),
        radius: Some(500.0),
        rotation_speed: Some(-9.0),
        material: Some(Material {
            shininess: -3.0,
            metallic: 2.0,
        }),
        visible: Some(false),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(s.id(), "sphere1");
    assert_eq!(s.name(), "Custom");
    assert_eq!(s.radius(), 200.0);
    assert_eq!(s.rotation_speed(), -5.0);
    assert_eq!(s.material().shininess, 0.0);
    assert_eq!(s.material().metallic, 1.0);
    assert!(!s.is_visible());
}

#[test]
fn constructor_rejects_invalid_props() {
    let err = Sphere::new(SphereProps {
        radius: Some(f64::NAN),
        ..Default::default()
    })
    .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = Sphere::new(SphereProps {
        colors: Some(ColorPair {
            start: "not-a-color".into(),
            end: "#fff".into(),
        }),
        ..Default::default()
    })
    .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn radius_clamps_symmetrically() {
    let mut s = sphere();
    s.set_radius(75.0).unwrap();
    assert_eq!(s.radius(), 75.0);
    s.set_radius(-10.0).unwrap();
    assert_eq!(s.radius(), 1.0);
    s.set_radius(300.0).unwrap();
    assert_eq!(s.radius(), 200.0);
}

#[test]
fn radius_rejects_non_finite_and_keeps_value() {
    let mut s = sphere();
    s.set_radius(80.0).unwrap();
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = s.set_radius(bad).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(s.radius(), 80.0);
    }
}

#[test]
fn radius_always_in_bounds_after_success() {
    let mut s = sphere();
    for r in [-1e9, -1.0, 0.0, 0.5, 1.0, 42.0, 199.99, 200.0, 200.01, 1e12] {
        s.set_radius(r).unwrap();
        assert!((1.0..=200.0).contains(&s.radius()), "radius {r} -> {}", s.radius());
    }
}

#[test]
fn rotation_speed_clamps_and_validates() {
    let mut s = sphere();
    s.set_rotation_speed(2.5).unwrap();
    assert_eq!(s.rotation_speed(), 2.5);
    s.set_rotation_speed(-10.0).unwrap();
    assert_eq!(s.rotation_speed(), -5.0);
    s.set_rotation_speed(10.0).unwrap();
    assert_eq!(s.rotation_speed(), 5.0);
    assert!(s.set_rotation_speed(f64::NAN).is_err());
    assert_eq!(s.rotation_speed(), 5.0);
}

#[test]
fn rejected_position_changes_no_coordinate() {
    let mut s = sphere();
    s.set_position(10.0, 20.0, 30.0).unwrap();
    assert_eq!(s.position(), Vector3::new(10.0, 20.0, 30.0));
    let err = s.set_position(1.0, f64::NAN, 3.0).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(s.position(), Vector3::new(10.0, 20.0, 30.0));
}

#[test]
fn colors_accept_long_short_and_partial() {
    let mut s = sphere();
    s.set_colors(Some("#ff0000"), Some("#00ff00")).unwrap();
    assert_eq!(s.colors().start, "#ff0000");
    assert_eq!(s.colors().end, "#00ff00");

    s.set_colors(Some("#f00"), None).unwrap();
    assert_eq!(s.colors().start, "#f00");
    assert_eq!(s.colors().end, "#00ff00");

    s.set_colors(None, Some("0f0")).unwrap();
    assert_eq!(s.colors().start, "#f00");
    assert_eq!(s.colors().end, "0f0");
}

#[test]
fn invalid_end_color_leaves_start_untouched() {
    let mut s = sphere();
    let err = s.set_colors(Some("#123456"), Some("#zzzzzz")).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(s.colors().start, "#ff6b6b");
    assert_eq!(s.colors().end, "#4ecdc4");
}

#[test]
fn material_fields_are_independent() {
    let mut s = sphere();
    s.set_material(MaterialPatch {
        shininess: Some(250.0),
        metallic: None,
    })
    .unwrap();
    assert_eq!(s.material().shininess, 250.0);
    assert_eq!(s.material().metallic, 0.5);

    s.set_material(MaterialPatch {
        shininess: None,
        metallic: Some(0.9),
    })
    .unwrap();
    assert_eq!(s.material().shininess, 250.0);
    assert_eq!(s.material().metallic, 0.9);

    s.set_material(MaterialPatch {
        shininess: Some(5000.0),
        metallic: Some(-1.0),
    })
    .unwrap();
    assert_eq!(s.material().shininess, 1000.0);
    assert_eq!(s.material().metallic, 0.0);

    let err = s
        .set_material(MaterialPatch {
            shininess: Some(10.0),
            metallic: Some(f64::NAN),
        })
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(s.material().shininess, 1000.0);
}

#[test]
fn validate_reports_every_broken_invariant() {
    let s = Sphere::from_record(SphereProps {
        radius: Some(500.0),
        rotation_speed: Some(9.0),
        colors: Some(ColorPair {
            start: "#ggg".into(),
            end: "#12".into(),
        }),
        material: Some(Material {
            shininess: 2000.0,
            metallic: 3.0,
        }),
        position: Some(Vector3::new(f64::NAN, 0.0, 0.0)),
        ..Default::default()
    });
    let report = s.validate();
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 7, "{:?}", report.errors);
    assert!(report.errors.iter().any(|e| e.starts_with("Start color")));
    assert!(report.errors.iter().any(|e| e.starts_with("End color")));
}

#[test]
fn three_letter_words_can_be_hex_colors() {
    assert!(is_valid_hex_color("bad"));
    assert!(is_valid_hex_color("#Fab"));
    assert!(!is_valid_hex_color("#ggg"));
    assert!(!is_valid_hex_color("purple"));
}

#[test]
fn duplicate_gets_new_id_and_is_independent() {
    let mut original = Sphere::new(SphereProps {
        name: Some("Original".into()),
        radius: Some(75.0),
        selected: Some(true),
        ..Default::default()
    })
    .unwrap();
    let mut copy = original.duplicate();
    assert_ne!(copy.id(), original.id());
    assert_eq!(copy.name(), "Original Copy");
    assert!(!copy.is_selected());
    assert_eq!(copy.radius(), 75.0);
    assert_eq!(copy.colors(), original.colors());

    copy.set_radius(10.0).unwrap();
    copy.set_colors(Some("#000"), None).unwrap();
    assert_eq!(original.radius(), 75.0);
    assert_eq!(original.colors().start, "#ff6b6b");

    original.set_position(1.0, 2.0, 3.0).unwrap();
    assert_eq!(copy.position(), Vector3::ZERO);
}

#[test]
fn raw_fields_are_kept_but_typed_keys_are_refused() {
    let mut s = sphere();
    s.set_raw_field("tag", json!("hero")).unwrap();
    assert_eq!(s.extra().get("tag"), Some(&json!("hero")));

    let err = s.set_raw_field("radius", json!(3)).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(s.radius(), 50.0);
    assert!(s.set_raw_field("", json!(null)).is_err());
}

#[test]
fn record_with_missing_fields_takes_defaults() {
    let s: Sphere = serde_json::from_value(json!({ "id": "abc123", "radius": 12 })).unwrap();
    assert_eq!(s.id(), "abc123");
    assert_eq!(s.name(), "Sphere c123");
    assert_eq!(s.radius(), 12.0);
    assert_eq!(s.rotation_speed(), 1.0);
    assert!(s.is_visible());
}

use std::thread;
use std::time::Duration;

use anyhow::Context;
use editor_core::{
    FrameClock, RenderInstance, SceneStore, SphereProps, SphereUpdate, Vector3, Viewport,
    DEFAULT_ORBIT_DISTANCE, RADIUS_MAX, ROTATION_SPEED_MAX, ROTATION_SPEED_MIN,
};
use glam::DVec2;
use rand::prelude::*;

const VIEWPORT_WIDTH: f64 = 1280.0;
const VIEWPORT_HEIGHT: f64 = 720.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const DEFAULT_FRAMES: u32 = 120;
const DEFAULT_SEED: u64 = 42;
const SPHERE_COUNT: usize = 5;

const PALETTE: [(&str, &str); 4] = [
    ("#ff6b6b", "#4ecdc4"),
    ("#f7b733", "#fc4a1a"),
    ("#6a11cb", "#2575fc"),
    ("#0f0", "#00f"),
];

/// Host settings; each can be overridden from the environment.
struct HostConfig {
    frames: u32,
    seed: u64,
}

impl HostConfig {
    fn from_env() -> anyhow::Result<Self> {
        let frames = match std::env::var("EDITOR_FRAMES") {
            Ok(v) => v.parse().context("EDITOR_FRAMES must be an unsigned integer")?,
            Err(_) => DEFAULT_FRAMES,
        };
        let seed = match std::env::var("EDITOR_SEED") {
            Ok(v) => v.parse().context("EDITOR_SEED must be an unsigned integer")?,
            Err(_) => DEFAULT_SEED,
        };
        Ok(Self { frames, seed })
    }
}

fn populate(store: &mut SceneStore, rng: &mut StdRng) -> anyhow::Result<()> {
    for i in 0..SPHERE_COUNT {
        let (start, end) = PALETTE[i % PALETTE.len()];
        let id = store.add_sphere(SphereProps {
            name: Some(format!("Sphere {}", i + 1)),
            position: Some(Vector3::new(
                rng.gen_range(-150.0..150.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-80.0..0.0),
            )),
            radius: Some(rng.gen_range(10.0..RADIUS_MAX / 4.0)),
            rotation_speed: Some(rng.gen_range(ROTATION_SPEED_MIN..ROTATION_SPEED_MAX)),
            ..Default::default()
        })?;
        store.update_sphere_property(
            id.as_str(),
            SphereUpdate::Colors(editor_core::ColorsPatch {
                start: Some(start.to_owned()),
                end: Some(end.to_owned()),
            }),
        )?;
    }
    // One sphere dead center so the pointer pick below has something to find.
    store.add_sphere(SphereProps {
        name: Some("Center".to_owned()),
        position: Some(Vector3::ZERO),
        radius: Some(40.0),
        ..Default::default()
    })?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = HostConfig::from_env()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut store = SceneStore::new();
    populate(&mut store, &mut rng)?;
    log::info!(
        "[host] {} spheres, running {} frames",
        store.sphere_count(),
        config.frames
    );

    let viewport = Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let mut clock = FrameClock::new();
    let mut instances: Vec<RenderInstance> = Vec::new();
    for frame in 0..config.frames {
        let elapsed_ms = clock.tick();
        store.advance_frame(elapsed_ms);

        instances.clear();
        instances.extend(store.render_items().iter().map(|item| item.instance()));
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        if frame % 60 == 0 {
            log::info!(
                "[frame] {frame}: dt={elapsed_ms:.2}ms instances={} upload={}B",
                instances.len(),
                bytes.len()
            );
        }
        thread::sleep(FRAME_INTERVAL);
    }

    let center = DVec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0);
    match store.select_at(center, viewport, DEFAULT_ORBIT_DISTANCE)? {
        Some(id) => log::info!("[mouse] picked {id}"),
        None => log::info!("[mouse] nothing under pointer"),
    }

    println!("{}", store.scene_json()?);
    Ok(())
}

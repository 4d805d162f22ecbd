/// helio3d Terminal Demo - Orbiting Solar System
///
/// Runs the software pipeline against an ASCII raster surface. Without
/// arguments a small solar system orbits a central lit sphere; passing a
/// path renders that Wavefront OBJ mesh instead.
///
/// Controls:
///   - Arrow Keys / N / M: Rotate the camera about its basis vectors
///   - W/A/S/D/Q/E: Move the camera
///   - C: Toggle the frustum debug overlay
///   - X: Destroy an entity
///   - R: Reset the camera
///   - ESC: Quit

use std::path::PathBuf;

use anyhow::Context;
use crossterm::terminal;

use helio3d_core::{Color, Entity, EntityParams, Shape, Vec2, Vec3};
use helio3d_terminal::{Scene, TerminalApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (cols, rows) = terminal::size().context("query terminal size")?;
    let window = Vec2::new(cols as f32, rows as f32);

    let scene = match std::env::args().nth(1) {
        Some(path) => mesh_scene(window, PathBuf::from(path))?,
        None => solar_scene(window)?,
    };

    log::info!(
        "starting with {} entities on a {}x{} grid",
        scene.entities.len(),
        cols,
        rows
    );

    let mut app = TerminalApp::new(window, scene);
    app.run().context("terminal loop")?;

    Ok(())
}

/// Central lit sphere with four orbiting spheres and a cube, scaled to the
/// character grid. The light sits at the central sphere.
fn solar_scene(window: Vec2) -> anyhow::Result<Scene> {
    let middle = Vec3::new(window.x / 2.0, window.y / 2.0, 0.0);
    let unit = window.y / 6.0;

    let sun = Shape::Sphere { res: 20 }.build(&EntityParams {
        color: Color::new(255, 255, 255, 100),
        scale: Vec3::splat(unit * 3.0),
        translation: middle,
        ..EntityParams::default()
    })?;
    let light = sun.position();

    let orbiters = [
        (Color::RED, Vec3::new(-4.0, 4.0, 0.0), Vec3::new(0.01, 0.01, 0.0)),
        (Color::GREEN, Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.01, 0.0, 0.0)),
        (Color::BLUE, Vec3::new(-6.0, 0.0, 0.0), Vec3::new(0.0, 0.01, 0.0)),
        (Color::CYAN, Vec3::new(6.0, 6.0, 0.0), Vec3::new(0.01, -0.01, 0.0)),
    ];

    let mut entities = vec![sun];
    for (color, offset, orbit) in orbiters {
        let mut planet = Shape::Sphere { res: 10 }.build(&EntityParams {
            color,
            scale: Vec3::splat(unit * 0.5),
            translation: middle + offset * (unit / 2.0),
            orbit,
            orbit_center: light,
            ..EntityParams::default()
        })?;
        planet.orbit_vel = 45.0;
        entities.push(planet);
    }

    let mut moon = Shape::Cube.build(&EntityParams {
        color: Color::YELLOW,
        scale: Vec3::splat(unit * 0.4),
        translation: middle + Vec3::new(4.0 * unit, -2.0 * unit, 0.0),
        orbit: Vec3::new(0.0, 0.005, 0.005),
        orbit_center: light,
        ..EntityParams::default()
    })?;
    moon.orbit_vel = 45.0;
    entities.push(moon);

    Ok(Scene { entities, light })
}

/// Loads one OBJ mesh centered on the window, lit from above.
fn mesh_scene(window: Vec2, path: PathBuf) -> anyhow::Result<Scene> {
    let middle = Vec3::new(window.x / 2.0, window.y / 2.0, 0.0);
    let size = window.y * 0.8;

    let mesh: Entity = Shape::Mesh { path: path.clone() }
        .build(&EntityParams {
            color: Color::GREY,
            scale: Vec3::splat(size),
            translation: middle,
            ..EntityParams::default()
        })
        .with_context(|| format!("load mesh {}", path.display()))?;

    let light = middle + Vec3::new(0.0, size, size);
    Ok(Scene {
        entities: vec![mesh],
        light,
    })
}

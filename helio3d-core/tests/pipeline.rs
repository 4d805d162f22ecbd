//! End-to-end pipeline scenarios across the engine, entities, and shapes.

use helio3d_core::math::Mat3;
use helio3d_core::{
    render, Color, DrawOp, EntityParams, RenderConfig, RenderFigure, RenderVert, Renderer, Shape,
    Vec2, Vec3,
};

fn default_renderer() -> Renderer {
    Renderer::new(&RenderConfig::default())
}

fn screen_model(renderer: &Renderer) -> Mat3 {
    Mat3::translate(renderer.render_center()).multiply(&Mat3::scale(renderer.render_scale()))
}

#[test]
fn order_draws_farthest_first() {
    let mut renderer = Renderer::new(&RenderConfig {
        window: Vec2::new(800.0, 600.0),
        camera: Vec3::new(400.0, 300.0, 100.0),
        near: 1.0,
        far: 1000.0,
    });
    let camera = renderer.camera();
    let positions = [
        camera + Vec3::new(0.0, 0.0, -50.0),
        camera + Vec3::new(0.0, 0.0, -500.0),
    ];
    let scales = [Vec3::ONE, Vec3::ONE];
    assert_eq!(renderer.order(&positions, &scales), &[1, 0]);
}

#[test]
fn order_is_idempotent() {
    let mut renderer = default_renderer();
    let positions = [
        Vec3::new(420.0, 310.0, -60.0),
        Vec3::new(100.0, 50.0, -400.0),
        Vec3::new(400.0, 300.0, -200.0),
        Vec3::new(0.0, 0.0, 0.0),
    ];
    let scales = [
        Vec3::ONE,
        Vec3::splat(2.0),
        Vec3::splat(0.25),
        Vec3::new(1.0, 2.0, 3.0),
    ];
    let first = renderer.order(&positions, &scales).to_vec();
    let second = renderer.order(&positions, &scales).to_vec();
    assert_eq!(first, second);
}

#[test]
fn frustum_midpoint_is_active_for_any_window() {
    for window in [
        Vec2::new(800.0, 600.0),
        Vec2::new(320.0, 200.0),
        Vec2::new(1920.0, 1080.0),
    ] {
        let renderer = Renderer::new(&RenderConfig {
            window,
            camera: Vec3::new(window.x / 2.0, window.y / 2.0, 100.0),
            near: 1.0,
            far: 1000.0,
        });
        // The camera looks down negative z from z = 100; the frustum
        // midpoint sits at near + (far - near) / 2 in front of it.
        let midpoint = renderer.camera() + Vec3::new(0.0, 0.0, -(1.0 + 999.0 / 2.0));
        assert!(renderer.active(midpoint));
    }
}

#[test]
fn light_at_point_position_keeps_color() {
    let light = Vec3::new(7.0, -3.0, 12.0);
    for color in [
        Color::WHITE,
        Color::BLACK,
        Color::new(10, 250, 3, 77),
        Color::new(0, 0, 1, 0),
    ] {
        assert_eq!(
            render::render_color_light(Vec3::new(1.0, 1.0, 1.0), light, light, color),
            color
        );
    }
}

#[test]
fn threaded_matches_sequential_below_and_above_thread_count() {
    let renderer = default_renderer();
    let camera = renderer.camera();

    for n_points in [2usize, 3, 500] {
        let points: Vec<Vec3> = (0..n_points)
            .map(|i| {
                let t = i as f32;
                camera + Vec3::new((t * 0.37).sin() * 90.0, (t * 0.51).cos() * 70.0, -20.0 - t)
            })
            .collect();
        let figure = RenderFigure {
            points: &points,
            desp: camera + Vec3::new(0.0, 0.0, -250.0),
            light: camera + Vec3::new(100.0, 200.0, -300.0),
            color: Color::new(180, 90, 30, 255),
            model: screen_model(&renderer),
            force_render: false,
            render_light: true,
        };

        let mut sequential = vec![RenderVert::default(); n_points];
        let mut threaded = vec![RenderVert::default(); n_points];
        renderer.render_points(&figure, &mut sequential);
        renderer.render_threaded_points(&figure, &mut threaded);

        assert_eq!(sequential, threaded);
    }
}

#[test]
fn entity_translation_round_trip() {
    let mut entity = Shape::Cube
        .build(&EntityParams::default())
        .expect("cube build");
    let original = entity.points().to_vec();
    let d = Vec3::new(12.5, -8.0, 40.0);
    entity.translate(d);
    entity.translate(-d);
    for (p, q) in entity.points().iter().zip(&original) {
        assert!((*p - *q).magnitude() < 1e-4);
    }
}

#[test]
fn cube_draw_emits_geometry_in_front_of_camera() {
    let mut renderer = default_renderer();
    renderer.set_render_scale(Vec2::new(100.0, 100.0));

    let camera = renderer.camera();
    let mut entity = Shape::Cube
        .build(&EntityParams {
            color: Color::RED,
            fill: true,
            scale: Vec3::splat(20.0),
            translation: camera + Vec3::new(0.0, 0.0, -300.0),
            ..EntityParams::default()
        })
        .expect("cube build");

    let mut out = Vec::new();
    entity.draw(&renderer, camera + Vec3::new(0.0, 200.0, -300.0), &mut out);
    assert!(out
        .iter()
        .any(|op| matches!(op, DrawOp::Triangle(_))));
}

#[test]
fn point_cloud_fallback_without_fill_or_lines() {
    let renderer = default_renderer();
    let camera = renderer.camera();
    let mut entity = Shape::Sphere { res: 5 }
        .build(&EntityParams {
            fill: false,
            scale: Vec3::splat(10.0),
            translation: camera + Vec3::new(0.0, 0.0, -200.0),
            ..EntityParams::default()
        })
        .expect("sphere build");
    entity.lines = false;

    let mut out = Vec::new();
    entity.draw(&renderer, Vec3::ZERO, &mut out);
    assert!(!out.is_empty());
    assert!(out.iter().all(|op| matches!(op, DrawOp::Point { .. })));
}

#[test]
fn camera_overlay_emits_square_and_light() {
    let renderer = default_renderer();
    let mut out = Vec::new();
    renderer.camera_draw(renderer.camera() + Vec3::new(0.0, 0.0, -100.0), &mut out);

    let lines = out
        .iter()
        .filter(|op| matches!(op, DrawOp::Line { .. }))
        .count();
    let points = out
        .iter()
        .filter(|op| matches!(op, DrawOp::Point { .. }))
        .count();
    assert_eq!(lines, 4);
    assert_eq!(points, 7);
}

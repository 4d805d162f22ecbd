//! Renderable mesh entities.
//!
//! An entity owns its point, face, center, and render-vertex buffers; the
//! render engine only borrows them for the duration of one draw. All
//! transform operations mutate points and face centers in lock-step so the
//! painter's-algorithm face ordering stays valid.

use std::time::Instant;

use crate::color::Color;
use crate::draw::{DrawOp, ScreenVertex};
use crate::math::{self, mat4_transform_vec3, take_max, take_min, Mat3, Mat4, Vec3};
use crate::render::{RenderFigure, RenderVert, Renderer};

/// Ordered point indices of one face, 3 for triangles and 4 for quads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub points: Vec<usize>,
}

impl Face {
    pub fn new(points: Vec<usize>) -> Self {
        Face { points }
    }

    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Face {
            points: vec![a, b, c],
        }
    }

    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Face {
            points: vec![a, b, c, d],
        }
    }
}

pub struct Entity {
    points: Vec<Vec3>,
    faces: Vec<Face>,
    centers: Vec<Vec3>,
    verts: Vec<RenderVert>,
    order: Vec<usize>,

    mov: Vec3,
    scale: Vec3,
    rotation: Vec3,
    dim: f32,

    pub fill: bool,
    pub lines: bool,
    pub fill_color: Color,
    pub lines_color: Color,
    pub render_light: bool,
    pub orbit: Vec3,
    pub orbit_center: Vec3,
    pub orbit_vel: f32,

    destroying: bool,
    destroyed: bool,
    destroy_start: Option<Instant>,
}

impl Entity {
    /// Builds an entity from pre-constructed geometry. Face centers are the
    /// caller's responsibility so shapes can pick meaningful ones.
    pub fn new(points: Vec<Vec3>, faces: Vec<Face>, centers: Vec<Vec3>) -> Self {
        let n_points = points.len();
        let n_faces = faces.len();
        Entity {
            points,
            faces,
            centers,
            verts: vec![RenderVert::default(); n_points],
            order: (0..n_faces).collect(),
            mov: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            dim: 1.0,
            fill: false,
            lines: false,
            fill_color: Color::WHITE,
            lines_color: Color::WHITE,
            render_light: true,
            orbit: Vec3::ZERO,
            orbit_center: Vec3::ZERO,
            orbit_vel: 0.0,
            destroying: false,
            destroyed: false,
            destroy_start: None,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn position(&self) -> Vec3 {
        self.mov
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Moves every point, face center, and the tracked position by `d`.
    pub fn translate(&mut self, d: Vec3) {
        self.mov += d;
        for p in &mut self.points {
            *p += d;
        }
        for c in &mut self.centers {
            *c += d;
        }
    }

    /// Scales the mesh about its own position.
    pub fn scale_by(&mut self, s: Vec3) {
        self.scale = self.scale * s;
        self.dim *= s.x;

        let model = Mat4::identity().multiply(&Mat4::scale(s));
        self.transform_about_position(&model);
    }

    /// Rotates the mesh about its own position by `r`, scaled by 10 and
    /// accumulated per axis modulo a full turn. Degrees.
    pub fn rotate(&mut self, r: Vec3) {
        let r = r * 10.0;
        self.rotation += r;
        if self.rotation.x >= 360.0 {
            self.rotation.x -= 360.0;
        }
        if self.rotation.y >= 360.0 {
            self.rotation.y -= 360.0;
        }
        if self.rotation.z >= 360.0 {
            self.rotation.z -= 360.0;
        }

        let model = math::rotation_model(r);
        self.transform_about_position(&model);
    }

    /// One orbit step about `orbit_center` by `orbit * orbit_vel` degrees.
    /// Does nothing while the orbit center sits at the origin.
    pub fn orbit(&mut self) {
        if self.orbit_center.x + self.orbit_center.y + self.orbit_center.z == 0.0 {
            return;
        }
        let model = math::rotation_model(self.orbit * self.orbit_vel);
        let center = self.orbit_center;

        self.translate(-center);
        self.mov = mat4_transform_vec3(&model, self.mov);
        for p in &mut self.points {
            *p = mat4_transform_vec3(&model, *p);
        }
        for c in &mut self.centers {
            *c = mat4_transform_vec3(&model, *c);
        }
        self.translate(center);
    }

    /// Translates the bounding box to the origin without moving the tracked
    /// position.
    pub fn centered(&mut self) {
        let min = take_min(&self.points);
        let max = take_max(&self.points);

        self.translate(min * -1.0);
        self.mov -= min * -1.0;

        let recenter = (min - max) / 2.0;
        self.translate(recenter);
        self.mov -= recenter;
    }

    /// Uniformly rescales so the largest extent becomes 0.5.
    pub fn proportion(&mut self) {
        let extreme = take_max(&self.points);
        let max = extreme.x.max(extreme.y).max(extreme.z);

        self.scale = Vec3::splat(max);
        self.dim = max;

        if max != 1.0 {
            self.scale_by(Vec3::splat(1.0 / max));
        }
        self.scale_by(Vec3::splat(0.5));
    }

    /// Centers and rescales the mesh into the [-0.5, 0.5] cube.
    pub fn standarize(&mut self) {
        self.centered();
        self.proportion();
    }

    /// Arms the timed destruction animation. The entity keeps drawing in a
    /// degrading state until it flags itself destroyed.
    pub fn start_destroy(&mut self) {
        self.destroying = true;
        self.destroy_start = Some(Instant::now());
        log::debug!("entity destruction started");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_destroying(&self) -> bool {
        self.destroying
    }

    fn destroying_step(&mut self) {
        let elapsed_ms = self
            .destroy_start
            .map_or(0, |start| start.elapsed().as_millis());

        self.fill = false;
        self.lines = true;
        self.render_light = false;

        if elapsed_ms > 200 {
            self.lines = false;
        }

        if elapsed_ms >= 750 {
            if self.fill_color.a > 5 {
                self.fill_color.a -= 5;
            } else {
                self.fill_color.a = 0;
                self.destroyed = true;
                self.destroying = false;
                log::debug!("entity destroyed");
            }
        }

        // Shake the vertices apart with a random scale per point.
        let mov = self.mov;
        self.translate(-mov);
        for p in &mut self.points {
            let model = Mat4::scale(Vec3::splat(math::frand(0.99, 1.075)));
            *p = mat4_transform_vec3(&model, *p);
        }
        self.translate(mov);
    }

    /// Runs the point pipeline, orders faces back to front, and emits this
    /// frame's draw ops. Faces with any off-frustum vertex are skipped
    /// whole; with neither fill nor lines requested, active vertices are
    /// emitted as points.
    pub fn draw(&mut self, renderer: &Renderer, light: Vec3, out: &mut Vec<DrawOp>) {
        if self.destroyed {
            return;
        }
        if self.destroying {
            self.destroying_step();
        }
        if self.points.is_empty() {
            return;
        }

        let model =
            Mat3::translate(renderer.render_center()).multiply(&Mat3::scale(renderer.render_scale()));
        let figure = RenderFigure {
            points: &self.points,
            desp: self.mov,
            light,
            color: self.fill_color,
            model,
            force_render: false,
            render_light: self.render_light,
        };
        renderer.render_threaded_points(&figure, &mut self.verts);

        if self.fill || self.lines {
            let camera = renderer.camera();
            let centers = &self.centers;
            for (i, slot) in self.order.iter_mut().enumerate() {
                *slot = i;
            }
            self.order.sort_by(|&a, &b| {
                let da = (centers[a] - camera).magnitude();
                let db = (centers[b] - camera).magnitude();
                db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
            });

            for &face_idx in &self.order {
                let face = &self.faces[face_idx];
                self.emit_triangle(&[face.points[0], face.points[1], face.points[2]], out);
                if face.points.len() == 4 {
                    self.emit_triangle(&[face.points[3], face.points[2], face.points[0]], out);
                }
            }
        } else {
            for vert in &self.verts {
                if vert.active {
                    out.push(DrawOp::Point {
                        pos: vert.pos,
                        color: vert.color,
                    });
                }
            }
        }
    }

    fn emit_triangle(&self, indices: &[usize; 3], out: &mut Vec<DrawOp>) {
        let verts = [
            self.verts[indices[0]],
            self.verts[indices[1]],
            self.verts[indices[2]],
        ];
        if verts.iter().any(|v| !v.active) {
            return;
        }

        if self.fill {
            out.push(DrawOp::Triangle([
                ScreenVertex::new(verts[0].pos, verts[0].color),
                ScreenVertex::new(verts[1].pos, verts[1].color),
                ScreenVertex::new(verts[2].pos, verts[2].color),
            ]));
        }
        if self.lines {
            for i in 0..3 {
                out.push(DrawOp::Line {
                    a: verts[i].pos,
                    b: verts[(i + 1) % 3].pos,
                    color: self.lines_color,
                });
            }
        }
    }

    fn transform_about_position(&mut self, model: &Mat4) {
        let mov = self.mov;
        self.translate(-mov);
        for p in &mut self.points {
            *p = mat4_transform_vec3(model, *p);
        }
        for c in &mut self.centers {
            *c = mat4_transform_vec3(model, *c);
        }
        self.translate(mov);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderConfig;

    fn quad_entity() -> Entity {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let faces = vec![Face::quad(0, 1, 2, 3)];
        let centers = vec![Vec3::new(1.0, 1.0, 0.0)];
        Entity::new(points, faces, centers)
    }

    #[test]
    fn test_translate_round_trip() {
        let mut entity = quad_entity();
        let original = entity.points().to_vec();
        let d = Vec3::new(3.5, -1.25, 9.0);
        entity.translate(d);
        entity.translate(-d);
        for (p, q) in entity.points().iter().zip(&original) {
            assert!((*p - *q).magnitude() < 1e-5);
        }
        assert!(entity.position().magnitude() < 1e-5);
    }

    #[test]
    fn test_scale_about_position_keeps_position() {
        let mut entity = quad_entity();
        entity.translate(Vec3::new(10.0, 0.0, 0.0));
        let before = entity.position();
        entity.scale_by(Vec3::splat(2.0));
        assert_eq!(entity.position(), before);
        assert_eq!(entity.scale(), Vec3::splat(2.0));
    }

    #[test]
    fn test_rotation_accumulates_scaled_and_wrapped() {
        let mut entity = quad_entity();
        entity.rotate(Vec3::new(30.0, 0.0, 0.0));
        entity.rotate(Vec3::new(10.0, 0.0, 0.0));
        // 30 and 10 scale by 10 to 300 + 100 = 400, wrapped to 40.
        assert!((entity.rotation.x - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_noop_without_center() {
        let mut entity = quad_entity();
        entity.orbit = Vec3::new(0.0, 1.0, 0.0);
        entity.orbit_vel = 45.0;
        let before = entity.points().to_vec();
        entity.orbit();
        assert_eq!(entity.points(), &before[..]);
    }

    #[test]
    fn test_orbit_preserves_distance_to_center() {
        let mut entity = quad_entity();
        entity.translate(Vec3::new(5.0, 0.0, 0.0));
        entity.orbit = Vec3::new(0.0, 1.0, 0.0);
        entity.orbit_vel = 90.0;
        entity.orbit_center = Vec3::new(0.0, 0.0, 1.0);
        let before = (entity.position() - entity.orbit_center).magnitude();
        entity.orbit();
        let after = (entity.position() - entity.orbit_center).magnitude();
        assert!((before - after).abs() < 1e-3);
    }

    #[test]
    fn test_standarize_bounds() {
        let mut entity = quad_entity();
        entity.standarize();
        for p in entity.points() {
            assert!(p.x >= -0.5001 && p.x <= 0.5001);
            assert!(p.y >= -0.5001 && p.y <= 0.5001);
            assert!(p.z >= -0.5001 && p.z <= 0.5001);
        }
    }

    #[test]
    fn test_empty_entity_draw_is_noop() {
        let mut entity = Entity::new(Vec::new(), Vec::new(), Vec::new());
        let renderer = Renderer::new(&RenderConfig::default());
        let mut out = Vec::new();
        entity.draw(&renderer, Vec3::ZERO, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_destroying_overrides_flags() {
        let mut entity = quad_entity();
        entity.fill = true;
        entity.lines = false;
        entity.start_destroy();
        entity.destroying_step();
        assert!(!entity.fill);
        assert!(entity.lines);
        assert!(!entity.render_light);
        assert!(!entity.is_destroyed());
    }
}

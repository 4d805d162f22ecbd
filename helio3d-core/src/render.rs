//! Camera and frustum engine.
//!
//! Owns the camera position, its six basis direction vectors, the six
//! frustum face centers and inward face vectors, and the screen mapping
//! (render scale and center). Entities hand their point arrays to
//! [`Renderer::render_points`] or [`Renderer::render_threaded_points`]
//! each frame and get back screen-space vertices with an active flag.

use std::cmp::Ordering;
use std::f32::consts::PI;
use std::thread;

use crate::color::Color;
use crate::draw::DrawOp;
use crate::math::{
    self, degrees, mat3_transform_vec3, mat4_transform_vec3, mat4_view, rotate_point, Mat3, Mat4,
    Vec2, Vec3,
};

/// Pipeline configuration handed to [`Renderer::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub window: Vec2,
    pub camera: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            window: Vec2::new(800.0, 600.0),
            camera: Vec3::new(400.0, 300.0, 100.0),
            near: 1.0,
            far: 1000.0,
        }
    }
}

/// One 3D point after a frame's transform and light pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderVert {
    pub pos: Vec2,
    pub color: Color,
    pub active: bool,
}

/// Per-entity inputs to the point pipeline, borrowed for one render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderFigure<'a> {
    pub points: &'a [Vec3],
    /// Entity displacement, used as the shading reference center.
    pub desp: Vec3,
    pub light: Vec3,
    pub color: Color,
    /// Screen-space model matrix applied after projection.
    pub model: Mat3,
    /// Skip the frustum test, for debug overlays.
    pub force_render: bool,
    pub render_light: bool,
}

pub struct Renderer {
    camera: Vec3,
    up: Vec3,
    down: Vec3,
    right: Vec3,
    left: Vec3,
    front: Vec3,
    back: Vec3,
    near: f32,
    far: f32,
    faces_centers: [Vec3; 6],
    faces_vector: [Vec3; 6],
    paint_square: [Vec3; 4],
    render_centers: Vec3,
    render_scale: Vec2,
    draw_order: Vec<usize>,
    threads: usize,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        let threads = thread::available_parallelism().map_or(1, |n| n.get());
        let mut renderer = Renderer {
            camera: Vec3::ZERO,
            up: Vec3::UP,
            down: Vec3::DOWN,
            right: Vec3::RIGHT,
            left: Vec3::LEFT,
            front: Vec3::FORWARD,
            back: Vec3::BACK,
            near: config.near,
            far: config.far,
            faces_centers: [Vec3::ZERO; 6],
            faces_vector: [Vec3::ZERO; 6],
            paint_square: [Vec3::ZERO; 4],
            render_centers: Vec3::ZERO,
            render_scale: Vec2::ZERO,
            draw_order: Vec::new(),
            threads,
        };
        renderer.init(config);
        renderer
    }

    /// Rebuilds the camera basis, frustum faces, and screen mapping.
    pub fn init(&mut self, config: &RenderConfig) {
        log::info!(
            "creating camera at {:?}, near {} far {}",
            config.camera,
            config.near,
            config.far
        );
        log::debug!("system threads: {}", self.threads);

        self.up = Vec3::UP;
        self.down = Vec3::DOWN;
        self.right = Vec3::RIGHT;
        self.left = Vec3::LEFT;
        self.front = Vec3::FORWARD;
        self.back = Vec3::BACK;
        self.camera = config.camera;
        self.near = config.near;
        self.far = config.far;
        self.draw_order.clear();

        let new_scale = 0.5 * self.far;
        self.render_scale = Vec2::new(new_scale, new_scale);

        let camera = self.camera;
        let window = config.window;

        // Inverted look direction, advanced to the frustum's longitudinal
        // midpoint.
        let look = (camera - Vec3::new(camera.x, camera.y, camera.z + 100.0)).normalized();
        self.render_centers = camera + look * ((self.far - self.near) / 2.0 + self.near);

        // Near and far faces point straight at the midpoint.
        self.faces_centers[0] = Vec3::new(window.x / 2.0, window.y / 2.0, camera.z - self.near);
        self.faces_vector[0] = self.render_centers - self.faces_centers[0];
        self.faces_centers[1] = Vec3::new(window.x / 2.0, window.y / 2.0, camera.z - self.far);
        self.faces_vector[1] = self.render_centers - self.faces_centers[1];

        // Side faces take the camera direction rotated a quarter turn so the
        // vector points inward from the face. The axis and sign per face are
        // load-bearing for the visibility test.
        self.faces_centers[2] = self.render_centers + Vec3::new(window.x / 2.0, 0.0, 0.0);
        self.faces_vector[2] =
            rotate_point(Vec3::new(0.0, -90.0, 0.0), camera - self.faces_centers[2]);
        self.faces_centers[3] = self.render_centers - Vec3::new(window.x / 2.0, 0.0, 0.0);
        self.faces_vector[3] =
            rotate_point(Vec3::new(0.0, 90.0, 0.0), camera - self.faces_centers[3]);
        self.faces_centers[4] = self.render_centers + Vec3::new(0.0, window.y / 2.0, 0.0);
        self.faces_vector[4] =
            rotate_point(Vec3::new(90.0, 0.0, 0.0), camera - self.faces_centers[4]);
        self.faces_centers[5] = self.render_centers - Vec3::new(0.0, window.y / 2.0, 0.0);
        self.faces_vector[5] =
            rotate_point(Vec3::new(-90.0, 0.0, 0.0), camera - self.faces_centers[5]);

        for v in &mut self.faces_vector {
            v.normalize();
        }

        self.paint_square[0] = Vec3::new(
            self.faces_centers[3].x,
            self.faces_centers[4].y,
            self.faces_centers[2].z,
        );
        self.paint_square[1] = Vec3::new(
            self.faces_centers[2].x,
            self.faces_centers[4].y,
            self.faces_centers[2].z,
        );
        self.paint_square[2] = Vec3::new(
            self.faces_centers[2].x,
            self.faces_centers[5].y,
            self.faces_centers[2].z,
        );
        self.paint_square[3] = Vec3::new(
            self.faces_centers[3].x,
            self.faces_centers[5].y,
            self.faces_centers[2].z,
        );
    }

    /// Re-inits with the camera centered on the window at z = 100.
    pub fn reset(&mut self, window: Vec2) {
        self.draw_order = Vec::new();
        self.init(&RenderConfig {
            window,
            camera: Vec3::new(window.x / 2.0, window.y / 2.0, 100.0),
            ..RenderConfig::default()
        });
    }

    /// Rotates the camera about itself by `rot` degrees per axis.
    ///
    /// Basis vectors and face vectors rotate in place; face centers and the
    /// paint square orbit the camera so the frustum stays rigid.
    pub fn rotation(&mut self, rot: Vec3) {
        self.up = rotate_point(rot, self.up);
        self.down = rotate_point(rot, self.down);
        self.right = rotate_point(rot, self.right);
        self.left = rotate_point(rot, self.left);
        self.front = rotate_point(rot, self.front);
        self.back = rotate_point(rot, self.back);

        for i in 0..6 {
            if i < 4 {
                math::orbit_point(self.camera, rot, &mut self.paint_square[i]);
            }
            math::orbit_point(self.camera, rot, &mut self.faces_centers[i]);
            self.faces_vector[i] = rotate_point(rot, self.faces_vector[i]);
        }
    }

    /// Translates the camera and the whole frustum by `desp`.
    pub fn translation(&mut self, desp: Vec3) {
        self.camera += desp;
        for i in 0..6 {
            if i < 4 {
                self.paint_square[i] += desp;
            }
            self.faces_centers[i] += desp;
        }
    }

    /// Frustum membership test.
    ///
    /// For each face the angle between the face-to-point direction and the
    /// inward face vector must stay within a quarter turn, boundary
    /// inclusive. Any failing face rejects immediately.
    pub fn active(&self, point: Vec3) -> bool {
        for i in 0..6 {
            let pointvec = (point - self.faces_centers[i]).normalized();
            let radian = Vec3::angle(pointvec, self.faces_vector[i]);
            if !(-PI / 2.0..=PI / 2.0).contains(&radian) {
                return false;
            }
        }
        true
    }

    /// Back-to-front draw order over object positions.
    ///
    /// Farthest from the camera first; distance ties draw the smaller scale
    /// sum first. The permutation buffer is reallocated only when the object
    /// count changes.
    pub fn order(&mut self, positions: &[Vec3], scales: &[Vec3]) -> &[usize] {
        let count = positions.len().min(scales.len());
        if self.draw_order.len() != count {
            self.draw_order = (0..count).collect();
        }

        let camera = self.camera;
        let magnitudes: Vec<f32> = positions[..count]
            .iter()
            .map(|p| (*p - camera).magnitude())
            .collect();
        let sums: Vec<f32> = scales[..count].iter().map(|s| s.x + s.y + s.z).collect();

        for (i, slot) in self.draw_order.iter_mut().enumerate() {
            *slot = i;
        }
        self.draw_order.sort_by(|&a, &b| {
            if magnitudes[a] == magnitudes[b] {
                sums[a].partial_cmp(&sums[b]).unwrap_or(Ordering::Equal)
            } else {
                magnitudes[b]
                    .partial_cmp(&magnitudes[a])
                    .unwrap_or(Ordering::Equal)
            }
        });

        &self.draw_order
    }

    /// Runs one point through the transform and light pipeline.
    pub fn render_point(&self, point: Vec3, figure: &RenderFigure) -> RenderVert {
        if self.active(point) || figure.force_render {
            let view = mat4_view(self.camera, self.front, self.up);
            let view_projection = Mat4::projection().multiply(&view);

            let clip = mat4_transform_vec3(&view_projection, point);
            // Drop z and re-homogenize before the screen-space model step.
            let flat = Vec3::new(clip.x, clip.y, 1.0);
            let screen = mat3_transform_vec3(&figure.model, flat);

            let color = if figure.render_light {
                render_color_light(point, figure.desp, figure.light, figure.color)
            } else {
                figure.color
            };

            RenderVert {
                pos: Vec2::new(screen.x, screen.y),
                color,
                active: true,
            }
        } else {
            RenderVert {
                pos: Vec2::ZERO,
                color: Color::new(0, 0, 0, 0),
                active: false,
            }
        }
    }

    /// Sequential per-point pipeline.
    pub fn render_points(&self, figure: &RenderFigure, verts: &mut [RenderVert]) {
        for (vert, &point) in verts.iter_mut().zip(figure.points) {
            *vert = self.render_point(point, figure);
        }
    }

    /// Threaded per-point pipeline, identical output to [`render_points`].
    ///
    /// Points split into `min(hardware_threads, n)` contiguous chunks with
    /// the remainder on the last chunk. Every worker writes a disjoint
    /// output slice and all workers join before return.
    ///
    /// [`render_points`]: Renderer::render_points
    pub fn render_threaded_points(&self, figure: &RenderFigure, verts: &mut [RenderVert]) {
        let n_points = figure.points.len().min(verts.len());
        if n_points == 0 {
            return;
        }
        let num_threads = self.threads.max(1).min(n_points);
        if num_threads == 1 {
            self.render_points(figure, verts);
            return;
        }

        let per_thread = n_points / num_threads;
        thread::scope(|scope| {
            let mut verts_rest = &mut verts[..n_points];
            let mut points_rest = &figure.points[..n_points];
            for i in 0..num_threads {
                let take = if i == num_threads - 1 {
                    verts_rest.len()
                } else {
                    per_thread
                };
                let (chunk, verts_tail) = verts_rest.split_at_mut(take);
                let (points, points_tail) = points_rest.split_at(take);
                verts_rest = verts_tail;
                points_rest = points_tail;

                scope.spawn(move || {
                    for (vert, &point) in chunk.iter_mut().zip(points) {
                        *vert = self.render_point(point, figure);
                    }
                });
            }
        });
    }

    /// Debug overlay: the near paint square as lines, the six face centers
    /// as points, and the light position, all force-rendered.
    pub fn camera_draw(&self, light: Vec3, out: &mut Vec<DrawOp>) {
        let model = Mat3::translate(self.render_center()).multiply(&Mat3::scale(self.render_scale));
        let overlay = Color::new(255, 0, 255, 128);
        let figure = RenderFigure {
            points: &[],
            desp: Vec3::ZERO,
            light: Vec3::ZERO,
            color: Color::MAGENTA,
            model,
            force_render: true,
            render_light: false,
        };

        let square: Vec<RenderVert> = self
            .paint_square
            .iter()
            .map(|&p| self.render_point(p, &figure))
            .collect();
        for i in 0..4 {
            out.push(DrawOp::Line {
                a: square[i].pos,
                b: square[(i + 1) % 4].pos,
                color: overlay,
            });
        }

        for &center in &self.faces_centers {
            let vert = self.render_point(center, &figure);
            out.push(DrawOp::Point {
                pos: vert.pos,
                color: vert.color,
            });
        }

        let light_vert = self.render_point(
            light,
            &RenderFigure {
                light,
                color: Color::WHITE,
                ..figure
            },
        );
        out.push(DrawOp::Point {
            pos: light_vert.pos,
            color: Color::WHITE,
        });
    }

    pub fn camera(&self) -> Vec3 {
        self.camera
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn down(&self) -> Vec3 {
        self.down
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn left(&self) -> Vec3 {
        self.left
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn back(&self) -> Vec3 {
        self.back
    }

    pub fn render_scale(&self) -> Vec2 {
        self.render_scale
    }

    pub fn set_render_scale(&mut self, scale: Vec2) {
        self.render_scale = scale;
    }

    pub fn render_center(&self) -> Vec2 {
        Vec2::new(self.render_centers.x, self.render_centers.y)
    }

    pub fn set_render_center(&mut self, center: Vec2) {
        self.render_centers.x = center.x;
        self.render_centers.y = center.y;
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }
}

/// Single-light shading for one vertex.
///
/// The angle between the point-to-center and light-to-center directions,
/// in degrees with a fixed 45 degree bias clamped at 180, maps linearly to
/// a darkening factor scaled by the brightest base channel. A point
/// coinciding with the light keeps the base color.
pub fn render_color_light(point: Vec3, desp: Vec3, light: Vec3, color: Color) -> Color {
    if desp == light {
        return color;
    }

    let point_vector = (desp - point).normalized();
    let light_vector = (desp - light).normalized();

    let mut euler = degrees(Vec3::angle(point_vector, light_vector)).abs();
    euler += 45.0;
    euler = euler.min(180.0);

    let angle_rest = euler * (255.0 / 180.0);
    let max = color.r.max(color.g).max(color.b);
    if max == 0 {
        return color;
    }
    let factor = angle_rest / max as f32;

    let darken = |channel: u8| -> u8 {
        if channel == 0 {
            return 0;
        }
        let lit = channel as f32 - factor * channel as f32;
        math::clamp(lit, 0.0, 255.0) as u8
    };

    Color::new(
        darken(color.r),
        darken(color.g),
        darken(color.b),
        color.a,
    )
}

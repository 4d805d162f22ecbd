//! Primitive shape generators and entity construction.

use std::path::PathBuf;

use crate::color::Color;
use crate::entity::{Entity, Face};
use crate::math::Vec3;
use crate::obj::{self, MeshData, MeshError};

/// Geometry source for an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Cube,
    /// Latitude/longitude sphere; `res` is the row count, capped at 50.
    Sphere { res: usize },
    /// Wavefront OBJ file.
    Mesh { path: PathBuf },
}

/// Initial entity parameters. Scale of one, no translation, and no
/// rotation are skipped, matching a freshly standarized mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityParams {
    pub color: Color,
    pub fill: bool,
    pub scale: Vec3,
    pub translation: Vec3,
    pub rotation: Vec3,
    pub orbit: Vec3,
    pub orbit_center: Vec3,
}

impl Default for EntityParams {
    fn default() -> Self {
        EntityParams {
            color: Color::WHITE,
            fill: true,
            scale: Vec3::ONE,
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            orbit: Vec3::ZERO,
            orbit_center: Vec3::ZERO,
        }
    }
}

impl Shape {
    /// Generates the geometry, standarizes it into the unit cube, and
    /// applies the initial transforms.
    pub fn build(&self, params: &EntityParams) -> Result<Entity, MeshError> {
        let mesh = match self {
            Shape::Cube => cube(),
            Shape::Sphere { res } => sphere(*res),
            Shape::Mesh { path } => obj::load_obj(path)?,
        };

        let mut entity = Entity::new(mesh.points, mesh.faces, mesh.centers);
        entity.fill_color = params.color;
        entity.lines_color = params.color;
        entity.fill = params.fill;
        entity.orbit = params.orbit;
        entity.orbit_center = params.orbit_center;

        entity.standarize();

        if params.scale.x + params.scale.y + params.scale.z != 3.0 {
            entity.scale_by(params.scale);
        }
        if params.translation.x + params.translation.y + params.translation.z != 0.0 {
            entity.translate(params.translation);
        }
        if params.rotation.x + params.rotation.y + params.rotation.z != 0.0 {
            entity.rotate(params.rotation);
        }

        Ok(entity)
    }
}

/// Unit cube: 8 corners, 6 quad faces. Face centers are the outward axis
/// directions rather than geometric midpoints.
pub fn cube() -> MeshData {
    let points = vec![
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
    ];
    let faces = vec![
        Face::quad(0, 1, 2, 3),
        Face::quad(1, 0, 4, 5),
        Face::quad(2, 6, 5, 1),
        Face::quad(3, 2, 6, 7),
        Face::quad(4, 0, 3, 7),
        Face::quad(5, 4, 7, 6),
    ];
    let centers = vec![
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    ];
    MeshData {
        points,
        faces,
        centers,
    }
}

/// Latitude/longitude sphere with `(2 * res) * (res + 1)` vertices and one
/// quad face per vertex, stitched around the seam and the last row.
pub fn sphere(res: usize) -> MeshData {
    let res = res.clamp(1, 50);
    let vertex_count = (2 * res) * (res + 1);
    let increment = std::f32::consts::PI / res as f32;

    let mut points = Vec::with_capacity(vertex_count);
    for row in 0..=res {
        for column in 0..(2 * res) {
            let row_angle = row as f32 * increment;
            let column_angle = column as f32 * increment;
            points.push(Vec3::new(
                row_angle.sin() * column_angle.sin(),
                row_angle.cos(),
                row_angle.sin() * column_angle.cos(),
            ));
        }
    }

    let mut faces = Vec::with_capacity(vertex_count);
    let mut i = 0;
    for row in 0..=res {
        for column in 0..(2 * res) {
            let mut corners = [
                i,
                i + 1,
                (row + 1) * res * 2 + column + 1,
                (row + 1) * res * 2 + column,
            ];
            if column + 1 == res * 2 {
                corners[1] = row * res * 2;
                corners[2] = (row + 1) * res * 2;
            }
            if row + 1 > res {
                corners[2] = row * res * 2 + column + 1;
                corners[3] = row * res * 2 + column;
            }
            if row + 1 > res && column + 1 == res * 2 {
                corners[2] = row * res * 2 + column;
            }
            faces.push(Face::quad(corners[0], corners[1], corners[2], corners[3]));
            i += 1;
        }
    }

    let centers = obj::face_centers(&points, &faces);
    MeshData {
        points,
        faces,
        centers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_topology() {
        let mesh = cube();
        assert_eq!(mesh.points.len(), 8);
        assert_eq!(mesh.faces.len(), 6);
        for face in &mesh.faces {
            assert_eq!(face.points.len(), 4);
        }
    }

    #[test]
    fn test_sphere_counts() {
        let res = 10;
        let mesh = sphere(res);
        assert_eq!(mesh.points.len(), 2 * res * (res + 1));
        assert_eq!(mesh.faces.len(), mesh.points.len());
        assert_eq!(mesh.centers.len(), mesh.faces.len());
    }

    #[test]
    fn test_sphere_points_on_unit_sphere() {
        for p in &sphere(8).points {
            assert!((p.magnitude() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let mesh = sphere(6);
        for face in &mesh.faces {
            for &idx in &face.points {
                assert!(idx < mesh.points.len());
            }
        }
    }

    #[test]
    fn test_sphere_res_capped() {
        let mesh = sphere(500);
        assert_eq!(mesh.points.len(), 2 * 50 * 51);
    }

    #[test]
    fn test_cube_standarize_bounds() {
        let entity = Shape::Cube.build(&EntityParams::default()).unwrap();
        for p in entity.points() {
            assert!(p.x >= -0.5001 && p.x <= 0.5001);
            assert!(p.y >= -0.5001 && p.y <= 0.5001);
            assert!(p.z >= -0.5001 && p.z <= 0.5001);
        }
    }

    #[test]
    fn test_build_applies_initial_transforms() {
        let entity = Shape::Cube
            .build(&EntityParams {
                scale: Vec3::splat(4.0),
                translation: Vec3::new(10.0, 0.0, 0.0),
                ..EntityParams::default()
            })
            .unwrap();
        assert_eq!(entity.position(), Vec3::new(10.0, 0.0, 0.0));
        let max_x = entity
            .points()
            .iter()
            .map(|p| p.x)
            .fold(f32::MIN, f32::max);
        assert!((max_x - 12.0).abs() < 1e-3);
    }
}

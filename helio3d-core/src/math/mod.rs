//! Vector/matrix kernel and the transform helpers built on top of it.

mod mat2;
mod mat3;
mod mat4;
mod vec2;
mod vec3;
mod vec4;

pub use mat2::Mat2;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

use rand::Rng;
use std::f32::consts::PI;

pub fn clamp(value: f32, min_val: f32, max_val: f32) -> f32 {
    if value < min_val {
        return min_val;
    }
    if value > max_val {
        return max_val;
    }
    value
}

pub fn degrees(radian: f32) -> f32 {
    radian * 180.0 / PI
}

pub fn radians(euler: f32) -> f32 {
    euler * PI / 180.0
}

/// Random float in `[min, max)`.
pub fn frand(min: f32, max: f32) -> f32 {
    rand::thread_rng().gen_range(min..max)
}

/// Component-wise minimum over a point slice; zero for an empty slice.
pub fn take_min(values: &[Vec3]) -> Vec3 {
    let mut iter = values.iter();
    let Some(first) = iter.next() else {
        return Vec3::ZERO;
    };
    iter.fold(*first, |min, v| {
        Vec3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z))
    })
}

/// Component-wise maximum over a point slice; zero for an empty slice.
pub fn take_max(values: &[Vec3]) -> Vec3 {
    let mut iter = values.iter();
    let Some(first) = iter.next() else {
        return Vec3::ZERO;
    };
    iter.fold(*first, |max, v| {
        Vec3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z))
    })
}

/// Divides by w unless w is already exactly 1.
pub fn homogenised(v: Vec4) -> Vec4 {
    if v.w != 1.0 {
        Vec4::new(v.x / v.w, v.y / v.w, v.z / v.w, v.w / v.w)
    } else {
        v
    }
}

/// Applies `m` to `v` as a homogeneous point (w = 1) and homogenises the result.
pub fn mat4_transform_vec3(m: &Mat4, v: Vec3) -> Vec3 {
    let m = &m.m;
    let v1 = Vec4::new(
        (m[0] * v.x) + (m[4] * v.y) + (m[8] * v.z) + m[12],
        (m[1] * v.x) + (m[5] * v.y) + (m[9] * v.z) + m[13],
        (m[2] * v.x) + (m[6] * v.y) + (m[10] * v.z) + m[14],
        (m[3] * v.x) + (m[7] * v.y) + (m[11] * v.z) + m[15],
    );
    let v2 = homogenised(v1);
    Vec3::new(v2.x, v2.y, v2.z)
}

pub fn mat3_transform_vec3(m: &Mat3, v: Vec3) -> Vec3 {
    let m = &m.m;
    Vec3::new(
        (m[0] * v.x) + (m[3] * v.y) + (m[6] * v.z),
        (m[1] * v.x) + (m[4] * v.y) + (m[7] * v.z),
        (m[2] * v.x) + (m[5] * v.y) + (m[8] * v.z),
    )
}

/// Composes X/Y/Z rotations for the non-zero components of `rot` (degrees).
pub(crate) fn rotation_model(rot: Vec3) -> Mat4 {
    let mut model = Mat4::identity();
    if rot.x != 0.0 {
        model = model.multiply(&Mat4::rotate_x(radians(rot.x)));
    }
    if rot.y != 0.0 {
        model = model.multiply(&Mat4::rotate_y(radians(rot.y)));
    }
    if rot.z != 0.0 {
        model = model.multiply(&Mat4::rotate_z(radians(rot.z)));
    }
    model
}

/// Rotates `point` about the origin by `rot` degrees per axis.
pub fn rotate_point(rot: Vec3, point: Vec3) -> Vec3 {
    mat4_transform_vec3(&rotation_model(rot), point)
}

/// Rotates `point` about `orbit_center` by `rot` degrees per axis.
///
/// Same math as [`rotate_point`] conjugated by the translation to the pivot,
/// so orbiting is indistinguishable from rotation about an offset origin.
pub fn orbit_point(orbit_center: Vec3, rot: Vec3, point: &mut Vec3) {
    let model = rotation_model(rot);
    *point -= orbit_center;
    *point = mat4_transform_vec3(&model, *point);
    *point += orbit_center;
}

/// Right-handed view matrix from the camera position and basis vectors.
///
/// Axes are recovered Gram-Schmidt style (up x front -> right,
/// front x right -> corrected up) and re-normalized only when they are not
/// already unit length.
pub fn mat4_view(camera: Vec3, front: Vec3, up: Vec3) -> Mat4 {
    let mut z_axis = front;
    if !z_axis.is_normalized() {
        z_axis.normalize();
    }

    let mut x_axis = Vec3::cross(up, z_axis);
    if !x_axis.is_normalized() {
        x_axis.normalize();
    }

    let mut y_axis = Vec3::cross(z_axis, x_axis);
    if !y_axis.is_normalized() {
        y_axis.normalize();
    }

    Mat4::new([
        x_axis.x,
        y_axis.x,
        z_axis.x,
        0.0,
        x_axis.y,
        y_axis.y,
        z_axis.y,
        0.0,
        x_axis.z,
        y_axis.z,
        z_axis.z,
        0.0,
        -Vec3::dot(x_axis, camera),
        -Vec3::dot(y_axis, camera),
        -Vec3::dot(z_axis, camera),
        1.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homogenised_divides_by_w() {
        let v = homogenised(Vec4::new(2.0, 4.0, 6.0, 2.0));
        assert_eq!(v, Vec4::new(1.0, 2.0, 3.0, 1.0));
        let kept = homogenised(Vec4::new(2.0, 4.0, 6.0, 1.0));
        assert_eq!(kept, Vec4::new(2.0, 4.0, 6.0, 1.0));
    }

    #[test]
    fn test_degree_radian_round_trip() {
        assert!((degrees(radians(135.0)) - 135.0).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_about_origin_equals_rotation() {
        let p = Vec3::new(3.0, 1.0, -2.0);
        let rot = Vec3::new(10.0, 20.0, 30.0);
        let mut orbited = p;
        orbit_point(Vec3::ZERO, rot, &mut orbited);
        let rotated = rotate_point(rot, p);
        assert!((orbited - rotated).magnitude() < 1e-5);
    }

    #[test]
    fn test_orbit_preserves_distance_to_center() {
        let center = Vec3::new(5.0, 5.0, 5.0);
        let mut p = Vec3::new(8.0, 5.0, 5.0);
        orbit_point(center, Vec3::new(0.0, 90.0, 0.0), &mut p);
        assert!((Vec3::distance(p, center) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = Vec3::new(10.0, 20.0, 30.0);
        let view = mat4_view(camera, Vec3::FORWARD, Vec3::UP);
        let at_origin = mat4_transform_vec3(&view, camera);
        assert!(at_origin.magnitude() < 1e-4);
    }

    #[test]
    fn test_take_min_max() {
        let pts = [
            Vec3::new(1.0, -2.0, 5.0),
            Vec3::new(-3.0, 4.0, 0.0),
            Vec3::new(2.0, 1.0, -1.0),
        ];
        assert_eq!(take_min(&pts), Vec3::new(-3.0, -2.0, -1.0));
        assert_eq!(take_max(&pts), Vec3::new(2.0, 4.0, 5.0));
    }
}

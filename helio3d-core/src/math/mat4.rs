use super::{Mat3, Vec3};
use std::ops::{Div, Mul};

/// A 4x4 matrix stored as a row-major flat array.
///
/// Points transform as row vectors: the translation of an affine transform
/// lives in `m[12..15]`, and the sign placement of the sine terms in the
/// rotation builders fixes the orientation semantics of the whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Mat4 {
    pub const fn new(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn identity() -> Mat4 {
        Mat4::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// The projection the point pipeline actually uses: copies z into w so
    /// the homogeneous divide becomes a divide by depth.
    pub fn projection() -> Mat4 {
        Mat4::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, //
            0.0, 0.0, 0.0, 0.0,
        ])
    }

    /// Standard right-handed perspective projection (row-vector form).
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fov / 2.0).tan();
        Mat4::new([
            f / aspect,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (far + near) / (near - far),
            -1.0,
            0.0,
            0.0,
            (2.0 * far * near) / (near - far),
            0.0,
        ])
    }

    /// Standard orthographic projection (row-vector form).
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new([
            2.0 / (right - left),
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / (top - bottom),
            0.0,
            0.0,
            0.0,
            0.0,
            -2.0 / (far - near),
            0.0,
            -(right + left) / (right - left),
            -(top + bottom) / (top - bottom),
            -(far + near) / (far - near),
            1.0,
        ])
    }

    pub fn translate(mov: Vec3) -> Mat4 {
        Mat4::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            mov.x, mov.y, mov.z, 1.0,
        ])
    }

    pub fn scale(scale: Vec3) -> Mat4 {
        Mat4::new([
            scale.x, 0.0, 0.0, 0.0, //
            0.0, scale.y, 0.0, 0.0, //
            0.0, 0.0, scale.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotate_x(radians: f32) -> Mat4 {
        let (sin, cos) = radians.sin_cos();
        Mat4::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, cos, sin, 0.0, //
            0.0, -sin, cos, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotate_y(radians: f32) -> Mat4 {
        let (sin, cos) = radians.sin_cos();
        Mat4::new([
            cos, 0.0, -sin, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            sin, 0.0, cos, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotate_z(radians: f32) -> Mat4 {
        let (sin, cos) = radians.sin_cos();
        Mat4::new([
            cos, sin, 0.0, 0.0, //
            -sin, cos, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Composite of the scale, translate, and per-axis rotation builders.
    pub fn transform(translate: Vec3, scale: Vec3, rotate: Vec3) -> Mat4 {
        Mat4::identity()
            .multiply(&Mat4::scale(scale))
            .multiply(&Mat4::translate(translate))
            .multiply(&Mat4::rotate_x(rotate.x))
            .multiply(&Mat4::rotate_y(rotate.y))
            .multiply(&Mat4::rotate_z(rotate.z))
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        (m[0] * m[5] * m[10] * m[15])
            + (m[0] * m[6] * m[11] * m[13])
            + (m[0] * m[7] * m[9] * m[14])
            - (m[0] * m[7] * m[10] * m[13])
            - (m[0] * m[6] * m[9] * m[15])
            - (m[0] * m[5] * m[11] * m[14])
            - (m[1] * m[4] * m[10] * m[15])
            - (m[2] * m[4] * m[11] * m[13])
            - (m[3] * m[4] * m[9] * m[14])
            + (m[3] * m[4] * m[10] * m[13])
            + (m[2] * m[4] * m[9] * m[15])
            + (m[1] * m[4] * m[11] * m[14])
            + (m[1] * m[6] * m[8] * m[15])
            + (m[2] * m[7] * m[8] * m[13])
            + (m[3] * m[5] * m[8] * m[14])
            - (m[3] * m[6] * m[8] * m[13])
            - (m[2] * m[5] * m[8] * m[15])
            - (m[1] * m[7] * m[8] * m[14])
            - (m[1] * m[6] * m[11] * m[12])
            - (m[2] * m[7] * m[9] * m[12])
            - (m[3] * m[5] * m[10] * m[12])
            + (m[3] * m[6] * m[9] * m[12])
            + (m[2] * m[5] * m[11] * m[12])
            + (m[1] * m[7] * m[10] * m[12])
    }

    /// Cofactor matrix via 3x3 minors.
    pub fn adjoint(&self) -> Mat4 {
        let m = &self.m;
        Mat4::new([
            Mat3::determinant_of(&[m[5], m[6], m[7], m[9], m[10], m[11], m[13], m[14], m[15]]),
            -Mat3::determinant_of(&[m[4], m[6], m[7], m[8], m[10], m[11], m[12], m[14], m[15]]),
            Mat3::determinant_of(&[m[4], m[5], m[7], m[8], m[9], m[11], m[12], m[13], m[15]]),
            -Mat3::determinant_of(&[m[4], m[5], m[6], m[8], m[9], m[10], m[12], m[13], m[14]]),
            -Mat3::determinant_of(&[m[1], m[2], m[3], m[9], m[10], m[11], m[13], m[14], m[15]]),
            Mat3::determinant_of(&[m[0], m[2], m[3], m[8], m[10], m[11], m[12], m[14], m[15]]),
            -Mat3::determinant_of(&[m[0], m[1], m[3], m[8], m[9], m[11], m[12], m[13], m[15]]),
            Mat3::determinant_of(&[m[0], m[1], m[2], m[8], m[9], m[10], m[12], m[13], m[14]]),
            Mat3::determinant_of(&[m[1], m[2], m[3], m[5], m[6], m[7], m[13], m[14], m[15]]),
            -Mat3::determinant_of(&[m[0], m[2], m[3], m[4], m[6], m[7], m[12], m[14], m[15]]),
            Mat3::determinant_of(&[m[0], m[1], m[3], m[4], m[5], m[7], m[12], m[13], m[15]]),
            -Mat3::determinant_of(&[m[0], m[1], m[2], m[4], m[5], m[6], m[12], m[13], m[14]]),
            -Mat3::determinant_of(&[m[1], m[2], m[3], m[5], m[6], m[7], m[9], m[10], m[11]]),
            Mat3::determinant_of(&[m[0], m[2], m[3], m[4], m[6], m[7], m[8], m[10], m[11]]),
            -Mat3::determinant_of(&[m[0], m[1], m[3], m[4], m[5], m[7], m[8], m[9], m[11]]),
            Mat3::determinant_of(&[m[0], m[1], m[2], m[4], m[5], m[6], m[8], m[9], m[10]]),
        ])
    }

    pub fn transpose(&self) -> Mat4 {
        let m = &self.m;
        Mat4::new([
            m[0], m[4], m[8], m[12], //
            m[1], m[5], m[9], m[13], //
            m[2], m[6], m[10], m[14], //
            m[3], m[7], m[11], m[15],
        ])
    }

    /// `None` when the determinant is zero.
    pub fn inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        Some(self.adjoint().transpose() / det)
    }

    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let s = &self.m;
        let o = &other.m;
        let mut a = [0.0f32; 16];
        for c in 0..4 {
            for r in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += s[k * 4 + r] * o[c * 4 + k];
                }
                a[c * 4 + r] = acc;
            }
        }
        Mat4::new(a)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        self.multiply(&other)
    }
}

impl Mul<f32> for Mat4 {
    type Output = Mat4;
    fn mul(self, value: f32) -> Mat4 {
        let mut m = self.m;
        for e in &mut m {
            *e *= value;
        }
        Mat4::new(m)
    }
}

impl Div<f32> for Mat4 {
    type Output = Mat4;
    fn div(self, value: f32) -> Mat4 {
        let mut m = self.m;
        for e in &mut m {
            *e /= value;
        }
        Mat4::new(m)
    }
}

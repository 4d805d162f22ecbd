use super::{Mat2, Vec2};
use std::ops::{Div, Mul};

/// A 3x3 matrix stored as a row-major flat array.
///
/// Points transform as row vectors, so the translation entries of a 2D
/// screen transform live in `m[6]` and `m[7]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [f32; 9],
}

impl Mat3 {
    pub const fn new(m: [f32; 9]) -> Self {
        Self { m }
    }

    pub fn identity() -> Mat3 {
        Mat3::new([
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    /// 2D rotation about the origin, angle in radians.
    pub fn rotate(rotation: f32) -> Mat3 {
        let (sin, cos) = rotation.sin_cos();
        Mat3::new([
            cos, sin, 0.0, //
            -sin, cos, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    /// 2D screen-space scale.
    pub fn scale(scale: Vec2) -> Mat3 {
        Mat3::new([
            scale.x, 0.0, 0.0, //
            0.0, scale.y, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    /// 2D screen-space translation.
    pub fn translate(mov: Vec2) -> Mat3 {
        Mat3::new([
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            mov.x, mov.y, 1.0,
        ])
    }

    pub fn determinant(&self) -> f32 {
        Self::determinant_of(&self.m)
    }

    pub(crate) fn determinant_of(m: &[f32; 9]) -> f32 {
        (m[0] * m[4] * m[8]) + (m[3] * m[7] * m[2]) + (m[6] * m[1] * m[5])
            - ((m[2] * m[4] * m[6]) + (m[5] * m[7] * m[0]) + (m[8] * m[1] * m[3]))
    }

    /// Cofactor matrix via 2x2 minors.
    pub fn adjoint(&self) -> Mat3 {
        let m = &self.m;
        Mat3::new([
            Mat2::determinant_of(&[m[4], m[5], m[7], m[8]]),
            -Mat2::determinant_of(&[m[3], m[5], m[6], m[8]]),
            Mat2::determinant_of(&[m[3], m[4], m[6], m[7]]),
            -Mat2::determinant_of(&[m[1], m[2], m[7], m[8]]),
            Mat2::determinant_of(&[m[0], m[2], m[6], m[8]]),
            -Mat2::determinant_of(&[m[0], m[1], m[6], m[7]]),
            Mat2::determinant_of(&[m[1], m[2], m[4], m[5]]),
            -Mat2::determinant_of(&[m[0], m[2], m[3], m[5]]),
            Mat2::determinant_of(&[m[0], m[1], m[3], m[4]]),
        ])
    }

    pub fn transpose(&self) -> Mat3 {
        let m = &self.m;
        Mat3::new([m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]])
    }

    /// `None` when the determinant is zero.
    pub fn inverse(&self) -> Option<Mat3> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        Some(self.adjoint().transpose() / det)
    }

    pub fn multiply(&self, other: &Mat3) -> Mat3 {
        let s = &self.m;
        let o = &other.m;
        let mut a = [0.0f32; 9];
        for c in 0..3 {
            for r in 0..3 {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += s[k * 3 + r] * o[c * 3 + k];
                }
                a[c * 3 + r] = acc;
            }
        }
        Mat3::new(a)
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    fn mul(self, other: Mat3) -> Mat3 {
        self.multiply(&other)
    }
}

impl Mul<f32> for Mat3 {
    type Output = Mat3;
    fn mul(self, value: f32) -> Mat3 {
        let mut m = self.m;
        for e in &mut m {
            *e *= value;
        }
        Mat3::new(m)
    }
}

impl Div<f32> for Mat3 {
    type Output = Mat3;
    fn div(self, value: f32) -> Mat3 {
        let mut m = self.m;
        for e in &mut m {
            *e /= value;
        }
        Mat3::new(m)
    }
}

#[cfg(test)]
mod tests {
    use super::super::mat3_transform_vec3;
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_inverse_round_trip() {
        let m = Mat3::new([2.0, 0.0, 1.0, 0.0, 3.0, 0.0, 1.0, 0.0, 1.0]);
        let inv = m.inverse().unwrap();
        let id = m * inv;
        for (a, b) in id.m.iter().zip(Mat3::identity().m.iter()) {
            assert!((a - b).abs() < 1e-4, "{:?}", id);
        }
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let m = Mat3::new([1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_translate_then_scale_composition() {
        // model = translate * scale applies the scale first under the
        // row-vector convention.
        let model = Mat3::translate(Vec2::new(10.0, 20.0)).multiply(&Mat3::scale(Vec2::splat(2.0)));
        let p = mat3_transform_vec3(&model, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(12.0, 22.0, 1.0));
    }
}

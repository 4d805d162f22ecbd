use std::ops::{Div, Mul};

/// A 2x2 matrix stored as a row-major flat array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2 {
    pub m: [f32; 4],
}

impl Mat2 {
    pub const fn new(m: [f32; 4]) -> Self {
        Self { m }
    }

    pub fn identity() -> Mat2 {
        Mat2::new([
            1.0, 0.0, //
            0.0, 1.0,
        ])
    }

    pub fn determinant(&self) -> f32 {
        Self::determinant_of(&self.m)
    }

    pub(crate) fn determinant_of(m: &[f32; 4]) -> f32 {
        m[0] * m[3] - m[2] * m[1]
    }

    pub fn adjoint(&self) -> Mat2 {
        Mat2::new([self.m[3], -self.m[2], -self.m[1], self.m[0]])
    }

    pub fn transpose(&self) -> Mat2 {
        Mat2::new([self.m[0], self.m[2], self.m[1], self.m[3]])
    }

    /// `None` when the determinant is zero.
    pub fn inverse(&self) -> Option<Mat2> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        Some(Mat2::new([
            self.m[3] / det,
            -self.m[1] / det,
            -self.m[2] / det,
            self.m[0] / det,
        ]))
    }

    pub fn multiply(&self, other: &Mat2) -> Mat2 {
        let s = &self.m;
        let o = &other.m;
        Mat2::new([
            s[0] * o[0] + s[1] * o[2],
            s[0] * o[1] + s[1] * o[3],
            s[2] * o[0] + s[3] * o[2],
            s[2] * o[1] + s[3] * o[3],
        ])
    }
}

impl Mul for Mat2 {
    type Output = Mat2;
    fn mul(self, other: Mat2) -> Mat2 {
        self.multiply(&other)
    }
}

impl Mul<f32> for Mat2 {
    type Output = Mat2;
    fn mul(self, value: f32) -> Mat2 {
        let mut m = self.m;
        for e in &mut m {
            *e *= value;
        }
        Mat2::new(m)
    }
}

impl Div<f32> for Mat2 {
    type Output = Mat2;
    fn div(self, value: f32) -> Mat2 {
        let mut m = self.m;
        for e in &mut m {
            *e /= value;
        }
        Mat2::new(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_round_trip() {
        let m = Mat2::new([2.0, 1.0, 1.0, 3.0]);
        let inv = m.inverse().unwrap();
        let id = m * inv;
        for (a, b) in id.m.iter().zip(Mat2::identity().m.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let m = Mat2::new([1.0, 2.0, 2.0, 4.0]);
        assert!(m.inverse().is_none());
    }
}

use std::f32::consts::PI;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3-component f32 vector. Equality is exact component comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const DOWN: Vec3 = Vec3::new(0.0, -1.0, 0.0);
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    pub const BACK: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(value: f32) -> Self {
        Self {
            x: value,
            y: value,
            z: value,
        }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// True for the zero vector and for magnitudes inside the 0.999..1.001 band.
    pub fn is_normalized(&self) -> bool {
        if *self == Vec3::ZERO {
            return true;
        }
        let magn = self.magnitude();
        magn < 1.001 && magn > 0.999
    }

    pub fn normalize(&mut self) {
        if !self.is_normalized() {
            let magn = self.magnitude();
            self.x /= magn;
            self.y /= magn;
            self.z /= magn;
        }
    }

    pub fn normalized(&self) -> Vec3 {
        let mut v = *self;
        v.normalize();
        v
    }

    pub fn distance(a: Vec3, b: Vec3) -> f32 {
        (a - b).magnitude()
    }

    pub fn dot(a: Vec3, b: Vec3) -> f32 {
        a.x * b.x + a.y * b.y + a.z * b.z
    }

    pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
        Vec3::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Angle between two vectors in radians.
    ///
    /// A zero operand yields 0. The cosine is clamped so floating overshoot
    /// past +/-1 cannot produce NaN: cos >= 1 -> 0, cos == 0 -> PI/2,
    /// cos <= -1 -> PI.
    pub fn angle(a: Vec3, b: Vec3) -> f32 {
        if a == Vec3::ZERO || b == Vec3::ZERO {
            return 0.0;
        }

        let cos = Self::dot(a, b) / (a.magnitude() * b.magnitude());

        if cos >= 1.0 {
            return 0.0;
        }
        if cos == 0.0 {
            return PI / 2.0;
        }
        if cos <= -1.0 {
            return PI;
        }

        cos.acos()
    }

    /// Linear interpolation with `value` clamped to [0, 1].
    pub fn lerp(a: Vec3, b: Vec3, value: f32) -> Vec3 {
        let value = super::clamp(value, 0.0, 1.0);
        Self::lerp_unclamped(a, b, value)
    }

    pub fn lerp_unclamped(a: Vec3, b: Vec3, value: f32) -> Vec3 {
        (b - a) * value + a
    }

    pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
        direction - normal * (2.0 * Self::dot(direction, normal))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Vec3) {
        *self = *self - other;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, value: f32) -> Vec3 {
        Vec3::new(self.x * value, self.y * value, self.z * value)
    }
}

impl Mul for Vec3 {
    type Output = Vec3;
    fn mul(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, value: f32) {
        *self = *self * value;
    }
}

impl MulAssign for Vec3 {
    fn mul_assign(&mut self, other: Vec3) {
        *self = *self * other;
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, value: f32) -> Vec3 {
        Vec3::new(self.x / value, self.y / value, self.z / value)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_identities() {
        let a = Vec3::new(0.0, 1.0, 0.0);
        assert!(Vec3::angle(a, a).abs() < 1e-6);
        assert!((Vec3::angle(a, -a) - PI).abs() < 1e-6);
        let b = Vec3::new(1.0, 0.0, 0.0);
        assert!((Vec3::angle(a, b) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_zero_vector() {
        assert_eq!(Vec3::angle(Vec3::ZERO, Vec3::UP), 0.0);
        assert_eq!(Vec3::angle(Vec3::UP, Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut v = Vec3::new(1.0, 2.0, 2.0);
        v.normalize();
        let once = v;
        v.normalize();
        assert_eq!(once, v);
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vec3::ZERO;
        v.normalize();
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        assert_eq!(Vec3::cross(Vec3::RIGHT, Vec3::UP), Vec3::FORWARD);
        assert_eq!(Vec3::cross(Vec3::UP, Vec3::RIGHT), Vec3::BACK);
    }
}

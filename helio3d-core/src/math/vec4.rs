use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 4-component f32 vector, used for homogeneous coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// True for the zero vector and for magnitudes inside the 0.999..1.001 band.
    pub fn is_normalized(&self) -> bool {
        if *self == Vec4::ZERO {
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
            self.w /= magn;
        }
    }

    pub fn normalized(&self) -> Vec4 {
        let mut v = *self;
        v.normalize();
        v
    }

    pub fn dot(a: Vec4, b: Vec4) -> f32 {
        a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w
    }

    /// Linear interpolation with `value` clamped to [0, 1].
    pub fn lerp(a: Vec4, b: Vec4, value: f32) -> Vec4 {
        let value = super::clamp(value, 0.0, 1.0);
        (b - a) * value + a
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl AddAssign for Vec4 {
    fn add_assign(&mut self, other: Vec4) {
        *self = *self + other;
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl SubAssign for Vec4 {
    fn sub_assign(&mut self, other: Vec4) {
        *self = *self - other;
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, value: f32) -> Vec4 {
        Vec4::new(
            self.x * value,
            self.y * value,
            self.z * value,
            self.w * value,
        )
    }
}

impl MulAssign<f32> for Vec4 {
    fn mul_assign(&mut self, value: f32) {
        *self = *self * value;
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;
    fn div(self, value: f32) -> Vec4 {
        Vec4::new(
            self.x / value,
            self.y / value,
            self.z / value,
            self.w / value,
        )
    }
}

impl Neg for Vec4 {
    type Output = Vec4;
    fn neg(self) -> Vec4 {
        Vec4::new(-self.x, -self.y, -self.z, -self.w)
    }
}

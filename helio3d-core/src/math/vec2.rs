use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2-component f32 vector. Equality is exact component comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// True for the zero vector and for magnitudes inside the 0.999..1.001 band.
    pub fn is_normalized(&self) -> bool {
        if *self == Vec2::ZERO {
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
        }
    }

    pub fn normalized(&self) -> Vec2 {
        let mut v = *self;
        v.normalize();
        v
    }

    pub fn distance(a: Vec2, b: Vec2) -> f32 {
        (a - b).magnitude()
    }

    pub fn dot(a: Vec2, b: Vec2) -> f32 {
        a.x * b.x + a.y * b.y
    }

    /// Linear interpolation with `value` clamped to [0, 1].
    pub fn lerp(a: Vec2, b: Vec2, value: f32) -> Vec2 {
        let value = super::clamp(value, 0.0, 1.0);
        Self::lerp_unclamped(a, b, value)
    }

    pub fn lerp_unclamped(a: Vec2, b: Vec2, value: f32) -> Vec2 {
        (b - a) * value + a
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        *self = *self + other;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Vec2) {
        *self = *self - other;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, value: f32) -> Vec2 {
        Vec2::new(self.x * value, self.y * value)
    }
}

impl Mul for Vec2 {
    type Output = Vec2;
    fn mul(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, value: f32) {
        *self = *self * value;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, value: f32) -> Vec2 {
        Vec2::new(self.x / value, self.y / value)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

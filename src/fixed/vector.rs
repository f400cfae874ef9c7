//! 2D and 3D vectors over `Q`.

use std::ops::{Add, AddAssign, Mul, Neg, Shl, Shr, Sub, SubAssign};

use super::trig::{cos_lookup, sin_lookup};
use super::Q;

/// 2D vector in Q16.16.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Q2 {
    pub x: Q,
    pub y: Q,
}

impl Q2 {
    pub const ORIGIN: Q2 = Q2 {
        x: Q::ZERO,
        y: Q::ZERO,
    };

    #[must_use]
    pub const fn new(x: Q, y: Q) -> Self {
        Self { x, y }
    }

    /// Construct from raw Q16.16 components.
    #[must_use]
    pub const fn from_raw(x: i32, y: i32) -> Self {
        Self {
            x: Q::from_raw(x),
            y: Q::from_raw(y),
        }
    }

    #[must_use]
    pub fn dot(self, rhs: Q2) -> Q {
        self.x * rhs.x + self.y * rhs.y
    }

    #[must_use]
    pub fn length(self) -> Q {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Q2) -> Q {
        (self - other).length()
    }
}

impl Add for Q2 {
    type Output = Q2;

    fn add(self, rhs: Q2) -> Q2 {
        Q2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Q2 {
    fn add_assign(&mut self, rhs: Q2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Q2 {
    type Output = Q2;

    fn sub(self, rhs: Q2) -> Q2 {
        Q2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Q2 {
    fn sub_assign(&mut self, rhs: Q2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Q2 {
    type Output = Q2;

    fn neg(self) -> Q2 {
        Q2::new(-self.x, -self.y)
    }
}

impl Mul<Q> for Q2 {
    type Output = Q2;

    fn mul(self, k: Q) -> Q2 {
        Q2::new(self.x * k, self.y * k)
    }
}

impl Shr<u32> for Q2 {
    type Output = Q2;

    fn shr(self, rhs: u32) -> Q2 {
        Q2::new(self.x >> rhs, self.y >> rhs)
    }
}

/// 3D vector in Q16.16.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Q3 {
    pub x: Q,
    pub y: Q,
    pub z: Q,
}

impl Q3 {
    pub const ORIGIN: Q3 = Q3 {
        x: Q::ZERO,
        y: Q::ZERO,
        z: Q::ZERO,
    };

    /// World up.
    pub const Z: Q3 = Q3 {
        x: Q::ZERO,
        y: Q::ZERO,
        z: Q::ONE,
    };

    #[must_use]
    pub const fn new(x: Q, y: Q, z: Q) -> Self {
        Self { x, y, z }
    }

    /// Configuration helper, see [`Q::from_f32`].
    #[must_use]
    pub fn from_f32(x: f32, y: f32, z: f32) -> Self {
        Self::new(Q::from_f32(x), Q::from_f32(y), Q::from_f32(z))
    }

    #[must_use]
    pub fn dot(self, rhs: Q3) -> Q {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub fn cross(self, rhs: Q3) -> Q3 {
        Q3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[must_use]
    pub fn length(self) -> Q {
        self.dot(self).sqrt()
    }

    /// Unit vector with the same direction. The zero vector is returned as is.
    #[must_use]
    pub fn normalized(self) -> Q3 {
        self.scaled_to(Q::ONE)
    }

    /// Same direction, given length. The zero vector is returned as is.
    #[must_use]
    pub fn scaled_to(self, length: Q) -> Q3 {
        let current = self.length();
        if current == Q::ZERO {
            return self;
        }
        self * (length / current)
    }

    /// Rotation about the world Z axis by `angle` (1/65536 turn units).
    #[must_use]
    pub fn rotated_z(self, angle: i32) -> Q3 {
        let cos = cos_lookup(angle);
        let sin = sin_lookup(angle);
        Q3::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Horizontal projection.
    #[must_use]
    pub const fn xy(self) -> Q2 {
        Q2::new(self.x, self.y)
    }
}

impl Add for Q3 {
    type Output = Q3;

    fn add(self, rhs: Q3) -> Q3 {
        Q3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Q3 {
    fn add_assign(&mut self, rhs: Q3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Q3 {
    type Output = Q3;

    fn sub(self, rhs: Q3) -> Q3 {
        Q3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Q3 {
    type Output = Q3;

    fn neg(self) -> Q3 {
        Q3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Q> for Q3 {
    type Output = Q3;

    fn mul(self, k: Q) -> Q3 {
        Q3::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Shr<u32> for Q3 {
    type Output = Q3;

    fn shr(self, rhs: u32) -> Q3 {
        Q3::new(self.x >> rhs, self.y >> rhs, self.z >> rhs)
    }
}

impl Shl<u32> for Q3 {
    type Output = Q3;

    fn shl(self, rhs: u32) -> Q3 {
        Q3::new(self.x << rhs, self.y << rhs, self.z << rhs)
    }
}

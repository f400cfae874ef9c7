//! Camera plane to pixel mapping.

use crate::fixed::{LookAt, Q, Q2, Q3};

/// Pixel coordinates; may fall outside the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Affine map `screen = k * camera + b`, fitted to the screen size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projector {
    size: ScreenSize,
    k: Q,
    b: Q2,
}

impl Projector {
    /// Unit camera distance spans the shorter screen side; the camera origin
    /// lands on the screen centre.
    pub fn fit(size: ScreenSize) -> Self {
        let k = Q::from_int(size.width.min(size.height) as i32);
        let b = Q2::new(
            Q::from_int(size.width as i32) >> 1,
            Q::from_int(size.height as i32) >> 1,
        );
        Self { size, k, b }
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    /// Screen position before truncation to whole pixels.
    pub fn to_screen_q(&self, camera: Q2) -> Q2 {
        camera * self.k + self.b
    }

    pub fn project(&self, transform: &LookAt, world: Q3) -> ScreenPoint {
        let screen = self.to_screen_q(transform.view(world));
        ScreenPoint::new(screen.x.to_int(), screen.y.to_int())
    }
}

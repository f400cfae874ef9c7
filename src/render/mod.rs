//! Drawing surface abstraction and the headless PNG backend.

mod framebuffer;
mod palette;
mod recorder;

pub use framebuffer::FrameBuffer;
pub use palette::{Ink, InkPattern, Palette};
pub use recorder::{FrameRecorder, HeadlessSink};

use crate::fixed::Q;
use crate::projector::{ScreenPoint, ScreenSize};

/// Per-primitive shading input for the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shade {
    /// Surface height in [-1, 1].
    pub z: Q,
    /// Horizontal distance to the ripple source.
    pub distance: Q,
}

impl Shade {
    pub const fn new(z: Q, distance: Q) -> Self {
        Self { z, distance }
    }

    /// Midpoint shade of two endpoints.
    pub fn average(a: Shade, b: Shade) -> Shade {
        Shade::new((a.z + b.z) >> 1, (a.distance + b.distance) >> 1)
    }
}

/// Target the simulation draws a frame into.
pub trait DrawContext {
    fn size(&self) -> ScreenSize;
    fn draw_pixel(&mut self, at: ScreenPoint, shade: Shade);
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, shade: Shade);
}

//! Software raster over an RGBA image.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::palette::{InkPattern, Palette};
use super::{DrawContext, Shade};
use crate::error::AppError;
use crate::projector::{ScreenPoint, ScreenSize};

pub struct FrameBuffer {
    image: RgbaImage,
    palette: Palette,
}

impl FrameBuffer {
    /// Blank frame filled with the palette background.
    pub fn new(size: ScreenSize, palette: Palette) -> Self {
        let image = RgbaImage::from_pixel(size.width, size.height, palette.background());
        Self { image, palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Switch palette and clear to its background.
    pub fn reset(&mut self, palette: Palette) {
        self.palette = palette;
        let background = palette.background();
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.image.width() && y < self.image.height()).then(|| *self.image.get_pixel(x, y))
    }

    /// Pixels that differ from the background.
    pub fn ink_count(&self) -> usize {
        let background = self.palette.background();
        self.image.pixels().filter(|p| **p != background).count()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save_png(&self, path: &Path) -> Result<(), AppError> {
        self.image.save(path).map_err(|source| AppError::FrameSave {
            path: path.to_path_buf(),
            source,
        })
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}

impl DrawContext for FrameBuffer {
    fn size(&self) -> ScreenSize {
        ScreenSize::new(self.image.width(), self.image.height())
    }

    fn draw_pixel(&mut self, at: ScreenPoint, shade: Shade) {
        let ink = self.palette.ink(shade);
        self.put(at.x, at.y, ink.color);
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, shade: Shade) {
        let ink = self.palette.ink(shade);

        // Bresenham over all octants
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        let mut step = 0u32;

        loop {
            let lit = match ink.pattern {
                InkPattern::Solid => true,
                InkPattern::Third => step % 3 == 0,
            };
            if lit {
                self.put(x, y, ink.color);
            }
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Q;
    use crate::modes::ColorMode;
    use crate::render::palette::WHITE;

    fn buffer(monochrome: bool, mode: ColorMode) -> FrameBuffer {
        FrameBuffer::new(ScreenSize::new(32, 24), Palette::new(mode, monochrome, false))
    }

    #[test]
    fn test_starts_with_background() {
        let fb = buffer(false, ColorMode::Mono);
        assert_eq!(fb.ink_count(), 0);
        assert_eq!(fb.size(), ScreenSize::new(32, 24));
    }

    #[test]
    fn test_horizontal_line_inclusive() {
        let mut fb = buffer(false, ColorMode::Mono);
        fb.draw_line(ScreenPoint::new(2, 5), ScreenPoint::new(11, 5), Shade::default());
        assert_eq!(fb.ink_count(), 10);
        assert_eq!(fb.pixel(2, 5), Some(WHITE));
        assert_eq!(fb.pixel(11, 5), Some(WHITE));
    }

    #[test]
    fn test_diagonal_reaches_end() {
        let mut fb = buffer(false, ColorMode::Mono);
        fb.draw_line(ScreenPoint::new(20, 20), ScreenPoint::new(3, 1), Shade::default());
        assert_eq!(fb.pixel(20, 20), Some(WHITE));
        assert_eq!(fb.pixel(3, 1), Some(WHITE));
        assert_eq!(fb.ink_count(), 20);
    }

    #[test]
    fn test_third_pattern_lights_every_third_pixel() {
        let mut fb = buffer(true, ColorMode::Signal);
        let low = Shade::new(-Q::ONE, Q::ZERO);
        fb.draw_line(ScreenPoint::new(0, 3), ScreenPoint::new(8, 3), low);
        assert_eq!(fb.ink_count(), 3);
        assert!(fb.pixel(0, 3) != Some(fb.palette().background()));
        assert_eq!(fb.pixel(1, 3), Some(fb.palette().background()));
        assert!(fb.pixel(6, 3) != Some(fb.palette().background()));
    }

    #[test]
    fn test_clips_off_screen() {
        let mut fb = buffer(false, ColorMode::Mono);
        fb.draw_line(ScreenPoint::new(-10, -10), ScreenPoint::new(100, 100), Shade::default());
        fb.draw_pixel(ScreenPoint::new(-1, 4), Shade::default());
        assert_eq!(fb.ink_count(), 24);
    }
}

//! Colour policy for colour and monochrome displays.

use image::Rgba;

use super::Shade;
use crate::modes::ColorMode;

pub const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);
pub const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
pub const MELON: Rgba<u8> = Rgba([0xFF, 0xAA, 0xAA, 0xFF]);
pub const VIVID_CERULEAN: Rgba<u8> = Rgba([0x00, 0xAA, 0xFF, 0xFF]);
pub const GREEN: Rgba<u8> = Rgba([0x00, 0xFF, 0x00, 0xFF]);
pub const YELLOW: Rgba<u8> = Rgba([0xFF, 0xFF, 0x00, 0xFF]);
pub const CYAN: Rgba<u8> = Rgba([0x00, 0xFF, 0xFF, 0xFF]);
pub const RED: Rgba<u8> = Rgba([0xFF, 0x00, 0x00, 0xFF]);
pub const MAGENTA: Rgba<u8> = Rgba([0xFF, 0x00, 0xFF, 0xFF]);

/// Rings by distance band (half a world unit per band), near to far.
const DISTANCE_COLORS: [Rgba<u8>; 8] = [
    VIVID_CERULEAN,
    GREEN,
    YELLOW,
    CYAN,
    RED,
    MAGENTA,
    MELON,
    WHITE,
];

/// How a stroke covers the pixels of a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InkPattern {
    Solid,
    /// Every third pixel; the monochrome stand-in for a dimmer colour.
    Third,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ink {
    pub color: Rgba<u8>,
    pub pattern: InkPattern,
}

impl Ink {
    pub const fn solid(color: Rgba<u8>) -> Self {
        Self {
            color,
            pattern: InkPattern::Solid,
        }
    }

    pub const fn third(color: Rgba<u8>) -> Self {
        Self {
            color,
            pattern: InkPattern::Third,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub mode: ColorMode,
    pub monochrome: bool,
    pub inverted: bool,
}

impl Palette {
    pub fn new(mode: ColorMode, monochrome: bool, inverted: bool) -> Self {
        Self {
            mode,
            monochrome,
            inverted,
        }
    }

    /// Monochrome displays draw dark on light, colour displays light on dark.
    fn base(&self) -> (Rgba<u8>, Rgba<u8>) {
        let (stroke, background) = if self.monochrome {
            (BLACK, WHITE)
        } else {
            (WHITE, BLACK)
        };
        if self.inverted {
            (background, stroke)
        } else {
            (stroke, background)
        }
    }

    pub fn stroke(&self) -> Rgba<u8> {
        self.base().0
    }

    pub fn background(&self) -> Rgba<u8> {
        self.base().1
    }

    pub fn ink(&self, shade: Shade) -> Ink {
        let band = shade.distance.raw() >> 15;
        if self.monochrome {
            let dim = match self.mode {
                ColorMode::Mono => false,
                ColorMode::Signal => !shade.z.is_positive(),
                ColorMode::Distance => band & 1 == 1,
            };
            return if dim {
                Ink::third(self.stroke())
            } else {
                Ink::solid(self.stroke())
            };
        }

        match self.mode {
            ColorMode::Mono => Ink::solid(self.stroke()),
            ColorMode::Signal if shade.z.is_positive() => Ink::solid(MELON),
            ColorMode::Signal => Ink::solid(VIVID_CERULEAN),
            ColorMode::Distance => Ink::solid(DISTANCE_COLORS[(band & 7) as usize]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Q;

    #[test]
    fn test_signal_splits_on_sign() {
        let palette = Palette::new(ColorMode::Signal, false, false);
        assert_eq!(palette.ink(Shade::new(Q::from_raw(1), Q::ZERO)).color, MELON);
        assert_eq!(palette.ink(Shade::new(Q::ZERO, Q::ZERO)).color, VIVID_CERULEAN);

        let mono = Palette::new(ColorMode::Signal, true, false);
        assert_eq!(mono.ink(Shade::new(Q::ONE, Q::ZERO)).pattern, InkPattern::Solid);
        assert_eq!(mono.ink(Shade::new(-Q::ONE, Q::ZERO)).pattern, InkPattern::Third);
    }

    #[test]
    fn test_distance_bands() {
        let palette = Palette::new(ColorMode::Distance, false, false);
        let at = |d: f32| palette.ink(Shade::new(Q::ZERO, Q::from_f32(d))).color;
        assert_eq!(at(0.0), VIVID_CERULEAN);
        assert_eq!(at(0.6), GREEN);
        assert_eq!(at(3.7), WHITE);
        // Bands repeat every four world units
        assert_eq!(at(4.1), VIVID_CERULEAN);

        let mono = Palette::new(ColorMode::Distance, true, false);
        let pattern = |d: f32| mono.ink(Shade::new(Q::ZERO, Q::from_f32(d))).pattern;
        assert_eq!(pattern(0.2), InkPattern::Solid);
        assert_eq!(pattern(0.7), InkPattern::Third);
    }

    #[test]
    fn test_inversion_swaps() {
        let normal = Palette::new(ColorMode::Mono, false, false);
        let inverted = Palette::new(ColorMode::Mono, false, true);
        assert_eq!(normal.stroke(), inverted.background());
        assert_eq!(normal.background(), inverted.stroke());
        assert_eq!(inverted.ink(Shade::default()).color, BLACK);
        assert_eq!(Palette::new(ColorMode::Mono, true, false).stroke(), BLACK);
    }
}

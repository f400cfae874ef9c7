//! Rippling height field driven by the oscillator.

use crate::fixed::{cos_lookup, Q, Q2, ANGLE_MASK, TURN};

/// A scalar surface z = f(x, y) the visibility oracle can sample.
pub trait HeightField {
    fn height_at(&self, x: Q, y: Q) -> Q;
}

/// Concentric cosine rings centred on the oscillator.
///
/// One world unit of distance is half a turn, so the radial wavelength is
/// 2 world units. The phase drops every tick, which moves the rings outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ripple {
    pub center: Q2,
    pub phase: i32,
}

impl Ripple {
    pub fn new(center: Q2, phase: i32) -> Self {
        Self { center, phase }
    }

    /// Distance from the ripple centre to `(x, y)`.
    pub fn distance_to(&self, x: Q, y: Q) -> Q {
        let dx = self.center.x - x;
        let dy = self.center.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl HeightField for Ripple {
    fn height_at(&self, x: Q, y: Q) -> Q {
        ripple_height(self.distance_to(x, y), self.phase)
    }
}

/// Height at a known distance from the ripple centre.
pub fn ripple_height(distance: Q, phase: i32) -> Q {
    let angle = ((distance.raw() >> 1).wrapping_add(phase)) & ANGLE_MASK;
    cos_lookup(angle)
}

/// Ripple phase after `tick` ticks: one turn minus the accumulated step.
pub fn phase_for_tick(tick: u32, step: i32) -> i32 {
    TURN - ((tick as i32).wrapping_mul(step) & ANGLE_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_bounded() {
        let ripple = Ripple::new(Q2::from_raw(12_345, -54_321), 777);
        for i in -40..=40 {
            for j in -40..=40 {
                let h = ripple.height_at(Q::from_raw(i * 5_000), Q::from_raw(j * 5_000));
                assert!(h >= -Q::ONE && h <= Q::ONE);
            }
        }
    }

    #[test]
    fn test_peak_at_center_on_first_tick() {
        let ripple = Ripple::new(Q2::ORIGIN, phase_for_tick(0, 256));
        assert_eq!(ripple.height_at(Q::ZERO, Q::ZERO), cos_lookup(0));
        assert_eq!(ripple.height_at(Q::ZERO, Q::ZERO), Q::ONE);
    }

    #[test]
    fn test_first_ring_decreases_outward() {
        let ripple = Ripple::new(Q2::ORIGIN, phase_for_tick(0, 256));
        // Half a wavelength: crest at the centre to trough at distance 1
        let mut previous = ripple.height_at(Q::ZERO, Q::ZERO);
        for step in 1..=8 {
            let x = Q::from_raw(step * (Q::ONE.raw() / 8));
            let h = ripple.height_at(x, Q::ZERO);
            assert!(h < previous, "not decreasing at step {}", step);
            previous = h;
        }
        assert_eq!(previous, -Q::ONE);
    }

    #[test]
    fn test_phase_moves_rings_outward() {
        // A crest one tick later sits further from the centre
        let step = 256;
        let later = phase_for_tick(1, step);
        assert_eq!(later, TURN - step);

        // The crest is where (d/2 + phase) wraps to 0, i.e. d/2 = step
        let crest = Q::from_raw(step << 1);
        assert_eq!(ripple_height(crest, later), Q::ONE);
    }
}

//! Line-of-sight test against the height field.

use super::field::HeightField;
use super::WorldBounds;
use crate::fixed::{Q, Q3};

/// Clip fractions below this (1/4096) count as an unobstructed view.
pub const VISIBILITY_EPSILON: Q = Q::from_raw(16);

/// Finest refinement the march supports: a step of one raw unit.
pub const MAX_VISIBILITY_ITERATIONS: u32 = Q::FRACTION_BITS;

/// Fraction along `point -> viewer` where the segment leaves the box on one axis.
fn clip_fraction(viewer: Q, point: Q, delta: Q, min: Q, max: Q) -> Q {
    if viewer > max {
        (max - point) / delta
    } else if viewer < min {
        (min - point) / delta
    } else {
        Q::ONE
    }
}

/// Whether `point` can be seen from `viewer` over `field`.
///
/// The sight line is clipped to `bounds`, then sampled on a coarse-to-fine
/// lattice of `2^max_iterations` samples over `max_iterations + 1` levels,
/// capped at [`MAX_VISIBILITY_ITERATIONS`]. The point is visible unless the
/// samples land on both sides of the surface.
pub fn is_visible<F: HeightField + ?Sized>(
    point: Q3,
    viewer: Q3,
    field: &F,
    bounds: &WorldBounds,
    max_iterations: u32,
) -> bool {
    let mut segment = viewer - point;

    let k_min = [
        clip_fraction(viewer.x, point.x, segment.x, bounds.x_min, bounds.x_max),
        clip_fraction(viewer.y, point.y, segment.y, bounds.y_min, bounds.y_max),
        clip_fraction(viewer.z, point.z, segment.z, bounds.z_min, bounds.z_max),
    ]
    .into_iter()
    .min()
    .unwrap_or(Q::ONE);

    if k_min < VISIBILITY_EPSILON {
        return true;
    }
    if k_min < Q::ONE {
        segment = segment * k_min;
    }

    let levels = max_iterations.min(MAX_VISIBILITY_ITERATIONS);
    let mut above = false;
    let mut below = false;

    let mut fine_k = Q::ONE;
    let mut fine_step = segment;
    for _ in 0..=levels {
        let coarse_k = fine_k << 1;
        let coarse_step = fine_step << 1;

        // Odd multiples of the fine step; even ones were sampled at a coarser level
        let mut k = fine_k;
        let mut at = point + fine_step;
        while k <= Q::ONE {
            let altitude = at.z - field.height_at(at.x, at.y);
            if altitude.is_positive() {
                if below {
                    return false;
                }
                above = true;
            } else if altitude.is_negative() {
                if above {
                    return false;
                }
                below = true;
            }
            k += coarse_k;
            at += coarse_step;
        }

        fine_k >>= 1;
        fine_step = fine_step >> 1;
    }

    true
}

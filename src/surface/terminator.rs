//! Bisection for the point where a half-visible segment disappears.

use super::field::HeightField;
use super::visibility::is_visible;
use super::WorldBounds;
use crate::fixed::{Q, Q3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Terminator {
    /// Last bisection point still visible.
    pub visible: Q3,
    /// First bisection point found hidden.
    pub invisible: Q3,
}

/// Narrow `visible..invisible` over `iterations` halvings.
///
/// Midpoints are lifted onto the surface before each visibility test.
pub fn solve_terminator<F: HeightField + ?Sized>(
    visible: Q3,
    invisible: Q3,
    viewer: Q3,
    field: &F,
    bounds: &WorldBounds,
    visibility_iterations: u32,
    iterations: u32,
) -> Terminator {
    let mut visible = visible;
    let mut invisible = invisible;

    for _ in 0..iterations {
        let x = (visible.x + invisible.x) >> 1;
        let y = (visible.y + invisible.y) >> 1;
        let half = Q3::new(x, y, field.height_at(x, y));

        if is_visible(half, viewer, field, bounds, visibility_iterations) {
            visible = half;
        } else {
            invisible = half;
        }
    }

    Terminator { visible, invisible }
}

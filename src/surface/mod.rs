//! Sampled height-field surface: lattices, distance cache and visibility.

mod field;
mod lattice;
mod terminator;
mod visibility;

pub use field::{phase_for_tick, ripple_height, HeightField, Ripple};
pub use lattice::{mark_axis, Coverage, LatticeKind, LatticeSample, SampledSurface};
pub use terminator::{solve_terminator, Terminator};
pub use visibility::{is_visible, MAX_VISIBILITY_ITERATIONS, VISIBILITY_EPSILON};

use crate::fixed::{Q, Q3};

/// Axis-aligned box that contains the whole surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldBounds {
    pub x_min: Q,
    pub x_max: Q,
    pub y_min: Q,
    pub y_max: Q,
    pub z_min: Q,
    pub z_max: Q,
}

impl WorldBounds {
    /// ±half_scale horizontally, ±1 vertically (the field is normalised to [-1, 1]).
    pub fn from_half_scale(half_scale: Q) -> Self {
        Self {
            x_min: -half_scale,
            x_max: half_scale,
            y_min: -half_scale,
            y_max: half_scale,
            z_min: -Q::ONE,
            z_max: Q::ONE,
        }
    }

    pub fn contains(&self, p: Q3) -> bool {
        (self.x_min..=self.x_max).contains(&p.x)
            && (self.y_min..=self.y_max).contains(&p.y)
            && (self.z_min..=self.z_max).contains(&p.z)
    }
}

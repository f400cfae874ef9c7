//! Grid geometry, algorithm budgets and oscillator physics.

use serde::{Deserialize, Serialize};

use crate::fixed::Q;

/// Lattice layout and per-frame iteration budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    /// Grid lines per side (N). The mark lattice is N×N.
    /// 25 keeps a low-end display inside its frame budget, 31 otherwise.
    pub grid_lines: usize,

    /// Side length of the grid in world units (2π)
    pub grid_scale: f32,

    /// Refinement levels of the visibility march beyond the first.
    /// The oracle takes 2^n samples per point.
    pub visibility_iterations: u32,

    /// Bisection steps when clipping a half-visible segment
    pub terminator_iterations: u32,

    /// Ripple phase decrease per tick (angle units, 65536 per turn)
    pub phase_step: i32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            grid_lines: 31,
            grid_scale: 6.283185,
            visibility_iterations: 4,
            terminator_iterations: 4,
            phase_step: 256,
        }
    }
}

impl WorldParams {
    pub fn scale(&self) -> Q {
        Q::from_f32(self.grid_scale)
    }

    pub fn half_scale(&self) -> Q {
        self.scale() >> 1
    }
}

/// Oscillator motion tuning for the bouncing mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Drag per tick is velocity / 2^drag_shift.
    /// 6 loses ~1.5% per tick and stalls within ~100 ticks (~4s).
    /// Larger keeps speed longer.
    pub drag_shift: u32,

    /// Acceleration is the tilt reading (milli-g) / 2^inertia_shift, in raw Q units.
    /// Larger feels heavier.
    pub inertia_shift: u32,

    /// Initial velocity (raw Q units per tick) when bouncing starts in a
    /// non-interactive recording session
    pub launch_velocity: [i32; 2],
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            drag_shift: 6,
            inertia_shift: 2,
            launch_velocity: [3072, -1536],
        }
    }
}

//! Deterministic fixed-point numeric layer (Q16.16).
//!
//! Provides the scalar, vectors, table-driven trigonometry and the look-at
//! camera transform the simulation is built on. No floating point is used
//! outside configuration conversion.

mod camera;
mod scalar;
mod trig;
mod vector;

pub use camera::{LookAt, Projection};
pub use scalar::Q;
pub use trig::{cos_lookup, sin_lookup, ANGLE_MASK, TURN};
pub use vector::{Q2, Q3};

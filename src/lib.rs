//! ripples3d library - rippling height field with hidden-line removal in fixed point

pub mod animator;
pub mod camera;
pub mod cli;
pub mod error;
pub mod fixed;
pub mod modes;
pub mod oscillator;
pub mod params;
pub mod projector;
pub mod render;
pub mod sensor;
pub mod simulation;
pub mod surface;

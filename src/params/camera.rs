//! Camera placement and smoothing.

use serde::{Deserialize, Serialize};

use crate::fixed::{Projection, Q, Q3, TURN};

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Eye distance from the world origin (world units)
    pub distance_from_origin: f32,

    /// Perspective zoom (1.25 on rectangular displays, 1.15 on round ones)
    pub zoom: f32,

    /// Orthographic instead of perspective projection
    pub orthographic: bool,

    /// Orbit advance per tick while anchored (angle units, 65536 per turn)
    pub rotation_step: i32,

    /// Moving-average depth for the tilt samplers
    pub sampler_capacity: usize,

    /// Tilt reading (milli-g) substituted when the sensor is unavailable.
    /// Pulls the view toward a comfortable resting angle.
    pub steady_attractor: [i32; 3],

    /// View point configured on entering the floating and bouncing modes
    pub tilted_view_point: [f32; 3],

    /// Fixed view point used by non-interactive recording sessions
    pub recording_view_point: [f32; 3],
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            distance_from_origin: 8.75,
            zoom: 1.25,
            orthographic: false,
            rotation_step: TURN >> 9,
            sampler_capacity: 8,
            steady_attractor: [-81, -816, -571],
            tilted_view_point: [0.1, -1.0, 0.7],
            recording_view_point: [-0.1, 1.0, 0.7],
        }
    }
}

impl CameraParams {
    pub fn distance(&self) -> Q {
        Q::from_f32(self.distance_from_origin)
    }

    pub fn zoom(&self) -> Q {
        Q::from_f32(self.zoom)
    }

    pub fn projection(&self) -> Projection {
        if self.orthographic {
            Projection::Orthographic
        } else {
            Projection::Perspective
        }
    }

    pub fn tilted_view_point(&self) -> Q3 {
        let [x, y, z] = self.tilted_view_point;
        Q3::from_f32(x, y, z)
    }

    pub fn recording_view_point(&self) -> Q3 {
        let [x, y, z] = self.recording_view_point;
        Q3::from_f32(x, y, z)
    }
}

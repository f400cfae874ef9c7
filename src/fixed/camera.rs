//! Look-at camera transform in fixed point.
//!
//! The camera always looks at the world origin with Z locked upward. World
//! points are mapped to a 2D camera plane whose y axis grows downward, so the
//! projector only has to scale and offset.

use super::{Q, Q2, Q3};

/// Projection applied after the view transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

/// Smallest depth a point may have in perspective projection.
/// Points behind the eye are pinned to it instead of dividing by zero.
const MIN_DEPTH: Q = Q::from_raw(1 << 8);

/// World-to-camera transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookAt {
    /// Camera eye position in world units.
    pub view_point: Q3,
    /// Camera right axis.
    u: Q3,
    /// Camera up axis.
    v: Q3,
    /// Unit vector from the origin toward the eye (camera looks along -w).
    w: Q3,
    zoom: Q,
    projection: Projection,
    eye_distance: Q,
}

impl LookAt {
    /// Build a camera at `view_point` looking at the origin, world Z up.
    ///
    /// `view_point` must not lie on the Z axis; callers nudge it off the axis.
    pub fn origin_upwards(view_point: Q3, zoom: Q, projection: Projection) -> Self {
        let w = view_point.normalized();
        let u = Q3::Z.cross(w).normalized();
        let v = w.cross(u);

        Self {
            view_point,
            u,
            v,
            w,
            zoom,
            projection,
            eye_distance: view_point.length(),
        }
    }

    pub fn zoom(&self) -> Q {
        self.zoom
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Camera-plane coordinates of a world point.
    pub fn view(&self, point: Q3) -> Q2 {
        let rel = point - self.view_point;
        let x = rel.dot(self.u);
        let y = rel.dot(self.v);

        let divisor = match self.projection {
            Projection::Perspective => (-rel.dot(self.w)).max(MIN_DEPTH),
            Projection::Orthographic => self.eye_distance,
        };

        let k = self.zoom / divisor;
        Q2::new(x * k, -(y * k))
    }
}

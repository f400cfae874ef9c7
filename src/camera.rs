//! Orbiting camera driven by wrist tilt.

use log::trace;

use crate::fixed::{LookAt, Projection, Q, Q3, ANGLE_MASK};
use crate::modes::OscillatorMode;
use crate::params::CameraParams;
use crate::sensor::{AccelSample, Sampler, Sensor};

/// Camera system: smoothed tilt view point plus a slow orbit about Z.
pub struct CameraSystem {
    view_point: Q3,
    zoom: Q,
    distance: Q,
    projection: Projection,
    rotation_angle: i32,
    rotation_step: i32,
    transform: LookAt,
    eye: Q3,

    interactive: bool,
    steady: AccelSample,
    tilted_view_point: Q3,
    recording_view_point: Q3,
    samplers: [Sampler; 3],
}

impl CameraSystem {
    /// Create a camera already configured for its first frame.
    pub fn new(params: &CameraParams, interactive: bool) -> Self {
        let steady = AccelSample::from_array(params.steady_attractor);
        let capacity = params.sampler_capacity.max(1);
        let samplers = [
            Sampler::filled(capacity, steady.x),
            Sampler::filled(capacity, steady.y),
            Sampler::filled(capacity, steady.z),
        ];

        let mut camera = Self {
            view_point: Q3::ORIGIN,
            zoom: params.zoom(),
            distance: params.distance(),
            projection: params.projection(),
            rotation_angle: 0,
            rotation_step: params.rotation_step,
            transform: LookAt::origin_upwards(Q3::Z, params.zoom(), params.projection()),
            eye: Q3::Z,
            interactive,
            steady,
            tilted_view_point: params.tilted_view_point(),
            recording_view_point: params.recording_view_point(),
            samplers,
        };

        let start = camera.anchored_view_point();
        camera.configure(start, 0);
        camera
    }

    /// Place the eye along `view_point` at the configured distance, orbited by
    /// `rotation_angle` about Z.
    pub fn configure(&mut self, view_point: Q3, rotation_angle: i32) {
        self.view_point = view_point;
        self.rotation_angle = rotation_angle & ANGLE_MASK;

        let mut eye = view_point.scaled_to(self.distance);
        // The look-at basis is undefined on the Z axis
        if eye.x == Q::ZERO && eye.y == Q::ZERO {
            eye.x = Q::ONE >> 4;
            eye.y = Q::ONE >> 4;
        }
        self.eye = eye.rotated_z(self.rotation_angle);
        self.transform = LookAt::origin_upwards(self.eye, self.zoom, self.projection);
    }

    /// View used while the source floats or bounces.
    pub fn enter_tilted(&mut self) {
        self.configure(self.tilted_view_point, 0);
    }

    /// Stop the orbit; the next anchored tick restarts it from zero.
    pub fn reset_rotation(&mut self) {
        self.rotation_angle = 0;
    }

    /// Per-tick update. Only the anchored mode moves the camera.
    pub fn update(&mut self, mode: OscillatorMode, sensor: &mut dyn Sensor) {
        if mode != OscillatorMode::Anchored {
            return;
        }

        if self.interactive {
            let reading = sensor.peek().unwrap_or(self.steady);
            self.samplers[0].push(reading.x);
            self.samplers[1].push(reading.y);
            self.samplers[2].push(reading.z);
        }

        let view_point = self.anchored_view_point();
        let angle = self.rotation_angle.wrapping_add(self.rotation_step);
        self.configure(view_point, angle);
        trace!(
            "camera at {:?} rotation {}",
            self.eye,
            self.rotation_angle
        );
    }

    fn anchored_view_point(&self) -> Q3 {
        if !self.interactive {
            return self.recording_view_point;
        }
        let [x, y, z] = &self.samplers;
        Q3::new(milli_g(x), -milli_g(y), -milli_g(z))
    }

    pub fn transform(&self) -> &LookAt {
        &self.transform
    }

    /// World position of the eye, the viewer for visibility tests.
    pub fn eye(&self) -> Q3 {
        self.eye
    }

    pub fn view_point(&self) -> Q3 {
        self.view_point
    }

    pub fn rotation_angle(&self) -> i32 {
        self.rotation_angle
    }
}

/// Sampler mean in g as a fixed-point value.
fn milli_g(sampler: &Sampler) -> Q {
    let count = sampler.len().max(1) as i64;
    Q::from_raw(((sampler.sum() << 16) / (1000 * count)) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{FixedSensor, NoSensor};

    #[test]
    fn test_eye_at_configured_distance() {
        let camera = CameraSystem::new(&CameraParams::default(), true);
        let distance = camera.eye().length();
        assert!((distance - Q::from_f32(8.75)).abs() < Q::from_f32(0.01));
    }

    #[test]
    fn test_steady_attractor_without_sensor() {
        let mut camera = CameraSystem::new(&CameraParams::default(), true);
        let before = camera.view_point();
        camera.update(OscillatorMode::Anchored, &mut NoSensor);
        assert_eq!(camera.view_point(), before);
        assert_eq!(camera.view_point().x, Q::from_raw((-81 << 16) / 1000));
        assert_eq!(camera.rotation_angle(), 128);
    }

    #[test]
    fn test_samplers_smooth_tilt() {
        let mut camera = CameraSystem::new(&CameraParams::default(), true);
        let mut sensor = FixedSensor::new(AccelSample::new(919, -816, -571));
        camera.update(OscillatorMode::Anchored, &mut sensor);
        // One of eight samples moved by 1000 milli-g
        let expected = Q::from_raw(((-81 * 7 + 919) << 16) / 8000);
        assert_eq!(camera.view_point().x, expected);
    }

    #[test]
    fn test_only_anchored_moves() {
        let mut camera = CameraSystem::new(&CameraParams::default(), true);
        camera.enter_tilted();
        let eye = camera.eye();
        camera.update(OscillatorMode::Bouncing, &mut FixedSensor::flat());
        assert_eq!(camera.eye(), eye);
        assert_eq!(camera.rotation_angle(), 0);
    }

    #[test]
    fn test_rotation_wraps() {
        let params = CameraParams {
            rotation_step: 0x4000,
            ..CameraParams::default()
        };
        let mut camera = CameraSystem::new(&params, false);
        for _ in 0..4 {
            camera.update(OscillatorMode::Anchored, &mut NoSensor);
        }
        assert_eq!(camera.rotation_angle(), 0);
        assert_eq!(camera.view_point(), params.recording_view_point());
    }

    #[test]
    fn test_view_point_on_axis_is_nudged() {
        let mut camera = CameraSystem::new(&CameraParams::default(), true);
        camera.configure(Q3::new(Q::ZERO, Q::ZERO, Q::ONE), 0);
        assert_eq!(camera.eye().x, Q::ONE >> 4);
        assert_eq!(camera.eye().y, Q::ONE >> 4);
    }
}

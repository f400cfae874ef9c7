//! Ripple source motion: anchored, tilt-following or bouncing around the box.

use log::debug;

use crate::fixed::{Q, Q2};
use crate::modes::OscillatorMode;
use crate::params::{PhysicsParams, WorldParams};
use crate::sensor::{AccelSample, Sensor};
use crate::surface::{phase_for_tick, HeightField, Ripple};

/// State of the ripple source.
#[derive(Clone, Debug)]
pub struct Oscillator {
    mode: OscillatorMode,
    pub position: Q2,
    pub velocity: Q2,
    pub acceleration: Q2,
    pub angle_phase: i32,

    half_scale: Q,
    phase_step: i32,
    drag_shift: u32,
    inertia_shift: u32,
    launch_velocity: Q2,
}

impl Oscillator {
    pub fn new(world: &WorldParams, physics: &PhysicsParams) -> Self {
        let [vx, vy] = physics.launch_velocity;
        Self {
            mode: OscillatorMode::Anchored,
            position: Q2::ORIGIN,
            velocity: Q2::ORIGIN,
            acceleration: Q2::ORIGIN,
            angle_phase: phase_for_tick(0, world.phase_step),
            half_scale: world.half_scale(),
            phase_step: world.phase_step,
            drag_shift: physics.drag_shift,
            inertia_shift: physics.inertia_shift,
            launch_velocity: Q2::from_raw(vx, vy),
        }
    }

    pub fn mode(&self) -> OscillatorMode {
        self.mode
    }

    /// Snapshot of the field the lattices are sampled from.
    pub fn ripple(&self) -> Ripple {
        Ripple::new(self.position, self.angle_phase)
    }

    /// Switch to `mode` and reset motion for it.
    ///
    /// `launch` gives the bouncing source its initial push.
    pub fn enter(&mut self, mode: OscillatorMode, sensor: &mut dyn Sensor, launch: bool) {
        self.mode = mode;
        self.acceleration = Q2::ORIGIN;
        match mode {
            OscillatorMode::Anchored => {
                self.position = Q2::ORIGIN;
                self.velocity = Q2::ORIGIN;
            }
            OscillatorMode::Floating => {
                self.velocity = Q2::ORIGIN;
                self.float_to(sensor.peek());
            }
            OscillatorMode::Bouncing => {
                self.position = Q2::ORIGIN;
                self.velocity = if launch {
                    self.launch_velocity
                } else {
                    Q2::ORIGIN
                };
            }
        }
        debug!(
            "oscillator entered {} at {:?} moving {:?}",
            mode, self.position, self.velocity
        );
    }

    /// Advance phase and motion for `tick`. Returns whether the source moved.
    pub fn advance(&mut self, tick: u32, sensor: &mut dyn Sensor) -> bool {
        self.angle_phase = phase_for_tick(tick, self.phase_step);

        match self.mode {
            OscillatorMode::Anchored => false,
            OscillatorMode::Floating => {
                self.float_to(sensor.peek());
                true
            }
            OscillatorMode::Bouncing => {
                self.bounce(sensor.peek());
                true
            }
        }
    }

    fn float_to(&mut self, reading: Option<AccelSample>) {
        self.position = match reading {
            Some(r) => Q2::new(
                self.half_scale * Q::from_raw(r.x << 6),
                self.half_scale * Q::from_raw(r.y << 6),
            ),
            None => Q2::ORIGIN,
        };
    }

    fn bounce(&mut self, reading: Option<AccelSample>) {
        self.acceleration = match reading {
            Some(r) => Q2::from_raw(r.x >> self.inertia_shift, r.y >> self.inertia_shift),
            None => Q2::ORIGIN,
        };

        self.velocity += self.acceleration;
        self.position += self.velocity;

        let h = self.half_scale;
        if !(-h..=h).contains(&self.position.x) {
            self.position.x = self.position.x.clamp(-h, h);
            self.velocity.x = -self.velocity.x;
        }
        if !(-h..=h).contains(&self.position.y) {
            self.position.y = self.position.y.clamp(-h, h);
            self.velocity.y = -self.velocity.y;
        }

        self.velocity -= self.velocity >> self.drag_shift;
    }
}

impl HeightField for Oscillator {
    fn height_at(&self, x: Q, y: Q) -> Q {
        self.ripple().height_at(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{FixedSensor, NoSensor, ScriptedSensor};

    fn oscillator() -> Oscillator {
        Oscillator::new(&WorldParams::default(), &PhysicsParams::default())
    }

    #[test]
    fn test_launch_then_one_tick() {
        let mut osc = oscillator();
        osc.enter(OscillatorMode::Bouncing, &mut NoSensor, true);
        assert_eq!(osc.position, Q2::ORIGIN);

        assert!(osc.advance(1, &mut NoSensor));
        let launch = Q2::from_raw(3072, -1536);
        assert_eq!(osc.position, launch);
        assert_eq!(osc.velocity, launch - (launch >> 6));
    }

    #[test]
    fn test_bouncing_stays_in_box_and_flips() {
        let mut osc = oscillator();
        osc.enter(OscillatorMode::Bouncing, &mut NoSensor, false);
        // Hard tilt toward +x
        let mut sensor = FixedSensor::new(AccelSample::new(4000, 0, -1000));
        let h = WorldParams::default().half_scale();

        let mut flipped = false;
        for tick in 1..400 {
            let before = osc.velocity.x;
            osc.advance(tick, &mut sensor);
            assert!(osc.position.x >= -h && osc.position.x <= h);
            assert!(osc.position.y >= -h && osc.position.y <= h);
            // Tilt only pushes toward +x, so a sign change means a wall hit
            if before.is_positive() && !osc.velocity.x.is_positive() {
                assert_eq!(osc.position.x, h);
                flipped = true;
            }
        }
        assert!(flipped);
    }

    #[test]
    fn test_missing_reading_fallbacks() {
        let mut osc = oscillator();
        let mut sensor = ScriptedSensor::new(vec![Some(AccelSample::new(500, -500, -700)), None]);

        osc.enter(OscillatorMode::Floating, &mut sensor, false);
        assert!(osc.position.x.is_positive());
        assert!(osc.position.y.is_negative());

        osc.advance(1, &mut sensor);
        assert_eq!(osc.position, Q2::ORIGIN);

        osc.enter(OscillatorMode::Bouncing, &mut NoSensor, false);
        osc.advance(2, &mut NoSensor);
        assert_eq!(osc.acceleration, Q2::ORIGIN);
        assert_eq!(osc.position, Q2::ORIGIN);
    }

    #[test]
    fn test_anchored_only_advances_phase() {
        let mut osc = oscillator();
        assert!(!osc.advance(3, &mut FixedSensor::flat()));
        assert_eq!(osc.position, Q2::ORIGIN);
        assert_eq!(osc.angle_phase, 65536 - 768);
    }

    #[test]
    fn test_floating_tracks_tilt() {
        let mut osc = oscillator();
        osc.enter(OscillatorMode::Floating, &mut NoSensor, false);
        let mut sensor = FixedSensor::new(AccelSample::new(1024, 0, 0));
        osc.advance(1, &mut sensor);
        // 1024 milli-g << 6 is one unit, so the source sits on the +x wall
        assert_eq!(osc.position.x, WorldParams::default().half_scale());
        assert_eq!(osc.position.y, Q::ZERO);
    }
}

//! Tilt sensor contract, stand-in sources and reading smoothing.
//!
//! Readings are accelerometer-like triples in milli-g. A sensor may be
//! unavailable at any tick; consumers substitute their own fallbacks.

use std::collections::VecDeque;

use crate::fixed::{cos_lookup, sin_lookup};

/// One 3-axis reading in milli-g.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccelSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AccelSample {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn from_array([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Source of tilt readings.
pub trait Sensor {
    /// Start delivering readings. Called when the animation starts.
    fn subscribe(&mut self) {}

    /// Release the subscription. Called when the animation stops.
    fn unsubscribe(&mut self) {}

    /// Latest reading, or `None` when the sensor is unavailable.
    fn peek(&mut self) -> Option<AccelSample>;
}

impl<S: Sensor + ?Sized> Sensor for Box<S> {
    fn subscribe(&mut self) {
        (**self).subscribe();
    }

    fn unsubscribe(&mut self) {
        (**self).unsubscribe();
    }

    fn peek(&mut self) -> Option<AccelSample> {
        (**self).peek()
    }
}

/// A sensor that is never available.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSensor;

impl Sensor for NoSensor {
    fn peek(&mut self) -> Option<AccelSample> {
        None
    }
}

/// Always reports the same reading while subscribed.
#[derive(Clone, Copy, Debug)]
pub struct FixedSensor {
    reading: AccelSample,
    subscribed: bool,
}

impl FixedSensor {
    pub fn new(reading: AccelSample) -> Self {
        Self {
            reading,
            subscribed: true,
        }
    }

    /// Device lying flat, screen up.
    pub fn flat() -> Self {
        Self::new(AccelSample::new(0, 0, -1000))
    }
}

impl Sensor for FixedSensor {
    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    fn peek(&mut self) -> Option<AccelSample> {
        self.subscribed.then_some(self.reading)
    }
}

/// Replays a recorded sequence, one entry per peek. `None` entries simulate
/// dropouts. Past the end it either loops or reports unavailable.
#[derive(Clone, Debug)]
pub struct ScriptedSensor {
    readings: Vec<Option<AccelSample>>,
    cursor: usize,
    looping: bool,
}

impl ScriptedSensor {
    pub fn new(readings: Vec<Option<AccelSample>>) -> Self {
        Self {
            readings,
            cursor: 0,
            looping: false,
        }
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }
}

impl Sensor for ScriptedSensor {
    fn peek(&mut self) -> Option<AccelSample> {
        if self.readings.is_empty() {
            return None;
        }
        if self.cursor >= self.readings.len() {
            if !self.looping {
                return None;
            }
            self.cursor = 0;
        }
        let reading = self.readings[self.cursor];
        self.cursor += 1;
        reading
    }
}

/// Synthetic wrist motion: slow Lissajous tilt around a resting pose.
#[derive(Clone, Debug)]
pub struct WobbleSensor {
    phase_x: i32,
    phase_y: i32,
    step_x: i32,
    step_y: i32,
    amplitude: i32,
    rest: AccelSample,
    subscribed: bool,
}

impl WobbleSensor {
    pub fn new(amplitude: i32) -> Self {
        Self {
            phase_x: 0,
            phase_y: 0,
            step_x: 700,
            step_y: 1100,
            amplitude,
            rest: AccelSample::new(0, -400, -900),
            subscribed: false,
        }
    }
}

impl Default for WobbleSensor {
    fn default() -> Self {
        Self::new(450)
    }
}

impl Sensor for WobbleSensor {
    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    fn peek(&mut self) -> Option<AccelSample> {
        if !self.subscribed {
            return None;
        }
        let x = ((self.amplitude as i64 * sin_lookup(self.phase_x).raw() as i64) >> 16) as i32;
        let y = ((self.amplitude as i64 * cos_lookup(self.phase_y).raw() as i64) >> 16) as i32;
        self.phase_x = self.phase_x.wrapping_add(self.step_x);
        self.phase_y = self.phase_y.wrapping_add(self.step_y);

        Some(AccelSample::new(
            self.rest.x + x,
            self.rest.y + y,
            self.rest.z,
        ))
    }
}

/// Fixed-depth moving average over integer samples.
#[derive(Clone, Debug)]
pub struct Sampler {
    samples: VecDeque<i32>,
    capacity: usize,
    sum: i64,
}

impl Sampler {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0,
        }
    }

    /// Sampler pre-filled with `value`, so the average starts there.
    pub fn filled(capacity: usize, value: i32) -> Self {
        let mut sampler = Self::new(capacity);
        for _ in 0..sampler.capacity {
            sampler.push(value);
        }
        sampler
    }

    /// Add a sample, evicting the oldest one when full.
    pub fn push(&mut self, value: i32) {
        if self.samples.len() == self.capacity {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum -= oldest as i64;
            }
        }
        self.samples.push_back(value);
        self.sum += value as i64;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }
}

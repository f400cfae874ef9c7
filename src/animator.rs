//! Fixed-interval tick scheduler.
//!
//! One tick runs to completion (including marking the surface dirty) before
//! the next is scheduled. Dirty surfaces are handed to a [`FrameSink`].

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::AppError;
use crate::modes::ScheduledCommand;
use crate::sensor::Sensor;
use crate::simulation::Simulation;

/// Receives the simulation whenever it has a frame to draw.
pub trait FrameSink {
    /// Called after tick `frame_num` (1-based) left the surface dirty.
    /// Returns whether a frame was actually drawn.
    fn frame(&mut self, sim: &mut Simulation, frame_num: usize) -> Result<bool, AppError>;

    /// Called once after the last tick.
    fn finish(&mut self, _sim: &mut Simulation) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep out the rest of each interval.
    RealTime,
    /// Run ticks back to back.
    Unpaced,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    /// Frames the sink drew; deferred frames are not counted.
    pub frames: usize,
    /// Ticks that took longer than the interval.
    pub overruns: usize,
}

pub struct Animator {
    interval: Duration,
    pacing: Pacing,
    commands: Vec<ScheduledCommand>,
}

impl Animator {
    pub fn new(interval: Duration, pacing: Pacing) -> Self {
        Self {
            interval,
            pacing,
            commands: Vec::new(),
        }
    }

    /// Commands applied just before their tick runs.
    pub fn with_commands(mut self, mut commands: Vec<ScheduledCommand>) -> Self {
        commands.sort_by_key(|c| c.tick);
        self.commands = commands;
        self
    }

    /// Run `ticks` ticks, holding the sensor subscription for the duration.
    pub fn run(
        &self,
        sim: &mut Simulation,
        sensor: &mut dyn Sensor,
        ticks: usize,
        sink: &mut dyn FrameSink,
    ) -> Result<RunSummary, AppError> {
        sensor.subscribe();
        let result = self.run_subscribed(sim, sensor, ticks, sink);
        sensor.unsubscribe();

        let summary = result?;
        sink.finish(sim)?;
        info!(
            "Ran {} ticks, {} frames drawn",
            summary.ticks, summary.frames
        );
        Ok(summary)
    }

    fn run_subscribed(
        &self,
        sim: &mut Simulation,
        sensor: &mut dyn Sensor,
        ticks: usize,
        sink: &mut dyn FrameSink,
    ) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::default();
        let mut pending = self.commands.iter().peekable();

        for frame_num in 1..=ticks {
            let started = Instant::now();
            let tick = sim.tick_count().wrapping_add(1);

            while let Some(scheduled) = pending.next_if(|c| c.tick <= tick) {
                debug!("tick {}: {:?}", tick, scheduled.command);
                sim.apply(scheduled.command, sensor);
            }

            sim.tick(sensor);
            summary.ticks += 1;

            if sim.is_dirty() && sink.frame(sim, frame_num)? {
                summary.frames += 1;
            }

            let elapsed = started.elapsed();
            if elapsed > self.interval {
                summary.overruns += 1;
                if summary.overruns == 1 {
                    warn!(
                        "tick {} took {:?}, over the {:?} interval",
                        tick, elapsed, self.interval
                    );
                }
            } else if self.pacing == Pacing::RealTime {
                thread::sleep(self.interval - elapsed);
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{OscillatorMode, PlotterMode};
    use crate::params::Config;
    use crate::params::RecordingConfig;
    use crate::render::{FrameRecorder, HeadlessSink};
    use crate::sensor::{AccelSample, FixedSensor, NoSensor};

    fn sim() -> Simulation {
        let mut config = Config::default();
        config.world.grid_lines = 7;
        config.render.screen_width = 48;
        config.render.screen_height = 48;
        Simulation::new(&config, &mut NoSensor)
    }

    #[test]
    fn test_one_frame_per_tick() {
        let mut sim = sim();
        let mut sink = HeadlessSink::new();
        let animator = Animator::new(Duration::from_millis(40), Pacing::Unpaced);

        let summary = animator.run(&mut sim, &mut NoSensor, 5, &mut sink).unwrap();
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.frames, 5);
        assert_eq!(sink.drawn(), 5);
        assert_eq!(sim.tick_count(), 5);
        assert!(!sim.is_dirty());
    }

    #[test]
    fn test_snapshot_run_counts_only_drawn_frames() {
        let dir = std::env::temp_dir().join(format!("ripples3d-run-snap-{}", std::process::id()));
        let mut config = RecordingConfig::new(6, &dir);
        config.snapshot_only = true;
        let mut recorder = FrameRecorder::new(config.clone()).unwrap();
        let mut sim = sim();
        let animator = Animator::new(Duration::from_millis(40), Pacing::Unpaced);

        let summary = animator.run(&mut sim, &mut NoSensor, 6, &mut recorder).unwrap();
        assert_eq!(summary.ticks, 6);
        assert_eq!(summary.frames, 0);
        assert_eq!(recorder.written(), 1);
        assert!(config.snapshot_path().exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_scheduled_commands_apply_before_their_tick() {
        let mut sim = sim();
        let mut sink = HeadlessSink::new();
        let commands = vec![
            "3:plotter".parse().unwrap(),
            "2:oscillator".parse().unwrap(),
        ];
        let animator =
            Animator::new(Duration::from_millis(40), Pacing::Unpaced).with_commands(commands);

        animator.run(&mut sim, &mut NoSensor, 4, &mut sink).unwrap();
        assert_eq!(sim.oscillator().mode(), OscillatorMode::Floating);
        assert_eq!(sim.plotter_mode(), PlotterMode::Grid);
    }

    #[test]
    fn test_releases_sensor() {
        struct Tracking {
            inner: FixedSensor,
            subscribed: bool,
        }
        impl Sensor for Tracking {
            fn subscribe(&mut self) {
                self.subscribed = true;
                self.inner.subscribe();
            }
            fn unsubscribe(&mut self) {
                self.subscribed = false;
                self.inner.unsubscribe();
            }
            fn peek(&mut self) -> Option<AccelSample> {
                assert!(self.subscribed);
                self.inner.peek()
            }
        }

        let mut sensor = Tracking {
            inner: FixedSensor::flat(),
            subscribed: false,
        };
        let mut sim = sim();
        let animator = Animator::new(Duration::from_millis(1), Pacing::Unpaced);
        animator
            .run(&mut sim, &mut sensor, 3, &mut HeadlessSink::new())
            .unwrap();
        assert!(!sensor.subscribed);
    }
}

//! Frame sinks that rasterise the simulation headlessly.

use std::fs;

use log::{debug, info};

use super::FrameBuffer;
use crate::animator::FrameSink;
use crate::error::AppError;
use crate::params::RecordingConfig;
use crate::simulation::Simulation;

fn redraw<'a>(frame: &'a mut Option<FrameBuffer>, sim: &mut Simulation) -> &'a FrameBuffer {
    let size = sim.screen_size();
    let palette = sim.palette();
    if frame
        .as_ref()
        .is_some_and(|fb| fb.image().dimensions() != (size.width, size.height))
    {
        *frame = None;
    }
    let fb = frame.get_or_insert_with(|| FrameBuffer::new(size, palette));
    fb.reset(palette);
    sim.draw(&mut *fb);
    fb
}

/// Writes drawn frames as numbered PNGs, or only the last one as a snapshot.
pub struct FrameRecorder {
    config: RecordingConfig,
    frame: Option<FrameBuffer>,
    written: usize,
}

impl FrameRecorder {
    /// Create the output directories up front.
    pub fn new(config: RecordingConfig) -> Result<Self, AppError> {
        let dir = if config.snapshot_only {
            config.target_dir().to_path_buf()
        } else {
            config.frames_dir()
        };
        fs::create_dir_all(&dir).map_err(|source| AppError::OutputDir {
            path: dir.clone(),
            source,
        })?;

        info!("Recording to {}", dir.display());
        Ok(Self {
            config,
            frame: None,
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for FrameRecorder {
    fn frame(&mut self, sim: &mut Simulation, frame_num: usize) -> Result<bool, AppError> {
        if self.config.snapshot_only {
            return Ok(false);
        }
        let path = self.config.frame_path(frame_num);
        redraw(&mut self.frame, sim).save_png(&path)?;
        self.written += 1;

        if frame_num % 100 == 0 {
            info!("Frame {}/{}", frame_num, self.config.frames);
        }
        Ok(true)
    }

    fn finish(&mut self, sim: &mut Simulation) -> Result<(), AppError> {
        if self.config.snapshot_only {
            let path = self.config.snapshot_path();
            redraw(&mut self.frame, sim).save_png(&path)?;
            self.written += 1;
            info!("Snapshot saved to {}", path.display());
        } else {
            info!(
                "{} frames saved to {}",
                self.written,
                self.config.frames_dir().display()
            );
        }
        Ok(())
    }
}

/// Draws every frame into memory and keeps the latest one.
#[derive(Default)]
pub struct HeadlessSink {
    frame: Option<FrameBuffer>,
    drawn: usize,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawn(&self) -> usize {
        self.drawn
    }

}

impl FrameSink for HeadlessSink {
    fn frame(&mut self, sim: &mut Simulation, frame_num: usize) -> Result<bool, AppError> {
        let inked = redraw(&mut self.frame, sim).ink_count();
        self.drawn += 1;
        debug!("frame {} inked {} pixels", frame_num, inked);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Config;
    use crate::sensor::NoSensor;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.world.grid_lines = 9;
        config.render.screen_width = 64;
        config.render.screen_height = 64;
        config
    }

    #[test]
    fn test_writes_numbered_frames() {
        let dir = std::env::temp_dir().join(format!("ripples3d-frames-{}", std::process::id()));
        let mut recorder = FrameRecorder::new(RecordingConfig::new(2, &dir)).unwrap();
        let mut sim = Simulation::new(&small_config(), &mut NoSensor);

        sim.tick(&mut NoSensor);
        assert!(recorder.frame(&mut sim, 1).unwrap());
        recorder.finish(&mut sim).unwrap();

        let path = RecordingConfig::new(2, &dir).frame_path(1);
        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(recorder.written(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_snapshot_only_writes_once() {
        let dir = std::env::temp_dir().join(format!("ripples3d-snap-{}", std::process::id()));
        let mut config = RecordingConfig::new(3, &dir);
        config.snapshot_only = true;
        let mut recorder = FrameRecorder::new(config.clone()).unwrap();
        let mut sim = Simulation::new(&small_config(), &mut NoSensor);

        for n in 1..=3 {
            sim.tick(&mut NoSensor);
            assert!(!recorder.frame(&mut sim, n).unwrap());
        }
        recorder.finish(&mut sim).unwrap();

        assert!(config.snapshot_path().exists());
        assert!(!config.frames_dir().exists());
        assert_eq!(recorder.written(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }
}

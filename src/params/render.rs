//! Display, pacing and recording configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::modes::{ColorMode, OscillatorMode, PlotterMode};

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Screen width (pixels)
    pub screen_width: u32,

    /// Screen height (pixels)
    pub screen_height: u32,

    /// Tick period (milliseconds). 40 on device, slower under emulation.
    pub tick_interval_ms: u64,

    /// Two-level display: patterns instead of colours
    pub monochrome: bool,

    /// Start with stroke and background swapped
    pub inverted: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_width: 144,
            screen_height: 168,
            tick_interval_ms: 40,
            monochrome: false,
            inverted: false,
        }
    }
}

/// Initial mode selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeDefaults {
    pub oscillator: OscillatorMode,
    pub plotter: PlotterMode,
    /// Falls back to the display's default when unset
    pub color: Option<ColorMode>,
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Ticks to simulate
    pub frames: usize,

    /// Output directory for frames
    pub output_dir: PathBuf,

    /// Keep only the final frame
    pub snapshot_only: bool,
}

impl RecordingConfig {
    pub fn new(frames: usize, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            frames,
            output_dir: output_dir.into(),
            snapshot_only: false,
        }
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Path of a numbered frame
    pub fn frame_path(&self, frame_num: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", frame_num))
    }

    /// Path of the single snapshot image
    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join("snapshot.png")
    }

    /// Directory that has to exist before writing
    pub fn target_dir(&self) -> &Path {
        &self.output_dir
    }
}

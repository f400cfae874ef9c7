//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use crate::animator::Pacing;
use crate::error::AppError;
use crate::modes::{ColorMode, OscillatorMode, PlotterMode, ScheduledCommand};
use crate::params::{Config, RecordingConfig};
use crate::sensor::{AccelSample, FixedSensor, NoSensor, Sensor, WobbleSensor};

/// Where tilt readings come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SensorKind {
    /// No accelerometer; every fallback path is used
    None,
    /// Synthetic wrist wobble
    Wobble,
    /// Constant reading at the camera's resting attractor
    Steady,
    /// Constant reading of a device lying flat
    Flat,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ripples3d")]
#[command(about = "Fixed-point rippling surface renderer", long_about = None)]
pub struct Args {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, value_name = "TICKS", default_value_t = 250)]
    pub frames: usize,

    /// Write PNG frames into this directory
    #[arg(long, value_name = "DIR")]
    pub record: Option<PathBuf>,

    /// Only save the final frame
    #[arg(long, requires = "record")]
    pub snapshot: bool,

    /// Pace ticks at the configured interval instead of running flat out
    #[arg(long)]
    pub realtime: bool,

    /// Grid lines per side
    #[arg(long, value_name = "N")]
    pub grid_lines: Option<usize>,

    /// Screen width (pixels)
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Screen height (pixels)
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Initial oscillator mode: anchored, floating, bouncing
    #[arg(long, value_name = "MODE")]
    pub oscillator: Option<OscillatorMode>,

    /// Initial plotter mode: dots, lines, grid
    #[arg(long, value_name = "MODE")]
    pub plotter: Option<PlotterMode>,

    /// Initial colour mode: mono, signal, distance
    #[arg(long, value_name = "MODE")]
    pub color: Option<ColorMode>,

    /// Start with stroke and background swapped
    #[arg(long)]
    pub invert: bool,

    /// Render for a two-level display
    #[arg(long)]
    pub monochrome: bool,

    /// Tilt source
    #[arg(long, value_enum, default_value_t = SensorKind::Wobble)]
    pub sensor: SensorKind,

    /// Non-interactive session: fixed camera and launched bouncing
    #[arg(long)]
    pub recording_session: bool,

    /// Mode command at a tick, e.g. 40:oscillator (repeatable)
    #[arg(long = "command", value_name = "TICK:NAME")]
    pub commands: Vec<ScheduledCommand>,
}

impl Args {
    /// Load the config file (or defaults), layer the flags on top and validate.
    pub fn load_config(&self) -> Result<Config, AppError> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Config::load_from_file(path)?
            }
            None => Config::default(),
        };
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_to(&self, config: &mut Config) {
        if let Some(lines) = self.grid_lines {
            config.world.grid_lines = lines;
        }
        if let Some(width) = self.width {
            config.render.screen_width = width;
        }
        if let Some(height) = self.height {
            config.render.screen_height = height;
        }
        if let Some(mode) = self.oscillator {
            config.modes.oscillator = mode;
        }
        if let Some(mode) = self.plotter {
            config.modes.plotter = mode;
        }
        if let Some(mode) = self.color {
            config.modes.color = Some(mode);
        }
        if self.invert {
            config.render.inverted = true;
        }
        if self.monochrome {
            config.render.monochrome = true;
        }
        if self.recording_session {
            config.interactive = false;
        }
    }

    pub fn build_sensor(&self, config: &Config) -> Box<dyn Sensor> {
        info!("Sensor: {:?}", self.sensor);
        match self.sensor {
            SensorKind::None => Box::new(NoSensor),
            SensorKind::Wobble => Box::new(WobbleSensor::default()),
            SensorKind::Steady => Box::new(FixedSensor::new(AccelSample::from_array(
                config.camera.steady_attractor,
            ))),
            SensorKind::Flat => Box::new(FixedSensor::flat()),
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.as_ref().map(|dir| {
            let mut config = RecordingConfig::new(self.frames, dir);
            config.snapshot_only = self.snapshot;
            config
        })
    }

    pub fn pacing(&self) -> Pacing {
        if self.realtime {
            Pacing::RealTime
        } else {
            Pacing::Unpaced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::Command;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "ripples3d",
            "--grid-lines",
            "25",
            "--oscillator",
            "bouncing",
            "--color",
            "signal",
            "--monochrome",
            "--recording-session",
        ])
        .unwrap();

        let config = args.load_config().unwrap();
        assert_eq!(config.world.grid_lines, 25);
        assert_eq!(config.modes.oscillator, OscillatorMode::Bouncing);
        assert_eq!(config.modes.color, Some(ColorMode::Signal));
        assert!(config.render.monochrome);
        assert!(!config.interactive);
        assert_eq!(args.pacing(), Pacing::Unpaced);
    }

    #[test]
    fn test_repeated_commands() {
        let args = Args::try_parse_from([
            "ripples3d",
            "--command",
            "10:plotter",
            "--command",
            "20:invert",
        ])
        .unwrap();
        assert_eq!(args.commands.len(), 2);
        assert_eq!(args.commands[1].tick, 20);
        assert_eq!(args.commands[1].command, Command::ToggleInversion);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["ripples3d", "--plotter", "spiral"]).is_err());
        assert!(Args::try_parse_from(["ripples3d", "--command", "soon:color"]).is_err());
        assert!(Args::try_parse_from(["ripples3d", "--snapshot"]).is_err());
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let args = Args::try_parse_from(["ripples3d", "--grid-lines", "1"]).unwrap();
        assert!(matches!(args.load_config(), Err(AppError::ConfigInvalid(_))));
    }

    #[test]
    fn test_recording_config() {
        let args =
            Args::try_parse_from(["ripples3d", "--record", "out", "--snapshot", "--frames", "9"])
                .unwrap();
        let recording = args.recording_config().unwrap();
        assert!(recording.snapshot_only);
        assert_eq!(recording.frames, 9);
        assert_eq!(recording.snapshot_path(), PathBuf::from("out").join("snapshot.png"));
    }
}

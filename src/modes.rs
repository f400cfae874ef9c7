//! Display and motion modes, cycled by external commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseCommandError, ParseModeError};

/// Motion policy of the oscillator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorMode {
    /// Oscillator pinned to the grid origin; the sensor steers the camera instead.
    #[default]
    Anchored,
    /// Oscillator position follows the tilt reading directly.
    Floating,
    /// Oscillator is a damped ball rolling on the tilted grid.
    Bouncing,
}

impl OscillatorMode {
    pub const ALL: [OscillatorMode; 3] = [Self::Anchored, Self::Floating, Self::Bouncing];

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Anchored => Self::Floating,
            Self::Floating => Self::Bouncing,
            Self::Bouncing => Self::Anchored,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Anchored => "anchored",
            Self::Floating => "floating",
            Self::Bouncing => "bouncing",
        }
    }
}

/// How the lattice is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotterMode {
    Dots,
    /// x-parallel lines only
    #[default]
    Lines,
    Grid,
}

impl PlotterMode {
    pub const ALL: [PlotterMode; 3] = [Self::Dots, Self::Lines, Self::Grid];

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Dots => Self::Lines,
            Self::Lines => Self::Grid,
            Self::Grid => Self::Dots,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dots => "dots",
            Self::Lines => "lines",
            Self::Grid => "grid",
        }
    }
}

/// Colour policy applied to drawn primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Mono,
    /// Crests and troughs in two colours
    Signal,
    /// Rings coloured by distance to the oscillator
    Distance,
}

impl ColorMode {
    pub const ALL: [ColorMode; 3] = [Self::Mono, Self::Signal, Self::Distance];

    /// Initial mode for a display kind.
    pub fn default_for(monochrome: bool) -> Self {
        if monochrome {
            Self::Mono
        } else {
            Self::Distance
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Mono => Self::Signal,
            Self::Signal => Self::Distance,
            Self::Distance => Self::Mono,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mono => "mono",
            Self::Signal => "signal",
            Self::Distance => "distance",
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::default_for(false)
    }
}

macro_rules! impl_mode_text {
    ($mode:ty, $kind:literal) => {
        impl fmt::Display for $mode {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $mode {
            type Err = ParseModeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|mode| mode.name() == wanted)
                    .ok_or_else(|| ParseModeError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_mode_text!(OscillatorMode, "oscillator");
impl_mode_text!(PlotterMode, "plotter");
impl_mode_text!(ColorMode, "color");

/// Payload-free mode change trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    CycleColor,
    CyclePlotter,
    CycleOscillator,
    /// Secondary rendering option: swap stroke and background.
    ToggleInversion,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "color" | "colour" => Ok(Self::CycleColor),
            "plotter" => Ok(Self::CyclePlotter),
            "oscillator" => Ok(Self::CycleOscillator),
            "invert" => Ok(Self::ToggleInversion),
            _ => Err(ParseCommandError::UnknownCommand(s.to_string())),
        }
    }
}

/// A command scheduled for a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledCommand {
    pub tick: u32,
    pub command: Command,
}

impl FromStr for ScheduledCommand {
    type Err = ParseCommandError;

    /// Parses `TICK:NAME`, e.g. `40:oscillator`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, name) = s
            .split_once(':')
            .ok_or_else(|| ParseCommandError::MissingTick(s.to_string()))?;
        let tick = tick
            .trim()
            .parse()
            .map_err(|_| ParseCommandError::InvalidTick(tick.to_string()))?;
        Ok(Self {
            tick,
            command: name.parse()?,
        })
    }
}

//! Error types for the host layer. The simulation core itself is infallible.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while configuring or running the animation.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigInvalid(String),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save frame {path}: {source}")]
    FrameSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A mode name that does not match any variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} mode '{value}'")]
pub struct ParseModeError {
    pub kind: &'static str,
    pub value: String,
}

/// A malformed `TICK:NAME` command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Command '{0}' is missing its tick (expected TICK:NAME)")]
    MissingTick(String),

    #[error("Invalid tick '{0}'")]
    InvalidTick(String),

    #[error("Unknown command '{0}' (expected color, plotter, oscillator or invert)")]
    UnknownCommand(String),
}

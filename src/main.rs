//! ripples3d - rippling height field rendered in fixed point
//!
//! Runs the tick loop headless and optionally records PNG frames.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use ripples3d::animator::Animator;
use ripples3d::cli::Args;
use ripples3d::error::AppError;
use ripples3d::render::{FrameRecorder, HeadlessSink};
use ripples3d::simulation::Simulation;

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.load_config()?;
    let mut sensor = args.build_sensor(&config);
    let mut sim = Simulation::new(&config, sensor.as_mut());

    let interval = Duration::from_millis(config.render.tick_interval_ms);
    let animator = Animator::new(interval, args.pacing()).with_commands(args.commands.clone());

    let summary = match args.recording_config() {
        Some(recording) => {
            let mut recorder = FrameRecorder::new(recording)?;
            animator.run(&mut sim, sensor.as_mut(), args.frames, &mut recorder)?
        }
        None => {
            let mut sink = HeadlessSink::new();
            animator.run(&mut sim, sensor.as_mut(), args.frames, &mut sink)?
        }
    };

    if summary.overruns > 0 {
        info!(
            "{} of {} ticks overran the {:?} interval",
            summary.overruns, summary.ticks, interval
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

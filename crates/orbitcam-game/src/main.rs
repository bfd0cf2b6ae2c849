//! `orbitcam`: third-person orbit camera sandbox.
//!
//! Loads `config.ron`, builds the sandbox level, and either opens a window
//! or runs a fixed number of scripted frames.
//!
//! Run with: `cargo run -p orbitcam-game -- --headless-frames 600`

use std::process::ExitCode;

use clap::Parser;
use orbitcam_app::{PlatformDirs, run_windowed};
use orbitcam_config::{CliArgs, Config};
use orbitcam_game::{Game, StartupError, sandbox};
use tracing::{error, info};

fn run(args: CliArgs) -> Result<(), StartupError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::resolve_with_root(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let (mut config, source) = Config::open(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);

    orbitcam_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("orbitcam v{}", env!("CARGO_PKG_VERSION"));
    source.log(&dirs.config_dir);
    config.validate()?;

    let (scene, world) = sandbox::build(&config);
    let mut game = Game::new(config.clone(), scene, world)?;

    match args.headless_frames {
        Some(frames) => sandbox::run_scripted(&mut game, frames),
        None => {
            info!(
                "Window: {}x{} | Title: {}",
                config.window.width, config.window.height, config.window.title
            );
            let game = run_windowed(&config, game)?;
            game.log_pose();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("orbitcam: {e}");
            ExitCode::FAILURE
        }
    }
}

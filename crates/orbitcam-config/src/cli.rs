//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// orbitcam command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orbitcam", about = "Third-person orbit camera sandbox")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum zoom distance.
    #[arg(long)]
    pub max_zoom: Option<f32>,

    /// Orbit speed in degrees per second.
    #[arg(long)]
    pub rotate_speed: Option<f32>,

    /// Invert the pitch axis.
    #[arg(long)]
    pub invert_pitch: Option<bool>,

    /// Lateral focus point bias.
    #[arg(long)]
    pub shoulder_offset: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run this many scripted frames without a window, then exit.
    #[arg(long)]
    pub headless_frames: Option<u32>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(max) = args.max_zoom {
            self.camera.max_zoom_range = max;
        }
        if let Some(speed) = args.rotate_speed {
            self.camera.rotate_speed = speed;
        }
        if let Some(invert) = args.invert_pitch {
            self.camera.invert_pitch = invert;
        }
        if let Some(offset) = args.shoulder_offset {
            self.camera.shoulder_offset = offset;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

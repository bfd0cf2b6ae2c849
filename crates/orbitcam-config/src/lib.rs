//! Configuration for the orbit camera rig and its input bridge.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and are validated before a rig is built from them.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, ConfigSource, DebugConfig, InputConfig, MouseButtonName, PlayerConfig, WindowConfig,
    ZoomBoundary,
};
pub use error::ConfigError;

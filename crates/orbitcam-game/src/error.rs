use orbitcam_app::{AppError, PlatformError};
use orbitcam_camera::RigError;
use orbitcam_config::ConfigError;
use orbitcam_scene::SceneError;
use thiserror::Error;

/// Errors composing or driving a game session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No entity with the configured player name exists.
    #[error("no entity named `{0}` in the scene")]
    MissingPlayer(String),
    /// The camera rig could not be set up or updated.
    #[error(transparent)]
    Rig(#[from] RigError),
    /// A scene mutation referenced a stale entity.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Anything that stops the `orbitcam` binary before or while running.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    App(#[from] AppError),
}

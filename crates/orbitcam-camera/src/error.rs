//! Camera rig errors.

use orbitcam_config::ConfigError;
use orbitcam_scene::{Entity, SceneError};

/// Errors raised while building or driving a [`CameraRig`](crate::CameraRig).
#[derive(Debug, thiserror::Error)]
pub enum RigError {
    /// The target entity is not in the scene.
    #[error("camera target {0} is not in the scene")]
    MissingTarget(Entity),

    /// The focus point entity is not in the scene.
    #[error("camera focus point {0} is not in the scene")]
    MissingFocusPoint(Entity),

    /// The camera configuration failed validation.
    #[error("invalid camera configuration: {0}")]
    Config(#[from] ConfigError),

    /// A scene mutation failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

//! Focus point lookup: the child of the target the camera orbits and aims at.

use orbitcam_config::CameraConfig;
use orbitcam_scene::{Entity, Scene, Transform};
use tracing::debug;

use crate::RigError;

/// Name of the focus point child entity.
pub const FOCUS_POINT_NAME: &str = "FocusPoint";

/// Returns the target's `FocusPoint` child, creating it if absent.
///
/// A created focus point sits `focus_height` above the target origin and
/// `shoulder_offset` to its right. An existing one is used as-is.
pub fn resolve_focus_point(
    scene: &mut Scene,
    target: Entity,
    config: &CameraConfig,
) -> Result<Entity, RigError> {
    if !scene.contains(target) {
        return Err(RigError::MissingTarget(target));
    }
    if let Some(existing) = scene.find_child(target, FOCUS_POINT_NAME) {
        return Ok(existing);
    }

    let local = Transform::from_xyz(config.shoulder_offset, config.focus_height, 0.0);
    let focus = scene.spawn_child(target, FOCUS_POINT_NAME, local)?;
    debug!(
        "created focus point {focus} under {target} at {:?}",
        local.translation
    );
    Ok(focus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_creates_focus_with_shoulder_offset() {
        let mut scene = Scene::new();
        let player = scene.spawn("Player", Transform::from_xyz(2.0, 0.0, 0.0));
        let config = CameraConfig {
            shoulder_offset: 0.5,
            focus_height: 1.5,
            ..Default::default()
        };
        let focus = resolve_focus_point(&mut scene, player, &config).unwrap();
        assert_eq!(scene.parent(focus), Some(player));
        assert_eq!(scene.name(focus), Some(FOCUS_POINT_NAME));
        let pos = scene.world_position(focus).unwrap();
        assert!((pos - Vec3::new(2.5, 1.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_reuses_existing_focus() {
        let mut scene = Scene::new();
        let player = scene.spawn("Player", Transform::IDENTITY);
        let existing = scene
            .spawn_child(player, FOCUS_POINT_NAME, Transform::from_xyz(0.0, 2.0, 0.0))
            .unwrap();
        let config = CameraConfig::default();
        let focus = resolve_focus_point(&mut scene, player, &config).unwrap();
        assert_eq!(focus, existing);
        assert_eq!(scene.children(player).len(), 1);

        // Second call is idempotent.
        let again = resolve_focus_point(&mut scene, player, &config).unwrap();
        assert_eq!(again, existing);
    }

    #[test]
    fn test_missing_target_is_error() {
        let mut other = Scene::new();
        let stray = other.spawn("Ghost", Transform::IDENTITY);
        let mut scene = Scene::new();
        let err = resolve_focus_point(&mut scene, stray, &CameraConfig::default()).unwrap_err();
        assert!(matches!(err, RigError::MissingTarget(e) if e == stray));
    }
}

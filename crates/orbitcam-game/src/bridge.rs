//! Turns per-frame input into camera and player motion.
//!
//! Camera input (zoom, orbit, pitch) is applied in the Update phase.
//! Movement is only recorded there and applied by each FixedUpdate step
//! until the next Update samples input again.

use glam::{Quat, Vec2, Vec3};
use orbitcam_camera::CameraRig;
use orbitcam_config::{InputConfig, PlayerConfig};
use orbitcam_input::{CursorMode, InputFrame};
use orbitcam_scene::{Entity, Scene, SceneError};
use tracing::{debug, trace};

use crate::SessionError;

/// Routes an [`InputFrame`] to the rig and the player.
#[derive(Debug, Clone)]
pub struct InputBridge {
    player: Entity,
    move_speed: f32,
    scroll_zoom_scale: f32,
    pending: Option<Vec2>,
    cursor_mode: CursorMode,
}

impl InputBridge {
    pub fn new(player: Entity, player_config: &PlayerConfig, input_config: &InputConfig) -> Self {
        Self {
            player,
            move_speed: player_config.move_speed,
            scroll_zoom_scale: input_config.scroll_zoom_scale,
            pending: None,
            cursor_mode: CursorMode::Free,
        }
    }

    /// Applies one frame of input.
    ///
    /// Scrolling zooms. While look is held the mouse orbits and pitches the
    /// camera; holding align as well turns the player to the camera heading
    /// and walks it forward. Returns the new cursor mode when it changes.
    pub fn update(
        &mut self,
        frame: &InputFrame,
        rig: &mut CameraRig,
        scene: &mut Scene,
        dt: f32,
    ) -> Result<Option<CursorMode>, SessionError> {
        let mut movement = frame.movement;

        if frame.scroll != 0.0 {
            rig.zoom(frame.scroll * self.scroll_zoom_scale);
        }

        if frame.look_held {
            rig.rotate(scene, frame.look.x, dt)?;
            rig.pitch(scene, frame.look.y, dt)?;
            if frame.align_held {
                scene.set_rotation(self.player, Quat::from_rotation_y(rig.yaw()))?;
                movement.y = 1.0;
            }
        }

        self.pending = (movement != Vec2::ZERO).then_some(movement);

        let wanted = if frame.look_held {
            CursorMode::Locked
        } else {
            CursorMode::Free
        };
        if wanted == self.cursor_mode {
            return Ok(None);
        }
        debug!("cursor {:?} -> {wanted:?}", self.cursor_mode);
        self.cursor_mode = wanted;
        Ok(Some(wanted))
    }

    /// Moves the player and the rig by the pending movement, if any.
    ///
    /// The player walks along its own forward/right axes at `move_speed`.
    /// The axes are kept for the remaining fixed steps of the frame.
    /// Returns the world-space delta applied.
    pub fn fixed_update(
        &mut self,
        rig: &mut CameraRig,
        scene: &mut Scene,
        dt: f32,
    ) -> Result<Option<Vec3>, SessionError> {
        let Some(axes) = self.pending else {
            return Ok(None);
        };
        let player = scene
            .world_transform(self.player)
            .ok_or(SceneError::UnknownEntity(self.player))?;
        let delta = (player.right() * axes.x + player.forward() * axes.y) * self.move_speed * dt;
        scene.translate(self.player, delta)?;
        rig.move_by(delta);
        trace!("player moved by {delta:?}");
        Ok(Some(delta))
    }

    /// Whether the fixed steps of this frame will move the player.
    pub fn is_moving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn player(&self) -> Entity {
        self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitcam_config::CameraConfig;
    use orbitcam_physics::EmptyWorld;
    use orbitcam_scene::Transform;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (Scene, CameraRig, InputBridge) {
        let mut scene = Scene::new();
        let player = scene.spawn("Player", Transform::IDENTITY);
        let rig =
            CameraRig::setup(CameraConfig::default(), &mut scene, player, &EmptyWorld).unwrap();
        let bridge = InputBridge::new(player, &PlayerConfig::default(), &InputConfig::default());
        (scene, rig, bridge)
    }

    #[test]
    fn test_scroll_zooms_in() {
        let (mut scene, mut rig, mut bridge) = setup();
        let before = rig.zoom_distance();
        let frame = InputFrame {
            scroll: 0.2,
            ..Default::default()
        };
        bridge.update(&frame, &mut rig, &mut scene, DT).unwrap();
        // 0.2 lines * scale 5.
        assert!((rig.zoom_distance() - (before - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_look_only_while_held() {
        let (mut scene, mut rig, mut bridge) = setup();
        let azimuth = rig.azimuth();
        let frame = InputFrame {
            look: Vec2::new(3.0, 0.0),
            ..Default::default()
        };
        bridge.update(&frame, &mut rig, &mut scene, DT).unwrap();
        assert!((rig.azimuth() - azimuth).abs() < 1e-6);

        let held = InputFrame {
            look_held: true,
            ..frame
        };
        bridge.update(&held, &mut rig, &mut scene, DT).unwrap();
        // 3 * 100 deg/s * dt = 5 degrees.
        assert!((rig.azimuth() - azimuth - 5.0_f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn test_look_pitches_camera() {
        let (mut scene, mut rig, mut bridge) = setup();
        let elevation = rig.elevation();
        let frame = InputFrame {
            look: Vec2::new(0.0, 1.0),
            look_held: true,
            ..Default::default()
        };
        bridge.update(&frame, &mut rig, &mut scene, DT).unwrap();
        assert!(rig.elevation() < elevation);
    }

    #[test]
    fn test_cursor_mode_reported_on_change() {
        let (mut scene, mut rig, mut bridge) = setup();
        let held = InputFrame {
            look_held: true,
            ..Default::default()
        };
        let first = bridge.update(&held, &mut rig, &mut scene, DT).unwrap();
        assert_eq!(first, Some(CursorMode::Locked));
        let again = bridge.update(&held, &mut rig, &mut scene, DT).unwrap();
        assert_eq!(again, None);
        let released = bridge
            .update(&InputFrame::default(), &mut rig, &mut scene, DT)
            .unwrap();
        assert_eq!(released, Some(CursorMode::Free));
        assert_eq!(bridge.cursor_mode(), CursorMode::Free);
    }

    #[test]
    fn test_movement_waits_for_fixed_step() {
        let (mut scene, mut rig, mut bridge) = setup();
        let player = bridge.player();
        let frame = InputFrame {
            movement: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        bridge.update(&frame, &mut rig, &mut scene, DT).unwrap();
        assert!(bridge.is_moving());
        assert_eq!(scene.world_position(player), Some(Vec3::ZERO));

        let camera_before = rig.position();
        let delta = bridge
            .fixed_update(&mut rig, &mut scene, 0.5)
            .unwrap()
            .unwrap();
        // Facing -Z at 3 units/s for half a second.
        assert!((delta - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-5);
        assert!((scene.world_position(player).unwrap() - delta).length() < 1e-5);
        assert!((rig.position() - camera_before - delta).length() < 1e-5);

        // A second step in the same frame walks again.
        let again = bridge
            .fixed_update(&mut rig, &mut scene, 0.5)
            .unwrap()
            .unwrap();
        assert!((again - delta).length() < 1e-5);

        bridge
            .update(&InputFrame::default(), &mut rig, &mut scene, DT)
            .unwrap();
        assert!(!bridge.is_moving());
        assert_eq!(bridge.fixed_update(&mut rig, &mut scene, 0.5).unwrap(), None);
    }

    #[test]
    fn test_strafe_uses_player_right() {
        let (mut scene, mut rig, mut bridge) = setup();
        let frame = InputFrame {
            movement: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        bridge.update(&frame, &mut rig, &mut scene, DT).unwrap();
        let delta = bridge
            .fixed_update(&mut rig, &mut scene, 1.0)
            .unwrap()
            .unwrap();
        assert!((delta - Vec3::new(-3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_align_faces_camera_heading_and_walks() {
        let (mut scene, mut rig, mut bridge) = setup();
        let player = bridge.player();
        // Swing the camera a quarter turn around the player first.
        rig.rotate(&scene, 1.0, 0.9).unwrap();

        let frame = InputFrame {
            look_held: true,
            align_held: true,
            ..Default::default()
        };
        bridge.update(&frame, &mut rig, &mut scene, DT).unwrap();
        assert!(bridge.is_moving());

        let player_yaw = scene.world_transform(player).unwrap().yaw();
        assert!((player_yaw - rig.yaw()).abs() < 1e-4);

        let delta = bridge
            .fixed_update(&mut rig, &mut scene, 1.0)
            .unwrap()
            .unwrap();
        let heading = Vec3::new(rig.forward().x, 0.0, rig.forward().z).normalize();
        assert!((delta.normalize() - heading).length() < 1e-3);
        assert!((delta.length() - 3.0).abs() < 1e-4);
    }
}

//! The composed game: scene, collision world, session, rig, and bridge,
//! driven through the three frame phases.

use glam::Vec3;
use orbitcam_app::{FramePhases, WindowedGame};
use orbitcam_camera::CameraRig;
use orbitcam_config::Config;
use orbitcam_input::{CursorMode, InputFrame, InputMap, KeyboardState, MouseState};
use orbitcam_physics::StaticWorld;
use orbitcam_scene::Scene;
use tracing::{error, info};

use crate::{InputBridge, Session, SessionError};

/// Everything one run of the sandbox owns.
pub struct Game {
    config: Config,
    scene: Scene,
    world: StaticWorld,
    session: Session,
    rig: CameraRig,
    bridge: InputBridge,
    input_map: InputMap,
    input: InputFrame,
    frames: u64,
}

impl Game {
    /// Composes a game over `scene` and `world`.
    ///
    /// Fails if the config is invalid, the player named in it is missing,
    /// or the camera rig cannot attach to it.
    pub fn new(config: Config, mut scene: Scene, world: StaticWorld) -> Result<Self, SessionError> {
        config.validate()?;
        let session = Session::new(&scene, &config.player.name)?;
        let rig = CameraRig::setup(config.camera.clone(), &mut scene, session.player(), &world)?;
        let bridge = InputBridge::new(session.player(), &config.player, &config.input);
        let input_map = InputMap::from_config(&config.input);
        info!(
            "Game composed: {} entities, {} colliders",
            scene.len(),
            world.len()
        );
        Ok(Self {
            config,
            scene,
            world,
            session,
            rig,
            bridge,
            input_map,
            input: InputFrame::default(),
            frames: 0,
        })
    }

    /// Sets the input the next Update phase will read.
    pub fn set_input(&mut self, frame: InputFrame) {
        self.input = frame;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn world(&self) -> &StaticWorld {
        &self.world
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Frames completed (LateUpdate runs).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Player world position.
    pub fn player_position(&self) -> Vec3 {
        self.scene
            .world_position(self.session.player())
            .unwrap_or(Vec3::ZERO)
    }

    /// Logs the current player and camera pose.
    pub fn log_pose(&self) {
        let camera = self.rig.position();
        let player = self.player_position();
        info!(
            "frame {}: player ({:.2}, {:.2}, {:.2}) camera ({:.2}, {:.2}, {:.2}) zoom {:.2} effective {:.2} elevation {:.1}deg",
            self.frames,
            player.x,
            player.y,
            player.z,
            camera.x,
            camera.y,
            camera.z,
            self.rig.zoom_distance(),
            self.rig.effective_distance(),
            self.rig.elevation().to_degrees()
        );
    }
}

impl FramePhases for Game {
    fn update(&mut self, dt: f64) {
        if let Err(e) =
            self.bridge
                .update(&self.input, &mut self.rig, &mut self.scene, dt as f32)
        {
            error!("input update failed: {e}");
        }
    }

    fn fixed_update(&mut self, dt: f64, _sim_time: f64) {
        match self
            .bridge
            .fixed_update(&mut self.rig, &mut self.scene, dt as f32)
        {
            Ok(Some(delta)) => self.world.translate_owned(self.session.player(), delta),
            Ok(None) => {}
            Err(e) => error!("movement step failed: {e}"),
        }
    }

    fn late_update(&mut self, dt: f64, _alpha: f64) {
        if let Err(e) = self.rig.update(&self.scene, &self.world, dt as f32) {
            error!("camera update failed: {e}");
        }
        self.frames += 1;
        let interval = u64::from(self.config.debug.pose_log_interval);
        if interval > 0 && self.frames % interval == 0 {
            self.log_pose();
        }
    }
}

impl WindowedGame for Game {
    fn sample_input(&mut self, keyboard: &KeyboardState, mouse: &MouseState) {
        self.input = InputFrame::sample(
            keyboard,
            mouse,
            &self.input_map,
            self.config.input.mouse_sensitivity,
        );
    }

    fn cursor_mode(&self) -> CursorMode {
        self.bridge.cursor_mode()
    }
}

//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera rig tunables.
    pub camera: CameraConfig,
    /// Player movement settings.
    pub player: PlayerConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// What a zoom step does when it would leave `[min_zoom, max_zoom_range]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ZoomBoundary {
    /// Clamp the resulting distance into range.
    #[default]
    Clamp,
    /// Ignore the whole step. The camera "sticks" at the boundary it was
    /// about to cross and only accepts steps back into the range.
    Sticky,
}

/// Camera rig tunables. Immutable for the lifetime of a rig.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Cap on the distance between camera and focus point.
    pub max_zoom_range: f32,
    /// Smallest allowed zoom distance. Must be positive.
    pub min_zoom: f32,
    /// Angular speed in degrees per second per unit of input.
    pub rotate_speed: f32,
    /// Speed in units per second at which the camera closes in on its
    /// resolved position (smoothing and occlusion correction).
    pub auto_zoom_speed: f32,
    /// Flip the pitch axis.
    pub invert_pitch: bool,
    /// Lateral bias of the focus point for over-the-shoulder framing.
    pub shoulder_offset: f32,
    /// Height of the focus point above the target origin.
    pub focus_height: f32,
    /// Lowest elevation of the camera above the focus point, in degrees.
    pub pitch_min_deg: f32,
    /// Highest elevation of the camera above the focus point, in degrees.
    pub pitch_max_deg: f32,
    /// Height above the target at which the camera is placed during setup.
    pub setup_height: f32,
    /// Near clip plane distance.
    pub near_clip: f32,
    /// Height of the second occlusion probe above the focus point.
    pub occlusion_probe_height: f32,
    /// Distance kept between the camera and an occluding surface.
    pub occlusion_skin: f32,
    /// Behaviour at the zoom range boundaries.
    pub zoom_boundary: ZoomBoundary,
}

/// Player movement settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Scene name of the player entity.
    pub name: String,
    /// Movement speed in units per second.
    pub move_speed: f32,
}

/// Mouse buttons that can be bound to look/align.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MouseButtonName {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Multiplier from raw mouse pixels to look axis units.
    pub mouse_sensitivity: f32,
    /// Multiplier from scroll lines to zoom distance.
    pub scroll_zoom_scale: f32,
    /// Button held to orbit the camera.
    pub look_button: MouseButtonName,
    /// Button that, together with the look button, aligns the player to the
    /// camera and runs forward.
    pub align_button: MouseButtonName,
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log the camera pose every this many frames (0 = never).
    pub pose_log_interval: u32,
}

// ── Defaults ──

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "orbitcam".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            max_zoom_range: 10.0,
            min_zoom: 1.0,
            rotate_speed: 100.0,
            auto_zoom_speed: 10.0,
            invert_pitch: false,
            shoulder_offset: 0.0,
            focus_height: 1.0,
            pitch_min_deg: 1.0,
            pitch_max_deg: 89.0,
            setup_height: 3.0,
            near_clip: 0.1,
            occlusion_probe_height: 0.5,
            occlusion_skin: 0.2,
            zoom_boundary: ZoomBoundary::Clamp,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            move_speed: 3.0,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            scroll_zoom_scale: 5.0,
            look_button: MouseButtonName::Right,
            align_button: MouseButtonName::Left,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pose_log_interval: 0,
        }
    }
}

// ── Validation ──

impl CameraConfig {
    /// Check the ranges the rig relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_zoom_range > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.max_zoom_range",
                reason: format!("must be positive, got {}", self.max_zoom_range),
            });
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom_range) {
            return Err(ConfigError::Invalid {
                field: "camera.min_zoom",
                reason: format!(
                    "must lie in (0, {}], got {}",
                    self.max_zoom_range, self.min_zoom
                ),
            });
        }
        if !(self.pitch_min_deg >= 0.0
            && self.pitch_min_deg < self.pitch_max_deg
            && self.pitch_max_deg < 90.0)
        {
            return Err(ConfigError::Invalid {
                field: "camera.pitch_min_deg",
                reason: format!(
                    "pitch band must satisfy 0 <= min < max < 90, got {}..{}",
                    self.pitch_min_deg, self.pitch_max_deg
                ),
            });
        }
        if self.auto_zoom_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "camera.auto_zoom_speed",
                reason: "must not be negative".to_string(),
            });
        }
        if !(self.near_clip > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.near_clip",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Validate every section that has constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        if self.player.name.is_empty() {
            return Err(ConfigError::Invalid {
                field: "player.name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.player.move_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "player.move_speed",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

// ── Persistence ──

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Where [`Config::open`] got its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from an existing file.
    Loaded,
    /// No file existed; the defaults were written out.
    Created,
}

impl Config {
    /// Reads `config.ron` from `dir`, writing the defaults there first if the
    /// file does not exist yet. Does not log, so it can run before a
    /// subscriber is installed.
    pub fn open(config_dir: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            Ok((config, ConfigSource::Loaded))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigSource::Created))
        }
    }

    /// [`open`](Self::open), logging which file was used.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let (config, source) = Self::open(config_dir)?;
        source.log(config_dir);
        Ok(config)
    }

    /// Writes `self` to `dir/config.ron` as pretty RON, creating `dir` if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-reads `config.ron` and returns the new value only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("config.ron changed on disk");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

impl ConfigSource {
    /// Logs where the config in `config_dir` came from.
    pub fn log(self, config_dir: &Path) {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        match self {
            ConfigSource::Loaded => log::info!("Using config file {}", config_path.display()),
            ConfigSource::Created => {
                log::info!("No config file, wrote defaults to {}", config_path.display())
            }
        }
    }
}

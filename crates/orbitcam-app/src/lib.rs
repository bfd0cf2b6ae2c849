//! Application host: the fixed-timestep frame loop, OS directories, and the
//! winit window that feeds input into a game.

pub mod game_loop;
pub mod platform;
pub mod window;

pub use game_loop::{FIXED_DT, FramePhases, GameLoop, MAX_FRAME_TIME};
pub use platform::{APP_NAME, PlatformDirs, PlatformError};
pub use window::{AppError, AppState, WindowedGame, run_windowed, window_attributes_from_config};

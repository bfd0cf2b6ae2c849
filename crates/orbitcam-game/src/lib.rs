//! Gameplay composition: the player session, the input bridge that turns
//! device input into camera and player motion, and the sandbox scene the
//! `orbitcam` binary runs.

mod error;

pub mod bridge;
pub mod game;
pub mod sandbox;
pub mod session;

pub use bridge::InputBridge;
pub use error::{SessionError, StartupError};
pub use game::Game;
pub use session::Session;

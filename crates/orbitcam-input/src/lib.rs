//! Device input: frame-coherent keyboard/mouse trackers, action bindings,
//! and the per-frame [`InputFrame`] snapshot consumed by the input bridge.

pub mod bindings;
pub mod frame;
pub mod keyboard;
pub mod mouse;

pub use bindings::{Action, InputBinding, InputMap, parse_key_code};
pub use frame::InputFrame;
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::{CursorMode, MouseState};

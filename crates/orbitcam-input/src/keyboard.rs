//! Frame-coherent keyboard state tracker.
//!
//! Physical key codes are used so that WASD movement works regardless of the
//! user's keyboard layout.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an OS auto-repeat.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Non-repeat event for a known key code.
    #[must_use]
    pub fn code(code: KeyCode, state: ElementState) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }
    }
}

/// Held / just-pressed / just-released sets, cleared per frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    /// No keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Applies a [`RawKeyEvent`]. Repeats and unidentified keys are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        let PhysicalKey::Code(code) = event.key else {
            return;
        };
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(code) {
                    self.pressed_this_frame.insert(code);
                }
            }
            ElementState::Released => {
                if self.held.remove(&code) {
                    self.released_this_frame.insert(code);
                }
            }
        }
    }

    /// Whether `code` is held down.
    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// Whether any of `codes` is held down.
    #[must_use]
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.held.contains(c))
    }

    /// Whether `code` went down this frame.
    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.pressed_this_frame.contains(&code)
    }

    /// Whether `code` went up this frame.
    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.released_this_frame.contains(&code)
    }

    /// Releases every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.released_this_frame.extend(self.held.drain());
    }

    /// Clears the per-frame sets. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }
}

//! Frame-coherent mouse state: motion delta, buttons, scroll, cursor lock.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::window::{CursorGrabMode, Window};

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Whether the cursor is locked for camera look or free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMode {
    /// Visible, normal cursor.
    #[default]
    Free,
    /// Hidden and grabbed; motion comes from raw device deltas.
    Locked,
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    pressed: bool,
    released: bool,
}

fn slot(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Mouse input accumulated over one frame.
///
/// Forward winit events through the `on_*` methods, read the accessors
/// during the frame, then call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    scroll: f32,
    buttons: [ButtonFrame; 3],
    cursor_mode: CursorMode,
}

impl MouseState {
    /// Everything zeroed, cursor free.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `WindowEvent::CursorMoved`. Contributes to the delta only while the
    /// cursor is free; a locked cursor reports motion through
    /// [`on_raw_motion`](Self::on_raw_motion).
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if self.cursor_mode == CursorMode::Free {
            self.delta += new_pos - self.position;
        }
        self.position = new_pos;
    }

    /// `DeviceEvent::MouseMotion`.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.cursor_mode == CursorMode::Locked {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// `WindowEvent::MouseInput`. Back/forward/other buttons are ignored.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(idx) = slot(button) else {
            return;
        };
        let b = &mut self.buttons[idx];
        match state {
            ElementState::Pressed => {
                b.pressed = !b.held;
                b.held = true;
            }
            ElementState::Released => {
                b.released = b.held;
                b.held = false;
            }
        }
    }

    /// `WindowEvent::MouseWheel`. Positive is scroll up / away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => self.scroll += y,
            MouseScrollDelta::PixelDelta(pos) => self.scroll += (pos.y / PIXELS_PER_LINE) as f32,
        }
    }

    /// Changes the cursor mode and applies grab/visibility to `window`.
    ///
    /// Tries `Locked` grab first and falls back to `Confined` on platforms
    /// that lack it.
    pub fn set_cursor_mode(&mut self, window: &Window, mode: CursorMode) {
        self.cursor_mode = mode;
        match mode {
            CursorMode::Locked => {
                if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                    if let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined) {
                        debug!("cursor grab unavailable: {e}");
                    }
                }
                window.set_cursor_visible(false);
            }
            CursorMode::Free => {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
            }
        }
    }

    /// Changes the cursor mode without a window (headless runs, tests).
    pub fn set_cursor_mode_flag(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    /// Clears delta, scroll, and button edges.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        for b in &mut self.buttons {
            b.pressed = false;
            b.released = false;
        }
    }

    /// Cursor position in window-logical pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Motion accumulated this frame, window convention (`+Y` down).
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Scroll lines accumulated this frame.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Whether `button` is held.
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].held)
    }

    /// Whether `button` went down this frame.
    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].pressed)
    }

    /// Whether `button` went up this frame.
    #[must_use]
    pub fn just_button_released(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].released)
    }

    /// Current cursor mode.
    #[must_use]
    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }
}

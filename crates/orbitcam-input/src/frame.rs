//! Per-frame input snapshot.

use glam::Vec2;

use crate::bindings::{Action, InputMap};
use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Everything the input bridge reads in one Update phase, decoupled from
/// winit so gameplay code can be driven by scripts and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// `x` = horizontal (right positive), `y` = vertical (forward positive),
    /// each in `[-1, 1]`.
    pub movement: Vec2,
    /// Scroll lines this frame, positive = zoom in.
    pub scroll: f32,
    /// Look delta in axis units, `x` right positive, `y` up positive.
    pub look: Vec2,
    /// Look button held.
    pub look_held: bool,
    /// Align button held.
    pub align_held: bool,
}

impl InputFrame {
    /// Samples the trackers through `map`. Mouse motion is scaled by
    /// `sensitivity` and flipped so that moving the mouse up is positive.
    #[must_use]
    pub fn sample(
        keyboard: &KeyboardState,
        mouse: &MouseState,
        map: &InputMap,
        sensitivity: f32,
    ) -> Self {
        let delta = mouse.delta();
        Self {
            movement: Vec2::new(
                map.axis(Action::MoveLeft, Action::MoveRight, keyboard, mouse),
                map.axis(Action::MoveBack, Action::MoveForward, keyboard, mouse),
            ),
            scroll: mouse.scroll(),
            look: Vec2::new(delta.x, -delta.y) * sensitivity,
            look_held: map.is_active(Action::Look, keyboard, mouse),
            align_held: map.is_active(Action::AlignToCamera, keyboard, mouse),
        }
    }

    /// Whether either movement axis is non-zero.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.movement != Vec2::ZERO
    }
}

//! Action bindings: which keys and buttons drive which gameplay action.

use std::collections::HashMap;

use orbitcam_config::{InputConfig, MouseButtonName};
use serde::{Deserialize, Serialize};
use tracing::warn;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Gameplay actions the input bridge reads.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Positive vertical movement axis.
    MoveForward,
    /// Negative vertical movement axis.
    MoveBack,
    /// Negative horizontal movement axis.
    MoveLeft,
    /// Positive horizontal movement axis.
    MoveRight,
    /// Hold to orbit the camera with the mouse.
    Look,
    /// Hold together with [`Action::Look`] to face the camera direction and run.
    AlignToCamera,
}

impl Action {
    /// Every action, in a stable order.
    pub const ALL: [Action; 6] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Look,
        Action::AlignToCamera,
    ];

    /// Name used in `input.keybindings`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveForward => "MoveForward",
            Action::MoveBack => "MoveBack",
            Action::MoveLeft => "MoveLeft",
            Action::MoveRight => "MoveRight",
            Action::Look => "Look",
            Action::AlignToCamera => "AlignToCamera",
        }
    }

    /// Inverse of [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// A physical input that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBinding {
    /// Keyboard key by physical location.
    Key(KeyCode),
    /// Mouse button.
    Mouse(MouseButton),
}

impl InputBinding {
    fn is_held(self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            InputBinding::Key(code) => keyboard.is_pressed(code),
            InputBinding::Mouse(button) => mouse.is_button_pressed(button),
        }
    }
}

/// Parses a key name as written in config files (the `KeyCode` variant
/// name, e.g. `"KeyW"`, `"ArrowUp"`, `"Space"`).
#[must_use]
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let code = match name {
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Space" => KeyCode::Space,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "AltLeft" => KeyCode::AltLeft,
        "Tab" => KeyCode::Tab,
        "Enter" => KeyCode::Enter,
        _ => {
            let letter = name.strip_prefix("Key")?;
            let mut chars = letter.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return None;
            };
            letter_key(c.to_ascii_uppercase())?
        }
    };
    Some(code)
}

fn letter_key(c: char) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    if c.is_ascii_uppercase() {
        Some(LETTERS[(c as u8 - b'A') as usize])
    } else {
        None
    }
}

fn mouse_button(name: MouseButtonName) -> MouseButton {
    match name {
        MouseButtonName::Left => MouseButton::Left,
        MouseButtonName::Right => MouseButton::Right,
        MouseButtonName::Middle => MouseButton::Middle,
    }
}

/// Action → bindings table. An action is active when any binding is held.
#[derive(Debug, Clone, PartialEq)]
pub struct InputMap {
    bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for InputMap {
    /// WASD and arrow keys for movement, right mouse to look, left mouse to
    /// align.
    fn default() -> Self {
        use InputBinding::{Key, Mouse};
        let bindings = HashMap::from([
            (
                Action::MoveForward,
                vec![Key(KeyCode::KeyW), Key(KeyCode::ArrowUp)],
            ),
            (
                Action::MoveBack,
                vec![Key(KeyCode::KeyS), Key(KeyCode::ArrowDown)],
            ),
            (
                Action::MoveLeft,
                vec![Key(KeyCode::KeyA), Key(KeyCode::ArrowLeft)],
            ),
            (
                Action::MoveRight,
                vec![Key(KeyCode::KeyD), Key(KeyCode::ArrowRight)],
            ),
            (Action::Look, vec![Mouse(MouseButton::Right)]),
            (Action::AlignToCamera, vec![Mouse(MouseButton::Left)]),
        ]);
        Self { bindings }
    }
}

impl InputMap {
    /// Defaults with the config's look/align buttons and key overrides
    /// applied. Unknown action or key names are logged and skipped.
    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        let mut map = Self::default();
        map.bind(
            Action::Look,
            vec![InputBinding::Mouse(mouse_button(config.look_button))],
        );
        map.bind(
            Action::AlignToCamera,
            vec![InputBinding::Mouse(mouse_button(config.align_button))],
        );

        for (action_name, key_name) in &config.keybindings {
            let Some(action) = Action::from_name(action_name) else {
                warn!("ignoring keybinding for unknown action `{action_name}`");
                continue;
            };
            let Some(code) = parse_key_code(key_name) else {
                warn!("ignoring unknown key `{key_name}` for action `{action_name}`");
                continue;
            };
            map.bind(action, vec![InputBinding::Key(code)]);
        }
        map
    }

    /// Replaces the bindings of `action`.
    pub fn bind(&mut self, action: Action, bindings: Vec<InputBinding>) {
        self.bindings.insert(action, bindings);
    }

    /// Bindings of `action`.
    #[must_use]
    pub fn bindings(&self, action: Action) -> &[InputBinding] {
        self.bindings.get(&action).map_or(&[], Vec::as_slice)
    }

    /// Whether any binding of `action` is held.
    #[must_use]
    pub fn is_active(&self, action: Action, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        self.bindings(action)
            .iter()
            .any(|b| b.is_held(keyboard, mouse))
    }

    /// Digital axis in `{-1, 0, 1}` from a negative and a positive action.
    #[must_use]
    pub fn axis(
        &self,
        negative: Action,
        positive: Action,
        keyboard: &KeyboardState,
        mouse: &MouseState,
    ) -> f32 {
        let mut value = 0.0;
        if self.is_active(positive, keyboard, mouse) {
            value += 1.0;
        }
        if self.is_active(negative, keyboard, mouse) {
            value -= 1.0;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::RawKeyEvent;
    use winit::event::ElementState;

    fn hold(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::code(code, ElementState::Pressed));
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
        assert_eq!(Action::from_name("Jump"), None);
    }

    #[test]
    fn test_parse_key_codes() {
        assert_eq!(parse_key_code("KeyW"), Some(KeyCode::KeyW));
        assert_eq!(parse_key_code("Keyq"), Some(KeyCode::KeyQ));
        assert_eq!(parse_key_code("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(parse_key_code("KeyWW"), None);
        assert_eq!(parse_key_code("Key1"), None);
        assert_eq!(parse_key_code("Banana"), None);
    }

    #[test]
    fn test_default_axes() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        let ms = MouseState::new();
        assert_eq!(
            map.axis(Action::MoveBack, Action::MoveForward, &kb, &ms),
            0.0
        );
        hold(&mut kb, KeyCode::ArrowUp);
        assert_eq!(
            map.axis(Action::MoveBack, Action::MoveForward, &kb, &ms),
            1.0
        );
        hold(&mut kb, KeyCode::KeyS);
        assert_eq!(
            map.axis(Action::MoveBack, Action::MoveForward, &kb, &ms),
            0.0
        );
        hold(&mut kb, KeyCode::KeyA);
        assert_eq!(
            map.axis(Action::MoveLeft, Action::MoveRight, &kb, &ms),
            -1.0
        );
    }

    #[test]
    fn test_config_overrides() {
        let mut config = InputConfig::default();
        config.look_button = MouseButtonName::Middle;
        config
            .keybindings
            .insert("MoveForward".to_string(), "KeyI".to_string());
        config
            .keybindings
            .insert("Fly".to_string(), "KeyF".to_string());
        config
            .keybindings
            .insert("MoveBack".to_string(), "NotAKey".to_string());

        let map = InputMap::from_config(&config);
        assert_eq!(
            map.bindings(Action::MoveForward),
            &[InputBinding::Key(KeyCode::KeyI)]
        );
        assert_eq!(
            map.bindings(Action::Look),
            &[InputBinding::Mouse(MouseButton::Middle)]
        );
        // Invalid override keeps the default.
        assert_eq!(map.bindings(Action::MoveBack).len(), 2);
    }

    #[test]
    fn test_mouse_binding_active() {
        let map = InputMap::default();
        let kb = KeyboardState::new();
        let mut ms = MouseState::new();
        assert!(!map.is_active(Action::Look, &kb, &ms));
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(map.is_active(Action::Look, &kb, &ms));
    }
}

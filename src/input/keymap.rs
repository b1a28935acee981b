//! Host keyboard to logical button mapping

use super::Button;
use sdl2::keyboard::Keycode;
use std::collections::BTreeMap;

/// Ordered list of key bindings. Several keys may map to one button.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(Keycode, Button)>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(&mut self, key: Keycode, button: Button) {
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, button));
    }

    pub fn lookup(&self, key: Keycode) -> Option<Button> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, b)| *b)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Build from SDL key names (e.g. "Left Ctrl", "W") as found in the
    /// config file. Unknown key names are skipped with a warning.
    pub fn from_names(names: &BTreeMap<String, Button>) -> Self {
        let mut map = Self::new();
        for (name, button) in names {
            match Keycode::from_name(name) {
                Some(key) => map.bind(key, *button),
                None => tracing::warn!("Unknown key name '{}' in keymap, skipping", name),
            }
        }
        map
    }
}

impl Default for KeyMap {
    /// Arrows and WASD move, Ctrl fires, Space uses, Escape opens the menu,
    /// Shift runs
    fn default() -> Self {
        let mut map = Self::new();
        for (key, button) in [
            (Keycode::Up, Button::Up),
            (Keycode::W, Button::Up),
            (Keycode::Down, Button::Down),
            (Keycode::S, Button::Down),
            (Keycode::Left, Button::Left),
            (Keycode::A, Button::Left),
            (Keycode::Right, Button::Right),
            (Keycode::D, Button::Right),
            (Keycode::LCtrl, Button::Fire),
            (Keycode::RCtrl, Button::Fire),
            (Keycode::Space, Button::Use),
            (Keycode::Escape, Button::Menu),
            (Keycode::LShift, Button::Run),
            (Keycode::RShift, Button::Run),
        ] {
            map.bind(key, button);
        }
        map
    }
}

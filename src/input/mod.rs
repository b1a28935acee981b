//! Logical button input
//!
//! Buttons are single bits with fixed values so the mask can be handed to and
//! from hardware drivers unchanged. `InputState` is shared between whatever
//! produces press/release events (keyboard pump, MQTT thread, GPIO interrupt)
//! and the engine tick that reads a snapshot of it.

pub mod keymap;
pub mod remote;

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

// ============================================================================
// Button
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Button {
    Up = 0x01,
    Down = 0x02,
    Left = 0x04,
    Right = 0x08,
    Fire = 0x10,
    Use = 0x20,
    Menu = 0x40,
    Run = 0x80,
}

impl Button {
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Fire,
        Self::Use,
        Self::Menu,
        Self::Run,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Fire => "fire",
            Self::Use => "use",
            Self::Menu => "menu",
            Self::Run => "run",
        }
    }

    /// Parse a button name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }
}

// ============================================================================
// ButtonSet
// ============================================================================

/// Set of held buttons as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    #[inline]
    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Held buttons in bit order
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for b in iter {
            set.insert(b);
        }
        set
    }
}

// ============================================================================
// InputState
// ============================================================================

/// Currently held buttons plus the last known pointer position
///
/// All methods take `&self`; share it behind an `Arc` with event producers.
/// The button mask is a single atomic byte so a snapshot is never torn.
#[derive(Debug, Default)]
pub struct InputState {
    keys: AtomicU8,
    pointer: Mutex<Option<(i32, i32)>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release every button and forget the pointer
    pub fn initialize(&self) {
        self.keys.store(0, Ordering::SeqCst);
        *self.pointer.lock().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("Input system initialized");
    }

    /// Mark `button` held. Pressing a held button changes nothing.
    pub fn key_down(&self, button: Button) {
        self.keys.fetch_or(button.bit(), Ordering::SeqCst);
    }

    /// Mark `button` released. Releasing an unheld button changes nothing.
    pub fn key_up(&self, button: Button) {
        self.keys.fetch_and(!button.bit(), Ordering::SeqCst);
    }

    /// Snapshot of held buttons as of the latest press/release
    pub fn current_keys(&self) -> ButtonSet {
        ButtonSet::from_bits(self.keys.load(Ordering::SeqCst))
    }

    /// Last write wins
    pub fn set_pointer(&self, x: i32, y: i32) {
        *self.pointer.lock().unwrap_or_else(PoisonError::into_inner) = Some((x, y));
    }

    pub fn pointer(&self) -> Option<(i32, i32)> {
        *self.pointer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_button_bits_fixed() {
        let bits: Vec<u8> = Button::ALL.iter().map(|b| b.bit()).collect();
        assert_eq!(bits, vec![0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80]);
    }

    #[test]
    fn test_button_names_round_trip() {
        for b in Button::ALL {
            assert_eq!(Button::from_name(b.name()), Some(b));
        }
        assert_eq!(Button::from_name(" FIRE "), Some(Button::Fire));
        assert_eq!(Button::from_name("jump"), None);
    }

    #[test]
    fn test_new_state_is_empty() {
        let input = InputState::new();
        assert!(input.current_keys().is_empty());
        assert_eq!(input.pointer(), None);
    }

    #[test]
    fn test_key_down_idempotent() {
        let once = InputState::new();
        once.key_down(Button::Fire);

        let twice = InputState::new();
        twice.key_down(Button::Fire);
        twice.key_down(Button::Fire);

        assert_eq!(once.current_keys(), twice.current_keys());
        assert_eq!(twice.current_keys().bits(), 0x10);
    }

    #[test]
    fn test_key_up_of_unheld_is_noop() {
        let input = InputState::new();
        input.key_down(Button::Left);
        input.key_up(Button::Right);
        assert_eq!(input.current_keys().bits(), Button::Left.bit());
    }

    #[test]
    fn test_held_until_released() {
        let input = InputState::new();
        input.key_down(Button::Up);
        input.key_down(Button::Run);
        for _ in 0..3 {
            assert!(input.current_keys().contains(Button::Up));
        }
        input.key_up(Button::Up);
        let keys = input.current_keys();
        assert!(!keys.contains(Button::Up));
        assert!(keys.contains(Button::Run));
    }

    #[test]
    fn test_initialize_resets() {
        let input = InputState::new();
        input.key_down(Button::Menu);
        input.set_pointer(3, 4);
        input.initialize();
        assert!(input.current_keys().is_empty());
        assert_eq!(input.pointer(), None);
    }

    #[test]
    fn test_pointer_last_write_wins() {
        let input = InputState::new();
        input.set_pointer(1, 2);
        input.set_pointer(-5, 9);
        assert_eq!(input.pointer(), Some((-5, 9)));
    }

    #[test]
    fn test_button_set_ops() {
        let mut set: ButtonSet = [Button::Down, Button::Use].into_iter().collect();
        assert_eq!(set.bits(), 0x22);
        set.insert(Button::Down);
        set.remove(Button::Use);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Button::Down]);
    }

    #[test]
    fn test_concurrent_presses_are_not_lost() {
        let input = Arc::new(InputState::new());
        let handles: Vec<_> = Button::ALL
            .into_iter()
            .map(|b| {
                let input = Arc::clone(&input);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        input.key_down(b);
                        input.key_up(b);
                    }
                    input.key_down(b);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(input.current_keys().bits(), 0xFF);
    }
}

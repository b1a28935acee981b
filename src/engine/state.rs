use crate::input::{Button, ButtonSet};

/// Vertical move per tick while Up/Down is held
pub const MOVE_STEP: i32 = 2;
/// Turn per tick while Left/Right is held, in degrees
pub const TURN_STEP: i32 = 5;
pub const START_HEALTH: i32 = 100;

/// Player and session state, mutated once per tick
///
/// `Default` is the state before any archive was loaded: everything zero and
/// inactive, so ticks do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameState {
    pub player_x: i32,
    pub player_y: i32,
    /// Degrees, always in [0, 360)
    angle: i32,
    pub health: i32,
    active: bool,
    frame_count: u32,
}

impl GameState {
    /// Fresh session: origin, facing 0, full health, active
    pub fn new() -> Self {
        Self {
            player_x: 0,
            player_y: 0,
            angle: 0,
            health: START_HEALTH,
            active: true,
            frame_count: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Set the facing angle, normalized into [0, 360)
    pub fn set_angle(&mut self, degrees: i32) {
        self.angle = degrees.rem_euclid(360);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop the session (game over / pause). Ticks become no-ops and there is
    /// no way back short of loading again.
    pub fn deactivate(&mut self) {
        if self.active {
            tracing::info!("Game deactivated at frame {}", self.frame_count);
        }
        self.active = false;
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Advance one frame using a snapshot of held buttons
    pub fn tick(&mut self, keys: ButtonSet) {
        if !self.active {
            return;
        }

        self.frame_count = self.frame_count.wrapping_add(1);

        let mut dy = 0;
        let mut turn = 0;
        if keys.contains(Button::Up) {
            dy -= MOVE_STEP;
        }
        if keys.contains(Button::Down) {
            dy += MOVE_STEP;
        }
        if keys.contains(Button::Left) {
            turn -= TURN_STEP;
        }
        if keys.contains(Button::Right) {
            turn += TURN_STEP;
        }

        self.player_y = self.player_y.wrapping_add(dy);
        self.set_angle(self.angle + turn);

        // Fire, Use and Menu arrive as their own bits but weapons,
        // doors/switches and the menu are not wired up yet.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(buttons: &[Button]) -> ButtonSet {
        buttons.iter().copied().collect()
    }

    #[test]
    fn test_default_is_inactive() {
        let state = GameState::default();
        assert!(!state.is_active());
        assert_eq!(state.health, 0);
    }

    #[test]
    fn test_new_defaults() {
        let state = GameState::new();
        assert_eq!((state.player_x, state.player_y), (0, 0));
        assert_eq!(state.angle(), 0);
        assert_eq!(state.health, 100);
        assert!(state.is_active());
        assert_eq!(state.frame_count(), 0);
    }

    #[test]
    fn test_up_down_move_vertically() {
        let mut state = GameState::new();
        state.tick(keys(&[Button::Up]));
        assert_eq!(state.player_y, -2);
        state.tick(keys(&[Button::Down]));
        state.tick(keys(&[Button::Down]));
        assert_eq!(state.player_y, 2);
        state.tick(keys(&[Button::Up, Button::Down]));
        assert_eq!(state.player_y, 2);
        assert_eq!(state.player_x, 0);
        assert_eq!(state.frame_count(), 4);
    }

    #[test]
    fn test_left_wraps_below_zero() {
        let mut state = GameState::new();
        state.set_angle(2);
        state.tick(keys(&[Button::Left]));
        assert_eq!(state.angle(), 357);
    }

    #[test]
    fn test_right_wraps_at_360() {
        let mut state = GameState::new();
        state.set_angle(355);
        state.tick(keys(&[Button::Right]));
        assert_eq!(state.angle(), 0);
    }

    #[test]
    fn test_angle_always_normalized() {
        let mut state = GameState::new();
        for _ in 0..200 {
            state.tick(keys(&[Button::Left]));
            assert!((0..360).contains(&state.angle()));
        }
        state.set_angle(-725);
        assert_eq!(state.angle(), 355);
        state.set_angle(1080);
        assert_eq!(state.angle(), 0);
    }

    #[test]
    fn test_action_buttons_change_nothing_but_frame() {
        let mut state = GameState::new();
        state.tick(keys(&[Button::Fire, Button::Use, Button::Menu, Button::Run]));
        let mut expected = GameState::new();
        expected.frame_count = 1;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_inactive_tick_is_noop() {
        let mut state = GameState::new();
        state.tick(keys(&[Button::Up]));
        state.deactivate();
        let before = state;
        state.tick(keys(&[Button::Up, Button::Left]));
        assert_eq!(state, before);
    }

    #[test]
    fn test_frame_counter_wraps() {
        let mut state = GameState::new();
        state.frame_count = u32::MAX;
        state.tick(ButtonSet::EMPTY);
        assert_eq!(state.frame_count(), 0);
    }
}

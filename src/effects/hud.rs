use super::palette::{HEADING, HEALTH_FRAME, HEALTH_GOOD, HEALTH_LOW};
use super::Effect;
use crate::display::Framebuffer;
use crate::engine::GameState;

const MARGIN: i32 = 4;
const BAR_WIDTH: i32 = 52;
const BAR_HEIGHT: i32 = 6;
const LOW_HEALTH: i32 = 25;
const HEADING_HEIGHT: i32 = 6;

/// Status overlay: health bar bottom-left, heading tick along the top edge
#[derive(Debug, Default)]
pub struct Hud;

impl Hud {
    pub fn new() -> Self {
        Self
    }

    /// Column of the heading marker for `angle` degrees
    pub fn heading_x(angle: i32, width: i32) -> i32 {
        angle.rem_euclid(360) * width / 360
    }
}

impl Effect for Hud {
    fn render(&self, fb: &mut Framebuffer, _frame: u16, state: &GameState) {
        let width = fb.width() as i32;
        let height = fb.height() as i32;

        // Health: 100 fills the bar interior, anything outside 0..=100 is clamped
        let x = MARGIN;
        let y = height - MARGIN - BAR_HEIGHT;
        fb.draw_rect_outline(x, y, BAR_WIDTH, BAR_HEIGHT, HEALTH_FRAME);
        let inner = BAR_WIDTH - 2;
        let fill = state.health.clamp(0, 100) * inner / 100;
        let color = if state.health <= LOW_HEALTH {
            HEALTH_LOW
        } else {
            HEALTH_GOOD
        };
        fb.fill_rect(x + 1, y + 1, fill, BAR_HEIGHT - 2, color);

        let hx = Self::heading_x(state.angle(), width);
        fb.vline(hx, 0, HEADING_HEIGHT - 1, HEADING);
    }

    fn name(&self) -> &str {
        "HUD"
    }

    fn gameplay(&self) -> bool {
        true
    }
}

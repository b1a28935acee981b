mod corridor;
mod hud;

pub use corridor::Corridor;
pub use hud::Hud;

use crate::display::Framebuffer;
use crate::engine::GameState;

/// A layer composited into each frame
///
/// Rendering is a pure function of (animation frame, game state, buffer
/// size) so identical inputs always produce identical pixels.
pub trait Effect {
    fn render(&self, fb: &mut Framebuffer, frame: u16, state: &GameState);

    /// Effect name for logs/debugging
    fn name(&self) -> &str;

    /// Whether this layer depends on gameplay. Such layers are skipped while
    /// the game is inactive.
    fn gameplay(&self) -> bool {
        false
    }
}

/// Palette used by the placeholder scene, quantized at compile time
pub mod palette {
    use crate::display::{quantize_color, Rgb565};

    pub const BACKGROUND: Rgb565 = quantize_color(32, 32, 32);
    pub const WALL: Rgb565 = quantize_color(128, 64, 0);
    pub const FLOOR: Rgb565 = quantize_color(64, 64, 64);
    pub const CEILING: Rgb565 = quantize_color(32, 32, 64);
    pub const CROSSHAIR: Rgb565 = Rgb565::WHITE;
    pub const HEALTH_FRAME: Rgb565 = quantize_color(200, 200, 200);
    pub const HEALTH_GOOD: Rgb565 = quantize_color(0, 200, 0);
    pub const HEALTH_LOW: Rgb565 = quantize_color(220, 0, 0);
    pub const HEADING: Rgb565 = quantize_color(255, 220, 0);
}

//! Frame composition

use crate::display::Framebuffer;
use crate::effects::{palette, Corridor, Effect, Hud};
use crate::engine::GameState;

/// Paints complete frames from game state
///
/// Holds the animation counter; everything else comes in as arguments, so
/// `draw` with the same counter and state always yields the same pixels.
pub struct Renderer {
    frame: u16,
    layers: Vec<Box<dyn Effect>>,
}

impl Renderer {
    /// Default layer stack: placeholder corridor with the HUD on top
    pub fn new() -> Self {
        Self::with_layers(vec![Box::new(Corridor::new()), Box::new(Hud::new())])
    }

    pub fn with_layers(layers: Vec<Box<dyn Effect>>) -> Self {
        Self { frame: 0, layers }
    }

    /// Animation counter, wraps at u16
    pub fn frame(&self) -> u16 {
        self.frame
    }

    pub fn set_frame(&mut self, frame: u16) {
        self.frame = frame;
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    /// Advance the animation one step and paint the frame
    pub fn render_frame(&mut self, fb: &mut Framebuffer, state: &GameState) {
        self.frame = self.frame.wrapping_add(1);
        self.draw(fb, state);
    }

    /// Paint the current animation step without advancing it
    pub fn draw(&self, fb: &mut Framebuffer, state: &GameState) {
        fb.clear(palette::BACKGROUND);
        for layer in &self.layers {
            if layer.gameplay() && !state.is_active() {
                continue;
            }
            layer.render(fb, self.frame, state);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

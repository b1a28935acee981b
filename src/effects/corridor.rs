use super::palette::{CEILING, CROSSHAIR, FLOOR, WALL};
use super::Effect;
use crate::display::Framebuffer;
use crate::engine::GameState;

const WALL_COUNT: i32 = 10;
const WALL_SPACING: i32 = 32;
const WALL_WIDTH: i32 = 30;
const WALL_TOP: i32 = 50;
const WALL_HEIGHT: i32 = 100;
const STRIP_HEIGHT: i32 = 50;
const CROSSHAIR_ARM: i32 = 10;

/// Placeholder scene until real map rendering exists: a row of wall blocks
/// scrolling right one pixel per frame between a ceiling and floor strip,
/// with a crosshair in the middle.
#[derive(Debug, Default)]
pub struct Corridor;

impl Corridor {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for Corridor {
    fn render(&self, fb: &mut Framebuffer, frame: u16, _state: &GameState) {
        let width = fb.width() as i32;
        let height = fb.height() as i32;

        for i in 0..WALL_COUNT {
            let x = (i * WALL_SPACING + frame as i32) % width;
            fb.fill_rect(x, WALL_TOP, WALL_WIDTH, WALL_HEIGHT, WALL);
        }

        fb.fill_rect(0, height - STRIP_HEIGHT, width, STRIP_HEIGHT, FLOOR);
        fb.fill_rect(0, 0, width, STRIP_HEIGHT, CEILING);

        let cx = width / 2;
        let cy = height / 2;
        fb.draw_line(cx - CROSSHAIR_ARM, cy, cx + CROSSHAIR_ARM, cy, CROSSHAIR);
        fb.draw_line(cx, cy - CROSSHAIR_ARM, cx, cy + CROSSHAIR_ARM, CROSSHAIR);
    }

    fn name(&self) -> &str {
        "Corridor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::HeapRegion;

    #[test]
    fn test_layout() {
        let mut fb = Framebuffer::initialize(320, 240, &mut HeapRegion).unwrap();
        Corridor::new().render(&mut fb, 0, &GameState::new());

        assert_eq!(fb.get_pixel(5, 10), Some(CEILING));
        assert_eq!(fb.get_pixel(5, 230), Some(FLOOR));
        // First wall at x=0..30 for frame 0
        assert_eq!(fb.get_pixel(0, 60), Some(WALL));
        assert_eq!(fb.get_pixel(160, 120), Some(CROSSHAIR));
        assert_eq!(fb.get_pixel(150, 120), Some(CROSSHAIR));
        assert_eq!(fb.get_pixel(160, 130), Some(CROSSHAIR));
    }

    #[test]
    fn test_walls_scroll_with_frame() {
        let mut fb = Framebuffer::initialize(320, 240, &mut HeapRegion).unwrap();
        Corridor::new().render(&mut fb, 3, &GameState::new());
        assert_ne!(fb.get_pixel(2, 60), Some(WALL));
        assert_eq!(fb.get_pixel(3, 60), Some(WALL));
    }
}

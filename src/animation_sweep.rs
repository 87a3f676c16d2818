use crate::animation::Animation;
use crate::framebuffer::Framebuffer;
use crate::geometry::{PixelValue, Position, HEIGHT, PIXEL_MAX, WIDTH};

use fugit::MicrosDurationU32;

const CENTER: Position = Position::new(HEIGHT as i8 / 2, WIDTH as i8 / 2);
const BORDER_LEN: usize = 2 * (WIDTH + HEIGHT) - 4;
const FRAME_LEVEL: PixelValue = 8;

/// `index`-th border cell, walking clockwise from the top left corner.
fn border_point(index: usize) -> Position {
    let (w, h) = (WIDTH - 1, HEIGHT - 1);
    let (row, col) = match index % BORDER_LEN {
        i if i <= w => (0, i),
        i if i <= w + h => (i - w, w),
        i if i <= 2 * w + h => (h, 2 * w + h - i),
        i => (BORDER_LEN - i, 0),
    };
    Position::new(row as i8, col as i8)
}

/// Radar-style hand sweeping around a dim outline of the display.
pub struct Sweep {
    step: usize,
}

impl Sweep {
    pub const fn new() -> Self {
        Self { step: 0 }
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Sweep {
    fn render_frame(&mut self, fb: &mut Framebuffer) -> MicrosDurationU32 {
        fb.clear();
        fb.draw_box(
            Position::new(0, 0),
            Position::new(HEIGHT as i8 - 1, WIDTH as i8 - 1),
            false,
            FRAME_LEVEL,
        );
        fb.draw_line(CENTER, border_point(self.step), PIXEL_MAX);

        self.step = (self.step + 1) % BORDER_LEN;
        MicrosDurationU32::millis(60)
    }
}

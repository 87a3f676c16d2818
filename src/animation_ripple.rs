use crate::animation::Animation;
use crate::framebuffer::Framebuffer;
use crate::geometry::{PixelValue, Position, HEIGHT, PIXEL_MAX, WIDTH};

use fugit::MicrosDurationU32;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoroshiro128StarStar;

const MAX_RADIUS: u8 = 3;

#[derive(Clone, Copy)]
struct Ripple {
    row: u8,
    col: u8,
    r: u8,
}

impl Ripple {
    const fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            r: 0xFF,
        }
    }

    fn is_active(&self) -> bool {
        self.r <= MAX_RADIUS
    }

    fn init(&mut self, r: u32) {
        // Column from the low byte, row from the next one
        self.col = ((r & 0xFF) % WIDTH as u32) as u8;
        self.row = (((r >> 8) & 0xFF) % HEIGHT as u32) as u8;
        self.r = 0;
    }

    fn step(&mut self) {
        self.r += 1;
    }

    fn brightness(&self) -> PixelValue {
        PIXEL_MAX >> self.r
    }

    /// Outline of the ring at the current radius, squashed against the display edges.
    fn corners(&self) -> (Position, Position) {
        let (row, col, r) = (i16::from(self.row), i16::from(self.col), i16::from(self.r));
        (clip(row - r, col - r), clip(row + r, col + r))
    }

    fn draw(&self, fb: &mut Framebuffer) {
        let (top_left, bottom_right) = self.corners();
        fb.draw_box(top_left, bottom_right, false, self.brightness());
    }
}

fn clip(row: i16, col: i16) -> Position {
    Position::new(
        row.clamp(0, HEIGHT as i16 - 1) as i8,
        col.clamp(0, WIDTH as i16 - 1) as i8,
    )
}

const MAX_RIPPLES: usize = 3;

pub struct RippleAnimation {
    rng: Xoroshiro128StarStar,
    ripples: [Ripple; MAX_RIPPLES],
}

impl RippleAnimation {
    pub fn new() -> Self {
        Self {
            rng: Xoroshiro128StarStar::seed_from_u64(0xC063_7BB4_8326_CD62),
            ripples: [Ripple::new(); MAX_RIPPLES],
        }
    }
}

impl Default for RippleAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for RippleAnimation {
    fn render_frame(&mut self, fb: &mut Framebuffer) -> MicrosDurationU32 {
        // Grow all existing ripples
        for ripple in self.ripples.iter_mut() {
            if ripple.is_active() {
                ripple.step();
            }
        }

        // Spawn new ripple in 1/2 of cases
        if (self.rng.next_u32() & 0b1) == 0 {
            for ripple in self.ripples.iter_mut() {
                if !ripple.is_active() {
                    ripple.init(self.rng.next_u32());
                    break;
                }
            }
        }

        // Older, dimmer rings first so fresh ones end up on top
        fb.clear();
        for r in (0..=MAX_RADIUS).rev() {
            for ripple in self.ripples.iter().filter(|ripple| ripple.r == r) {
                ripple.draw(fb);
            }
        }

        MicrosDurationU32::millis(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ripple_at(row: u8, col: u8) -> Ripple {
        let mut ripple = Ripple::new();
        ripple.init(u32::from(col) | (u32::from(row) << 8));
        ripple
    }

    #[test]
    fn init_places_ripple_on_display() {
        let ripple = ripple_at(5, 3);
        assert_eq!((ripple.row, ripple.col, ripple.r), (5, 3, 0));

        let mut ripple = Ripple::new();
        ripple.init(u32::MAX);
        assert!((ripple.row as usize) < HEIGHT && (ripple.col as usize) < WIDTH);
    }

    #[test]
    fn init_decodes_row_and_column_independently() {
        for row in 0..HEIGHT as u8 {
            for col in 0..WIDTH as u8 {
                let ripple = ripple_at(row, col);
                assert_eq!((ripple.row, ripple.col), (row, col));
            }
        }
    }

    #[test]
    fn ring_grows_and_dims() {
        let mut ripple = ripple_at(3, 2);
        let mut fb = Framebuffer::new();
        ripple.draw(&mut fb);
        assert_eq!(fb.pixel(Position::new(3, 2)), PIXEL_MAX);

        ripple.step();
        fb.clear();
        ripple.draw(&mut fb);
        assert_eq!(fb.pixel(Position::new(3, 2)), 0);
        assert_eq!(fb.pixel(Position::new(2, 1)), 63);
        assert_eq!(fb.pixel(Position::new(4, 3)), 63);
    }

    #[test]
    fn ring_is_clipped_at_the_edges() {
        let mut ripple = ripple_at(0, 0);
        ripple.step();
        ripple.step();
        assert_eq!(ripple.corners(), (Position::new(0, 0), Position::new(2, 2)));

        let mut ripple = ripple_at(6, 4);
        for _ in 0..MAX_RADIUS {
            ripple.step();
        }
        assert_eq!(ripple.corners(), (Position::new(3, 1), Position::new(6, 4)));
        assert_eq!(ripple.brightness(), 15);
    }

    #[test]
    fn ripple_retires_after_the_largest_ring() {
        let mut ripple = ripple_at(1, 1);
        for _ in 0..MAX_RADIUS {
            ripple.step();
            assert!(ripple.is_active());
        }
        ripple.step();
        assert!(!ripple.is_active());
    }

    #[test]
    fn frames_stay_within_ring_brightness() {
        let mut animation = RippleAnimation::new();
        let mut fb = Framebuffer::new();
        let levels = [0, 15, 31, 63, PIXEL_MAX];

        for _ in 0..100 {
            assert_eq!(animation.render_frame(&mut fb), MicrosDurationU32::millis(100));
            for row in 0..HEIGHT as i8 {
                for col in 0..WIDTH as i8 {
                    assert!(levels.contains(&fb.pixel(Position::new(row, col))));
                }
            }
        }
    }
}

use crate::animation::Animation;
use crate::framebuffer::Framebuffer;
use crate::geometry::{PixelValue, Position, HEIGHT, PIXEL_MAX, WIDTH};

use fugit::MicrosDurationU32;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

/// Brightness of a drop's head followed by the cells trailing above it.
const TRAIL: [PixelValue; 3] = [PIXEL_MAX, 40, 10];

#[derive(Clone, Copy)]
struct Raindrop {
    col: u8,
    row: u8,
}

impl Raindrop {
    const fn new() -> Self {
        Self { col: 0, row: 0xFF }
    }

    // Stays active until the end of its trail has left the bottom edge
    fn is_active(&self) -> bool {
        (self.row as usize) < HEIGHT + TRAIL.len() - 1
    }

    fn init(&mut self, r: u32) {
        self.col = (r % WIDTH as u32) as u8;
        self.row = 0;
    }

    fn step(&mut self) {
        self.row += 1;
    }

    fn draw(&self, fb: &mut Framebuffer) {
        for (behind, &value) in TRAIL.iter().enumerate() {
            let Some(row) = self.row.checked_sub(behind as u8) else {
                break;
            };
            if (row as usize) < HEIGHT {
                fb.set_pixel(Position::new(row as i8, self.col as i8), value);
            }
        }
    }
}

const MAX_DROPS: usize = 5;

pub struct Rain {
    rng: Xoshiro128StarStar,
    drops: [Raindrop; MAX_DROPS],
}

impl Rain {
    pub fn new() -> Self {
        Self {
            rng: Xoshiro128StarStar::seed_from_u64(0x9C63_EA21_046B_F751),
            drops: [Raindrop::new(); MAX_DROPS],
        }
    }
}

impl Default for Rain {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Rain {
    fn render_frame(&mut self, fb: &mut Framebuffer) -> MicrosDurationU32 {
        for drop in self.drops.iter_mut() {
            if drop.is_active() {
                drop.step();
            }
        }

        // Spawn new drop in 1/2 of cases
        if (self.rng.next_u32() & 0b1) == 0 {
            for drop in self.drops.iter_mut() {
                if !drop.is_active() {
                    drop.init(self.rng.next_u32());
                    break;
                }
            }
        }

        fb.clear();
        for drop in self.drops.iter() {
            if drop.is_active() {
                drop.draw(fb);
            }
        }

        MicrosDurationU32::millis(120)
    }
}

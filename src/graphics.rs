//! Lets embedded-graphics primitives, fonts and images draw into a [`Framebuffer`].
//!
//! Unlike the raw primitives, pixels that fall outside the display are dropped here, which is
//! what embedded-graphics drawables expect from a target.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::{Gray8, GrayColor};
use embedded_graphics_core::Pixel;

use crate::framebuffer::Framebuffer;
use crate::geometry::{PixelValue, Position, HEIGHT, WIDTH};

/// Maps 8-bit luma onto the 0..=127 intensity range.
pub fn intensity(color: Gray8) -> PixelValue {
    (color.luma() >> 1) as PixelValue
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(row), Ok(col)) = (i8::try_from(point.y), i8::try_from(point.x)) else {
                continue;
            };
            let pos = Position::new(row, col);
            if pos.is_on_display() {
                self.set_pixel(pos, intensity(color));
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let value = intensity(color);
        self.draw_box(
            Position::new(0, 0),
            Position::new(HEIGHT as i8 - 1, WIDTH as i8 - 1),
            true,
            value,
        );
        Ok(())
    }
}

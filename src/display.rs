use log::debug;

use crate::framebuffer::Framebuffer;
use crate::geometry::{Bitmap, PixelValue, Position, WIDTH};
use crate::matrix::ColumnDriver;
use crate::refresh::PHASE_STEPS;

/// Grayscale multiplexing engine for one matrix.
///
/// Drawing calls mutate the framebuffer directly; the next [`tick`](Self::tick) picks the
/// change up. `tick` must be called at a fixed rate by the owner (usually a timer interrupt),
/// and drawing must not run concurrently with it.
pub struct MatrixDisplay<D> {
    framebuffer: Framebuffer,
    driver: D,
    phase: u8,
    column: usize,
}

impl<D: ColumnDriver> MatrixDisplay<D> {
    pub const fn new(driver: D) -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            driver,
            phase: 0,
            column: 0,
        }
    }

    /// Blanks the frame, restarts the multiplexing cycle and puts every line in its
    /// inactive state.
    pub fn init(&mut self) -> Result<(), D::Error> {
        self.framebuffer.clear();
        self.phase = 0;
        self.column = 0;
        debug!("display init: {} columns, {} grayscale phases", WIDTH, PHASE_STEPS);
        self.driver.init()
    }

    /// Strobes the active column for the current grayscale phase, then advances both counters.
    pub fn tick(&mut self) -> Result<(), D::Error> {
        let rows = self.framebuffer.column_levels(self.column, self.phase);
        let shown = self.driver.show_column(self.column, &rows);

        self.phase = (self.phase + 1) % PHASE_STEPS;
        self.column = (self.column + 1) % WIDTH;
        shown
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    pub fn set_pixel(&mut self, pos: Position, value: PixelValue) {
        self.framebuffer.set_pixel(pos, value);
    }

    pub fn draw_line(&mut self, start: Position, end: Position, value: PixelValue) {
        self.framebuffer.draw_line(start, end, value);
    }

    pub fn draw_box(&mut self, top_left: Position, bottom_right: Position, fill: bool, value: PixelValue) {
        self.framebuffer.draw_box(top_left, bottom_right, fill, value);
    }

    pub fn show_bitmap(&mut self, bitmap: &Bitmap) {
        self.framebuffer.show_bitmap(bitmap);
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Grayscale phase the next tick will use.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Column the next tick will light.
    pub fn active_column(&self) -> usize {
        self.column
    }
}

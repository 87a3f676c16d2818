//! Fixed geometry of the matrix and the small value types the drawing API takes.

/// Number of columns on the matrix.
pub const WIDTH: usize = 5;
/// Number of rows on the matrix.
pub const HEIGHT: usize = 7;

/// Grayscale intensity of a single LED.
///
/// The magnitude is the brightness (0 is off, [`PIXEL_MAX`] is fully on). The sign is
/// stored but reserved: no primitive or the multiplexer gives it a meaning.
pub type PixelValue = i8;

/// Brightest representable intensity.
pub const PIXEL_MAX: PixelValue = 127;

/// One byte per column; bit `row` of byte `column` lights that pixel.
pub type Bitmap = [u8; WIDTH];

/// A cell on the display, with the origin in the top left corner.
///
/// Ordinates are signed so callers can do arithmetic around the edges before clipping;
/// only positions inside `[0, WIDTH) x [0, HEIGHT)` may be handed to a primitive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub const fn is_on_display(&self) -> bool {
        self.row >= 0 && (self.row as usize) < HEIGHT && self.col >= 0 && (self.col as usize) < WIDTH
    }

    /// Grid indices `(column, row)` for an on-display position.
    pub(crate) fn indices(&self) -> (usize, usize) {
        debug_assert!(self.is_on_display(), "position {:?} is off the display", self);
        (self.col as usize, self.row as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_on_display() {
        assert!(Position::new(0, 0).is_on_display());
        assert!(Position::new(HEIGHT as i8 - 1, WIDTH as i8 - 1).is_on_display());
    }

    #[test]
    fn negative_and_overflowing_ordinates_are_off_display() {
        assert!(!Position::new(-1, 0).is_on_display());
        assert!(!Position::new(0, -1).is_on_display());
        assert!(!Position::new(HEIGHT as i8, 0).is_on_display());
        assert!(!Position::new(0, WIDTH as i8).is_on_display());
        assert!(!Position::new(i8::MIN, i8::MAX).is_on_display());
    }
}

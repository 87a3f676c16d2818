use crate::geometry::{Bitmap, PixelValue, Position, HEIGHT, WIDTH};

/// In-memory grayscale image of the matrix, indexed `[column][row]`.
///
/// Every primitive expects its positions to already be on the display. Clipping is the
/// caller's job; debug builds assert the contract and release builds still panic on an
/// out-of-range index rather than touching memory outside the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Framebuffer {
    grid: [[PixelValue; HEIGHT]; WIDTH],
}

impl Framebuffer {
    pub const fn new() -> Self {
        Self {
            grid: [[0; HEIGHT]; WIDTH],
        }
    }

    pub fn clear(&mut self) {
        for column in self.grid.iter_mut() {
            column.fill(0);
        }
    }

    pub fn set_pixel(&mut self, pos: Position, value: PixelValue) {
        let (column, row) = pos.indices();
        self.grid[column][row] = value;
    }

    pub fn pixel(&self, pos: Position) -> PixelValue {
        let (column, row) = pos.indices();
        self.grid[column][row]
    }

    /// Replaces the whole frame with a binary image: set bits become 1, everything else 0.
    pub fn show_bitmap(&mut self, bitmap: &Bitmap) {
        self.clear();
        for (column, &bits) in bitmap.iter().enumerate() {
            for row in 0..HEIGHT {
                if bits & (1 << row) != 0 {
                    self.grid[column][row] = 1;
                }
            }
        }
    }

    /// Rasterizes the segment `start..=end` with integer Bresenham stepping.
    ///
    /// Both endpoints are drawn. The axis with the larger extent is stepped one cell at a
    /// time (columns win a tie) while the other follows the accumulated error term, so
    /// vertical segments and single points come out as expected.
    pub fn draw_line(&mut self, start: Position, end: Position, value: PixelValue) {
        // i16 so the deltas of two i8 ordinates cannot wrap.
        let d_col = i16::from(end.col) - i16::from(start.col);
        let d_row = i16::from(end.row) - i16::from(start.row);
        let (step_col, step_row) = (d_col.signum(), d_row.signum());
        let (dx, dy) = (d_col.abs(), d_row.abs());

        let mut col = i16::from(start.col);
        let mut row = i16::from(start.row);

        if dx >= dy {
            let mut error = 2 * dy - dx;
            for _ in 0..=dx {
                self.set_pixel(Position::new(row as i8, col as i8), value);
                if error > 0 {
                    row += step_row;
                    error -= 2 * dx;
                }
                error += 2 * dy;
                col += step_col;
            }
        } else {
            let mut error = 2 * dx - dy;
            for _ in 0..=dy {
                self.set_pixel(Position::new(row as i8, col as i8), value);
                if error > 0 {
                    col += step_col;
                    error -= 2 * dy;
                }
                error += 2 * dx;
                row += step_row;
            }
        }
    }

    /// Draws the inclusive rectangle spanned by the two corners, either solid or as an outline.
    ///
    /// The outline writes both vertical edges in full and then only the inner cells of the
    /// horizontal edges, so each corner is written exactly once.
    pub fn draw_box(&mut self, top_left: Position, bottom_right: Position, fill: bool, value: PixelValue) {
        debug_assert!(
            top_left.row <= bottom_right.row && top_left.col <= bottom_right.col,
            "box corners {:?} and {:?} are out of order",
            top_left,
            bottom_right
        );

        if fill {
            for col in top_left.col..=bottom_right.col {
                for row in top_left.row..=bottom_right.row {
                    self.set_pixel(Position::new(row, col), value);
                }
            }
            return;
        }

        for row in top_left.row..=bottom_right.row {
            self.set_pixel(Position::new(row, top_left.col), value);
            self.set_pixel(Position::new(row, bottom_right.col), value);
        }
        for col in (top_left.col + 1)..bottom_right.col {
            self.set_pixel(Position::new(top_left.row, col), value);
            self.set_pixel(Position::new(bottom_right.row, col), value);
        }
    }

    /// On/off state of every row in `column` at grayscale `phase`.
    ///
    /// A pixel of magnitude `v` is on for the phases `0..v`, which gives it a duty cycle of
    /// `v / 128` once the phase counter has gone all the way round.
    pub fn column_levels(&self, column: usize, phase: u8) -> [bool; HEIGHT] {
        let cells = &self.grid[column];
        core::array::from_fn(|row| cells[row].unsigned_abs() > phase)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

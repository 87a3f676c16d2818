use embedded_hal::digital::{OutputPin, PinState};
use log::debug;

use crate::geometry::{HEIGHT, WIDTH};

/// Hardware side of the multiplexer: lights one column at a time from final on/off decisions.
pub trait ColumnDriver {
    type Error;

    /// Drives every row and column line to its inactive level.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Switches off the previously shown column, puts `rows` on the row lines and then
    /// switches `column` on. The column is only enabled once every row holds its new level,
    /// so nothing meant for this column ghosts onto the last one.
    fn show_column(&mut self, column: usize, rows: &[bool; HEIGHT]) -> Result<(), Self::Error>;
}

/// Which electrical level lights a line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Polarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub const fn level(self, active: bool) -> PinState {
        match (self, active) {
            (Polarity::ActiveLow, true) | (Polarity::ActiveHigh, false) => PinState::Low,
            (Polarity::ActiveLow, false) | (Polarity::ActiveHigh, true) => PinState::High,
        }
    }
}

/// Line polarities. The defaults match a matrix with active-low rows and columns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatrixConfig {
    pub row_polarity: Polarity,
    pub column_polarity: Polarity,
}

/// Row and column lines in display order: `rows[0]` is the top row, `columns[0]` the left column.
pub struct MatrixPins<R, C> {
    pub rows: [R; HEIGHT],
    pub columns: [C; WIDTH],
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatrixError<RowErr, ColErr> {
    Row { row: usize, error: RowErr },
    Column { column: usize, error: ColErr },
}

/// [`ColumnDriver`] that bit-bangs the matrix through individual GPIO lines.
pub struct LedMatrix<R, C> {
    rows: [R; HEIGHT],
    columns: [C; WIDTH],
    config: MatrixConfig,
    previous_column: usize,
}

impl<R, C> LedMatrix<R, C>
where
    R: OutputPin,
    C: OutputPin,
{
    /// Takes ownership of the lines. They must already be configured as outputs; nothing is
    /// driven until [`ColumnDriver::init`].
    pub fn new(pins: MatrixPins<R, C>, config: MatrixConfig) -> Self {
        Self {
            rows: pins.rows,
            columns: pins.columns,
            config,
            previous_column: 0,
        }
    }

    fn drive_row(&mut self, row: usize, active: bool) -> Result<(), MatrixError<R::Error, C::Error>> {
        self.rows[row]
            .set_state(self.config.row_polarity.level(active))
            .map_err(|error| MatrixError::Row { row, error })
    }

    fn drive_column(&mut self, column: usize, active: bool) -> Result<(), MatrixError<R::Error, C::Error>> {
        self.columns[column]
            .set_state(self.config.column_polarity.level(active))
            .map_err(|error| MatrixError::Column { column, error })
    }
}

impl<R, C> ColumnDriver for LedMatrix<R, C>
where
    R: OutputPin,
    C: OutputPin,
{
    type Error = MatrixError<R::Error, C::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        debug!(
            "matrix init: {} rows {:?}, {} columns {:?}",
            HEIGHT, self.config.row_polarity, WIDTH, self.config.column_polarity
        );
        for row in 0..HEIGHT {
            self.drive_row(row, false)?;
        }
        for column in 0..WIDTH {
            self.drive_column(column, false)?;
        }
        self.previous_column = 0;
        Ok(())
    }

    fn show_column(&mut self, column: usize, rows: &[bool; HEIGHT]) -> Result<(), Self::Error> {
        debug_assert!(column < WIDTH, "column {} is off the display", column);

        self.drive_column(self.previous_column, false)?;
        self.drive_column(column, false)?;
        for (row, &on) in rows.iter().enumerate() {
            self.drive_row(row, on)?;
        }
        self.drive_column(column, true)?;

        self.previous_column = column;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;
    use std::rc::Rc;

    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    use super::*;

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Line {
        Row(usize),
        Column(usize),
    }

    type Log = Rc<RefCell<Vec<(Line, PinState)>>>;

    #[derive(Debug, Eq, PartialEq)]
    struct Broken;

    impl Error for Broken {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct MockPin {
        line: Line,
        log: Log,
        broken: bool,
    }

    impl MockPin {
        fn new(line: Line, log: &Log) -> Self {
            Self {
                line,
                log: Rc::clone(log),
                broken: false,
            }
        }

        fn record(&mut self, state: PinState) -> Result<(), Broken> {
            if self.broken {
                return Err(Broken);
            }
            self.log.borrow_mut().push((self.line, state));
            Ok(())
        }
    }

    impl ErrorType for MockPin {
        type Error = Broken;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.record(PinState::Low)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.record(PinState::High)
        }
    }

    fn mock_pins(log: &Log) -> MatrixPins<MockPin, MockPin> {
        MatrixPins {
            rows: core::array::from_fn(|row| MockPin::new(Line::Row(row), log)),
            columns: core::array::from_fn(|column| MockPin::new(Line::Column(column), log)),
        }
    }

    fn take(log: &Log) -> Vec<(Line, PinState)> {
        log.borrow_mut().drain(..).collect()
    }

    #[test]
    fn init_drives_every_line_inactive() {
        let log = Log::default();
        let mut matrix = LedMatrix::new(mock_pins(&log), MatrixConfig::default());
        matrix.init().unwrap();

        let events = take(&log);
        assert_eq!(events.len(), HEIGHT + WIDTH);
        assert!(events.iter().all(|&(_, state)| state == PinState::High));
        for row in 0..HEIGHT {
            assert!(events.contains(&(Line::Row(row), PinState::High)));
        }
        for column in 0..WIDTH {
            assert!(events.contains(&(Line::Column(column), PinState::High)));
        }
    }

    #[test]
    fn show_column_disables_previous_then_writes_rows_then_enables() {
        let log = Log::default();
        let mut matrix = LedMatrix::new(mock_pins(&log), MatrixConfig::default());
        matrix.init().unwrap();
        take(&log);

        let rows = [true, false, false, true, false, false, true];
        matrix.show_column(2, &rows).unwrap();

        let mut expected = vec![
            (Line::Column(0), PinState::High),
            (Line::Column(2), PinState::High),
        ];
        for (row, &on) in rows.iter().enumerate() {
            let level = if on { PinState::Low } else { PinState::High };
            expected.push((Line::Row(row), level));
        }
        expected.push((Line::Column(2), PinState::Low));
        assert_eq!(take(&log), expected);

        matrix.show_column(3, &[false; HEIGHT]).unwrap();
        let events = take(&log);
        assert_eq!(events[0], (Line::Column(2), PinState::High));
        assert_eq!(events[1], (Line::Column(3), PinState::High));
        assert_eq!(events.last(), Some(&(Line::Column(3), PinState::Low)));
    }

    #[test]
    fn active_high_lines_are_not_inverted() {
        let log = Log::default();
        let config = MatrixConfig {
            row_polarity: Polarity::ActiveHigh,
            column_polarity: Polarity::ActiveHigh,
        };
        let mut matrix = LedMatrix::new(mock_pins(&log), config);
        matrix.show_column(1, &[true; HEIGHT]).unwrap();

        let events = take(&log);
        assert_eq!(events[0], (Line::Column(0), PinState::Low));
        assert!(events[2..2 + HEIGHT].iter().all(|&(_, state)| state == PinState::High));
        assert_eq!(events.last(), Some(&(Line::Column(1), PinState::High)));
    }

    #[test]
    fn failing_row_line_is_reported_with_its_index() {
        let log = Log::default();
        let mut pins = mock_pins(&log);
        pins.rows[4].broken = true;
        let mut matrix = LedMatrix::new(pins, MatrixConfig::default());

        assert_eq!(
            matrix.show_column(0, &[false; HEIGHT]),
            Err(MatrixError::Row { row: 4, error: Broken })
        );
    }

    #[test]
    fn failing_column_line_is_reported_with_its_index() {
        let log = Log::default();
        let mut pins = mock_pins(&log);
        pins.columns[3].broken = true;
        let mut matrix = LedMatrix::new(pins, MatrixConfig::default());

        assert_eq!(
            matrix.init(),
            Err(MatrixError::Column { column: 3, error: Broken })
        );
    }

    #[test]
    fn every_tick_lights_one_column_and_writes_rows_while_all_are_dark() {
        use crate::display::MatrixDisplay;
        use crate::geometry::Position;
        use crate::refresh::PHASE_STEPS;

        let log = Log::default();
        let mut display = MatrixDisplay::new(LedMatrix::new(mock_pins(&log), MatrixConfig::default()));
        display.init().unwrap();
        display.draw_box(Position::new(0, 0), Position::new(6, 4), true, 64);
        take(&log);

        // Active-low columns: High is dark
        let mut columns = [PinState::High; WIDTH];
        for tick in 0..3 * WIDTH * usize::from(PHASE_STEPS) {
            display.tick().unwrap();
            for (line, state) in take(&log) {
                match line {
                    Line::Column(column) => columns[column] = state,
                    Line::Row(row) => assert!(
                        columns.iter().all(|&level| level == PinState::High),
                        "row {row} written with a column lit on tick {tick}"
                    ),
                }
            }

            let lit: Vec<usize> = (0..WIDTH).filter(|&column| columns[column] == PinState::Low).collect();
            assert_eq!(lit, vec![tick % WIDTH], "tick {tick}");
        }
    }
}

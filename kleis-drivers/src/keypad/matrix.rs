//! 4x4 matrix keypad scanner
//!
//! Rows are outputs idling high; columns are inputs with pull-ups. Each row
//! is pulled low in turn and, after a short settling delay, every column is
//! sampled. A low column means the key at that intersection is down.
//!
//! Codes are `row * 4 + col + 1`, so `1..=16`, with 0 meaning no key. The
//! scan walks rows and columns in ascending order and keeps the last hit,
//! so when several keys are held the highest code wins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use kleis_core::traits::{KeyScanner, ScanError, NO_KEY};

/// Number of row lines
pub const ROWS: usize = 4;

/// Number of column lines
pub const COLS: usize = 4;

/// Delay between driving a row and sampling the columns
pub const SETTLE_US: u32 = 10;

/// Matrix keypad on eight GPIO lines
pub struct MatrixKeypad<R, C, D> {
    rows: [R; ROWS],
    cols: [C; COLS],
    delay: D,
}

impl<R, C, D> MatrixKeypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    /// Create a scanner and release every row
    pub fn new(rows: [R; ROWS], cols: [C; COLS], delay: D) -> Result<Self, ScanError> {
        let mut keypad = Self { rows, cols, delay };
        for row in keypad.rows.iter_mut() {
            row.set_high().map_err(|_| ScanError::RowDrive)?;
        }
        Ok(keypad)
    }

    /// Scan a single row, returning the highest asserted column
    fn scan_row(&mut self, row: usize) -> Result<Option<usize>, ScanError> {
        self.rows[row].set_low().map_err(|_| ScanError::RowDrive)?;
        self.delay.delay_us(SETTLE_US);

        let mut hit = None;
        let mut result = Ok(());
        for (col, pin) in self.cols.iter_mut().enumerate() {
            match pin.is_low() {
                Ok(true) => hit = Some(col),
                Ok(false) => {}
                Err(_) => {
                    result = Err(ScanError::ColumnRead);
                    break;
                }
            }
        }

        // Release the row even if a column read failed
        self.rows[row].set_high().map_err(|_| ScanError::RowDrive)?;
        result.map(|_| hit)
    }
}

impl<R, C, D> KeyScanner for MatrixKeypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    fn read_key(&mut self) -> Result<u8, ScanError> {
        let mut code = NO_KEY;
        for row in 0..ROWS {
            if let Some(col) = self.scan_row(row)? {
                code = (row * COLS + col + 1) as u8;
            }
        }
        Ok(code)
    }
}

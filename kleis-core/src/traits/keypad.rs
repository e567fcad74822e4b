//! Keypad scanner trait

/// Raw code reported when no key is asserted
pub const NO_KEY: u8 = 0;

/// Highest raw key code (4 rows x 4 columns)
pub const KEY_CODE_MAX: u8 = 16;

/// Errors that can occur while scanning the key matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// Driving a row line failed
    RowDrive,
    /// Reading a column line failed
    ColumnRead,
}

/// Trait for matrix keypad scanners
///
/// The scanner is level based: every call reports the key that is held
/// right now, not a press transition. Edge detection happens in
/// [`crate::keypad::EdgeDetector`].
pub trait KeyScanner {
    /// Read the currently asserted key
    ///
    /// Returns [`NO_KEY`] if nothing is pressed, otherwise a row-major key
    /// number in `1..=16` (row 0 = 1..4, row 1 = 5..8, ...).
    fn read_key(&mut self) -> Result<u8, ScanError>;
}

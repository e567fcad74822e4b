//! Physical key layout
//!
//! ```text
//!          col 1   col 2   col 3   col 4
//! row 1      1       2       3      (-)
//! row 2      4       5       6      (-)
//! row 3      7       8       9      (-)
//! row 4    Clear     0    Confirm   (-)
//! ```
//!
//! Column 4 is not fitted on the lock's keypad overlay and maps to
//! [`KeyEvent::Unmapped`].

use crate::traits::keypad::KEY_CODE_MAX;

/// Semantic key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    /// Digit 0-9
    Digit(u8),
    /// Discard everything entered so far
    Clear,
    /// Submit the entry for verification
    Confirm,
    /// Reserved or unknown key, ignored
    Unmapped,
}

/// Key events indexed by `raw code - 1`
pub const KEYMAP: [KeyEvent; KEY_CODE_MAX as usize] = [
    // row 1
    KeyEvent::Digit(1),
    KeyEvent::Digit(2),
    KeyEvent::Digit(3),
    KeyEvent::Unmapped,
    // row 2
    KeyEvent::Digit(4),
    KeyEvent::Digit(5),
    KeyEvent::Digit(6),
    KeyEvent::Unmapped,
    // row 3
    KeyEvent::Digit(7),
    KeyEvent::Digit(8),
    KeyEvent::Digit(9),
    KeyEvent::Unmapped,
    // row 4
    KeyEvent::Clear,
    KeyEvent::Digit(0),
    KeyEvent::Confirm,
    KeyEvent::Unmapped,
];

/// Map a raw scanner code to a key event
///
/// Code 0 (no key) and anything above 16 map to [`KeyEvent::Unmapped`].
pub fn map_code(code: u8) -> KeyEvent {
    match code.checked_sub(1) {
        Some(index) => KEYMAP
            .get(index as usize)
            .copied()
            .unwrap_or(KeyEvent::Unmapped),
        None => KeyEvent::Unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_rows() {
        let expected = [(1, 1), (2, 2), (3, 3), (5, 4), (6, 5), (7, 6), (9, 7), (10, 8), (11, 9)];
        for (code, digit) in expected {
            assert_eq!(map_code(code), KeyEvent::Digit(digit));
        }
    }

    #[test]
    fn test_bottom_row() {
        assert_eq!(map_code(13), KeyEvent::Clear);
        assert_eq!(map_code(14), KeyEvent::Digit(0));
        assert_eq!(map_code(15), KeyEvent::Confirm);
    }

    #[test]
    fn test_reserved_and_out_of_range() {
        for code in [0, 4, 8, 12, 16, 17, 200, 255] {
            assert_eq!(map_code(code), KeyEvent::Unmapped);
        }
    }

    #[test]
    fn test_every_digit_reachable_once() {
        let mut seen = [0u8; 10];
        for event in KEYMAP {
            if let KeyEvent::Digit(d) = event {
                seen[d as usize] += 1;
            }
        }
        assert_eq!(seen, [1; 10]);
    }
}

//! Press edge detection
//!
//! The scanner reports levels. An event fires when the asserted code
//! changes to a non-zero value: a fresh press after release, or a roll
//! straight from one key to another. Holding a key never repeats and
//! releasing never fires.

use crate::traits::keypad::NO_KEY;

/// Edge detector over successive raw codes
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: u8,
}

impl EdgeDetector {
    /// Create a detector that assumes no key is held
    pub const fn new() -> Self {
        Self { previous: NO_KEY }
    }

    /// Feed one scan tick
    ///
    /// Returns the code if this tick is a press edge. The stored level is
    /// updated on every call.
    pub fn update(&mut self, level: u8) -> Option<u8> {
        let pressed = level != NO_KEY && level != self.previous;
        self.previous = level;
        pressed.then_some(level)
    }

    /// Level seen on the last tick
    pub fn previous(&self) -> u8 {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_press_fires_once_while_held() {
        let mut edge = EdgeDetector::new();
        let fired: Vec<Option<u8>> =
            [0, 5, 5, 5, 5, 5, 5, 5].iter().map(|&l| edge.update(l)).collect();
        assert_eq!(fired.iter().flatten().count(), 1);
        assert_eq!(fired[1], Some(5));
    }

    #[test]
    fn test_seven_identical_codes_one_event() {
        let mut edge = EdgeDetector::new();
        let events = (0..7).filter_map(|_| edge.update(2)).count();
        assert_eq!(events, 1);
    }

    #[test]
    fn test_release_does_not_fire() {
        let mut edge = EdgeDetector::new();
        assert_eq!(edge.update(3), Some(3));
        assert_eq!(edge.update(0), None);
        assert_eq!(edge.previous(), 0);
    }

    #[test]
    fn test_roll_to_different_key_fires() {
        let mut edge = EdgeDetector::new();
        assert_eq!(edge.update(13), Some(13));
        assert_eq!(edge.update(14), Some(14));
        assert_eq!(edge.update(15), Some(15));
        assert_eq!(edge.update(15), None);
    }

    #[test]
    fn test_codes_that_share_bits() {
        // 13 -> 15 shares bits with the old XOR formulation and must still fire
        let mut edge = EdgeDetector::new();
        edge.update(15);
        edge.update(0);
        assert_eq!(edge.update(13), Some(13));
        assert_eq!(edge.update(15), Some(15));
    }

    #[test]
    fn test_repress_after_release() {
        let mut edge = EdgeDetector::new();
        assert_eq!(edge.update(7), Some(7));
        assert_eq!(edge.update(0), None);
        assert_eq!(edge.update(7), Some(7));
    }

    proptest! {
        #[test]
        fn prop_at_most_one_event_per_run(levels in proptest::collection::vec(0u8..=16, 0..200)) {
            let mut edge = EdgeDetector::new();
            let mut prev = NO_KEY;
            for level in levels {
                let fired = edge.update(level);
                if level == prev {
                    prop_assert_eq!(fired, None);
                } else if level == NO_KEY {
                    prop_assert_eq!(fired, None);
                } else {
                    prop_assert_eq!(fired, Some(level));
                }
                prev = level;
            }
        }
    }
}

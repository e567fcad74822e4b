//! Keypad input processing
//!
//! Turns the level-based raw codes reported by a [`crate::traits::KeyScanner`]
//! into one semantic [`KeyEvent`] per physical press.

pub mod edge;
pub mod keymap;

pub use edge::EdgeDetector;
pub use keymap::{map_code, KeyEvent, KEYMAP};

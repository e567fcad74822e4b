//! Keypad drivers

pub mod matrix;

pub use matrix::{MatrixKeypad, COLS, ROWS, SETTLE_US};

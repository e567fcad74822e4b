//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod display;
pub mod keypad;

pub use actuator::{ActuatorError, BoltPosition, LockActuator};
pub use display::{Artwork, Color, DisplayError, LockDisplay, Point, Rect};
pub use keypad::{KeyScanner, ScanError, KEY_CODE_MAX, NO_KEY};

//! Passcode entry
//!
//! The entry buffer collects digits typed by the user; verification
//! compares it against the reference passcode.

pub mod buffer;
pub mod verify;

pub use buffer::{EntryBuffer, EntrySnapshot, EntryState};
pub use verify::verify;

//! Runtime state
//!
//! [`Session`] owns the entry buffer and turns key events into entry
//! updates and verification outcomes. [`Lock`] wraps the actuator and keeps
//! the last commanded bolt position as an explicit [`LockState`].

pub mod lock;
pub mod session;

pub use lock::{Lock, LockState};
pub use session::{Response, Session};

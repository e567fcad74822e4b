//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware builds one
//! [`LockConfig`] at startup and hands out `'static` references to it;
//! nothing mutates it afterwards.

pub mod layout;
pub mod types;

pub use layout::*;
pub use types::*;

//! Screen composition
//!
//! Everything drawn on the panel is built from the small
//! [`crate::traits::LockDisplay`] vocabulary: full screens and the boot
//! animation in [`screens`], the passcode progress indicator in
//! [`refresh`].

pub mod refresh;
pub mod screens;

pub use refresh::EntryIndicator;
pub use screens::{boot_sequence, render_boot_step, render_screen, BootStep, Screen, PROMPT};

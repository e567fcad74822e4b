//! Board-agnostic core logic for the Kleis door lock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (keypad scanner, bolt actuator, display)
//! - Key press edge detection and the keypad layout table
//! - Passcode entry buffer and verification
//! - Session and lock state tracking
//! - Action plans for granted/denied outcomes
//! - Entry indicator refresh and screen composition
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod display;
pub mod entry;
pub mod keypad;
pub mod state;
pub mod traits;

//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kleis-core on top of `embedded-hal` 1.0:
//!
//! - 4x4 matrix keypad scanner
//! - Hobby servo bolt actuator (PWM)
//! - ST7735S 128x128 SPI panel and an `embedded-graphics` screen adapter

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod display;
pub mod keypad;

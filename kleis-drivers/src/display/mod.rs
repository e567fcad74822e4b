//! Display drivers
//!
//! [`St7735`] talks to the panel; [`GraphicsDisplay`] turns any
//! `embedded-graphics` RGB565 draw target into a
//! [`kleis_core::traits::LockDisplay`].

pub mod graphics;
pub mod st7735;

pub use graphics::GraphicsDisplay;
pub use st7735::{St7735, St7735Error};

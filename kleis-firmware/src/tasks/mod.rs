//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod display_refresh;
pub mod input;

pub use display_refresh::display_refresh_task;
pub use input::input_task;

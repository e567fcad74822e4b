//! Full screens and the boot animation

use crate::config::{DisplayLayout, Timing};
use crate::traits::{Artwork, Color, DisplayError, LockDisplay};

/// Idle prompt text
pub const PROMPT: &str = "Locked. Enter code";

/// Boot status text while the progress bar runs
pub const BOOT_STARTING: &str = "Starting";

/// Boot status text once the progress bar completes
pub const BOOT_READY: &str = "Ready   ";

/// Full screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Product logo
    Logo,
    /// Prompt with an empty entry box
    Idle,
    /// Door unlocked
    Granted,
    /// Wrong passcode
    Denied,
}

/// Paint a full screen
pub fn render_screen<D: LockDisplay>(
    display: &mut D,
    screen: Screen,
    layout: &DisplayLayout,
) -> Result<(), DisplayError> {
    match screen {
        Screen::Logo => display.draw_artwork(Artwork::Logo),
        Screen::Granted => display.draw_artwork(Artwork::Granted),
        Screen::Denied => display.draw_artwork(Artwork::Denied),
        Screen::Idle => {
            display.draw_artwork(Artwork::IdleBackdrop)?;
            display.draw_text(
                layout.prompt_origin,
                PROMPT,
                layout.prompt_color,
                layout.prompt_background,
            )?;
            display.fill_rect(layout.entry_box, layout.entry_background)
        }
    }
}

/// One step of the boot animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStep {
    /// Blank the panel to white
    Blank,
    /// Show a status line
    Status(&'static str),
    /// Draw one progress bar column
    BarColumn(u16),
    /// Paint a full screen
    Show(Screen),
    /// Wait, in milliseconds
    Hold(u32),
}

/// The boot animation as an ordered list of steps
///
/// Blank, "Starting", a red progress bar swept one column per
/// `boot_step_ms` across the bottom of the panel, "Ready", the logo, then
/// the idle prompt.
pub fn boot_sequence<'a>(
    layout: &'a DisplayLayout,
    timing: &'a Timing,
) -> impl Iterator<Item = BootStep> + 'a {
    let head = [BootStep::Blank, BootStep::Status(BOOT_STARTING)];
    let bar = (0..layout.width)
        .flat_map(move |x| [BootStep::BarColumn(x), BootStep::Hold(timing.boot_step_ms)]);
    let tail = [
        BootStep::Status(BOOT_READY),
        BootStep::Hold(timing.boot_ready_ms),
        BootStep::Show(Screen::Logo),
        BootStep::Hold(timing.logo_ms),
        BootStep::Show(Screen::Idle),
    ];

    head.into_iter().chain(bar).chain(tail)
}

/// Execute a boot step
///
/// Returns `Ok(Some(ms))` for holds, which the caller waits out.
pub fn render_boot_step<D: LockDisplay>(
    display: &mut D,
    step: BootStep,
    layout: &DisplayLayout,
) -> Result<Option<u32>, DisplayError> {
    match step {
        BootStep::Blank => display.fill_rect(layout.full_screen(), Color::White)?,
        BootStep::Status(text) => {
            display.draw_text(layout.boot_text_origin, text, Color::Red, Color::White)?
        }
        BootStep::BarColumn(x) => display.draw_vline(
            x,
            layout.boot_bar_top,
            layout.height.saturating_sub(1),
            Color::Red,
        )?,
        BootStep::Show(screen) => render_screen(display, screen, layout)?,
        BootStep::Hold(ms) => return Ok(Some(ms)),
    }
    Ok(None)
}

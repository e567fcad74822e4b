//! Entry indicator
//!
//! Repaints the entry box whenever the number of entered digits changes.
//! The indicator only ever reads published snapshots, so a stale or torn
//! count is clamped before it is used to index anything.

use crate::config::DisplayLayout;
use crate::entry::EntrySnapshot;
use crate::traits::{DisplayError, LockDisplay};

/// Tracks what the entry box currently shows
#[derive(Debug, Default)]
pub struct EntryIndicator {
    last_rendered: Option<u8>,
}

impl EntryIndicator {
    /// Create an indicator that repaints on its first refresh
    pub const fn new() -> Self {
        Self {
            last_rendered: None,
        }
    }

    /// Repaint the entry box if the digit count changed
    ///
    /// Returns `Ok(true)` when something was drawn. On a display error the
    /// indicator forgets what it showed so the next refresh retries.
    pub fn refresh<D: LockDisplay>(
        &mut self,
        snapshot: &EntrySnapshot,
        display: &mut D,
        layout: &DisplayLayout,
    ) -> Result<bool, DisplayError> {
        let count = snapshot.clamped_count() as u8;
        if self.last_rendered == Some(count) {
            return Ok(false);
        }

        self.last_rendered = None;
        display.fill_rect(layout.entry_box, layout.entry_background)?;
        for (i, &digit) in snapshot.digits().iter().enumerate() {
            let glyph = char::from(b'0' + digit.min(9));
            display.draw_glyph(
                layout.glyph_position(i),
                glyph,
                layout.glyph_color,
                layout.entry_background,
            )?;
        }

        self.last_rendered = Some(count);
        Ok(true)
    }

    /// Digit count currently on screen, if known
    pub fn last_rendered(&self) -> Option<u8> {
        self.last_rendered
    }
}

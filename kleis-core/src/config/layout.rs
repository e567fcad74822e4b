//! Display layout
//!
//! Pixel geometry for the 128x128 panel. Rectangles use a top-left origin
//! with an exclusive far edge.

use crate::traits::display::{Color, Point, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screen geometry and colours
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayLayout {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Region repainted on every entry indicator refresh
    pub entry_box: Rect,
    /// Entry box fill colour
    pub entry_background: Color,
    /// Top-left corner of the first digit glyph
    pub glyph_origin: Point,
    /// Horizontal distance between consecutive glyphs
    pub glyph_pitch: u16,
    /// Width of one glyph cell
    pub glyph_width: u16,
    /// Digit colour
    pub glyph_color: Color,
    /// Top-left corner of the idle prompt text
    pub prompt_origin: Point,
    /// Prompt text colour
    pub prompt_color: Color,
    /// Prompt text background
    pub prompt_background: Color,
    /// Top row of the boot progress bar
    pub boot_bar_top: u16,
    /// Top-left corner of boot status text
    pub boot_text_origin: Point,
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            entry_box: Rect::new(16, 45, 96, 15),
            entry_background: Color::Yellow,
            glyph_origin: Point::new(20, 45),
            glyph_pitch: 16,
            glyph_width: 8,
            glyph_color: Color::Red,
            prompt_origin: Point::new(0, 0),
            prompt_color: Color::Blue,
            prompt_background: Color::White,
            boot_bar_top: 100,
            boot_text_origin: Point::new(20, 50),
        }
    }
}

impl DisplayLayout {
    /// Position of the glyph for entry slot `index`
    pub fn glyph_position(&self, index: usize) -> Point {
        let offset = (index as u16).saturating_mul(self.glyph_pitch);
        Point::new(self.glyph_origin.x.saturating_add(offset), self.glyph_origin.y)
    }

    /// Check that `count` glyphs stay inside the entry box
    pub fn fits_digits(&self, count: usize) -> bool {
        if count == 0 {
            return true;
        }
        let last = self.glyph_position(count - 1);
        let right = last.x.saturating_add(self.glyph_width);
        last.x >= self.entry_box.x && right <= self.entry_box.right()
    }

    /// Full-panel rectangle
    pub fn full_screen(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

//! Display driver trait for the 128x128 colour panel

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur when drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Panel never initialised or its bus is gone
    Unavailable,
    /// Bus transfer failed
    Communication,
    /// Coordinates outside the panel
    InvalidCoordinates,
}

/// Palette used by the lock screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    /// RGB565 encoding of the colour
    pub const fn to_rgb565(self) -> u16 {
        match self {
            Color::White => 0xFFFF,
            Color::Black => 0x0000,
            Color::Red => 0xF800,
            Color::Green => 0x07E0,
            Color::Blue => 0x001F,
            Color::Yellow => 0xFFE0,
        }
    }
}

/// Pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, far edges exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column past the rectangle
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// First row past the rectangle
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check whether a point lies inside
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Full-screen artwork the panel driver knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Artwork {
    /// Product logo shown once during boot
    Logo,
    /// Backdrop behind the idle prompt
    IdleBackdrop,
    /// Door open
    Granted,
    /// Wrong passcode
    Denied,
}

/// Trait for the lock display
///
/// A small drawing service shared by the input and refresh tasks. Callers
/// are expected to serialise access (the firmware wraps it in a mutex).
pub trait LockDisplay {
    /// Fill a rectangle with a solid colour
    fn fill_rect(&mut self, area: Rect, color: Color) -> Result<(), DisplayError>;

    /// Draw a vertical line from `top` to `bottom`, both inclusive
    fn draw_vline(&mut self, x: u16, top: u16, bottom: u16, color: Color)
        -> Result<(), DisplayError>;

    /// Draw one character cell with an opaque background
    fn draw_glyph(&mut self, at: Point, ch: char, fg: Color, bg: Color)
        -> Result<(), DisplayError>;

    /// Draw a line of text with an opaque background
    fn draw_text(&mut self, at: Point, text: &str, fg: Color, bg: Color)
        -> Result<(), DisplayError>;

    /// Paint one of the full-screen artworks
    fn draw_artwork(&mut self, art: Artwork) -> Result<(), DisplayError>;

    /// Check if the panel accepted its initialisation sequence
    fn is_ready(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(16, 45, 96, 15);
        assert_eq!(r.right(), 112);
        assert_eq!(r.bottom(), 60);
        assert!(r.contains(Point::new(16, 45)));
        assert!(r.contains(Point::new(111, 59)));
        assert!(!r.contains(Point::new(112, 59)));
        assert!(!r.contains(Point::new(111, 60)));
    }

    #[test]
    fn test_palette_matches_panel_encoding() {
        assert_eq!(Color::Yellow.to_rgb565(), 0xFFE0);
        assert_eq!(Color::Red.to_rgb565(), 0xF800);
        assert_eq!(Color::Blue.to_rgb565(), 0x001F);
    }
}

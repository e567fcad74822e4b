//! Lock screens on any `embedded-graphics` RGB565 target
//!
//! Digits use a 8x13 monospace font so each glyph fits the 16 px pitch of
//! the entry box; prompt and status text use 6x10. Artwork is drawn from
//! primitives rather than bitmaps.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use kleis_core::traits::{
    Artwork, Color, DisplayError, LockDisplay, Point as LockPoint, Rect,
};

/// Convert a palette colour to RGB565
fn rgb(color: Color) -> Rgb565 {
    Rgb565::from(RawU16::new(color.to_rgb565()))
}

fn point(p: LockPoint) -> Point {
    Point::new(i32::from(p.x), i32::from(p.y))
}

/// [`LockDisplay`] over an RGB565 draw target
///
/// A display built with [`GraphicsDisplay::unavailable`] never touches the
/// target and answers every call with [`DisplayError::Unavailable`].
pub struct GraphicsDisplay<D> {
    target: D,
    attached: bool,
    faulted: bool,
}

impl<D> GraphicsDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap an initialised draw target
    pub fn new(target: D) -> Self {
        Self {
            target,
            attached: true,
            faulted: false,
        }
    }

    /// Wrap a target whose initialisation failed
    pub fn unavailable(target: D) -> Self {
        Self {
            target,
            attached: false,
            faulted: true,
        }
    }

    /// Borrow the underlying target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Record the outcome of a draw so `is_ready` reflects the bus health
    fn track<T, E>(&mut self, result: Result<T, E>) -> Result<T, DisplayError> {
        match result {
            Ok(v) => {
                self.faulted = false;
                Ok(v)
            }
            Err(_) => {
                self.faulted = true;
                Err(DisplayError::Communication)
            }
        }
    }

    fn check_point(&self, p: LockPoint) -> Result<(), DisplayError> {
        if !self.attached {
            return Err(DisplayError::Unavailable);
        }
        if self.target.bounding_box().contains(point(p)) {
            Ok(())
        } else {
            Err(DisplayError::InvalidCoordinates)
        }
    }

    fn text(
        &mut self,
        at: LockPoint,
        text: &str,
        font: &MonoFont<'_>,
        fg: Color,
        bg: Color,
    ) -> Result<(), DisplayError> {
        self.check_point(at)?;
        let style = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(rgb(fg))
            .background_color(rgb(bg))
            .build();
        let result = Text::with_baseline(text, point(at), style, Baseline::Top)
            .draw(&mut self.target);
        self.track(result).map(|_| ())
    }

    /// Centred caption on a solid background
    fn banner(&mut self, caption: &str, fg: Color, bg: Color, y: i32) -> Result<(), DisplayError> {
        let center_x = (self.target.bounding_box().size.width / 2) as i32;
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(rgb(fg))
            .background_color(rgb(bg))
            .build();
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let result = Text::with_text_style(caption, Point::new(center_x, y), style, layout)
            .draw(&mut self.target);
        self.track(result).map(|_| ())
    }

    /// Padlock outline; `open` lifts the shackle
    fn padlock(&mut self, open: bool, color: Color) -> Result<(), DisplayError> {
        let stroke = PrimitiveStyle::with_stroke(rgb(color), 3);
        let body = PrimitiveStyleBuilder::new()
            .fill_color(rgb(color))
            .build();
        let lift = if open { 10 } else { 0 };

        let shackle = Circle::new(Point::new(46, 24 - lift), 36).into_styled(stroke);
        let result = shackle.draw(&mut self.target);
        self.track(result)?;

        let result = Rectangle::new(Point::new(38, 44), Size::new(52, 40))
            .into_styled(body)
            .draw(&mut self.target);
        self.track(result)
    }

    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        if !self.attached {
            return Err(DisplayError::Unavailable);
        }
        let result = self.target.clear(rgb(color));
        self.track(result)
    }
}

impl<D> LockDisplay for GraphicsDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_rect(&mut self, area: Rect, color: Color) -> Result<(), DisplayError> {
        self.check_point(LockPoint::new(area.x, area.y))?;
        let rect = Rectangle::new(
            Point::new(i32::from(area.x), i32::from(area.y)),
            Size::new(u32::from(area.width), u32::from(area.height)),
        );
        let result = self.target.fill_solid(&rect, rgb(color));
        self.track(result)
    }

    fn draw_vline(&mut self, x: u16, top: u16, bottom: u16, color: Color) -> Result<(), DisplayError> {
        self.check_point(LockPoint::new(x, top))?;
        let line = Line::new(
            Point::new(i32::from(x), i32::from(top)),
            Point::new(i32::from(x), i32::from(bottom)),
        );
        let result = line
            .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
            .draw(&mut self.target);
        self.track(result)
    }

    fn draw_glyph(&mut self, at: LockPoint, ch: char, fg: Color, bg: Color) -> Result<(), DisplayError> {
        let mut buf = [0u8; 4];
        let s = ch.encode_utf8(&mut buf);
        self.text(at, s, &FONT_8X13, fg, bg)
    }

    fn draw_text(&mut self, at: LockPoint, text: &str, fg: Color, bg: Color) -> Result<(), DisplayError> {
        self.text(at, text, &FONT_6X10, fg, bg)
    }

    fn draw_artwork(&mut self, art: Artwork) -> Result<(), DisplayError> {
        match art {
            Artwork::IdleBackdrop => self.clear(Color::White),
            Artwork::Logo => {
                self.clear(Color::White)?;
                self.padlock(false, Color::Blue)?;
                self.banner("KLEIS", Color::Blue, Color::White, 100)
            }
            Artwork::Granted => {
                self.clear(Color::Green)?;
                self.padlock(true, Color::White)?;
                self.banner("Welcome", Color::White, Color::Green, 100)
            }
            Artwork::Denied => {
                self.clear(Color::Red)?;
                self.padlock(false, Color::White)?;
                self.banner("Wrong code", Color::White, Color::Red, 100)
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.attached && !self.faulted
    }
}

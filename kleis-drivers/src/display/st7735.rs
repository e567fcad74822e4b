//! ST7735S TFT display driver
//!
//! Driver for the 128x128 ST7735S colour panel over SPI, RGB565.
//! Drawing goes straight to panel RAM; there is no frame buffer.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

/// Panel dimensions
const WIDTH: u32 = 128;
const HEIGHT: u32 = 128;

/// RAM offset of the visible area with the rotation used here
const X_OFFSET: u16 = 2;
const Y_OFFSET: u16 = 3;

/// Bytes streamed per SPI transfer when writing pixels
const CHUNK: usize = 64;

/// ST7735S commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const FRMCTR1: u8 = 0xB1;
    pub const FRMCTR2: u8 = 0xB2;
    pub const FRMCTR3: u8 = 0xB3;
    pub const INVCTR: u8 = 0xB4;
    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const PWCTR3: u8 = 0xC2;
    pub const PWCTR4: u8 = 0xC3;
    pub const PWCTR5: u8 = 0xC4;
    pub const VMCTR1: u8 = 0xC5;
    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;
}

/// Register setup sent after sleep-out
const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::FRMCTR1, &[0x05, 0x3C, 0x3C]),
    (cmd::FRMCTR2, &[0x05, 0x3C, 0x3C]),
    (cmd::FRMCTR3, &[0x05, 0x3C, 0x3C, 0x05, 0x3C, 0x3C]),
    (cmd::INVCTR, &[0x03]),
    (cmd::COLMOD, &[0x05]), // 16-bit colour
    (cmd::PWCTR1, &[0xA2, 0x02, 0x84]),
    (cmd::PWCTR2, &[0xC5]),
    (cmd::PWCTR3, &[0x0D, 0x00]),
    (cmd::PWCTR4, &[0x8D, 0x2A]),
    (cmd::PWCTR5, &[0x8D, 0xEE]),
    (cmd::VMCTR1, &[0x0A]),
    (cmd::MADCTL, &[0xC8]), // Rotated 180 degrees, BGR
    (
        cmd::GMCTRP1,
        &[
            0x12, 0x1C, 0x10, 0x18, 0x33, 0x2C, 0x25, 0x28, 0x28, 0x27, 0x2F, 0x3C, 0x00, 0x03,
            0x03, 0x10,
        ],
    ),
    (
        cmd::GMCTRN1,
        &[
            0x12, 0x1C, 0x10, 0x18, 0x2D, 0x28, 0x23, 0x28, 0x28, 0x26, 0x2F, 0x3B, 0x00, 0x03,
            0x03, 0x10,
        ],
    ),
    (cmd::INVOFF, &[]),
    (cmd::NORON, &[]),
    (cmd::DISPON, &[]),
];

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7735Error {
    /// SPI transfer failed
    Spi,
    /// Control pin could not be driven
    Pin,
}

/// ST7735S panel
pub struct St7735<SPI, DC, RST, BL> {
    spi: SPI,
    dc: DC,
    rst: RST,
    backlight: BL,
}

impl<SPI, DC, RST, BL> St7735<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Create a new panel driver
    pub fn new(spi: SPI, dc: DC, rst: RST, backlight: BL) -> Self {
        Self {
            spi,
            dc,
            rst,
            backlight,
        }
    }

    /// Hardware reset, backlight on, then the register setup
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), St7735Error> {
        self.rst.set_low().map_err(|_| St7735Error::Pin)?;
        delay.delay_ms(100);
        self.rst.set_high().map_err(|_| St7735Error::Pin)?;
        delay.delay_ms(100);

        self.set_backlight(true)?;
        delay.delay_ms(100);

        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);

        for &(c, params) in INIT_SEQUENCE {
            self.command(c, params)?;
        }

        Ok(())
    }

    /// Switch the backlight
    pub fn set_backlight(&mut self, on: bool) -> Result<(), St7735Error> {
        let result = if on {
            self.backlight.set_high()
        } else {
            self.backlight.set_low()
        };
        result.map_err(|_| St7735Error::Pin)
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, c: u8, params: &[u8]) -> Result<(), St7735Error> {
        self.dc.set_low().map_err(|_| St7735Error::Pin)?;
        self.spi.write(&[c]).map_err(|_| St7735Error::Spi)?;
        if !params.is_empty() {
            self.data(params)?;
        }
        Ok(())
    }

    /// Send data bytes
    fn data(&mut self, bytes: &[u8]) -> Result<(), St7735Error> {
        self.dc.set_high().map_err(|_| St7735Error::Pin)?;
        self.spi.write(bytes).map_err(|_| St7735Error::Spi)
    }

    /// Select the RAM window for the next pixel stream (inclusive corners)
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), St7735Error> {
        let [xs_hi, xs_lo] = (x0 + X_OFFSET).to_be_bytes();
        let [xe_hi, xe_lo] = (x1 + X_OFFSET).to_be_bytes();
        let [ys_hi, ys_lo] = (y0 + Y_OFFSET).to_be_bytes();
        let [ye_hi, ye_lo] = (y1 + Y_OFFSET).to_be_bytes();

        self.command(cmd::CASET, &[xs_hi, xs_lo, xe_hi, xe_lo])?;
        self.command(cmd::RASET, &[ys_hi, ys_lo, ye_hi, ye_lo])?;
        self.command(cmd::RAMWR, &[])
    }

    /// Stream pixels into the current window
    fn write_pixels<I>(&mut self, colors: I) -> Result<(), St7735Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.dc.set_high().map_err(|_| St7735Error::Pin)?;

        let mut buf = [0u8; CHUNK];
        let mut len = 0;
        for color in colors {
            let [hi, lo] = color.into_storage().to_be_bytes();
            buf[len] = hi;
            buf[len + 1] = lo;
            len += 2;
            if len == CHUNK {
                self.spi.write(&buf).map_err(|_| St7735Error::Spi)?;
                len = 0;
            }
        }
        if len > 0 {
            self.spi.write(&buf[..len]).map_err(|_| St7735Error::Spi)?;
        }
        Ok(())
    }

    /// Clip a rectangle to the panel, returning inclusive corners
    fn window_for(&self, area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
        let area = area.intersection(&self.bounding_box());
        let bottom_right = area.bottom_right()?;
        Some((
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        ))
    }
}

impl<SPI, DC, RST, BL> OriginDimensions for St7735<SPI, DC, RST, BL> {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl<SPI, DC, RST, BL> DrawTarget for St7735<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    type Color = Rgb565;
    type Error = St7735Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_pixels(core::iter::once(color))?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Partially visible areas fall back to per-pixel writes
        if area.intersection(&self.bounding_box()) != *area {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }

        match self.window_for(area) {
            Some((x0, y0, x1, y1)) => {
                self.set_window(x0, y0, x1, y1)?;
                let count = area.size.width as usize * area.size.height as usize;
                self.write_pixels(colors.into_iter().take(count))
            }
            None => Ok(()),
        }
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        match self.window_for(&area) {
            Some((x0, y0, x1, y1)) => {
                self.set_window(x0, y0, x1, y1)?;
                let count = area.size.width as usize * area.size.height as usize;
                self.write_pixels(core::iter::repeat(color).take(count))
            }
            None => Ok(()),
        }
    }
}

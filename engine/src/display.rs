use core::convert::TryFrom;
use core::fmt;

use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;

use crate::framebuffer::FrameBuffer;

/// Visible area of the 1.14" ST7789 panel.
pub const WIDTH: usize = 240;
pub const HEIGHT: usize = 135;

const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;
const INVON: u8 = 0x21;
const SLPOUT: u8 = 0x11;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;

/// Register setup sent after MADCTL: 16 bit pixels, porch, gate, VCOM,
/// power and gamma tables.
const INIT: &[(u8, &[u8])] = &[
    (COLMOD, &[0x05]),
    (0xB2, &[0x0C, 0x0C, 0x00, 0x33, 0x33]),
    (0xB7, &[0x35]),
    (0xBB, &[0x19]),
    (0xC0, &[0x2C]),
    (0xC2, &[0x01]),
    (0xC3, &[0x12]),
    (0xC4, &[0x20]),
    (0xC6, &[0x0F]),
    (0xD0, &[0xA4, 0xA1]),
    (
        0xE0,
        &[0xD0, 0x04, 0x0D, 0x11, 0x13, 0x2B, 0x3F, 0x54, 0x4C, 0x18, 0x0D, 0x0B, 0x1F, 0x23],
    ),
    (
        0xE1,
        &[0xD0, 0x04, 0x0C, 0x11, 0x13, 0x2C, 0x3F, 0x44, 0x51, 0x2F, 0x1F, 0x1F, 0x20, 0x23],
    ),
    (INVON, &[]),
    (SLPOUT, &[]),
    (DISPON, &[]),
];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Orientation {
    Landscape,
    PortraitInverted,
    LandscapeInverted,
    Portrait,
}

impl Orientation {
    fn madctl(self) -> u8 {
        match self {
            Orientation::Landscape => 0x70,
            Orientation::PortraitInverted => 0xC0,
            Orientation::LandscapeInverted => 0xA0,
            Orientation::Portrait => 0x00,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Landscape
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DisplayError<SpiE, PinE> {
    Spi(SpiE),
    Pin(PinE),
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for DisplayError<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "spi transfer failed: {:?}", e),
            Self::Pin(e) => write!(f, "pin write failed: {:?}", e),
        }
    }
}

/// ST7789 panel on a write-only SPI bus with chip select, data/command and
/// reset lines.
pub struct St7789<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    width: usize,
    height: usize,
    orientation: Orientation,
}

impl<SPI, CS, DC, RST, SpiE, PinE> St7789<SPI, CS, DC, RST>
where
    SPI: Write<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
    DC: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
{
    pub fn new(
        spi: SPI,
        cs: CS,
        dc: DC,
        rst: RST,
        width: usize,
        height: usize,
        orientation: Orientation,
    ) -> Self {
        St7789 {
            spi,
            cs,
            dc,
            rst,
            width,
            height,
            orientation,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pulse reset and run the power-up sequence. The panel is on and out
    /// of sleep when this returns.
    pub fn init(&mut self) -> Result<(), DisplayError<SpiE, PinE>> {
        self.cs.set_high().map_err(DisplayError::Pin)?;
        self.dc.set_high().map_err(DisplayError::Pin)?;

        self.rst.set_high().map_err(DisplayError::Pin)?;
        self.rst.set_low().map_err(DisplayError::Pin)?;
        self.rst.set_high().map_err(DisplayError::Pin)?;

        let madctl = self.orientation.madctl();
        self.command(MADCTL, &[madctl])?;
        for &(cmd, data) in INIT {
            self.command(cmd, data)?;
        }

        Ok(())
    }

    /// Send a whole frame.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError<SpiE, PinE>> {
        self.present_bytes(frame.as_bytes())
    }

    /// Set the address window to the visible area and stream `pixels`,
    /// two bytes per pixel.
    pub fn present_bytes(&mut self, pixels: &[u8]) -> Result<(), DisplayError<SpiE, PinE>> {
        if self.height > HEIGHT {
            let end_col = last_address(self.width);
            let end_page = last_address(self.height);

            self.command(CASET, &[0x00, 0x00, (end_col >> 8) as u8, end_col as u8])?;
            self.command(RASET, &[0x00, 0x00, (end_page >> 8) as u8, end_page as u8])?;
        } else {
            // 240x135 sits at column 40, row 53 of the controller's RAM
            self.command(CASET, &[0x00, 0x28, 0x01, 0x17])?;
            self.command(RASET, &[0x00, 0x35, 0x00, 0xBB])?;
        }

        self.write_command(RAMWR)?;

        self.cs.set_high().map_err(DisplayError::Pin)?;
        self.dc.set_high().map_err(DisplayError::Pin)?;
        self.cs.set_low().map_err(DisplayError::Pin)?;
        self.spi.write(pixels).map_err(DisplayError::Spi)?;
        self.cs.set_high().map_err(DisplayError::Pin)?;

        Ok(())
    }

    pub fn write_command(&mut self, cmd: u8) -> Result<(), DisplayError<SpiE, PinE>> {
        self.cs.set_high().map_err(DisplayError::Pin)?;
        self.dc.set_low().map_err(DisplayError::Pin)?;
        self.cs.set_low().map_err(DisplayError::Pin)?;
        self.spi.write(&[cmd]).map_err(DisplayError::Spi)?;
        self.cs.set_high().map_err(DisplayError::Pin)?;

        Ok(())
    }

    pub fn write_data(&mut self, byte: u8) -> Result<(), DisplayError<SpiE, PinE>> {
        self.cs.set_high().map_err(DisplayError::Pin)?;
        self.dc.set_high().map_err(DisplayError::Pin)?;
        self.cs.set_low().map_err(DisplayError::Pin)?;
        self.spi.write(&[byte]).map_err(DisplayError::Spi)?;
        self.cs.set_high().map_err(DisplayError::Pin)?;

        Ok(())
    }

    fn command(&mut self, cmd: u8, data: &[u8]) -> Result<(), DisplayError<SpiE, PinE>> {
        self.write_command(cmd)?;
        for &byte in data {
            self.write_data(byte)?;
        }

        Ok(())
    }

    /// Give back the bus and pins.
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }
}

/// Last RAM address along an axis `len` pixels long, clamped to the
/// 16-bit address range.
fn last_address(len: usize) -> u16 {
    u16::try_from(len.saturating_sub(1)).unwrap_or(u16::MAX)
}

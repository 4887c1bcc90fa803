use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    text::{Baseline, Text},
};

use crate::surface::{from_rgb565, to_rgb565, Surface};

/// Pixel memory for one frame, two bytes per pixel in the order the
/// panel expects them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FrameBuffer {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            buffer: vec![0; width * height * 2],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y * self.width + x) * 2;
        Some(u16::from_le_bytes([self.buffer[offset], self.buffer[offset + 1]]))
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u16) {
        if x >= self.width || y >= self.height {
            return;
        }

        let offset = (y * self.width + x) * 2;
        self.buffer[offset..offset + 2].copy_from_slice(&color.to_le_bytes());
    }

    pub fn clear(&mut self, color: u16) {
        let [lo, hi] = color.to_le_bytes();
        for pair in self.buffer.chunks_exact_mut(2) {
            pair[0] = lo;
            pair[1] = hi;
        }
    }

    /// Raw frame as sent to the panel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Iterate over packed pixels, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = u16> + '_ {
        self.buffer
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }
}

impl Surface for FrameBuffer {
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u16) {
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);

        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let bytes = color.to_le_bytes();
        for row in y0 as usize..y1 as usize {
            let start = (row * self.width + x0 as usize) * 2;
            let end = (row * self.width + x1 as usize) * 2;
            for pair in self.buffer[start..end].chunks_exact_mut(2) {
                pair.copy_from_slice(&bytes);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u16) {
        let style = MonoTextStyle::new(&FONT_6X10, to_rgb565(color));
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(self)
            .ok();
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            self.set_pixel(x as usize, y as usize, from_rgb565(color));
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

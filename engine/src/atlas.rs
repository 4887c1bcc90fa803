use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Side length of one sprite cell in pixels.
pub const CELL: usize = 8;

/// Pixels in one sprite cell.
pub const CELL_PIXELS: usize = CELL * CELL;

/// A grid of 8x8 sprite cells stored as one row-major buffer of palette
/// indices, `8 * cells_w` pixels wide and `8 * cells_h` pixels tall.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SpriteAtlas {
    pixels: Vec<u8>,
    cells_w: usize,
    cells_h: usize,
}

impl SpriteAtlas {
    /// Decode an atlas from hex text, one digit per pixel. Whitespace is
    /// ignored so the text can be laid out in rows.
    pub fn from_hex(hex: &str, cells_w: usize, cells_h: usize) -> Result<Self> {
        let pixels = decode_hex(hex)?;

        let expected = cells_w
            .checked_mul(cells_h)
            .and_then(|cells| cells.checked_mul(CELL_PIXELS))
            .unwrap_or(usize::MAX);

        if pixels.len() != expected {
            return Err(Error::InvalidAtlasLength {
                expected,
                found: pixels.len(),
            });
        }

        Ok(SpriteAtlas {
            pixels,
            cells_w,
            cells_h,
        })
    }

    pub fn empty() -> Self {
        SpriteAtlas {
            pixels: Vec::new(),
            cells_w: 0,
            cells_h: 0,
        }
    }

    #[inline]
    pub fn cells_w(&self) -> usize {
        self.cells_w
    }

    #[inline]
    pub fn cells_h(&self) -> usize {
        self.cells_h
    }

    #[inline]
    pub fn width_px(&self) -> usize {
        self.cells_w * CELL
    }

    #[inline]
    pub fn height_px(&self) -> usize {
        self.cells_h * CELL
    }

    pub fn sprite_count(&self) -> usize {
        self.cells_w * self.cells_h
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Palette index at atlas pixel `(x, y)`, or `None` outside the atlas.
    #[inline]
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width_px() || y >= self.height_px() {
            return None;
        }

        self.pixels.get(y * self.width_px() + x).copied()
    }

    /// Top-left pixel of sprite `n`'s cell. Cells are numbered row-major,
    /// so sprite 0 always sits at the origin. Rows past `usize::MAX` pixels
    /// saturate.
    pub fn cell_origin(&self, n: usize) -> (usize, usize) {
        if self.cells_w == 0 {
            return (0, 0);
        }

        let col = n % self.cells_w;
        let row = n / self.cells_w;
        (col * CELL, row.saturating_mul(CELL))
    }
}

fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let mut pixels = Vec::with_capacity(hex.len());

    for (position, found) in hex.chars().enumerate() {
        if found.is_ascii_whitespace() {
            continue;
        }

        match found.to_digit(16) {
            Some(value) => pixels.push(value as u8),
            None => return Err(Error::InvalidHexCharacter { position, found }),
        }
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn hex(cells: usize, digit: char) -> String {
        core::iter::repeat(digit)
            .take(cells * CELL_PIXELS)
            .collect()
    }

    #[test]
    fn decodes_one_index_per_digit() {
        let text: String = "0123456789abcdefABCDEF"
            .chars()
            .cycle()
            .take(CELL_PIXELS)
            .collect();
        let atlas = SpriteAtlas::from_hex(&text, 1, 1).unwrap();

        let expected: [u8; 22] = [
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 10, 11, 12, 13, 14, 15,
        ];
        assert_eq!(&atlas.pixels()[..22], &expected[..]);
        assert_eq!(atlas.pixels().len(), CELL_PIXELS);
    }

    #[test]
    fn whitespace_is_stripped() {
        let mut text = String::new();
        for row in 0..CELL {
            text.push_str("  ");
            text.push_str(&hex(1, '7')[..CELL]);
            if row % 2 == 0 {
                text.push('\n');
            } else {
                text.push_str("\r\n\t");
            }
        }

        let atlas = SpriteAtlas::from_hex(&text, 1, 1).unwrap();
        assert!(atlas.pixels().iter().all(|&index| index == 7));
    }

    #[test]
    fn rejects_bad_lengths() {
        let short = &hex(2, '1')[1..];
        assert_eq!(
            SpriteAtlas::from_hex(short, 2, 1),
            Err(Error::InvalidAtlasLength {
                expected: 128,
                found: 127,
            })
        );

        let long = hex(3, '1');
        assert_eq!(
            SpriteAtlas::from_hex(&long, 2, 1),
            Err(Error::InvalidAtlasLength {
                expected: 128,
                found: 192,
            })
        );
    }

    #[test]
    fn rejects_non_hex() {
        let mut text = hex(1, '0');
        text.replace_range(5..6, "g");

        assert_eq!(
            SpriteAtlas::from_hex(&text, 1, 1),
            Err(Error::InvalidHexCharacter {
                position: 5,
                found: 'g',
            })
        );
    }

    #[test]
    fn empty_grid_accepts_empty_text() {
        let atlas = SpriteAtlas::from_hex(" \n", 0, 0).unwrap();
        assert_eq!(atlas, SpriteAtlas::empty());
        assert_eq!(atlas.sprite_count(), 0);
        assert_eq!(atlas.cell_origin(3), (0, 0));
    }

    #[test]
    fn cells_are_row_major() {
        let atlas = SpriteAtlas::from_hex(&hex(8 * 4, '0'), 8, 4).unwrap();

        assert_eq!(atlas.width_px(), 64);
        assert_eq!(atlas.height_px(), 32);
        assert_eq!(atlas.cell_origin(0), (0, 0));
        assert_eq!(atlas.cell_origin(7), (56, 0));
        assert_eq!(atlas.cell_origin(8), (0, 8));
        assert_eq!(atlas.cell_origin(19), (24, 16));
    }

    #[test]
    fn huge_indices_do_not_overflow() {
        let atlas = SpriteAtlas::from_hex(&hex(1, '0'), 1, 1).unwrap();
        assert_eq!(atlas.cell_origin(usize::MAX), (0, usize::MAX));

        let atlas = SpriteAtlas::from_hex(&hex(8, '0'), 8, 1).unwrap();
        assert_eq!(atlas.cell_origin(usize::MAX), (56, usize::MAX / 8 * 8));
    }

    #[test]
    fn index_at_reads_row_major() {
        let mut text = hex(2, '0');
        // pixel (9, 1) in a 16 pixel wide atlas
        text.replace_range(25..26, "c");
        let atlas = SpriteAtlas::from_hex(&text, 2, 1).unwrap();

        assert_eq!(atlas.index_at(9, 1), Some(12));
        assert_eq!(atlas.index_at(1, 9), None);
        assert_eq!(atlas.index_at(16, 0), None);
    }
}

use crate::error::{Error, Result};

/// Number of entries in a color table.
pub const COLORS: usize = 16;

pub const BLACK: u8 = 0;
pub const DARK_BLUE: u8 = 1;
pub const DARK_PURPLE: u8 = 2;
pub const DARK_GREEN: u8 = 3;
pub const BROWN: u8 = 4;
pub const DARK_GREY: u8 = 5;
pub const LIGHT_GREY: u8 = 6;
pub const WHITE: u8 = 7;
pub const RED: u8 = 8;
pub const ORANGE: u8 = 9;
pub const YELLOW: u8 = 10;
pub const GREEN: u8 = 11;
pub const BLUE: u8 = 12;
pub const LAVENDER: u8 = 13;
pub const PINK: u8 = 14;
pub const LIGHT_PEACH: u8 = 15;

const PICO: [(u8, u8, u8); COLORS] = [
    (0, 0, 0),
    (1, 1, 2),
    (3, 1, 2),
    (0, 4, 2),
    (5, 2, 1),
    (3, 2, 2),
    (5, 5, 5),
    (7, 7, 7),
    (7, 0, 2),
    (7, 4, 0),
    (7, 6, 1),
    (0, 7, 1),
    (1, 5, 7),
    (4, 3, 4),
    (7, 3, 5),
    (7, 6, 5),
];

/// Pack a 3-bit-per-channel color into the word the panel expects.
///
/// Layout is `0b_111_Bbb_11_Rrr_11_Ggg`. Only the low 3 bits of each
/// channel are used. Black packs to 0, which the blitter and the frame
/// buffer treat as the background value.
///
/// ```
/// use tinydraw::palette::pack_color;
///
/// assert_eq!(pack_color(0, 0, 0), 0);
/// assert_eq!(pack_color(7, 7, 7), 0xFFFF);
/// assert_eq!(pack_color(1, 0, 0), 0b1110_0011_0011_1000);
/// ```
pub const fn pack_color(r: u8, g: u8, b: u8) -> u16 {
    if (r | g | b) & 7 == 0 {
        return 0;
    }

    0b111_000_11_000_11_000
        | (g & 7) as u16
        | ((r & 7) as u16) << 5
        | ((b & 7) as u16) << 10
}

/// Fixed table of 16 packed colors, indexed by palette index.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ColorTable {
    colors: [u16; COLORS],
}

impl ColorTable {
    /// The default 16 color table.
    pub const fn pico() -> Self {
        let mut colors = [0; COLORS];
        let mut index = 0;
        while index < COLORS {
            let (r, g, b) = PICO[index];
            colors[index] = pack_color(r, g, b);
            index += 1;
        }

        ColorTable { colors }
    }

    /// Build a table from RGB333 triples. Entry 0 is the transparent
    /// background and must be black.
    pub fn from_rgb333(rgb: [(u8, u8, u8); COLORS]) -> Result<Self> {
        let mut colors = [0; COLORS];
        for (slot, &(r, g, b)) in colors.iter_mut().zip(rgb.iter()) {
            *slot = pack_color(r, g, b);
        }

        if colors[0] != 0 {
            return Err(Error::InvalidPalette);
        }

        Ok(ColorTable { colors })
    }

    /// Packed color for a palette index. Anything outside `0..16` falls
    /// back to entry 0.
    #[inline]
    pub fn color(&self, index: usize) -> u16 {
        match self.colors.get(index) {
            Some(&color) => color,
            None => self.colors[0],
        }
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.colors
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        ColorTable::pico()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_packs_to_zero() {
        assert_eq!(pack_color(0, 0, 0), 0);
    }

    #[test]
    fn white_packs_to_all_ones() {
        assert_eq!(pack_color(7, 7, 7), 0xFFFF);
    }

    #[test]
    fn fixed_bits_set_without_blue() {
        for r in 0..8 {
            for g in 0..8 {
                if r | g == 0 {
                    continue;
                }
                let packed = pack_color(r, g, 0);
                assert_eq!(packed & 0b0000_0011_0000_0000, 0b0000_0011_0000_0000);
                assert_eq!(packed & 0b1110_0000_0000_0000, 0b1110_0000_0000_0000);
                assert_eq!(packed & 0b0001_1100_0000_0000, 0);
                assert_eq!(packed & 0b111, g as u16);
                assert_eq!((packed >> 5) & 0b111, r as u16);
            }
        }
    }

    #[test]
    fn channels_are_masked() {
        assert_eq!(pack_color(0xF, 0, 0), pack_color(7, 0, 0));
        assert_eq!(pack_color(0, 0, 8), 0);
        assert_eq!(pack_color(8, 16, 0xF8), 0);
        assert_eq!(pack_color(9, 0, 0), pack_color(1, 0, 0));
    }

    #[test]
    fn pico_table_entries() {
        let table = ColorTable::pico();
        assert_eq!(table.color(BLACK as usize), 0);
        assert_eq!(table.color(WHITE as usize), 0xFFFF);
        assert_eq!(table.color(RED as usize), pack_color(7, 0, 2));
        assert_eq!(table.color(LIGHT_PEACH as usize), pack_color(7, 6, 5));
        for (index, &color) in table.as_slice().iter().enumerate() {
            assert_eq!(table.color(index), color);
        }
    }

    #[test]
    fn out_of_range_falls_back_to_background() {
        let table = ColorTable::pico();
        assert_eq!(table.color(15), pack_color(7, 6, 5));
        assert_eq!(table.color(16), table.color(0));
        assert_eq!(table.color(usize::MAX), 0);
    }

    #[test]
    fn custom_table_needs_black_background() {
        let mut rgb = [(7, 7, 7); COLORS];
        assert_eq!(ColorTable::from_rgb333(rgb), Err(Error::InvalidPalette));

        rgb[0] = (0, 0, 0);
        let table = ColorTable::from_rgb333(rgb).unwrap();
        assert_eq!(table.color(0), 0);
        assert_eq!(table.color(1), 0xFFFF);
    }
}

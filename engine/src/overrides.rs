use crate::palette::COLORS;

/// Palette substitutions applied while blitting, indexed by the raw atlas
/// value.
///
/// A raw index with an entry is always drawn, even when it maps to 0.
/// Without an entry, raw index 0 is transparent.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PaletteOverride {
    map: [Option<u8>; COLORS],
}

impl PaletteOverride {
    pub const fn new() -> Self {
        PaletteOverride { map: [None; COLORS] }
    }

    /// Draw raw index `from` as `to`. Replaces any earlier entry for `from`.
    /// Atlas values never exceed 15, so larger `from` values are ignored.
    pub fn set(&mut self, from: u8, to: u8) {
        if let Some(slot) = self.map.get_mut(from as usize) {
            *slot = Some(to);
        }
    }

    pub fn clear(&mut self) {
        self.map = [None; COLORS];
    }

    pub fn get(&self, from: u8) -> Option<u8> {
        self.map.get(from as usize).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.map.iter().all(Option::is_none)
    }

    /// Palette index to draw for a raw atlas value, `None` if the pixel is
    /// transparent.
    #[inline]
    pub fn resolve(&self, raw: u8) -> Option<u8> {
        match self.get(raw) {
            Some(index) => Some(index),
            None if raw == 0 => None,
            None => Some(raw),
        }
    }
}

use core::convert::TryFrom;

use crate::atlas::{SpriteAtlas, CELL};
use crate::overrides::PaletteOverride;
use crate::palette::ColorTable;
use crate::surface::Surface;

/// One sprite draw: which cell, where, how many cells, mirroring and the
/// scale it is drawn at.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Sprite {
    pub n: usize,
    pub x: i32,
    pub y: i32,
    /// Width in cells.
    pub w: usize,
    /// Height in cells.
    pub h: usize,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Each atlas pixel becomes a `zoom` x `zoom` block.
    pub zoom: u32,
}

impl Sprite {
    pub const fn new(n: usize) -> Self {
        Sprite {
            n,
            x: 0,
            y: 0,
            w: 1,
            h: 1,
            flip_x: false,
            flip_y: false,
            zoom: 1,
        }
    }

    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub const fn size(mut self, w: usize, h: usize) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    pub const fn flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }

    pub const fn zoom(mut self, zoom: u32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Size of the drawn sprite on the surface, in surface pixels.
    /// Saturates at `u32::MAX`.
    pub fn extent(&self) -> (u32, u32) {
        (span_px(self.w, self.zoom), span_px(self.h, self.zoom))
    }
}

fn span_px(cells: usize, zoom: u32) -> u32 {
    let px = u32::try_from(cells.saturating_mul(CELL)).unwrap_or(u32::MAX);
    px.saturating_mul(zoom)
}

/// Part of the block `[start, start + len)` that an `i32` origin can
/// address, as an origin and a width.
fn visible(start: i64, len: i64) -> Option<(i32, u32)> {
    let lo = start.max(i64::from(i32::MIN));
    let hi = start.saturating_add(len).min(i64::from(i32::MAX) + 1);
    if lo >= hi {
        return None;
    }

    let width = (hi - lo).min(i64::from(u32::MAX));
    Some((lo as i32, width as u32))
}

/// Draw `sprite` from `atlas` onto `surface`.
///
/// Each atlas pixel goes through `overrides` and then `colors`; pixels
/// that resolve to transparent are left untouched. Flipped sprites are
/// drawn by walking the destination backwards from the far edge, so a
/// flipped sprite covers exactly the same rectangle as an unflipped one.
/// Parts of the requested cells that fall outside the atlas are skipped.
pub fn blit<S: Surface + ?Sized>(
    atlas: &SpriteAtlas,
    colors: &ColorTable,
    overrides: &PaletteOverride,
    surface: &mut S,
    sprite: &Sprite,
) {
    if sprite.zoom == 0 || sprite.n >= atlas.sprite_count() {
        return;
    }

    let zoom = i64::from(sprite.zoom);
    let w8 = sprite.w.saturating_mul(CELL);
    let h8 = sprite.h.saturating_mul(CELL);
    let (bx0, by0) = atlas.cell_origin(sprite.n);

    // only the part of the request inside the atlas has pixels to draw
    let cols = w8.min(atlas.width_px() - bx0);
    let rows = h8.min(atlas.height_px() - by0);

    let (x, h_add) = if sprite.flip_x {
        (far_edge(sprite.x, w8, zoom), -zoom)
    } else {
        (i64::from(sprite.x), zoom)
    };

    let (y, v_add) = if sprite.flip_y {
        (far_edge(sprite.y, h8, zoom), -zoom)
    } else {
        (i64::from(sprite.y), zoom)
    };

    for row in 0..rows {
        let dy = visible(y.saturating_add(row as i64 * v_add), zoom);
        let (dy, bh) = match dy {
            Some(span) => span,
            None => continue,
        };

        for col in 0..cols {
            let index = atlas
                .index_at(bx0 + col, by0 + row)
                .and_then(|raw| overrides.resolve(raw));

            if let Some(index) = index {
                if let Some((dx, bw)) = visible(x.saturating_add(col as i64 * h_add), zoom) {
                    surface.fill_rect(dx, dy, bw, bh, colors.color(index as usize));
                }
            }
        }
    }
}

/// Destination of the last pixel along an axis `len` pixels long.
fn far_edge(origin: i32, len: usize, zoom: i64) -> i64 {
    let last = i64::try_from(len).unwrap_or(i64::MAX) - 1;
    i64::from(origin).saturating_add(last.saturating_mul(zoom))
}

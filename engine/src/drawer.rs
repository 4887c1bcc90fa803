use crate::atlas::SpriteAtlas;
use crate::blit::{blit, Sprite};
use crate::display::{HEIGHT, WIDTH};
use crate::error::Result;
use crate::overrides::PaletteOverride;
use crate::palette::{self, ColorTable};
use crate::surface::Surface;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawerConfig {
    /// Atlas width in cells.
    pub cells_w: usize,
    /// Atlas height in cells.
    pub cells_h: usize,
    pub display_w: usize,
    pub display_h: usize,
    /// Default scale for sprites made with [`Drawer::sprite`].
    pub zoom: u32,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        DrawerConfig {
            cells_w: 8,
            cells_h: 4,
            display_w: WIDTH,
            display_h: HEIGHT,
            zoom: 5,
        }
    }
}

/// Sprite atlas, color table and palette overrides bundled for a render
/// loop.
///
/// ```
/// use tinydraw::{Drawer, DrawerConfig, FrameBuffer};
///
/// let hex = "0".repeat(64);
/// let config = DrawerConfig { cells_w: 1, cells_h: 1, ..DrawerConfig::default() };
/// let mut drawer = Drawer::new(&hex, config).unwrap();
/// let mut frame = FrameBuffer::new(240, 135);
///
/// drawer.set_override(0, 8);
/// drawer.draw_sprite(&mut frame, &drawer.sprite(0).at(10, 10).flip(true, false));
/// drawer.clear_overrides();
///
/// assert_eq!(frame.pixel(10, 10), Some(drawer.color(8)));
/// ```
#[derive(Debug, Clone)]
pub struct Drawer {
    atlas: SpriteAtlas,
    colors: ColorTable,
    overrides: PaletteOverride,
    config: DrawerConfig,
}

impl Drawer {
    pub fn new(hex: &str, config: DrawerConfig) -> Result<Drawer> {
        let atlas = SpriteAtlas::from_hex(hex, config.cells_w, config.cells_h)?;

        Ok(Drawer {
            atlas,
            colors: ColorTable::pico(),
            overrides: PaletteOverride::new(),
            config,
        })
    }

    /// A drawer for the default 8x4 atlas on the 240x135 panel at zoom 5.
    pub fn with_defaults(hex: &str) -> Result<Drawer> {
        Drawer::new(hex, DrawerConfig::default())
    }

    pub fn with_colors(mut self, colors: ColorTable) -> Drawer {
        self.colors = colors;
        self
    }

    /// Replace the atlas. On error the current atlas is kept.
    pub fn set_atlas(&mut self, hex: &str, cells_w: usize, cells_h: usize) -> Result {
        self.atlas = SpriteAtlas::from_hex(hex, cells_w, cells_h)?;
        self.config.cells_w = cells_w;
        self.config.cells_h = cells_h;
        Ok(())
    }

    pub fn atlas(&self) -> &SpriteAtlas {
        &self.atlas
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    #[inline]
    pub fn zoom(&self) -> u32 {
        self.config.zoom
    }

    pub fn display_size(&self) -> (usize, usize) {
        (self.config.display_w, self.config.display_h)
    }

    /// Start a draw request for sprite `n` at the configured zoom.
    pub fn sprite(&self, n: usize) -> Sprite {
        Sprite::new(n).zoom(self.config.zoom)
    }

    pub fn draw_sprite<S: Surface + ?Sized>(&self, surface: &mut S, sprite: &Sprite) {
        blit(&self.atlas, &self.colors, &self.overrides, surface, sprite);
    }

    /// Draw a single cell sprite at `(x, y)` with the configured zoom.
    pub fn spr<S: Surface + ?Sized>(&self, surface: &mut S, n: usize, x: i32, y: i32) {
        self.draw_sprite(surface, &self.sprite(n).at(x, y));
    }

    /// Draw raw palette index `from` as `to` until the next
    /// [`clear_overrides`](Drawer::clear_overrides).
    pub fn set_override(&mut self, from: u8, to: u8) {
        self.overrides.set(from, to);
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    pub fn overrides(&self) -> &PaletteOverride {
        &self.overrides
    }

    #[inline]
    pub fn color(&self, index: usize) -> u16 {
        self.colors.color(index)
    }

    pub fn pack_color(r: u8, g: u8, b: u8) -> u16 {
        palette::pack_color(r, g, b)
    }
}

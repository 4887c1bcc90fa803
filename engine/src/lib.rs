#![no_std]

extern crate alloc;

pub mod atlas;
pub mod blit;
pub mod display;
pub mod drawer;
pub mod error;
pub mod framebuffer;
pub mod overrides;
pub mod palette;
pub mod surface;

pub use atlas::SpriteAtlas;
pub use blit::{blit, Sprite};
pub use drawer::{Drawer, DrawerConfig};
pub use error::{Error, Result};
pub use framebuffer::FrameBuffer;
pub use overrides::PaletteOverride;
pub use palette::{pack_color, ColorTable};
pub use surface::{DrawTargetSurface, Surface};

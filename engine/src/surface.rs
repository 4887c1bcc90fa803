use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::{raw::RawU16, IntoStorage, Rgb565, Rgb888},
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};

/// Anything sprites can be drawn onto.
pub trait Surface {
    /// Fill a `w` x `h` rectangle at `(x, y)` with a packed color. Parts
    /// outside the surface are dropped.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u16);

    /// Draw `text` with its top-left corner at `(x, y)`. Surfaces without
    /// text support ignore it.
    fn draw_text(&mut self, _text: &str, _x: i32, _y: i32, _color: u16) {}
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u16) {
        (**self).fill_rect(x, y, w, h, color)
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u16) {
        (**self).draw_text(text, x, y, color)
    }
}

/// The panel receives each packed word low byte first, so on the wire it
/// is an RGB565 value with its bytes swapped.
#[inline]
pub fn to_rgb565(packed: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(packed.swap_bytes()))
}

#[inline]
pub fn from_rgb565(color: Rgb565) -> u16 {
    color.into_storage().swap_bytes()
}

/// `0x00RRGGBB` preview of a packed color, for host windows.
pub fn to_rgb888(packed: u16) -> u32 {
    let color = Rgb888::from(to_rgb565(packed));
    (color.r() as u32) << 16 | (color.g() as u32) << 8 | color.b() as u32
}

/// Lets any `embedded-graphics` RGB565 target act as a [`Surface`].
///
/// Surface calls cannot fail, so the first error the target reports is
/// kept and can be taken afterwards.
pub struct DrawTargetSurface<D: DrawTarget<Color = Rgb565>> {
    target: D,
    error: Option<D::Error>,
}

impl<D: DrawTarget<Color = Rgb565>> DrawTargetSurface<D> {
    pub fn new(target: D) -> Self {
        DrawTargetSurface {
            target,
            error: None,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn take_error(&mut self) -> Option<D::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn record<T>(&mut self, result: Result<T, D::Error>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

impl<D: DrawTarget<Color = Rgb565>> Surface for DrawTargetSurface<D> {
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u16) {
        let area = Rectangle::new(Point::new(x, y), Size::new(w, h));
        let result = self.target.fill_solid(&area, to_rgb565(color));
        self.record(result);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u16) {
        let style = MonoTextStyle::new(&FONT_6X10, to_rgb565(color));
        let result = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target);
        self.record(result);
    }
}

//! Graphics Support for the pixel buffer
//!
//! Lines, rectangles, text and images come from embedded-graphics. [`Canvas`]
//! hands any [`PixelBuffer`] to it as a [`DrawTarget`].

use crate::color::from_graphics;
use crate::traits::PixelBuffer;
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::prelude::*;

/// Drawing surface for embedded-graphics
///
/// Pixels outside of the buffer are clipped, as embedded-graphics expects from
/// a draw target. Other errors of the buffer (e.g. a released framebuffer) are
/// passed on.
pub struct Canvas<'a, B: PixelBuffer> {
    buffer: &'a mut B,
}

impl<'a, B: PixelBuffer> Canvas<'a, B> {
    /// Wraps a pixel buffer
    pub fn new(buffer: &'a mut B) -> Self {
        Canvas { buffer }
    }

    /// The wrapped buffer
    pub fn into_inner(self) -> &'a mut B {
        self.buffer
    }
}

/// For use with embedded_grahics
impl<B: PixelBuffer> DrawTarget for Canvas<'_, B> {
    type Color = Rgb565;
    type Error = B::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = i32::from(self.buffer.width());
        let height = i32::from(self.buffer.height());
        for Pixel(point, color) in pixels {
            if (0..width).contains(&point.x) && (0..height).contains(&point.y) {
                self.buffer
                    .set_pixel(point.x, point.y, from_graphics(color))?;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(from_graphics(color))
    }
}

/// For use with embedded_grahics
impl<B: PixelBuffer> OriginDimensions for Canvas<'_, B> {
    fn size(&self) -> Size {
        Size::new(self.buffer.width().into(), self.buffer.height().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{encode_color, BLACK, BLUE, RED, WHITE};
    use crate::error::FramebufferError;
    use crate::framebuffer::{DisplayGeometry, Framebuffer};
    use embedded_graphics::{
        mono_font::{ascii::FONT_6X10, MonoTextStyle},
        prelude::Primitive,
        primitives::{Line, PrimitiveStyle, Rectangle},
        text::Text,
    };

    #[test]
    fn size() {
        let mut fb = Framebuffer::new(DisplayGeometry::new(320, 240));
        let canvas = Canvas::new(&mut fb);
        assert_eq!(canvas.size(), Size::new(320, 240));
    }

    #[test]
    fn filled_rectangle() {
        let mut fb = Framebuffer::new(DisplayGeometry::new(16, 16));
        Rectangle::new(Point::new(2, 3), Size::new(4, 5))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut Canvas::new(&mut fb))
            .unwrap();

        for y in 0..16 {
            for x in 0..16 {
                let inside = (2..6).contains(&x) && (3..8).contains(&y);
                let expected = if inside { RED } else { BLACK };
                assert_eq!(fb.get_pixel(x, y), Ok(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn line_is_clipped() {
        let mut fb = Framebuffer::new(DisplayGeometry::new(10, 10));
        Line::new(Point::new(-5, 0), Point::new(20, 0))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::BLUE, 1))
            .draw(&mut Canvas::new(&mut fb))
            .unwrap();

        for x in 0..10 {
            assert_eq!(fb.get_pixel(x, 0), Ok(BLUE));
            assert_eq!(fb.get_pixel(x, 1), Ok(BLACK));
        }
    }

    #[test]
    fn text() {
        let mut fb = Framebuffer::new(DisplayGeometry::new(240, 240));
        Text::new(
            "GAME OVER",
            Point::new(84, 112),
            MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
        )
        .draw(&mut Canvas::new(&mut fb))
        .unwrap();

        let lit = fb
            .buffer()
            .chunks(2)
            .filter(|pixel| *pixel == [0xFF, 0xFF])
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn clear_uses_fill() {
        let mut fb = Framebuffer::new(DisplayGeometry::new(3, 3));
        Canvas::new(&mut fb).clear(Rgb565::WHITE).unwrap();
        assert_eq!(fb.get_pixel(2, 2), Ok(WHITE));
        assert_eq!(encode_color(255, 255, 255), WHITE);
    }

    #[test]
    fn released_buffer_is_an_error() {
        let mut fb = Framebuffer::new(DisplayGeometry::new(3, 3));
        fb.release();
        let result = Pixel(Point::new(1, 1), Rgb565::RED).draw(&mut Canvas::new(&mut fb));
        assert_eq!(result, Err(FramebufferError::Released));
    }
}

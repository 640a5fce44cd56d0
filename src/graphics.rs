//! Graphics support for [`embedded_graphics`]
//!
//! `BinaryColor::On` draws black, `BinaryColor::Off` draws white. Points go
//! through [`Framebuffer::set_pixel`], so they follow the active rotation.
use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

use crate::framebuffer::Framebuffer;

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Framebuffer::clear(self, color.into());
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        let (width, height) = Framebuffer::size(self);
        Size::new(width.into(), height.into())
    }
}

/// Implements `DrawTarget` and `OriginDimensions` for a panel driver by
/// forwarding to its framebuffer field.
macro_rules! impl_draw_target {
    ($driver:ident < $($param:ident),+ >) => {
        impl<$($param),+> ::embedded_graphics::draw_target::DrawTarget for $driver<$($param),+> {
            type Color = ::embedded_graphics::pixelcolor::BinaryColor;
            type Error = core::convert::Infallible;

            fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
            where
                I: IntoIterator<Item = ::embedded_graphics::Pixel<Self::Color>>,
            {
                ::embedded_graphics::draw_target::DrawTarget::draw_iter(&mut self.framebuffer, pixels)
            }

            fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
                ::embedded_graphics::draw_target::DrawTarget::clear(&mut self.framebuffer, color)
            }
        }

        impl<$($param),+> ::embedded_graphics::geometry::OriginDimensions for $driver<$($param),+> {
            fn size(&self) -> ::embedded_graphics::geometry::Size {
                ::embedded_graphics::geometry::OriginDimensions::size(&self.framebuffer)
            }
        }
    };
}

pub(crate) use impl_draw_target;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Polarity};
    use crate::config::Geometry;
    use crate::framebuffer::DisplayRotation;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    fn framebuffer(rotation: DisplayRotation) -> Framebuffer {
        Framebuffer::new(
            Geometry {
                width: 122,
                height: 250,
                logical_width: 128,
            },
            rotation,
            Polarity::WhiteIsSet,
        )
        .unwrap()
    }

    #[test]
    fn graphics_size_follows_rotation() {
        let fb = framebuffer(DisplayRotation::Rotate270);
        assert_eq!(OriginDimensions::size(&fb), Size::new(250, 122));
    }

    #[test]
    fn graphics_rotation_0() {
        let mut fb = framebuffer(DisplayRotation::Rotate0);
        Line::new(Point::new(0, 0), Point::new(7, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.buffer()[0], 0x00);
        assert_eq!(fb.buffer()[1], 0xFF);
    }

    #[test]
    fn graphics_rotation_90() {
        let mut fb = framebuffer(DisplayRotation::Rotate90);
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut fb).unwrap();
        assert_eq!(fb.get_pixel(0, 0), Some(Color::Black));
        assert_eq!(fb.buffer()[15], 0xBF);
    }

    #[test]
    fn filled_rectangle_and_clear() {
        let mut fb = framebuffer(DisplayRotation::Rotate0);
        Rectangle::new(Point::new(8, 1), Size::new(8, 2))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.buffer()[16 + 1], 0x00);
        assert_eq!(fb.buffer()[32 + 1], 0x00);
        assert_eq!(fb.buffer()[48 + 1], 0xFF);

        DrawTarget::clear(&mut fb, BinaryColor::On).unwrap();
        assert!(fb.buffer().iter().all(|&b| b == 0x00));
    }
}

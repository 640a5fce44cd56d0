//! Bit-packed framebuffer with rotation-aware pixel addressing
//!
//! One bit per pixel, MSB first within each byte, rows of `logical_width`
//! pixels. Single pixels are written in rotated (caller) coordinates and are
//! silently dropped when they land outside the buffer. Rectangle fills are
//! given in native, un-rotated coordinates and are rejected as a whole when
//! they do not fit the physical panel.
use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Color, Polarity};
use crate::config::Geometry;
use crate::error::{ConfigError, GeometryError};

/// Display rotation, clockwise
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate by 270 degrees clockwise
    Rotate270,
}

impl DisplayRotation {
    /// Whether width and height trade places
    pub const fn is_portrait_swap(self) -> bool {
        matches!(self, DisplayRotation::Rotate90 | DisplayRotation::Rotate270)
    }
}

/// In-memory mirror of the panel RAM
#[derive(Clone, Debug)]
pub struct Framebuffer {
    geometry: Geometry,
    rotation: DisplayRotation,
    polarity: Polarity,
    buffer: Vec<u8>,
}

impl Default for Framebuffer {
    /// Zero sized buffer of an unconfigured panel
    fn default() -> Self {
        Framebuffer {
            geometry: Geometry {
                width: 0,
                height: 0,
                logical_width: 0,
            },
            rotation: DisplayRotation::Rotate0,
            polarity: Polarity::WhiteIsSet,
            buffer: Vec::new(),
        }
    }
}

impl Framebuffer {
    /// Allocate a buffer cleared to white.
    ///
    /// Fails when `geometry` has no pixels or its row stride is not a whole
    /// number of bytes covering `width`.
    pub fn new(
        geometry: Geometry,
        rotation: DisplayRotation,
        polarity: Polarity,
    ) -> Result<Self, ConfigError> {
        geometry.check()?;
        Ok(Framebuffer {
            geometry,
            rotation,
            polarity,
            buffer: vec![polarity.fill_byte(Color::White); geometry.buffer_len()],
        })
    }

    /// Native geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Bit polarity of this buffer
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Change the rotation used by later pixel writes. Buffer content stays as is.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// The packed bytes, row-major
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.geometry.stride()
    }

    /// Packed bytes of one native row
    pub fn row(&self, y: u16) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        self.buffer.get(start..start + stride).unwrap_or(&[])
    }

    /// Size as seen by the caller: width and height swap for 90 and 270 degrees
    pub fn size(&self) -> (u16, u16) {
        let Geometry { width, height, .. } = self.geometry;
        if self.rotation.is_portrait_swap() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Set every pixel to `color`
    pub fn clear(&mut self, color: Color) {
        let byte = self.polarity.fill_byte(color);
        self.buffer.iter_mut().for_each(|b| *b = byte);
    }

    /// Set one pixel, given in rotated coordinates.
    ///
    /// Pixels that land outside the buffer after rotation are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((nx, ny)) = self.to_native(x, y) else {
            return;
        };
        if let Some((index, mask)) = self.locate(nx, ny) {
            self.write_bit(index, mask, color);
        }
    }

    /// Read one pixel, given in rotated coordinates
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (nx, ny) = self.to_native(x, y)?;
        let (index, mask) = self.locate(nx, ny)?;
        Some(self.polarity.color_of(self.buffer[index] & mask != 0))
    }

    /// Fill a rectangle given in native, un-rotated coordinates.
    ///
    /// The whole rectangle has to lie within `width` x `height`, otherwise
    /// nothing is written.
    pub fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), GeometryError> {
        let err = GeometryError {
            x,
            y,
            width,
            height,
        };
        let right = i64::from(x) + i64::from(width);
        let bottom = i64::from(y) + i64::from(height);
        if width <= 0
            || height <= 0
            || x < 0
            || y < 0
            || right > i64::from(self.geometry.width)
            || bottom > i64::from(self.geometry.height)
        {
            return Err(err);
        }

        let fill = self.polarity.fill_byte(color);
        let (x0, x1) = (x as usize, right as usize);
        let stride = self.stride();
        for ny in y as usize..bottom as usize {
            let row = ny * stride;
            let mut nx = x0;
            while nx < x1 {
                if nx % 8 == 0 && nx + 8 <= x1 {
                    // fully covered byte
                    self.buffer[row + nx / 8] = fill;
                    nx += 8;
                } else {
                    self.write_bit(row + nx / 8, 0x80 >> (nx % 8), color);
                    nx += 1;
                }
            }
        }
        Ok(())
    }

    /// Map caller coordinates to native coordinates, `None` when the
    /// mirrored axis does not fit in `i32`
    fn to_native(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let last_x = i32::from(self.geometry.width) - 1;
        let last_y = i32::from(self.geometry.height) - 1;
        match self.rotation {
            DisplayRotation::Rotate0 => Some((x, y)),
            DisplayRotation::Rotate90 => Some((last_x.checked_sub(y)?, x)),
            DisplayRotation::Rotate180 => {
                Some((last_x.checked_sub(x)?, last_y.checked_sub(y)?))
            }
            DisplayRotation::Rotate270 => Some((y, last_y.checked_sub(x)?)),
        }
    }

    /// Byte index and bit mask of a native pixel inside `logical_width` x `height`
    fn locate(&self, nx: i32, ny: i32) -> Option<(usize, u8)> {
        if nx < 0
            || ny < 0
            || nx >= i32::from(self.geometry.logical_width)
            || ny >= i32::from(self.geometry.height)
        {
            return None;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        let index = (nx + ny * self.geometry.logical_width as usize) / 8;
        Some((index, 0x80 >> (nx % 8)))
    }

    fn write_bit(&mut self, index: usize, mask: u8, color: Color) {
        if self.polarity.is_set(color) {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }
}

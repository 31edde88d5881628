//! Driver for embedded-graphics.
//!
//! [`FrameBuffer`] draws into a caller owned byte slice laid out the way the panel
//! expects it: row major, MSB first, bit set = [`BinaryColor::On`] (black).
//! The slice is handed to [`crate::EPD::display_frame`] with `inverted = false`.

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::BinaryColor, prelude::*};

use crate::config::PanelConfig;
use crate::interface::DisplayError;

/// Rotation of the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayRotation {
    /// No rotation, normal display
    #[default]
    Rotate0,
    /// Rotate by 90 degress clockwise
    Rotate90,
    /// Rotate by 180 degress clockwise
    Rotate180,
    /// Rotate 270 degress clockwise
    Rotate270,
}

pub struct FrameBuffer<'a> {
    buf: &'a mut [u8],
    width: usize,
    height: usize,
    rotation: DisplayRotation,
}

impl<'a> FrameBuffer<'a> {
    /// Wrap `buf`, which must be exactly `config.buffer_len()` bytes.
    pub fn new(buf: &'a mut [u8], config: &PanelConfig) -> Result<Self, DisplayError> {
        let expected = config.buffer_len();
        if buf.len() != expected {
            return Err(DisplayError::InvalidBufferLength {
                expected,
                actual: buf.len(),
            });
        }
        Ok(Self {
            buf,
            width: config.width() as usize,
            height: config.height() as usize,
            rotation: DisplayRotation::Rotate0,
        })
    }

    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    pub fn fill(&mut self, color: BinaryColor) {
        self.buf.fill(if color.is_on() { 0xff } else { 0x00 });
    }

    /// Import XBM pixel data.
    ///
    /// XBM stores 1 = black like the panel, but packs pixels LSB first,
    /// so every byte is bit reversed. Rotation does not apply.
    pub fn load_xbm(&mut self, xbm: &[u8]) -> Result<(), DisplayError> {
        if xbm.len() != self.buf.len() {
            return Err(DisplayError::InvalidBufferLength {
                expected: self.buf.len(),
                actual: xbm.len(),
            });
        }
        for (dst, src) in self.buf.iter_mut().zip(xbm) {
            *dst = src.reverse_bits();
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..]
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        let Size { width, height } = self.size();
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return;
        }
        let (x, y) = (x as usize, y as usize);

        let (x, y) = match self.rotation {
            DisplayRotation::Rotate0 => (x, y),
            DisplayRotation::Rotate90 => (self.width - y - 1, x),
            DisplayRotation::Rotate180 => (self.width - x - 1, self.height - y - 1),
            DisplayRotation::Rotate270 => (y, self.height - x - 1),
        };

        let byte_offset = y * (self.width / 8) + x / 8;
        let mask = 0x80 >> (x % 8);
        if color.is_on() {
            self.buf[byte_offset] |= mask;
        } else {
            self.buf[byte_offset] &= !mask;
        }
    }
}

impl OriginDimensions for FrameBuffer<'_> {
    fn size(&self) -> Size {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => {
                Size::new(self.width as _, self.height as _)
            }
            _ => Size::new(self.height as _, self.width as _),
        }
    }
}

impl DrawTarget for FrameBuffer<'_> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels.into_iter() {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

//! Borrowed pixel source and its validated form.

use image::DynamicImage;

use super::{BitDepth, FormatError, PixelLayout};

/// A read-only description of a decoded image owned by the caller.
///
/// Nothing here is checked until [`PixelSource::validate`] runs; the encoder
/// only ever works from the resulting [`ValidatedSource`].
#[derive(Debug, Clone, Copy)]
pub struct PixelSource<'a> {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel composition and order.
    pub layout: PixelLayout,
    /// Bits per channel sample.
    pub bit_depth: BitDepth,
    /// Bytes from the start of one row to the start of the next.
    pub stride: usize,
    /// Row-major pixel bytes, at least `stride * height` long.
    pub pixels: &'a [u8],
}

impl<'a> PixelSource<'a> {
    /// Describe a buffer with an explicit row stride.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        bit_depth: BitDepth,
        stride: usize,
        pixels: &'a [u8],
    ) -> Self {
        Self {
            width,
            height,
            layout,
            bit_depth,
            stride,
            pixels,
        }
    }

    /// Describe a tightly packed buffer (no row padding).
    pub fn packed(
        width: u32,
        height: u32,
        layout: PixelLayout,
        bit_depth: BitDepth,
        pixels: &'a [u8],
    ) -> Self {
        let stride = (width as usize)
            .saturating_mul(layout.channels())
            .saturating_mul(bit_depth.bytes_per_channel());
        Self::new(width, height, layout, bit_depth, stride, pixels)
    }

    /// Borrow the pixels of an 8-bit decoded image.
    ///
    /// Only `Luma8`, `LumaA8`, `Rgb8` and `Rgba8` images map onto a layout;
    /// anything else returns `FormatError::UnsupportedImage`.
    pub fn from_image(image: &'a DynamicImage) -> Result<Self, FormatError> {
        let layout = match image {
            DynamicImage::ImageLuma8(_) => PixelLayout::Gray,
            DynamicImage::ImageLumaA8(_) => PixelLayout::GrayAlpha,
            DynamicImage::ImageRgb8(_) => PixelLayout::Rgb,
            DynamicImage::ImageRgba8(_) => PixelLayout::Rgba,
            other => return Err(FormatError::UnsupportedImage(format!("{:?}", other.color()))),
        };
        Ok(Self::packed(
            image.width(),
            image.height(),
            layout,
            BitDepth::Eight,
            image.as_bytes(),
        ))
    }

    /// Bytes in one packed row, or `None` on overflow.
    pub fn min_row_bytes(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.layout.channels())?
            .checked_mul(self.bit_depth.bytes_per_channel())
    }

    /// Check every layout invariant and produce a trusted view.
    ///
    /// Checks run in order: dimensions, stride, then buffer length.
    pub fn validate(&self) -> Result<ValidatedSource<'a>, FormatError> {
        if self.width == 0 || self.height == 0 {
            return Err(FormatError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let row_bytes = self.min_row_bytes().ok_or(FormatError::DimensionsOverflow)?;
        if self.stride < row_bytes {
            return Err(FormatError::StrideTooSmall {
                stride: self.stride,
                min: row_bytes,
            });
        }

        let needed = self
            .stride
            .checked_mul(self.height as usize)
            .ok_or(FormatError::DimensionsOverflow)?;
        if self.pixels.len() < needed {
            return Err(FormatError::BufferTooShort {
                needed,
                actual: self.pixels.len(),
            });
        }

        Ok(ValidatedSource {
            width: self.width,
            height: self.height,
            layout: self.layout,
            bit_depth: self.bit_depth,
            stride: self.stride,
            row_bytes,
            pixels: &self.pixels[..needed],
        })
    }
}

/// A pixel source whose layout invariants have been checked.
///
/// Only [`PixelSource::validate`] can build one, so every row below `height`
/// is known to lie inside the buffer.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedSource<'a> {
    width: u32,
    height: u32,
    layout: PixelLayout,
    bit_depth: BitDepth,
    stride: usize,
    row_bytes: usize,
    pixels: &'a [u8],
}

impl<'a> ValidatedSource<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes of pixel data per row, excluding stride padding.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Borrow row `index` without its padding, or `None` past the last row.
    #[inline]
    pub fn row(&self, index: u32) -> Option<&'a [u8]> {
        if index >= self.height {
            return None;
        }
        let start = index as usize * self.stride;
        self.pixels.get(start..start + self.row_bytes)
    }
}

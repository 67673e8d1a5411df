//! Sample layout types and validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for pixel source validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Raw layout code does not name a known layout.
    #[error("Unknown pixel layout code: {0}")]
    UnknownLayout(u8),

    /// Raw bit depth is not one the encoder supports.
    #[error("Unsupported bit depth: {0} (expected 8 or 16)")]
    UnsupportedBitDepth(u8),

    /// Row stride is smaller than one packed row.
    #[error("Row stride too small: {stride} bytes, need at least {min}")]
    StrideTooSmall { stride: usize, min: usize },

    /// Backing buffer does not cover `stride * height` bytes.
    #[error("Pixel buffer too short: need {needed} bytes, got {actual}")]
    BufferTooShort { needed: usize, actual: usize },

    /// Row or buffer size does not fit in `usize`.
    #[error("Image dimensions overflow when computing buffer size")]
    DimensionsOverflow,

    /// Decoded image uses a sample format with no matching layout.
    #[error("Unsupported image color type: {0}")]
    UnsupportedImage(String),
}

/// Channel composition and order of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    /// Single luminance channel.
    Gray,
    /// Luminance followed by alpha.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelLayout {
    /// Every supported layout, in raw-code order.
    pub const ALL: [PixelLayout; 4] = [
        PixelLayout::Gray,
        PixelLayout::GrayAlpha,
        PixelLayout::Rgb,
        PixelLayout::Rgba,
    ];

    /// Number of channels per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::GrayAlpha => 2,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    /// Returns true if the last channel is alpha.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelLayout::GrayAlpha | PixelLayout::Rgba)
    }

    /// Convert to the PNG color type with the same channel order.
    pub fn to_png_color(self) -> png::ColorType {
        match self {
            PixelLayout::Gray => png::ColorType::Grayscale,
            PixelLayout::GrayAlpha => png::ColorType::GrayscaleAlpha,
            PixelLayout::Rgb => png::ColorType::Rgb,
            PixelLayout::Rgba => png::ColorType::Rgba,
        }
    }
}

impl TryFrom<u8> for PixelLayout {
    type Error = FormatError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        PixelLayout::ALL
            .get(code as usize)
            .copied()
            .ok_or(FormatError::UnknownLayout(code))
    }
}

/// Bits per channel sample.
///
/// 16-bit samples are stored big-endian in the source buffer, which is the
/// order PNG writes them in, so rows reach the codec without any byte swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BitDepth {
    /// One byte per channel.
    #[default]
    Eight,
    /// Two big-endian bytes per channel.
    Sixteen,
}

impl BitDepth {
    /// Bytes used by one channel sample.
    #[inline]
    pub fn bytes_per_channel(self) -> usize {
        match self {
            BitDepth::Eight => 1,
            BitDepth::Sixteen => 2,
        }
    }

    /// Convert to the PNG bit depth.
    pub fn to_png_depth(self) -> png::BitDepth {
        match self {
            BitDepth::Eight => png::BitDepth::Eight,
            BitDepth::Sixteen => png::BitDepth::Sixteen,
        }
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = FormatError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(FormatError::UnsupportedBitDepth(other)),
        }
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> u8 {
        match depth {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }
}

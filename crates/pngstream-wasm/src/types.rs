//! Pixel descriptor accepted from JavaScript.
//!
//! The descriptor carries only format metadata; pixel bytes are passed
//! separately as a `Uint8Array` so they can be borrowed rather than copied
//! through serde.

use pngstream_core::{BitDepth, PixelLayout, PixelSource};
use serde::Deserialize;

/// Format metadata for a decoded image, as sent from JavaScript.
///
/// ```typescript
/// { width: 640, height: 480, layout: 'rgba', bitDepth: 8, stride: 2560 }
/// ```
///
/// `bitDepth` defaults to 8 and `stride` to the packed row size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsPixelDescriptor {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    #[serde(default)]
    pub bit_depth: BitDepth,
    #[serde(default)]
    pub stride: Option<usize>,
}

impl JsPixelDescriptor {
    /// Describe `pixels` with this metadata. Validation happens at encode time.
    pub fn source<'a>(&self, pixels: &'a [u8]) -> PixelSource<'a> {
        match self.stride {
            Some(stride) => PixelSource::new(
                self.width,
                self.height,
                self.layout,
                self.bit_depth,
                stride,
                pixels,
            ),
            None => PixelSource::packed(self.width, self.height, self.layout, self.bit_depth, pixels),
        }
    }
}

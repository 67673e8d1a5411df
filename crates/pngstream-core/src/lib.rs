//! pngstream Core - Streaming PNG encoder bridge
//!
//! This crate turns an already-decoded, caller-owned pixel buffer into a PNG
//! byte stream written incrementally to a caller-supplied sink.
//!
//! # Module Structure
//!
//! - `source` - Pixel source views: layout, bit depth, stride validation
//! - `encode` - The encoder bridge, byte sinks and quality handling
//!
//! # Usage
//!
//! ```ignore
//! use pngstream_core::{encode, BitDepth, PixelLayout, PixelSource, WriteSink};
//!
//! let file = std::fs::File::create("out.png")?;
//! let source = PixelSource::new(width, height, PixelLayout::Rgba, BitDepth::Eight, stride, &pixels);
//! encode(source, 90, &mut WriteSink::new(file))?;
//! ```

pub mod encode;
pub mod source;

pub use encode::{
    clamp_quality, encode, ByteSink, CodecError, Effort, EncodeError, EncodeStage, SinkError,
    WriteSink, QUALITY_MAX, QUALITY_MIN,
};
pub use source::{BitDepth, FormatError, PixelLayout, PixelSource, ValidatedSource};

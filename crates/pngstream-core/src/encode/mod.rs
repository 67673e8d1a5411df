//! Streaming PNG encoding for pngstream.
//!
//! This module provides functionality for:
//! - Encoding a borrowed pixel source as PNG into any [`ByteSink`]
//! - Clamping the quality scalar and mapping it to compression effort
//! - Adapting `std::io` writers into byte sinks
//!
//! # Architecture
//!
//! One call to [`encode`] runs start to finish on the calling thread.
//! The codec pulls rows from the source in ascending order and every chunk
//! it produces goes straight to the sink, so the only blocking point is the
//! sink itself. Nothing survives the call.
//!
//! # Examples
//!
//! ```ignore
//! use pngstream_core::encode::encode;
//! use pngstream_core::source::{BitDepth, PixelLayout, PixelSource};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray-ish RGB image
//! let source = PixelSource::packed(100, 100, PixelLayout::Rgb, BitDepth::Eight, &pixels);
//! let mut png = Vec::new();
//! encode(source, 90, &mut png).unwrap();
//! println!("Encoded {} bytes", png.len());
//! ```

mod bridge;
mod codec;
mod quality;
mod sink;

pub use bridge::{encode, EncodeError, EncodeStage};
pub use codec::CodecError;
pub use quality::{clamp_quality, Effort, QUALITY_MAX, QUALITY_MIN};
pub use sink::{ByteSink, SinkError, WriteSink};

//! Pixel source views over caller-owned, already-decoded images.
//!
//! This module provides:
//! - [`PixelLayout`] and [`BitDepth`] describing how samples are stored
//! - [`PixelSource`], a borrowed description of a decoded image
//! - [`ValidatedSource`], the checked view the encoder trusts without re-checking
//!
//! # Memory Model
//!
//! Pixel bytes are always borrowed. A `PixelSource<'a>` cannot outlive the
//! buffer it describes, and nothing in the encoder keeps a reference to it
//! once an encode call returns.
//!
//! # Examples
//!
//! ```ignore
//! use pngstream_core::source::{BitDepth, PixelLayout, PixelSource};
//!
//! let pixels = vec![0u8; 8 * 2]; // 2x2 RGBA, stride 8
//! let source = PixelSource::new(2, 2, PixelLayout::Rgba, BitDepth::Eight, 8, &pixels);
//! let view = source.validate().unwrap();
//! assert_eq!(view.row(1).map(|row| row.len()), Some(8));
//! ```

mod types;
mod view;

pub use types::{BitDepth, FormatError, PixelLayout};
pub use view::{PixelSource, ValidatedSource};

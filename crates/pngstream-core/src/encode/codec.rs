//! Codec seam between the bridge and the PNG compressor.
//!
//! The bridge never touches compressed data itself. It hands a codec a
//! [`RowSupplier`] to pull rows from and an output writer to push bytes into;
//! [`PngCodec`] drives the `png` crate through that pair.

use std::cell::Cell;
use std::io::{self, Write};

use thiserror::Error;

use super::quality::Effort;
use crate::source::{BitDepth, PixelLayout};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors reported by the compressor.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Writer state could not be set up for the image.
    #[error("Failed to initialize encoder: {0}")]
    Init(#[source] BoxError),

    /// Compressing a row failed.
    #[error("Failed to encode row {row}: {source}")]
    Row {
        row: u32,
        #[source]
        source: BoxError,
    },

    /// Flushing the last data or writing the trailer failed.
    #[error("Failed to finish stream: {0}")]
    Finish(#[source] BoxError),
}

/// Image parameters the codec sizes its write state from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub bit_depth: BitDepth,
    pub effort: Effort,
}

/// Pull side of the codec loop: hands out rows by index.
pub(crate) trait RowSupplier {
    /// Number of rows in the image.
    fn row_count(&self) -> u32;

    /// Row `index` without stride padding.
    fn row(&self, index: u32) -> &[u8];
}

/// A compressor that pulls rows and pushes encoded bytes.
///
/// Implementations must request rows in ascending order and must not write
/// to `out` again after returning an error.
pub(crate) trait Codec {
    fn encode(
        &self,
        header: &FrameHeader,
        rows: &dyn RowSupplier,
        out: &mut dyn Write,
    ) -> Result<(), CodecError>;
}

/// PNG codec backed by the `png` crate.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PngCodec;

impl Codec for PngCodec {
    fn encode(
        &self,
        header: &FrameHeader,
        rows: &dyn RowSupplier,
        out: &mut dyn Write,
    ) -> Result<(), CodecError> {
        // png's writers flush and write IEND on drop; the gate keeps those
        // writes away from `out` once encoding has failed.
        let open = Cell::new(true);
        let gated = GatedWriter { inner: out, open: &open };

        let mut encoder = png::Encoder::new(gated, header.width, header.height);
        encoder.set_color(header.layout.to_png_color());
        encoder.set_depth(header.bit_depth.to_png_depth());
        encoder.set_compression(header.effort.to_png_compression());

        let mut writer = encoder.write_header().map_err(|e| {
            open.set(false);
            CodecError::Init(Box::new(e))
        })?;

        stream_rows(&mut writer, rows, &open)?;

        writer.finish().map_err(|e| {
            open.set(false);
            CodecError::Finish(Box::new(e))
        })
    }
}

/// Feed every row through a stream writer, then flush the image data.
fn stream_rows<W: Write>(
    writer: &mut png::Writer<W>,
    rows: &dyn RowSupplier,
    open: &Cell<bool>,
) -> Result<(), CodecError> {
    let mut stream = writer.stream_writer().map_err(|e| {
        open.set(false);
        CodecError::Init(Box::new(e))
    })?;

    for index in 0..rows.row_count() {
        if let Err(e) = stream.write_all(rows.row(index)) {
            open.set(false);
            return Err(CodecError::Row {
                row: index,
                source: Box::new(e),
            });
        }
    }

    stream.finish().map_err(|e| {
        open.set(false);
        CodecError::Finish(Box::new(e))
    })
}

/// Output wrapper that turns into a closed pipe once `open` is cleared.
struct GatedWriter<'a> {
    inner: &'a mut dyn Write,
    open: &'a Cell<bool>,
}

impl Write for GatedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.open.get() {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "encoder output closed",
            ));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.open.get() {
            return Ok(());
        }
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rows<'a> {
        rows: Vec<&'a [u8]>,
    }

    impl RowSupplier for Rows<'_> {
        fn row_count(&self) -> u32 {
            self.rows.len() as u32
        }

        fn row(&self, index: u32) -> &[u8] {
            self.rows[index as usize]
        }
    }

    fn header(width: u32, height: u32, layout: PixelLayout) -> FrameHeader {
        FrameHeader {
            width,
            height,
            layout,
            bit_depth: BitDepth::Eight,
            effort: Effort::Default,
        }
    }

    #[test]
    fn test_png_codec_writes_signature_and_trailer() {
        let (first, second) = ([1u8, 2, 3], [4u8, 5, 6]);
        let rows = Rows {
            rows: vec![&first[..], &second[..]],
        };
        let mut out = Vec::new();
        PngCodec
            .encode(&header(3, 2, PixelLayout::Gray), &rows, &mut out)
            .unwrap();

        assert_eq!(&out[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(&out[12..16], b"IHDR");
        assert_eq!(&out[out.len() - 8..out.len() - 4], b"IEND");
    }

    #[test]
    fn test_png_codec_rejects_short_rows() {
        // Two rows announced, but only half of the second row's data supplied
        let (first, second) = ([1u8, 2, 3, 4], [5u8, 6]);
        let rows = Rows {
            rows: vec![&first[..], &second[..]],
        };
        let mut out = Vec::new();
        let err = PngCodec
            .encode(&header(4, 2, PixelLayout::Gray), &rows, &mut out)
            .unwrap_err();

        assert!(matches!(err, CodecError::Finish(_)));
        assert!(!out.windows(4).any(|w| w == b"IEND"));
    }

    #[test]
    fn test_gated_writer_blocks_after_close() {
        let open = Cell::new(true);
        let mut out = Vec::new();
        {
            let mut gated = GatedWriter {
                inner: &mut out,
                open: &open,
            };
            gated.write_all(b"ok").unwrap();
            open.set(false);
            assert!(gated.write_all(b"dropped").is_err());
            assert!(gated.flush().is_ok());
        }
        assert_eq!(out, b"ok");
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::Row {
            row: 7,
            source: "bad filter".into(),
        };
        assert_eq!(err.to_string(), "Failed to encode row 7: bad filter");
    }
}

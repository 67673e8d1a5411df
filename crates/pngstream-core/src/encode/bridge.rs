//! Streaming encoder bridge.
//!
//! Validates the source, drives the codec over its rows in ascending order
//! and forwards every emitted chunk to the caller's sink, mapping whichever
//! side failed onto an [`EncodeError`].

use std::cell::Cell;
use std::fmt;

use thiserror::Error;

use super::codec::{Codec, CodecError, FrameHeader, PngCodec, RowSupplier};
use super::quality::{clamp_quality, Effort};
use super::sink::{ByteSink, Emitter, SinkError};
use crate::source::{FormatError, PixelSource, ValidatedSource};

/// Errors that can occur while encoding.
///
/// Any error means the sink holds no usable image, however many bytes it
/// received. Discarding that partial output is the caller's job.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The pixel source failed validation; the sink was never called.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] FormatError),

    /// The compressor could not set up its write state.
    #[error("Codec initialization failed: {0}")]
    CodecInit(#[source] CodecError),

    /// The compressor failed after encoding started.
    #[error("Codec failure while {stage}: {source}")]
    CodecFailure {
        stage: EncodeStage,
        #[source]
        source: CodecError,
    },

    /// The sink rejected a write.
    #[error("Byte sink write failed: {0}")]
    SinkWrite(#[source] SinkError),
}

impl EncodeError {
    /// Whether the bytes already written to the sink form a usable image.
    ///
    /// Always `false`: success is the only outcome with a complete stream.
    pub fn output_usable(&self) -> bool {
        false
    }

    /// The stage the encode call was in when it failed.
    pub fn stage(&self) -> EncodeStage {
        match self {
            EncodeError::InvalidInput(_) => EncodeStage::Validating,
            EncodeError::CodecInit(_) => EncodeStage::Initialized,
            EncodeError::CodecFailure { stage, .. } => *stage,
            EncodeError::SinkWrite(_) => EncodeStage::Aborted,
        }
    }
}

/// Where a single encode call is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStage {
    Validating,
    Initialized,
    Streaming { row: u32 },
    Finalizing,
    Done,
    Aborted,
}

impl fmt::Display for EncodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeStage::Validating => f.write_str("validating input"),
            EncodeStage::Initialized => f.write_str("initializing codec"),
            EncodeStage::Streaming { row } => write!(f, "streaming row {row}"),
            EncodeStage::Finalizing => f.write_str("finalizing"),
            EncodeStage::Done => f.write_str("done"),
            EncodeStage::Aborted => f.write_str("aborted"),
        }
    }
}

impl From<&CodecError> for EncodeStage {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::Init(_) => EncodeStage::Initialized,
            CodecError::Row { row, .. } => EncodeStage::Streaming { row: *row },
            CodecError::Finish(_) => EncodeStage::Finalizing,
        }
    }
}

/// Encode a decoded image as PNG into `sink`.
///
/// # Arguments
///
/// * `source` - Borrowed pixel buffer and its layout
/// * `quality` - Compression effort, 0-100; values outside are clamped
/// * `sink` - Destination for the encoded bytes
///
/// # Returns
///
/// `Ok(())` once the full stream, trailer included, has been acknowledged
/// by the sink.
///
/// # Errors
///
/// * `InvalidInput` - the source failed validation; nothing was written
/// * `CodecInit` / `CodecFailure` - the compressor failed
/// * `SinkWrite` - the sink rejected a write; it is not called again
pub fn encode(
    source: PixelSource<'_>,
    quality: i32,
    sink: &mut dyn ByteSink,
) -> Result<(), EncodeError> {
    encode_with(&PngCodec, source, quality, sink)
}

pub(crate) fn encode_with(
    codec: &dyn Codec,
    source: PixelSource<'_>,
    quality: i32,
    sink: &mut dyn ByteSink,
) -> Result<(), EncodeError> {
    let view = source.validate().map_err(|err| {
        log::warn!(
            "encode {} while {}: {err}",
            EncodeStage::Aborted,
            EncodeStage::Validating
        );
        err
    })?;

    let quality = clamp_quality(quality);
    let header = FrameHeader {
        width: view.width(),
        height: view.height(),
        layout: view.layout(),
        bit_depth: view.bit_depth(),
        effort: Effort::from_quality(quality),
    };
    log::debug!(
        "encoding {}x{} {:?}/{:?} at quality {quality} ({:?})",
        header.width,
        header.height,
        header.layout,
        header.bit_depth,
        header.effort,
    );

    let rows = RowCursor::new(view);
    let mut emitter = Emitter::new(sink);
    let outcome = codec.encode(&header, &rows, &mut emitter);

    // A sink failure wins even if the codec swallowed the I/O error.
    if let Some(failure) = emitter.take_failure() {
        log::warn!(
            "encode aborted after {} chunks ({} rows supplied): {failure}",
            emitter.chunks(),
            rows.supplied(),
        );
        return Err(EncodeError::SinkWrite(failure));
    }

    match outcome {
        Ok(()) => {
            log::debug!(
                "encode {}: {} bytes in {} chunks",
                EncodeStage::Done,
                emitter.bytes(),
                emitter.chunks(),
            );
            Ok(())
        }
        Err(err @ CodecError::Init(_)) => {
            log::warn!("encode {}: {err}", EncodeStage::Aborted);
            Err(EncodeError::CodecInit(err))
        }
        Err(err) => {
            let stage = EncodeStage::from(&err);
            log::warn!("encode {} while {stage}: {err}", EncodeStage::Aborted);
            Err(EncodeError::CodecFailure { stage, source: err })
        }
    }
}

/// Zero-copy row supplier over a validated source.
///
/// Tracks how far the codec has pulled so ordering violations show up in
/// debug builds and abort logs can report progress.
struct RowCursor<'a> {
    view: ValidatedSource<'a>,
    next: Cell<u32>,
}

impl<'a> RowCursor<'a> {
    fn new(view: ValidatedSource<'a>) -> Self {
        Self {
            view,
            next: Cell::new(0),
        }
    }

    fn supplied(&self) -> u32 {
        self.next.get()
    }
}

impl RowSupplier for RowCursor<'_> {
    fn row_count(&self) -> u32 {
        self.view.height()
    }

    fn row(&self, index: u32) -> &[u8] {
        debug_assert_eq!(index, self.next.get(), "rows must be pulled in order");
        log::trace!("{}", EncodeStage::Streaming { row: index });
        self.next.set(index + 1);
        // Past the last row the codec sees missing data and fails the stream.
        self.view.row(index).unwrap_or(&[])
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

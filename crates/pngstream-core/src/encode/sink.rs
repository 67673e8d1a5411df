//! Byte sinks and the emitter that feeds them.
//!
//! A [`ByteSink`] is the only thing the encoder knows about its destination.
//! Every call may block and every call may fail; the encoder forwards
//! chunks in order and stops at the first failure.

use std::io::{self, Write};

use thiserror::Error;

/// Errors reported by a byte sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The sink refused the chunk for its own reasons.
    #[error("Write rejected: {0}")]
    Rejected(String),
}

impl SinkError {
    /// Create a rejection with a human-readable reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        SinkError::Rejected(reason.into())
    }

    fn io_kind(&self) -> io::ErrorKind {
        match self {
            SinkError::Io(err) => err.kind(),
            SinkError::Rejected(_) => io::ErrorKind::Other,
        }
    }
}

/// Ordered, fallible destination for encoded bytes.
pub trait ByteSink {
    /// Accept one contiguous chunk of output.
    ///
    /// Returning an error aborts the encode; the sink will not be called again.
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), SinkError>;
}

impl ByteSink for Vec<u8> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), SinkError> {
        (**self).write_chunk(chunk)
    }
}

/// Adapts any [`std::io::Write`] transport into a [`ByteSink`].
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for WriteSink<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), SinkError> {
        self.inner.write_all(chunk).map_err(SinkError::from)
    }
}

/// `io::Write` face of a byte sink, handed to the codec as its output.
///
/// Each `write` forwards the whole buffer to the sink and checks the result
/// immediately. After the first failure the emitter is closed: later writes
/// fail without reaching the sink, so the codec's own cleanup cannot append
/// to a stream that has already been abandoned.
pub(crate) struct Emitter<'s> {
    sink: &'s mut dyn ByteSink,
    failure: Option<SinkError>,
    chunks: usize,
    bytes: u64,
}

impl<'s> Emitter<'s> {
    pub(crate) fn new(sink: &'s mut dyn ByteSink) -> Self {
        Self {
            sink,
            failure: None,
            chunks: 0,
            bytes: 0,
        }
    }

    /// Number of chunks the sink acknowledged.
    pub(crate) fn chunks(&self) -> usize {
        self.chunks
    }

    /// Number of bytes the sink acknowledged.
    pub(crate) fn bytes(&self) -> u64 {
        self.bytes
    }

    /// The sink failure that closed this emitter, if any.
    pub(crate) fn take_failure(&mut self) -> Option<SinkError> {
        self.failure.take()
    }
}

impl Write for Emitter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failure.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "byte sink already failed",
            ));
        }
        if buf.is_empty() {
            return Ok(0);
        }

        match self.sink.write_chunk(buf) {
            Ok(()) => {
                self.chunks += 1;
                self.bytes += buf.len() as u64;
                Ok(buf.len())
            }
            Err(err) => {
                let io_err = io::Error::new(err.io_kind(), err.to_string());
                self.failure = Some(err);
                Err(io_err)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        // Sinks have no buffering contract.
        Ok(())
    }
}

use std::fmt;
use std::io::{self, ErrorKind, Write};

use crate::{
    config::WriterConfig,
    error::{Error, Result},
};

/// Buffered value formatter over a byte sink.
///
/// Bytes accumulate in a fixed buffer and reach the sink only when the buffer
/// runs out of room, when the auto-flush threshold is reached, or when
/// [`flush`](FastWriter::flush) is called. Dropping the writer does **not**
/// flush.
///
/// The first failed interaction with the sink is remembered: every later call
/// returns that error and the sink is left alone.
///
/// Numbers are formatted into a scratch buffer owned by the writer and reused
/// across calls, which is why every method takes `&mut self`.
pub struct FastWriter<W: Write> {
    sink: W,
    buf: Box<[u8]>,
    pos: usize,
    sticky: Option<Error>,
    auto_flush: Option<usize>,
    scratch: Vec<u8>,
}

impl<W: Write> Drop for FastWriter<W> {
    fn drop(&mut self) {
        if self.pos > 0 && self.sticky.is_none() {
            tracing::warn!(
                bytes = self.pos,
                "FastWriter dropped without calling flush(); buffered output is lost"
            );
        }
    }
}

impl<W: Write> fmt::Debug for FastWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastWriter")
            .field("capacity", &self.buf.len())
            .field("buffered", &self.pos)
            .field("auto_flush", &self.auto_flush)
            .field("sticky", &self.sticky)
            .finish()
    }
}

impl<W: Write> FastWriter<W> {
    pub fn new(sink: W) -> FastWriter<W> {
        FastWriter::with_config(sink, WriterConfig::default())
    }

    /// Flushes whenever `threshold` bytes are buffered. A threshold of zero or
    /// above the buffer size means half the buffer size.
    pub fn with_auto_flush(sink: W, threshold: usize) -> FastWriter<W> {
        FastWriter::with_config(sink, WriterConfig::default().with_auto_flush(threshold))
    }

    pub fn with_config(sink: W, config: WriterConfig) -> FastWriter<W> {
        FastWriter {
            sink,
            buf: vec![0u8; config.buffer_capacity()].into_boxed_slice(),
            pos: 0,
            sticky: None,
            auto_flush: config.auto_flush_threshold(),
            scratch: Vec::with_capacity(64),
        }
    }

    /// The error that stopped this writer, if any.
    pub fn last_error(&self) -> Option<&Error> {
        self.sticky.as_ref()
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes waiting for the next flush.
    pub fn buffered(&self) -> usize {
        self.pos
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Writing to the sink directly while bytes are buffered reorders output.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    #[inline(always)]
    fn check(&self) -> Result<()> {
        match &self.sticky {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: Error) -> Error {
        tracing::debug!(error = %err, "writer entered terminal state");
        self.sticky = Some(err.clone());
        err
    }

    /// Hands `bytes` to the sink in a single write call.
    fn write_through(&mut self, bytes: &[u8]) -> Result<()> {
        let requested = bytes.len();
        match write_once(&mut self.sink, bytes) {
            Ok(written) if written < requested => {
                Err(self.fail(Error::ShortWrite { requested, written }))
            }
            Ok(_) => Ok(()),
            Err(e) => Err(self.fail(Error::from(e))),
        }
    }

    #[inline]
    fn maybe_auto_flush(&mut self) -> Result<()> {
        match self.auto_flush {
            Some(threshold) if self.pos >= threshold => self.flush(),
            _ => Ok(()),
        }
    }

    /// Writes all buffered bytes to the sink. With nothing buffered the sink
    /// is not called at all.
    pub fn flush(&mut self) -> Result<()> {
        self.check()?;
        if self.pos == 0 {
            return Ok(());
        }

        let requested = self.pos;
        match write_once(&mut self.sink, &self.buf[..requested]) {
            Ok(written) if written < requested => {
                Err(self.fail(Error::ShortWrite { requested, written }))
            }
            Ok(_) => {
                tracing::trace!(bytes = requested, "flushed write buffer");
                self.pos = 0;
                Ok(())
            }
            Err(e) => Err(self.fail(Error::from(e))),
        }
    }

    pub fn write_byte(&mut self, b: u8) -> Result<()> {
        self.check()?;
        if self.pos == self.buf.len() {
            self.flush()?;
        }
        self.buf[self.pos] = b;
        self.pos += 1;
        self.maybe_auto_flush()
    }

    /// Appends `bytes`. A slice larger than the whole buffer is written to the
    /// sink directly after flushing what is already buffered.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.append(bytes)? {
            self.maybe_auto_flush()?;
        }
        Ok(())
    }

    /// Buffers or bypasses `bytes` without the auto-flush check. Returns
    /// whether the bytes landed in the buffer. On error nothing was buffered.
    fn append(&mut self, bytes: &[u8]) -> Result<bool> {
        self.check()?;

        if bytes.len() > self.buf.len() {
            self.flush()?;
            tracing::trace!(bytes = bytes.len(), "oversized write bypasses buffer");
            self.write_through(bytes)?;
            return Ok(false);
        }

        if self.buf.len() - self.pos < bytes.len() {
            self.flush()?;
        }
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(true)
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Writes `s` followed by `\n`.
    pub fn write_line(&mut self, s: &str) -> Result<()> {
        self.write_str(s)?;
        self.write_byte(b'\n')
    }

    pub fn write_int(&mut self, value: i32) -> Result<()> {
        self.write_formatted(format_args!("{}", value))
    }

    pub fn write_int64(&mut self, value: i64) -> Result<()> {
        self.write_formatted(format_args!("{}", value))
    }

    pub fn write_uint64(&mut self, value: u64) -> Result<()> {
        self.write_formatted(format_args!("{}", value))
    }

    /// Fixed notation with exactly `precision` digits after the point.
    pub fn write_float64(&mut self, value: f64, precision: usize) -> Result<()> {
        self.write_formatted(format_args!("{:.*}", precision, value))
    }

    fn write_formatted(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.check()?;
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        let result = scratch
            .write_fmt(args)
            .map_err(Error::from)
            .and_then(|()| self.write_bytes(&scratch));
        self.scratch = scratch;
        result
    }
}

impl<W: Write> Write for FastWriter<W> {
    /// An error means none of `buf` was buffered. Once `buf` is buffered the
    /// write reports success even if the auto-flush that follows fails; that
    /// failure is sticky and comes back from the next call.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.append(buf)? {
            if let Err(err) = self.maybe_auto_flush() {
                tracing::debug!(error = %err, "auto-flush failed after buffering");
            }
        }
        Ok(buf.len())
    }

    /// Flushes the buffer, then the sink itself. A failing sink flush is
    /// sticky like any other sink error.
    fn flush(&mut self) -> io::Result<()> {
        FastWriter::flush(self)?;
        match self.sink.flush() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(Error::from(e)).into()),
        }
    }
}

fn write_once<W: Write>(sink: &mut W, bytes: &[u8]) -> io::Result<usize> {
    loop {
        match sink.write(bytes) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

use std::fmt;
use std::io::{ErrorKind, Read};

use crate::{
    ascii::{self, Decimal},
    config::ReaderConfig,
    error::{Error, MalformedReason, NumberKind, Result},
};

/// Buffered tokenizer over a byte source.
///
/// Bytes are pulled from the source only when the buffer is exhausted. The
/// first refill that returns zero bytes or fails is remembered: from then on
/// every operation returns that same [`Error::EndOfInput`] or [`Error::Io`]
/// and the source is not read again.
///
/// Number and UTF-8 errors are not remembered. The cursor stays wherever the
/// failed parse left it, so the caller can skip the offending token with
/// [`next_word`](FastReader::next_word) and carry on.
///
/// The reader never closes its source. Pass `&mut File` or a stdin lock to
/// keep ownership on the caller's side.
pub struct FastReader<R> {
    source: R,
    buf: Box<[u8]>,
    pos: usize,
    end: usize,
    sticky: Option<Error>,
}

impl<R> fmt::Debug for FastReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastReader")
            .field("capacity", &self.buf.len())
            .field("buffered", &(self.end - self.pos))
            .field("sticky", &self.sticky)
            .finish()
    }
}

impl<R: Read> FastReader<R> {
    pub fn new(source: R) -> FastReader<R> {
        FastReader::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(source: R, config: ReaderConfig) -> FastReader<R> {
        FastReader {
            source,
            buf: vec![0u8; config.buffer_capacity()].into_boxed_slice(),
            pos: 0,
            end: 0,
            sticky: None,
        }
    }

    /// The terminal error, if the source has been exhausted or has failed.
    pub fn last_error(&self) -> Option<&Error> {
        self.sticky.as_ref()
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes pulled from the source but not consumed yet.
    pub fn buffered(&self) -> usize {
        self.end - self.pos
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Returns the source. Buffered bytes that were not consumed are lost.
    pub fn into_inner(self) -> R {
        self.source
    }

    fn fill(&mut self) {
        debug_assert_eq!(self.pos, self.end);
        self.pos = 0;
        self.end = 0;

        let err = loop {
            match self.source.read(&mut self.buf) {
                Ok(0) => break Error::EndOfInput,
                Ok(n) => {
                    debug_assert!(n <= self.buf.len());
                    self.end = n.min(self.buf.len());
                    tracing::trace!(bytes = self.end, "refilled read buffer");
                    return;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => break Error::from(e),
            }
        };

        tracing::debug!(error = %err, "reader reached terminal state");
        self.sticky = Some(err);
    }

    #[inline]
    fn ensure_data(&mut self) -> Result<()> {
        if self.pos < self.end {
            return Ok(());
        }
        if let Some(err) = &self.sticky {
            return Err(err.clone());
        }
        self.fill();
        match &self.sticky {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Like [`ensure_data`](Self::ensure_data), but end of input is `Ok(false)`.
    #[inline]
    fn has_data(&mut self) -> Result<bool> {
        match self.ensure_data() {
            Ok(()) => Ok(true),
            Err(Error::EndOfInput) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Consumes bytes while `pred` holds, appending them to `out` if given.
    /// Stops at the first rejected byte or at end of input.
    fn scan_while<F>(&mut self, mut out: Option<&mut Vec<u8>>, pred: F) -> Result<()>
    where
        F: Fn(u8) -> bool,
    {
        while self.has_data()? {
            let available = &self.buf[self.pos..self.end];
            let run = available
                .iter()
                .position(|&b| !pred(b))
                .unwrap_or(available.len());
            if let Some(out) = out.as_mut() {
                out.extend_from_slice(&available[..run]);
            }
            self.pos += run;
            if self.pos < self.end {
                break;
            }
        }
        Ok(())
    }

    /// Returns and consumes the next byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure_data()?;
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Returns the next byte without consuming it.
    pub fn peek_byte(&mut self) -> Result<u8> {
        self.ensure_data()?;
        Ok(self.buf[self.pos])
    }

    /// Consumes spaces, tabs, carriage returns and line feeds. Running into the
    /// end of input is not an error.
    pub fn skip_whitespace(&mut self) -> Result<()> {
        self.scan_while(None, ascii::is_whitespace)
    }

    /// Reads the next whitespace-delimited token.
    pub fn next_word(&mut self) -> Result<String> {
        self.skip_whitespace()?;
        let mut word = Vec::new();
        self.scan_while(Some(&mut word), |b| !ascii::is_whitespace(b))?;
        if word.is_empty() {
            return Err(Error::EndOfInput);
        }
        into_string(word)
    }

    /// Reads up to the next `\n`, which is consumed but not returned. A `\r`
    /// directly before it is dropped too. The last line of the input does not
    /// need a terminator.
    pub fn next_line(&mut self) -> Result<String> {
        let mut line = Vec::new();
        self.scan_while(Some(&mut line), |b| b != b'\n')?;
        match self.read_byte() {
            Ok(_) => {}
            Err(Error::EndOfInput) if !line.is_empty() => {}
            Err(err) => return Err(err),
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        into_string(line)
    }

    pub fn next_int(&mut self) -> Result<i32> {
        self.next_integer()
    }

    pub fn next_int64(&mut self) -> Result<i64> {
        self.next_integer()
    }

    /// Unlike the signed variants, a leading `-` is rejected and left unread.
    pub fn next_uint64(&mut self) -> Result<u64> {
        self.next_integer()
    }

    /// Reads the next word and parses it as an `f64`.
    pub fn next_float64(&mut self) -> Result<f64> {
        let word = self.next_word()?;
        word.parse::<f64>().map_err(|_| {
            Error::malformed(NumberKind::Float64, MalformedReason::InvalidFloat(word))
        })
    }

    fn next_integer<T: Decimal>(&mut self) -> Result<T> {
        self.skip_whitespace()?;

        let negative = match self.peek_byte()? {
            b'-' if T::SIGNED => {
                self.pos += 1;
                true
            }
            b'+' => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        // Keep consuming after an overflow so the whole digit run is skipped.
        let mut value = Some(T::ZERO);
        let mut digits = 0usize;
        while self.has_data()? {
            let available = &self.buf[self.pos..self.end];
            let run = available
                .iter()
                .position(|&b| !ascii::is_digit(b))
                .unwrap_or(available.len());
            for &b in &available[..run] {
                value = value.and_then(|v| v.push_digit(b - b'0', negative));
            }
            digits += run;
            self.pos += run;
            if self.pos < self.end {
                break;
            }
        }

        if digits == 0 {
            return Err(Error::malformed(T::KIND, MalformedReason::NoDigits));
        }
        value.ok_or_else(|| Error::malformed(T::KIND, MalformedReason::Overflow))
    }
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8(e.utf8_error()))
}

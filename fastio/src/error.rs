use std::fmt;
use std::io;
use std::str::Utf8Error;
use std::sync::Arc;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by [`FastReader`](crate::FastReader) and
/// [`FastWriter`](crate::FastWriter).
///
/// `EndOfInput`, `Io` and `ShortWrite` are sticky: once an engine reports one
/// of them it keeps returning it and never touches its stream again.
/// `MalformedNumber` and `InvalidUtf8` only concern the token being parsed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("end of input")]
    EndOfInput,

    #[error("I/O error: {0}")]
    Io(#[source] Arc<io::Error>),

    #[error("short write: sink accepted {written} of {requested} bytes")]
    ShortWrite { requested: usize, written: usize },

    #[error("malformed {kind}: {reason}")]
    MalformedNumber {
        kind: NumberKind,
        reason: MalformedReason,
    },

    #[error("token is not valid UTF-8: {0}")]
    InvalidUtf8(#[source] Utf8Error),
}

impl Error {
    pub(crate) fn malformed(kind: NumberKind, reason: MalformedReason) -> Error {
        Error::MalformedNumber { kind, reason }
    }

    /// Whether the owning engine is now stuck in this state.
    pub fn is_sticky(&self) -> bool {
        matches!(
            self,
            Error::EndOfInput | Error::Io(_) | Error::ShortWrite { .. }
        )
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Error::EndOfInput)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::Io(inner) => {
                return match Arc::try_unwrap(inner) {
                    Ok(inner) => inner,
                    Err(shared) => io::Error::new(shared.kind(), shared.to_string()),
                }
            }
            Error::EndOfInput => io::ErrorKind::UnexpectedEof,
            Error::ShortWrite { .. } => io::ErrorKind::WriteZero,
            Error::MalformedNumber { .. } | Error::InvalidUtf8(_) => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

/// The numeric type a tokenizer was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Int64,
    Uint64,
    Float64,
}

impl NumberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberKind::Int => "integer",
            NumberKind::Int64 => "64-bit integer",
            NumberKind::Uint64 => "unsigned 64-bit integer",
            NumberKind::Float64 => "float",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("no digits found")]
    NoDigits,

    #[error("value out of range")]
    Overflow,

    #[error("invalid float text {0:?}")]
    InvalidFloat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_classification() {
        assert!(Error::EndOfInput.is_sticky());
        assert!(Error::from(io::Error::new(io::ErrorKind::Other, "boom")).is_sticky());
        assert!(Error::ShortWrite {
            requested: 4,
            written: 1
        }
        .is_sticky());
        assert!(!Error::malformed(NumberKind::Int, MalformedReason::NoDigits).is_sticky());
    }

    #[test]
    fn converts_into_io_error_kinds() {
        let eof: io::Error = Error::EndOfInput.into();
        assert_eq!(eof.kind(), io::ErrorKind::UnexpectedEof);

        let short: io::Error = Error::ShortWrite {
            requested: 8,
            written: 3,
        }
        .into();
        assert_eq!(short.kind(), io::ErrorKind::WriteZero);

        let malformed: io::Error =
            Error::malformed(NumberKind::Uint64, MalformedReason::Overflow).into();
        assert_eq!(malformed.kind(), io::ErrorKind::InvalidData);

        let original = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        let shared = original.clone();
        let converted: io::Error = original.into();
        assert_eq!(converted.kind(), io::ErrorKind::BrokenPipe);
        let converted: io::Error = shared.into();
        assert_eq!(converted.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn display_names_the_number_kind() {
        let err = Error::malformed(NumberKind::Int64, MalformedReason::NoDigits);
        assert_eq!(err.to_string(), "malformed 64-bit integer: no digits found");
    }
}

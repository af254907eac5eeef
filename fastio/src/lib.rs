//! Buffered, allocation-minimizing text I/O.
//!
//! [`FastReader`] pulls bytes from any [`std::io::Read`] into a fixed buffer and
//! tokenizes them into words, lines and numbers. [`FastWriter`] formats values
//! into a fixed buffer and hands them to any [`std::io::Write`] when flushed.
//!
//! ```
//! use fastio::{FastReader, FastWriter};
//!
//! let mut reader = FastReader::new(&b"3\n1 2 3\n"[..]);
//! let mut out = Vec::new();
//! let mut writer = FastWriter::new(&mut out);
//!
//! let n = reader.next_int().unwrap();
//! let mut sum = 0;
//! for _ in 0..n {
//!     sum += reader.next_int().unwrap();
//! }
//! writer.write_int(sum).unwrap();
//! writer.write_byte(b'\n').unwrap();
//! writer.flush().unwrap();
//! drop(writer);
//!
//! assert_eq!(out, b"6\n");
//! ```
//!
//! Neither engine closes the stream it wraps, and neither is meant to be
//! shared between threads. A [`FastWriter`] never flushes implicitly: call
//! [`FastWriter::flush`] before dropping it.

pub mod ascii;
mod config;
mod error;
mod reader;
mod writer;

pub use config::{ReaderConfig, WriterConfig, DEFAULT_BUFFER_SIZE};
pub use error::{Error, MalformedReason, NumberKind, Result};
pub use reader::FastReader;
pub use writer::FastWriter;

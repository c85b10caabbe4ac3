//! A [`Read`](std::io::Read) wrapper that can look arbitrarily far ahead in a byte stream without
//! consuming it.
//!
//! [`std::io::BufReader`] lets you see whatever happens to be in its buffer, and nothing more.
//! [`LookaheadReader`] lets you ask for exactly as many upcoming bytes as you need, pulling more
//! from the source when its pending buffer falls short. Peeked bytes are then handed out again by
//! the normal consuming reads, in order, so the stream reads exactly as if it had never been
//! peeked.
//!
//! # When to use this
//!
//! Format sniffing (magic numbers, headers), tokenizers that need more than one byte of
//! lookahead, and protocol parsers that decide what to do based on an upcoming prefix. If a fixed
//! buffer is enough, prefer [`std::io::BufReader`].
//!
//! # Quick start
//!
//! ```
//! use lookahead::{LookaheadReader, PeekRead};
//! use std::io::Read;
//!
//! let data = b"\x1f\x8b\x08 compressed...";
//! let mut reader = LookaheadReader::new(&data[..]);
//!
//! // Sniff the magic number without consuming it
//! let is_gzip = reader.peek(2).unwrap() == [0x1f, 0x8b];
//! assert!(is_gzip);
//!
//! // Peek at a single byte further ahead
//! assert_eq!(reader.peek_byte(2).unwrap(), 0x08);
//!
//! // The stream still starts at the beginning
//! assert_eq!(reader.read_byte().unwrap(), 0x1f);
//!
//! let mut rest = Vec::new();
//! reader.read_to_end(&mut rest).unwrap();
//! assert_eq!(rest, &data[1..]);
//! ```
//!
//! # End of stream
//!
//! Asking [`peek`](PeekRead::peek) for more than the stream has left is not an error, the view
//! is simply shorter. The single byte operations report end-of-stream as
//! [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof):
//!
//! ```
//! use lookahead::{LookaheadReader, PeekRead};
//! use std::io::ErrorKind;
//!
//! let mut reader = LookaheadReader::new(&b"hello"[..]);
//!
//! assert_eq!(reader.peek(100).unwrap(), b"hello");
//! assert_eq!(reader.peek_byte(5).unwrap_err().kind(), ErrorKind::UnexpectedEof);
//! ```
//!
//! # Configuration
//!
//! ```
//! use lookahead::LookaheadReader;
//! use std::io::Cursor;
//!
//! let reader = LookaheadReader::builder(Cursor::new(vec![0u8; 1024]))
//!     .fill_size(512)             // round pulls up to 512 bytes
//!     .initial_capacity(16 * 1024) // pre-allocate 16 KiB
//!     .build();
//! assert_eq!(reader.fill_size(), 512);
//! ```
//!
//! # Crate organisation
//!
//! - [`LookaheadReader`]: the primary type, wrapping any [`Read`](std::io::Read).
//! - [`LookaheadReaderBuilder`]: configures the fill unit and initial capacity.
//! - [`PeekRead`]: trait extending [`Read`](std::io::Read) with single byte reads and peeking.
//! - [`buffer::Buffer`]: the pending buffer, for users who want to drive it directly.
//! - [`constants`]: buffer size constants used throughout the crate.

pub mod buffer;
pub mod constants;
mod read;
mod reader;


pub use read::PeekRead;
pub use reader::{LookaheadReader, LookaheadReaderBuilder};

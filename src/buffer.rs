//! The pending buffer behind [`LookaheadReader`](crate::LookaheadReader).
//!
//! [`Buffer`] is a growable FIFO of bytes: pulls from a reader append at the back, consumption
//! removes from the front. Consumed bytes are not moved on every read. Instead the buffer keeps a
//! read position and only compacts when it needs the space at the back for a new pull.
//!
//! # Example
//!
//! ```
//! use lookahead::buffer::{Buffer, FillResult};
//! use std::io::Cursor;
//!
//! let mut buffer = Buffer::new();
//! let mut cur = Cursor::new(b"Hello, World!");
//!
//! // Pull until we have 5 bytes or the reader runs dry
//! let result = buffer.fill_amount(&mut cur, 5).unwrap();
//! assert_eq!(result, FillResult::Complete(5));
//! assert_eq!(buffer.unconsumed(), b"Hello");
//!
//! // Consume what we processed
//! buffer.consume(2);
//! assert_eq!(buffer.unconsumed(), b"llo");
//!
//! // Asking for more than the reader has left is not an error
//! let result = buffer.fill_amount(&mut cur, 100).unwrap();
//! assert_eq!(result, FillResult::Eof(8));
//! assert_eq!(buffer.unconsumed(), b"llo, World!");
//! ```

use crate::constants::{CHUNK_SIZE, PRACTICAL_MAX_SIZE};
use std::cmp;
use std::io::{self, Read};

/// Outcome of a fill operation.
///
/// The contained byte count is the number of bytes appended to the buffer by that operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillResult {
    /// The requested amount was obtained.
    ///
    /// Contains the byte count.
    Complete(usize),

    /// The reader reached end-of-stream before the requested amount was obtained.
    ///
    /// Contains the number of bytes read before end-of-stream. A non-zero count means the stream
    /// ended partway through the pull.
    Eof(usize),
}

impl FillResult {
    /// Returns the byte count, regardless of completion status.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lookahead::buffer::FillResult;
    /// assert_eq!(FillResult::Complete(42).count(), 42);
    /// assert_eq!(FillResult::Eof(10).count(), 10);
    /// ```
    pub const fn count(&self) -> usize {
        match self {
            Self::Complete(n) | Self::Eof(n) => *n,
        }
    }

    /// Returns `true` if the reader reached end-of-stream during the operation.
    ///
    /// ```
    /// # use lookahead::buffer::FillResult;
    /// assert!(FillResult::Eof(0).is_eof());
    /// assert!(!FillResult::Complete(0).is_eof());
    /// ```
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof(_))
    }
}

/// A growable byte FIFO with chunked capacity management.
///
/// The buffer starts unallocated. Capacity is only ever added in multiples of [`CHUNK_SIZE`] and
/// never exceeds [`PRACTICAL_MAX_SIZE`].
///
/// # Invariants
///
/// `0 <= pos <= len <= cap == buf.len()` at all times. The unconsumed bytes are `buf[pos..len]`.
/// Whenever every byte has been consumed, `pos` and `len` are both reset to zero, so an empty
/// buffer never carries dead space at the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    /// Internal buffer storage.
    buf: Vec<u8>,
    /// Logical capacity of the buffer.
    cap: usize,
    /// End of the stored data.
    len: usize,
    /// Start of the unconsumed data.
    pos: usize,
}

impl Buffer {
    /// Creates a new, unallocated buffer.
    ///
    /// ```
    /// # use lookahead::buffer::Buffer;
    /// let buffer = Buffer::new();
    /// assert_eq!(buffer.cap(), 0);
    /// assert!(buffer.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            cap: 0,
            len: 0,
            pos: 0,
        }
    }

    /// Creates a new buffer with at least the specified capacity.
    ///
    /// The capacity is rounded up to the nearest [`CHUNK_SIZE`] multiple.
    ///
    /// ```
    /// # use lookahead::buffer::Buffer;
    /// # use lookahead::constants::CHUNK_SIZE;
    /// let buffer = Buffer::with_capacity(CHUNK_SIZE + 1);
    /// assert_eq!(buffer.cap(), 2 * CHUNK_SIZE);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = Self::cap_up(capacity);

        Self {
            buf: vec![0; cap],
            cap,
            len: 0,
            pos: 0,
        }
    }

    /// Returns the unconsumed bytes.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    #[inline]
    pub fn unconsumed(&self) -> &[u8] {
        &self.buf[self.pos..self.len]
    }

    /// Returns the unconsumed bytes, mutably.
    ///
    /// Writes through this slice are observed by whoever consumes the bytes afterwards.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    #[inline]
    pub fn unconsumed_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.pos..self.len]
    }

    /// Returns the current capacity of the buffer in bytes.
    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the offset one past the last stored byte.
    ///
    /// This counts consumed bytes still held at the front, so it is not the number of pending
    /// bytes. Use [`remaining`](Self::remaining) for that.
    #[inline]
    pub fn end(&self) -> usize {
        self.len
    }

    /// Returns the current read position (number of consumed bytes still held at the front).
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the number of unconsumed bytes.
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }

    /// Returns `true` if there are no unconsumed bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.len
    }

    /// Drops all data in the buffer without changing capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.pos = 0;
        self.len = 0;
    }

    /// Marks `amt` bytes as consumed.
    ///
    /// `amt` is clamped to the number of unconsumed bytes. Consuming the last byte resets the
    /// buffer to its empty state.
    ///
    /// ```
    /// # use lookahead::buffer::Buffer;
    /// # use std::io::Cursor;
    /// let mut buffer = Buffer::new();
    /// buffer.fill_amount(Cursor::new(b"Hello"), 5).unwrap();
    ///
    /// buffer.consume(2);
    /// assert_eq!(buffer.pos(), 2);
    ///
    /// buffer.consume(100);
    /// assert_eq!(buffer.pos(), 0);
    /// assert!(buffer.is_empty());
    /// ```
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn consume(&mut self, amt: usize) {
        self.pos += cmp::min(amt, self.remaining());

        if self.pos == self.len {
            self.clear();
        }
    }

    /// Removes and returns the first unconsumed byte.
    #[inline]
    pub fn pop_front(&mut self) -> Option<u8> {
        let byte = *self.buf.get(self.pos..self.len)?.first()?;
        self.consume(1);
        Some(byte)
    }

    /// Copies as many unconsumed bytes as fit into `dst` and consumes them.
    ///
    /// Returns the number of bytes copied.
    #[expect(clippy::indexing_slicing, reason = "Bounded by `min`")]
    pub fn copy_to(&mut self, dst: &mut [u8]) -> usize {
        let amt = cmp::min(dst.len(), self.remaining());
        dst[..amt].copy_from_slice(&self.unconsumed()[..amt]);
        self.consume(amt);
        amt
    }

    /// Moves the unconsumed data to the start of the buffer.
    ///
    /// Capacity is unchanged.
    ///
    /// ```
    /// # use lookahead::buffer::Buffer;
    /// # use std::io::Cursor;
    /// let mut buffer = Buffer::new();
    /// buffer.fill_amount(Cursor::new(b"Hello, World!"), 13).unwrap();
    /// buffer.consume(7);
    ///
    /// buffer.compact();
    /// assert_eq!(buffer.pos(), 0);
    /// assert_eq!(buffer.end(), 6);
    /// assert_eq!(buffer.unconsumed(), b"World!");
    /// ```
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn compact(&mut self) {
        self.buf.copy_within(self.pos..self.len, 0);
        self.len -= self.pos;
        self.pos = 0;
    }

    /// Rounds capacity up to the nearest [`CHUNK_SIZE`] multiple.
    ///
    /// The result is at least [`CHUNK_SIZE`] and at most [`PRACTICAL_MAX_SIZE`].
    ///
    /// ```
    /// # use lookahead::buffer::Buffer;
    /// # use lookahead::constants::CHUNK_SIZE;
    /// assert_eq!(Buffer::cap_up(0), CHUNK_SIZE);
    /// assert_eq!(Buffer::cap_up(CHUNK_SIZE + 1), 2 * CHUNK_SIZE);
    /// assert_eq!(Buffer::cap_up(5 * CHUNK_SIZE - 1), 5 * CHUNK_SIZE);
    /// ```
    #[inline]
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by bounds checks")]
    pub fn cap_up(capacity: usize) -> usize {
        // Max bounds check, leaves room for the `CHUNK_SIZE - 1` below
        if capacity >= PRACTICAL_MAX_SIZE {
            return PRACTICAL_MAX_SIZE;
        }

        // Min bounds check
        if capacity < CHUNK_SIZE {
            return CHUNK_SIZE;
        }

        capacity.div_ceil(CHUNK_SIZE) * CHUNK_SIZE
    }

    /// Makes room for `amt` more bytes after the stored data.
    ///
    /// Compacts first if that frees enough space at the back, otherwise grows to the nearest
    /// [`CHUNK_SIZE`] multiple that fits.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] if the unconsumed data plus `amt` would exceed
    /// [`PRACTICAL_MAX_SIZE`], and [`io::ErrorKind::OutOfMemory`] if the allocation fails.
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by bounds checks")]
    pub fn reserve(&mut self, amt: usize) -> io::Result<()> {
        if amt > PRACTICAL_MAX_SIZE - self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "requested amount exceeds maximum buffer capacity",
            ));
        }

        if self.cap - self.len >= amt {
            return Ok(());
        }

        if self.pos > 0 {
            self.compact();

            if self.cap - self.len >= amt {
                return Ok(());
            }
        }

        // Safe: `len == remaining()` after compacting, checked above
        let next = Self::cap_up(self.len + amt);
        self.buf.try_reserve_exact(next - self.buf.len())?;
        self.buf.resize(next, 0);
        self.cap = next;

        Ok(())
    }

    /// Performs a single pull of up to `amt` bytes from `reader`.
    ///
    /// Retries on [`io::ErrorKind::Interrupted`] and stops at the first read that returns
    /// anything. Returns [`FillResult::Eof(0)`](FillResult::Eof) if the reader is at
    /// end-of-stream, otherwise [`FillResult::Complete`] with the number of bytes obtained, which
    /// may be fewer than `amt`.
    ///
    /// ```
    /// # use lookahead::buffer::{Buffer, FillResult};
    /// # use std::io::Cursor;
    /// let mut buffer = Buffer::new();
    /// let mut cur = Cursor::new(b"Hi");
    ///
    /// assert_eq!(buffer.fill(&mut cur, 100).unwrap(), FillResult::Complete(2));
    /// assert_eq!(buffer.fill(&mut cur, 100).unwrap(), FillResult::Eof(0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] if the buffer can't grow to fit `amt`, or any
    /// other error from the reader.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Safe by invariant"
    )]
    pub fn fill(&mut self, mut reader: impl Read, amt: usize) -> io::Result<FillResult> {
        if amt == 0 {
            return Ok(FillResult::Complete(0));
        }

        self.reserve(amt)?;
        let target = self.len + amt;

        loop {
            match reader.read(&mut self.buf[self.len..target]) {
                Ok(0) => return Ok(FillResult::Eof(0)),
                Ok(n) => {
                    debug_assert!(n <= amt, "reader returned more bytes than requested");
                    self.len += n;
                    return Ok(FillResult::Complete(n));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Pulls exactly `amt` bytes from `reader`, or as many as it has before end-of-stream.
    ///
    /// Keeps reading until `amt` bytes have been appended or the reader returns `Ok(0)`, retrying
    /// on [`io::ErrorKind::Interrupted`]. Never reads past `amt` bytes.
    ///
    /// Bytes are appended as they arrive. If the reader fails partway, everything read before the
    /// failure stays in the buffer.
    ///
    /// ```
    /// # use lookahead::buffer::{Buffer, FillResult};
    /// # use std::io::Cursor;
    /// let mut buffer = Buffer::new();
    /// let mut cur = Cursor::new(b"Hello, World!");
    ///
    /// assert_eq!(buffer.fill_amount(&mut cur, 7).unwrap(), FillResult::Complete(7));
    /// assert_eq!(buffer.fill_amount(&mut cur, 7).unwrap(), FillResult::Eof(6));
    /// assert_eq!(buffer.unconsumed(), b"Hello, World!");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] if the buffer can't grow to fit `amt`, or any
    /// other error from the reader.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Safe by invariant"
    )]
    pub fn fill_amount(&mut self, mut reader: impl Read, amt: usize) -> io::Result<FillResult> {
        self.reserve(amt)?;

        // Safe: `reserve` guarantees the space
        let target = self.len + amt;
        let mut total_bytes_read = 0;

        while self.len < target {
            match reader.read(&mut self.buf[self.len..target]) {
                Ok(0) => return Ok(FillResult::Eof(total_bytes_read)),
                Ok(n) => {
                    debug_assert!(
                        n <= target - self.len,
                        "reader returned more bytes than requested"
                    );
                    self.len += n;
                    total_bytes_read += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        Ok(FillResult::Complete(total_bytes_read))
    }

    /// Consumes the buffer, returning the unconsumed bytes.
    #[inline]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.compact();
        self.buf.truncate(self.len);
        self.buf
    }
}

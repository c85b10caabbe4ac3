use crate::PeekRead;
use crate::buffer::Buffer;
use crate::constants::{CHUNK_SIZE, MAX_FILL_SIZE, PRACTICAL_MAX_SIZE};
use std::cmp;
use std::fmt;
use std::io::{self, BufRead, IoSliceMut, Read};
use tracing::{debug, trace};

/// Wraps a [`Read`] and lets you look arbitrarily far ahead in it without consuming anything.
///
/// Bytes pulled from the source while peeking are queued in a pending buffer. Consuming reads
/// drain that buffer first, in order, before going back to the source. When nothing is pending,
/// [`read`](Read::read) goes straight to the source, so a reader that is never peeked costs no
/// allocation and no copy.
///
/// # Examples
///
/// ```
/// use lookahead::{LookaheadReader, PeekRead};
/// use std::io::Read;
///
/// let mut reader = LookaheadReader::new(&b"hello world"[..]);
///
/// assert_eq!(reader.peek(5).unwrap(), b"hello");
/// assert_eq!(reader.peek_byte(10).unwrap(), b'd');
///
/// let mut rest = String::new();
/// reader.read_to_string(&mut rest).unwrap();
/// assert_eq!(rest, "hello world");
/// ```
pub struct LookaheadReader<R: ?Sized> {
    buffer: Buffer,
    fill_size: usize,
    reader: R,
}

impl<R: Read> LookaheadReader<R> {
    /// Creates a new `LookaheadReader` with default configuration.
    ///
    /// Pulls are rounded up to [`CHUNK_SIZE`] and the pending buffer starts unallocated.
    pub fn new(reader: R) -> LookaheadReader<R> {
        LookaheadReader::builder(reader).build()
    }

    /// Returns a [`LookaheadReaderBuilder`] for configuring a new `LookaheadReader`.
    pub fn builder(reader: R) -> LookaheadReaderBuilder<R> {
        LookaheadReaderBuilder {
            reader,
            fill_size: None,
            initial_capacity: None,
        }
    }

    /// Unwraps this `LookaheadReader`, returning the underlying reader.
    ///
    /// Any pending bytes are lost. Use [`into_parts`](Self::into_parts) to keep them.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Unwraps this `LookaheadReader`, returning the underlying reader and the bytes that were
    /// pulled from it but not yet consumed.
    ///
    /// ```
    /// use lookahead::{LookaheadReader, PeekRead};
    ///
    /// let mut reader = LookaheadReader::new(&b"abc"[..]);
    /// reader.peek(2).unwrap();
    ///
    /// let (_source, pending) = reader.into_parts();
    /// assert_eq!(pending, b"abc");
    /// ```
    pub fn into_parts(self) -> (R, Vec<u8>) {
        (self.reader, self.buffer.into_vec())
    }
}

/// A builder for constructing a [`LookaheadReader`] with custom settings.
#[must_use]
pub struct LookaheadReaderBuilder<R> {
    reader: R,
    fill_size: Option<usize>,
    initial_capacity: Option<usize>,
}

impl<R: Read> LookaheadReaderBuilder<R> {
    /// Sets the fill unit. Defaults to [`CHUNK_SIZE`].
    ///
    /// Peek shortfalls are rounded up to a multiple of this, and single byte reads refill up to
    /// this many bytes at a time. A value of `0` is treated as `1`, and values above
    /// [`MAX_FILL_SIZE`] are clamped to it.
    pub fn fill_size(mut self, size: usize) -> Self {
        self.fill_size = Some(size);
        self
    }

    /// Pre-allocates the pending buffer. By default nothing is allocated until it is needed.
    ///
    /// The capacity is rounded up to a multiple of [`CHUNK_SIZE`].
    pub fn initial_capacity(mut self, cap: usize) -> Self {
        self.initial_capacity = Some(cap);
        self
    }

    /// Builds the [`LookaheadReader`] with the configured settings.
    pub fn build(self) -> LookaheadReader<R> {
        let buffer = match self.initial_capacity {
            Some(cap) => Buffer::with_capacity(cap),
            None => Buffer::new(),
        };

        LookaheadReader {
            buffer,
            fill_size: self.fill_size.unwrap_or(CHUNK_SIZE).clamp(1, MAX_FILL_SIZE),
            reader: self.reader,
        }
    }
}

impl<R: ?Sized> LookaheadReader<R> {
    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the underlying reader.
    ///
    /// Reading from it directly skips the pending bytes and leaves the stream out of order.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Returns the bytes pulled from the source but not yet consumed.
    ///
    /// Never touches the source. After a failed [`peek`](PeekRead::peek) this shows what was
    /// obtained before the failure.
    pub fn buffered(&self) -> &[u8] {
        self.buffer.unconsumed()
    }

    /// Returns the fill unit pulls are rounded up to.
    pub fn fill_size(&self) -> usize {
        self.fill_size
    }
}

impl<R: Read + ?Sized> LookaheadReader<R> {
    /// Makes sure at least `size` bytes are pending, unless the source runs dry first.
    fn fill_to(&mut self, size: usize) -> io::Result<()> {
        let Some(need) = size
            .checked_sub(self.buffer.remaining())
            .filter(|&need| need > 0)
        else {
            return Ok(());
        };

        // Round up so that a run of slowly growing peeks turns into a few large pulls. Near the
        // capacity limit the rounding is dropped, only the shortfall itself has to fit.
        let limit = PRACTICAL_MAX_SIZE.saturating_sub(self.buffer.remaining());
        let amt = need
            .div_ceil(self.fill_size)
            .checked_mul(self.fill_size)
            .filter(|&amt| amt <= limit)
            .unwrap_or(need);

        match self.buffer.fill_amount(&mut self.reader, amt) {
            Ok(result) => {
                trace!(
                    requested = amt,
                    pulled = result.count(),
                    eof = result.is_eof(),
                    "peek fill"
                );
                Ok(())
            }
            // The source ran dry in its own way, which is as benign as a plain end-of-stream
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                trace!(requested = amt, error = %e, "peek fill hit end of stream");
                Ok(())
            }
            Err(e) => {
                debug!(
                    requested = amt,
                    buffered = self.buffer.remaining(),
                    error = %e,
                    "peek fill failed"
                );
                Err(e)
            }
        }
    }

    /// Pulls up to one fill unit from the source into the empty pending buffer.
    fn refill(&mut self) -> io::Result<()> {
        debug_assert!(self.buffer.is_empty());

        let result = self.buffer.fill(&mut self.reader, self.fill_size)?;
        trace!(
            requested = self.fill_size,
            pulled = result.count(),
            eof = result.is_eof(),
            "refill"
        );

        Ok(())
    }
}

impl<R: Read + ?Sized> Read for LookaheadReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.buffer.is_empty() {
            // Nothing pending, let the inner reader take things from here
            return self.reader.read(buf);
        }

        // Short reads are fine, the caller loops if it wants more
        Ok(self.buffer.copy_to(buf))
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        if self.buffer.is_empty() {
            return self.reader.read_vectored(bufs);
        }

        let mut data = self.buffer.unconsumed();
        let bytes_read = data.read_vectored(bufs)?;
        self.buffer.consume(bytes_read);

        Ok(bytes_read)
    }

    // Like BufReader, hand the pending bytes over and then delegate, as the inner reader might
    // have a more efficient `read_to_end`
    #[expect(clippy::arithmetic_side_effects, reason = "Would OOM before overflow")]
    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let pending = self.buffer.unconsumed();
        let pending_bytes = pending.len();

        buf.try_reserve(pending_bytes)?;
        buf.extend_from_slice(pending);
        self.buffer.clear();

        let bytes_read = self.reader.read_to_end(buf)?;

        Ok(pending_bytes + bytes_read)
    }
}

impl<R: Read + ?Sized> BufRead for LookaheadReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.buffer.is_empty() {
            self.refill()?;
        }

        Ok(self.buffer.unconsumed())
    }

    fn consume(&mut self, amt: usize) {
        self.buffer.consume(amt);
    }
}

impl<R: Read + ?Sized> PeekRead for LookaheadReader<R> {
    fn read_byte(&mut self) -> io::Result<u8> {
        if let Some(byte) = self.buffer.pop_front() {
            return Ok(byte);
        }

        // Pull a whole batch rather than one byte, callers tend to come back for more
        self.refill()?;
        self.buffer.pop_front().ok_or_else(eof)
    }

    #[expect(clippy::indexing_slicing, reason = "Bounded by `min`")]
    fn peek(&mut self, size: usize) -> io::Result<&[u8]> {
        self.fill_to(size)?;

        let have = cmp::min(size, self.buffer.remaining());
        Ok(&self.buffer.unconsumed()[..have])
    }

    #[expect(clippy::indexing_slicing, reason = "Bounded by `min`")]
    fn peek_mut(&mut self, size: usize) -> io::Result<&mut [u8]> {
        self.fill_to(size)?;

        let have = cmp::min(size, self.buffer.remaining());
        Ok(&mut self.buffer.unconsumed_mut()[..have])
    }

    fn peek_byte(&mut self, offset: usize) -> io::Result<u8> {
        // No stream has a byte past `usize::MAX`
        let Some(size) = offset.checked_add(1) else {
            return Err(eof());
        };

        self.peek(size)?.get(offset).copied().ok_or_else(eof)
    }
}

impl<R: ?Sized + fmt::Debug> fmt::Debug for LookaheadReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookaheadReader")
            .field("reader", &&self.reader)
            .field(
                "buffer",
                &format_args!("{}/{}", self.buffer.remaining(), self.buffer.cap()),
            )
            .field("fill_size", &self.fill_size)
            .finish()
    }
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "end of stream")
}

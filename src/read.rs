use std::io::{self, Read};

/// A `PeekRead` is a [`Read`] that can look ahead in its stream without consuming it.
///
/// Peeked bytes stay queued: the next consuming read (`read`, `read_byte`, ...) returns them
/// first, in order. Peeking never moves the stream position.
///
/// End-of-stream is not an error for [`peek`](PeekRead::peek): a short view is the normal outcome
/// when the stream has fewer bytes left than asked for. The single byte operations
/// [`read_byte`](PeekRead::read_byte) and [`peek_byte`](PeekRead::peek_byte) report end-of-stream
/// as an [`io::ErrorKind::UnexpectedEof`] error instead.
pub trait PeekRead: Read {
    /// Reads and consumes a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::UnexpectedEof`] at end-of-stream, or any error from the source.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Returns up to `size` upcoming bytes without consuming them.
    ///
    /// The view is shorter than `size` only if the stream ends first. It borrows the reader, so
    /// it can't be held across a later call.
    ///
    /// # Errors
    ///
    /// Returns any error from the source other than end-of-stream. Bytes obtained before the
    /// error are kept and returned by later calls.
    fn peek(&mut self, size: usize) -> io::Result<&[u8]>;

    /// Like [`peek`](PeekRead::peek), but the view is writable.
    ///
    /// The view is the reader's own storage, not a copy. Anything written to it is what the next
    /// consuming read returns.
    ///
    /// # Errors
    ///
    /// Same as [`peek`](PeekRead::peek).
    fn peek_mut(&mut self, size: usize) -> io::Result<&mut [u8]>;

    /// Copies up to `buf.len()` upcoming bytes into `buf` without consuming them.
    ///
    /// Returns the number of bytes copied, which is less than `buf.len()` only if the stream ends
    /// first.
    ///
    /// # Errors
    ///
    /// Same as [`peek`](PeekRead::peek).
    fn peek_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let peeked = self.peek(buf.len())?;
        let n = peeked.len();
        buf.get_mut(..n)
            .ok_or_else(|| io::Error::other("peek returned more bytes than requested"))?
            .copy_from_slice(peeked);
        Ok(n)
    }

    /// Returns the byte `offset` positions ahead without consuming anything.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::UnexpectedEof`] if the stream ends at or before `offset`, or any
    /// error from the source.
    fn peek_byte(&mut self, offset: usize) -> io::Result<u8>;
}

//! Buffer size constants.
//!
//! Every pull from the wrapped source and every capacity change of the pending buffer is expressed
//! in terms of [`CHUNK_SIZE`].
//!
//! # Invariant
//!
//! - `CHUNK_SIZE` is a power of 2 and a multiple of 1 KiB (1024 bytes)
//! - `MAX_FILL_SIZE` is a power of 2 multiple of `CHUNK_SIZE`
//! - `PRACTICAL_MAX_SIZE > MAX_FILL_SIZE` and is a power of 2 multiple of `CHUNK_SIZE`

/// Default fill unit (4 KiB) for pulls from the wrapped source.
///
/// Peek shortfalls are rounded up to a multiple of the fill unit, and single byte reads refill the
/// pending buffer with up to one fill unit at a time. The value is a throughput knob and can be
/// changed per reader with [`fill_size`](crate::LookaheadReaderBuilder::fill_size).
///
/// Pending buffer capacity is always a multiple of this value.
pub const CHUNK_SIZE: usize =
    // 2^12 = 4096 = 4 * 1024 = 4 KiB
    1 << 12;

/// Largest configurable fill unit (16 MiB).
///
/// Larger values passed to [`fill_size`](crate::LookaheadReaderBuilder::fill_size) are clamped to
/// this. It bounds the extra memory a single refill or rounded peek can allocate.
pub const MAX_FILL_SIZE: usize =
    // 2^24 = 16 MiB
    CHUNK_SIZE << 12;

/// Practical maximum buffer size.
///
/// This is a platform limit, not a recommended size. Requests that would need a larger pending
/// buffer are rejected with [`InvalidInput`](std::io::ErrorKind::InvalidInput). Its value is the
/// largest power of two multiple of [`CHUNK_SIZE`] that fits in `usize`.
///
/// # Safety
///
/// It resolves to `usize::MAX / 2 + 1` expressed in terms of `CHUNK_SIZE`, so it can't overflow.
pub const PRACTICAL_MAX_SIZE: usize = CHUNK_SIZE * (1 << CHUNK_SIZE.leading_zeros());

#[cfg(test)]
mod tests;

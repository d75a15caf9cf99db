//! Low-level offset and slicing utilities.

use crate::romdir::types::error::{RomdirError, Result};
use crate::romdir::types::models::DATA_ALIGNMENT;

/// Rounds `n` up to the next multiple of the payload alignment (16).
///
/// Returns `None` if the rounded value does not fit in a `u64`.
pub fn align_up(n: u64) -> Option<u64> {
    let rem = n % DATA_ALIGNMENT;
    if rem == 0 {
        Some(n)
    } else {
        n.checked_add(DATA_ALIGNMENT - rem)
    }
}

/// Borrows `len` bytes at `offset` from `buf`, failing instead of panicking
/// when the range leaves the buffer.
pub fn checked_slice(buf: &[u8], offset: u64, len: u64) -> Result<&[u8]> {
    let out_of_range = || RomdirError::OutOfRange {
        offset,
        len,
        available: buf.len() as u64,
    };
    let end = offset.checked_add(len).ok_or_else(out_of_range)?;
    if end > buf.len() as u64 {
        return Err(out_of_range());
    }
    // Both bounds are <= buf.len(), so they fit in usize.
    Ok(&buf[offset as usize..end as usize])
}

/// Clamps a request of `len` bytes at `offset` against a region of `size` bytes.
///
/// Returns the number of bytes that can be served, 0 at or past the end.
pub fn clamp_len(size: u64, offset: u64, len: u64) -> u64 {
    if offset >= size {
        0
    } else {
        len.min(size - offset)
    }
}

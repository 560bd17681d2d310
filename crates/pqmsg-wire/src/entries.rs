//! Length-prefixed two-entry payload codec.
//!
//! Request and response bodies that carry two byte strings back-to-back (a
//! public key and a ciphertext, or the two halves of a generated keypair)
//! use this layout, all lengths little-endian:
//!
//! ```text
//! ┌──────────────┬─────────────────┬──────────────┬─────────────────┐
//! │ len1 (8B LE) │ entry1 (len1 B) │ len2 (8B LE) │ entry2 (len2 B) │
//! └──────────────┴─────────────────┴──────────────┴─────────────────┘
//! ```
//!
//! The encode side trusts its caller; pair it with
//! [`structured_entries_len`] to size the buffer. The decode side trusts
//! nothing: its input may come from another process, so every offset and
//! length is checked against the real buffer length before a view is
//! produced.

use bytes::{Buf, BufMut};
use tracing::debug;

use crate::error::{Result, WireError};

/// Width of each length field on the wire.
pub const LEN_FIELD_SIZE: usize = 8;

/// Exact byte length of a structured buffer holding entries of `len1` and
/// `len2` bytes: both entries plus the length-field overhead.
///
/// Fails closed with [`WireError::LengthOverflow`] instead of wrapping when
/// the sum does not fit a `usize`.
pub fn structured_entries_len(len1: usize, len2: usize) -> Result<usize> {
    len1.checked_add(len2)
        .and_then(|total| total.checked_add(2 * LEN_FIELD_SIZE))
        .ok_or(WireError::LengthOverflow)
}

/// Pack two entries into a freshly allocated structured buffer.
pub fn structure_entries(entry1: &[u8], entry2: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.put_u64_le(entry1.len() as u64);
    out.put_slice(entry1);
    out.put_u64_le(entry2.len() as u64);
    out.put_slice(entry2);
    out
}

/// Pack two entries into the front of `out`, returning the number of bytes
/// written.
///
/// Fails with [`WireError::BufferTooSmall`] when `out` is shorter than
/// [`structured_entries_len`] for the two entries; nothing is written on
/// failure.
pub fn structure_entries_into(out: &mut [u8], entry1: &[u8], entry2: &[u8]) -> Result<usize> {
    let needed = structured_entries_len(entry1.len(), entry2.len())?;
    if out.len() < needed {
        return Err(WireError::BufferTooSmall {
            needed,
            got: out.len(),
        });
    }

    let mut dst = &mut out[..needed];
    dst.put_u64_le(entry1.len() as u64);
    dst.put_slice(entry1);
    dst.put_u64_le(entry2.len() as u64);
    dst.put_slice(entry2);
    Ok(needed)
}

/// Split a structured buffer back into its two entries.
///
/// Both length fields are parsed and validated against `buf.len()` before
/// either view is produced; the embedded lengths are never trusted on their
/// own. On success the entries are subslices of `buf`: no copy is made, and
/// each view lives as long as the borrow of `buf`.
pub fn destructure_entries(buf: &[u8]) -> Result<(&[u8], &[u8])> {
    let (entry1, rest) = split_entry(buf)?;
    let (entry2, _) = split_entry(rest)?;
    Ok((entry1, entry2))
}

fn split_entry(buf: &[u8]) -> Result<(&[u8], &[u8])> {
    if buf.len() < LEN_FIELD_SIZE {
        debug!(
            available = buf.len(),
            "structured buffer too short for a length field"
        );
        return Err(WireError::OutOfBounds {
            needed: LEN_FIELD_SIZE as u64,
            available: buf.len(),
        });
    }

    let mut src = buf;
    let declared = src.get_u64_le();
    let len = usize::try_from(declared).map_err(|_| WireError::LengthParse)?;
    if len > src.len() {
        debug!(
            declared,
            available = src.len(),
            "declared entry length exceeds structured buffer"
        );
        return Err(WireError::OutOfBounds {
            needed: declared,
            available: src.len(),
        });
    }

    Ok(src.split_at(len))
}

use std::os::raw::c_uchar;

use pqmsg_wire::{destructure_entries, structure_entries_into, structured_entries_len, WireError};

use crate::error::{set_error_message, set_failure};
use crate::PQ_ERR_INTERNAL;

/// Exact byte length of a structured buffer holding two entries of
/// `entry1_len` and `entry2_len` bytes, length-field overhead included.
///
/// Returns `0` when the computation would overflow the addressable size
/// (`0` is unambiguous: the true minimum is the two length fields alone).
#[no_mangle]
pub extern "C" fn pq_structured_entries_length(entry1_len: usize, entry2_len: usize) -> usize {
    crate::ffi_boundary(0, || {
        match structured_entries_len(entry1_len, entry2_len) {
            Ok(total) => total,
            Err(err) => {
                set_error_message(err.to_string());
                0
            }
        }
    })
}

/// Pack two entries back-to-back into `buf`, each preceded by its length.
///
/// # Returns
/// - `0` on success.
/// - `-1` when `buf` is null.
/// - `-2` when `entry1` is null.
/// - `-3` when `entry2` is null.
/// - `-4` when the combined lengths overflow the addressable size.
///
/// # Safety
/// `buf` must point to at least [`pq_structured_entries_length`]`(entry1_len,
/// entry2_len)` writable bytes. This precondition is not re-validated here;
/// violating it is a caller bug, and using the paired length function rules
/// it out. `entry1` and `entry2` must point to `entry1_len` and `entry2_len`
/// readable bytes.
#[no_mangle]
pub unsafe extern "C" fn pq_structure_entries(
    buf: *mut c_uchar,
    entry1_len: usize,
    entry2_len: usize,
    entry1: *const c_uchar,
    entry2: *const c_uchar,
) -> i16 {
    crate::ffi_boundary(PQ_ERR_INTERNAL, || {
        if buf.is_null() {
            return set_failure(-1, "null target buffer");
        }
        if entry1.is_null() {
            return set_failure(-2, "null entry1");
        }
        if entry2.is_null() {
            return set_failure(-3, "null entry2");
        }

        let needed = match structured_entries_len(entry1_len, entry2_len) {
            Ok(needed) => needed,
            Err(err) => return set_failure(-4, err.to_string()),
        };

        let (out, entry1, entry2) = {
            // SAFETY: all pointers are non-null; the caller guarantees
            // entry1_len/entry2_len readable bytes behind the entries and
            // `needed` writable bytes behind buf.
            unsafe {
                (
                    std::slice::from_raw_parts_mut(buf, needed),
                    std::slice::from_raw_parts(entry1, entry1_len),
                    std::slice::from_raw_parts(entry2, entry2_len),
                )
            }
        };
        match structure_entries_into(out, entry1, entry2) {
            Ok(_) => 0,
            Err(err) => set_failure(-4, err.to_string()),
        }
    })
}

/// Split a structured buffer back into two entry views pointing into `buf`.
///
/// Every offset and length is validated against `buf_len` before anything is
/// exposed; the embedded length fields are never trusted on their own, since
/// the buffer may originate from another process.
///
/// # Returns
/// - `0` on success.
/// - `-1` when `buf` is null.
/// - `-2` when `out_entry1_len` is null.
/// - `-3` when `out_entry2_len` is null.
/// - `-4` when `out_entry1` is null.
/// - `-5` when `out_entry2` is null.
/// - `-6` when a length field cannot be decoded on this architecture.
/// - `-7` when the declared lengths would read past `buf_len`.
///
/// Outputs are written only when `0` is returned. The views point into
/// `buf` and are valid only while the caller keeps that memory allocated and
/// unmodified.
///
/// # Safety
/// `buf` must point to at least `buf_len` readable bytes; the four output
/// pointers must be writable.
#[no_mangle]
pub unsafe extern "C" fn pq_destructure_entries(
    buf: *const c_uchar,
    buf_len: usize,
    out_entry1_len: *mut usize,
    out_entry2_len: *mut usize,
    out_entry1: *mut *const c_uchar,
    out_entry2: *mut *const c_uchar,
) -> i16 {
    crate::ffi_boundary(PQ_ERR_INTERNAL, || {
        if buf.is_null() {
            return set_failure(-1, "null structured buffer");
        }
        if out_entry1_len.is_null() {
            return set_failure(-2, "null entry1 length output");
        }
        if out_entry2_len.is_null() {
            return set_failure(-3, "null entry2 length output");
        }
        if out_entry1.is_null() {
            return set_failure(-4, "null entry1 output");
        }
        if out_entry2.is_null() {
            return set_failure(-5, "null entry2 output");
        }

        let bytes = {
            // SAFETY: buf is non-null and the caller guarantees buf_len
            // readable bytes.
            unsafe { std::slice::from_raw_parts(buf, buf_len) }
        };
        match destructure_entries(bytes) {
            Ok((entry1, entry2)) => {
                // SAFETY: the output pointers are non-null and writable.
                unsafe {
                    *out_entry1_len = entry1.len();
                    *out_entry1 = entry1.as_ptr();
                    *out_entry2_len = entry2.len();
                    *out_entry2 = entry2.as_ptr();
                }
                0
            }
            Err(err @ WireError::LengthParse) => set_failure(-6, err.to_string()),
            Err(err) => set_failure(-7, err.to_string()),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    #[test]
    fn length_includes_field_overhead() {
        assert_eq!(pq_structured_entries_length(0, 0), 16);
        assert_eq!(pq_structured_entries_length(2, 7), 25);
    }

    #[test]
    fn length_overflow_reports_zero() {
        assert_eq!(pq_structured_entries_length(usize::MAX, 1), 0);
    }

    #[test]
    fn structure_entries_known_answer() {
        let secret_key = [13u8, 12, 18, 33];
        let ciphertext = [0u8, 0, 2, 3, 1];
        let total = pq_structured_entries_length(secret_key.len(), ciphertext.len());
        let mut buf = vec![0u8; total];

        let status = unsafe {
            pq_structure_entries(
                buf.as_mut_ptr(),
                secret_key.len(),
                ciphertext.len(),
                secret_key.as_ptr(),
                ciphertext.as_ptr(),
            )
        };
        assert_eq!(status, 0);
        assert_eq!(
            buf,
            vec![4, 0, 0, 0, 0, 0, 0, 0, 13, 12, 18, 33, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 3, 1]
        );
    }

    #[test]
    fn structure_entries_null_arguments() {
        let entry = [1u8];
        let mut buf = vec![0u8; 32];

        let status = unsafe {
            pq_structure_entries(ptr::null_mut(), 1, 1, entry.as_ptr(), entry.as_ptr())
        };
        assert_eq!(status, -1);

        let status = unsafe {
            pq_structure_entries(buf.as_mut_ptr(), 1, 1, ptr::null(), entry.as_ptr())
        };
        assert_eq!(status, -2);

        let status = unsafe {
            pq_structure_entries(buf.as_mut_ptr(), 1, 1, entry.as_ptr(), ptr::null())
        };
        assert_eq!(status, -3);
    }

    #[test]
    fn destructure_entries_roundtrip() {
        let buf: Vec<u8> = vec![
            6, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 4, 5, 6, 3, 0, 0, 0, 0, 0, 0, 0, 12, 13, 14,
        ];

        let mut entry1_len = 0usize;
        let mut entry2_len = 0usize;
        let mut entry1: *const c_uchar = ptr::null();
        let mut entry2: *const c_uchar = ptr::null();

        let status = unsafe {
            pq_destructure_entries(
                buf.as_ptr(),
                buf.len(),
                &mut entry1_len,
                &mut entry2_len,
                &mut entry1,
                &mut entry2,
            )
        };
        assert_eq!(status, 0);
        assert_eq!(entry1_len, 6);
        assert_eq!(entry2_len, 3);
        assert_eq!(
            unsafe { std::slice::from_raw_parts(entry1, entry1_len) },
            &[0, 1, 2, 4, 5, 6]
        );
        assert_eq!(
            unsafe { std::slice::from_raw_parts(entry2, entry2_len) },
            &[12, 13, 14]
        );
    }

    #[test]
    fn destructure_entries_null_arguments() {
        let buf = vec![0u8; 16];
        let mut len1 = 0usize;
        let mut len2 = 0usize;
        let mut entry1: *const c_uchar = ptr::null();
        let mut entry2: *const c_uchar = ptr::null();

        let status = unsafe {
            pq_destructure_entries(ptr::null(), 16, &mut len1, &mut len2, &mut entry1, &mut entry2)
        };
        assert_eq!(status, -1);

        let status = unsafe {
            pq_destructure_entries(
                buf.as_ptr(),
                buf.len(),
                ptr::null_mut(),
                &mut len2,
                &mut entry1,
                &mut entry2,
            )
        };
        assert_eq!(status, -2);

        let status = unsafe {
            pq_destructure_entries(
                buf.as_ptr(),
                buf.len(),
                &mut len1,
                ptr::null_mut(),
                &mut entry1,
                &mut entry2,
            )
        };
        assert_eq!(status, -3);

        let status = unsafe {
            pq_destructure_entries(
                buf.as_ptr(),
                buf.len(),
                &mut len1,
                &mut len2,
                ptr::null_mut(),
                &mut entry2,
            )
        };
        assert_eq!(status, -4);

        let status = unsafe {
            pq_destructure_entries(
                buf.as_ptr(),
                buf.len(),
                &mut len1,
                &mut len2,
                &mut entry1,
                ptr::null_mut(),
            )
        };
        assert_eq!(status, -5);
    }

    #[test]
    fn destructure_entries_out_of_bounds_exposes_nothing() {
        let mut buf: Vec<u8> = vec![
            6, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 4, 5, 6, 3, 0, 0, 0, 0, 0, 0, 0, 12, 13, 14,
        ];
        buf[0] = 255;

        let mut entry1_len = 7usize;
        let mut entry2_len = 7usize;
        let mut entry1: *const c_uchar = ptr::null();
        let mut entry2: *const c_uchar = ptr::null();

        let status = unsafe {
            pq_destructure_entries(
                buf.as_ptr(),
                buf.len(),
                &mut entry1_len,
                &mut entry2_len,
                &mut entry1,
                &mut entry2,
            )
        };
        assert_eq!(status, -7);
        // Outputs untouched on failure.
        assert_eq!(entry1_len, 7);
        assert_eq!(entry2_len, 7);
        assert!(entry1.is_null());
        assert!(entry2.is_null());
    }

    #[test]
    fn destructure_entries_empty_buffer() {
        let buf: Vec<u8> = Vec::new();
        let mut len1 = 0usize;
        let mut len2 = 0usize;
        let mut entry1: *const c_uchar = ptr::null();
        let mut entry2: *const c_uchar = ptr::null();

        let status = unsafe {
            pq_destructure_entries(
                buf.as_ptr(),
                buf.len(),
                &mut len1,
                &mut len2,
                &mut entry1,
                &mut entry2,
            )
        };
        assert_eq!(status, -7);
    }
}

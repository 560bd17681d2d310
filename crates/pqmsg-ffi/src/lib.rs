//! pqmsg-ffi: C-ABI exports for the pqmsg framing codecs.
//!
//! Every export returns a small signed status: `0` is success and each
//! negative value is a distinct, documented failure cause. No exceptions and
//! no unwinding across the boundary: a panic is caught and surfaced as
//! [`PQ_ERR_INTERNAL`]. Decode-path output parameters are written only on
//! success. A thread-local message describing the most recent failure is
//! available through [`pq_last_error`].

mod entries;
mod error;
mod header;

use std::panic::AssertUnwindSafe;

pub use entries::{pq_destructure_entries, pq_structure_entries, pq_structured_entries_length};
pub use header::{
    pq_deserialize_response_header, pq_serialize_request_header,
    pq_serialized_request_header_size, pq_serialized_response_header_size, PqResponseHeader,
};

/// Status returned when a panic is caught at the FFI boundary.
pub const PQ_ERR_INTERNAL: i16 = -99;

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

/// Message describing the most recent failure on the calling thread.
///
/// Returns a pointer to a NUL-terminated string owned by thread-local
/// storage; it stays valid until the next failing pqmsg call on the same
/// thread. The string is empty when no failure has been recorded.
#[no_mangle]
pub extern "C" fn pq_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    #[test]
    fn last_error_starts_empty() {
        let ptr = pq_last_error();
        assert!(!ptr.is_null());

        // SAFETY: pq_last_error returns a pointer to a thread-local CString.
        let text = unsafe { CStr::from_ptr(ptr).to_str().unwrap() };
        assert!(text.is_empty());
    }
}

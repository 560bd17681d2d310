use std::os::raw::c_uchar;

use pqmsg_wire::{
    serialized_request_header_size, serialized_response_header_size, Algorithm, Operation,
    RequestHeader, ResponseHeader, WireError,
};

use crate::error::set_failure;
use crate::PQ_ERR_INTERNAL;

/// C-visible response header, mirroring [`ResponseHeader`] field for field.
///
/// `success` is `0` when the operation succeeded; any other value is a
/// failure, and a failure always reports `data_len == 0`.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PqResponseHeader {
    pub version: u8,
    pub identifier: u64,
    pub success: i8,
    pub data_len: u32,
}

impl From<ResponseHeader> for PqResponseHeader {
    fn from(header: ResponseHeader) -> Self {
        Self {
            version: header.version,
            identifier: header.identifier,
            success: header.success,
            data_len: header.data_len,
        }
    }
}

/// Byte length of a serialized request header.
///
/// Computed once per process and cached. Call this to size the buffer passed
/// to [`pq_serialize_request_header`].
#[no_mangle]
pub extern "C" fn pq_serialized_request_header_size() -> u64 {
    crate::ffi_boundary(0, || serialized_request_header_size() as u64)
}

/// Byte length of a serialized response header.
///
/// Computed once per process and cached. Call this to know how many bytes to
/// read from the channel before [`pq_deserialize_response_header`].
#[no_mangle]
pub extern "C" fn pq_serialized_response_header_size() -> u64 {
    crate::ffi_boundary(0, || serialized_response_header_size() as u64)
}

/// Serialize a request header into `buf`. Attach the body bytes directly
/// after the serialized header when sending over a channel.
///
/// `algorithm_tag` and `operation_tag` are the wire discriminants of the
/// algorithm and operation enumerations.
///
/// # Returns
/// - `0` on success.
/// - `-1` when `buf` is null.
/// - `-2` when `buf_len` is smaller than [`pq_serialized_request_header_size`].
/// - `-3` when the header cannot be encoded (unknown algorithm or operation tag).
///
/// The buffer contents are unspecified whenever a non-zero status is
/// returned.
///
/// # Safety
/// `buf` must point to at least `buf_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn pq_serialize_request_header(
    buf: *mut c_uchar,
    buf_len: usize,
    identifier: u64,
    data_len: u32,
    algorithm_tag: u32,
    operation_tag: u32,
) -> i16 {
    crate::ffi_boundary(PQ_ERR_INTERNAL, || {
        if buf.is_null() {
            return set_failure(-1, "null target buffer");
        }
        let needed = serialized_request_header_size();
        if buf_len < needed {
            return set_failure(
                -2,
                format!("target buffer holds {buf_len} bytes, header needs {needed}"),
            );
        }

        let algorithm = match Algorithm::try_from(algorithm_tag) {
            Ok(algorithm) => algorithm,
            Err(err) => return set_failure(-3, err.to_string()),
        };
        let operation = match Operation::try_from(operation_tag) {
            Ok(operation) => operation,
            Err(err) => return set_failure(-3, err.to_string()),
        };

        let out = {
            // SAFETY: buf is non-null and the caller guarantees buf_len
            // writable bytes.
            unsafe { std::slice::from_raw_parts_mut(buf, buf_len) }
        };
        match RequestHeader::new(identifier, data_len, algorithm, operation).encode_into(out) {
            Ok(_) => 0,
            Err(err) => set_failure(-3, err.to_string()),
        }
    })
}

/// Deserialize a response header from `buf`. The decoded `data_len` tells
/// how many body bytes follow on the channel.
///
/// # Returns
/// - `0` on success.
/// - `-1` when `buf` is null.
/// - `-2` when `out_header` is null.
/// - `-3` when `buf_len` is smaller than the serialized header, or the
///   header size cannot be represented on this architecture.
/// - `-4` when the bytes do not parse as a response header.
/// - `-5` when the header's protocol version differs from this library's.
///
/// `out_header` is written only when `0` is returned.
///
/// # Safety
/// `buf` must point to at least `buf_len` readable bytes and `out_header`
/// to a writable `PqResponseHeader`.
#[no_mangle]
pub unsafe extern "C" fn pq_deserialize_response_header(
    buf: *const c_uchar,
    buf_len: usize,
    out_header: *mut PqResponseHeader,
) -> i16 {
    crate::ffi_boundary(PQ_ERR_INTERNAL, || {
        if buf.is_null() {
            return set_failure(-1, "null response buffer");
        }
        if out_header.is_null() {
            return set_failure(-2, "null output header");
        }

        let bytes = {
            // SAFETY: buf is non-null and the caller guarantees buf_len
            // readable bytes.
            unsafe { std::slice::from_raw_parts(buf, buf_len) }
        };
        match ResponseHeader::decode(bytes) {
            Ok(header) => {
                // SAFETY: out_header is non-null and points to a writable
                // PqResponseHeader.
                unsafe { *out_header = PqResponseHeader::from(header) };
                0
            }
            Err(err @ WireError::BufferTooSmall { .. }) => set_failure(-3, err.to_string()),
            Err(err @ WireError::VersionMismatch { .. }) => set_failure(-5, err.to_string()),
            Err(err) => set_failure(-4, err.to_string()),
        }
    })
}

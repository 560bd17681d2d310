//! Request and response header codecs.
//!
//! Both headers share a layout shape (version byte, correlation identifier,
//! 32-bit body length; only the discriminating fields differ), so one module
//! carries both directions through a single validation path.
//!
//! Wire format, all multi-byte fields little-endian:
//!
//! ```text
//! RequestHeader  := version(1B) | identifier(8B) | data_len(4B) | algorithm(4B) | operation(4B)
//! ResponseHeader := version(1B) | identifier(8B) | success(1B signed) | data_len(4B)
//! ```

use std::sync::OnceLock;

use bytes::{Buf, BufMut};
use tracing::debug;

use crate::error::{Result, WireError};
use crate::kem::{Algorithm, Operation};

/// Wire format revision. Bump whenever any fixed layout in this crate changes.
pub const PROTOCOL_VERSION: u8 = 1;

/// Failure code recorded when the responder produced no usable body.
const GENERIC_FAILURE: i8 = -1;

static REQUEST_HEADER_SIZE: OnceLock<usize> = OnceLock::new();
static RESPONSE_HEADER_SIZE: OnceLock<usize> = OnceLock::new();

/// Byte length of a serialized [`RequestHeader`].
///
/// Computed once per process by encoding a default header, then cached;
/// concurrent first callers all observe the completed value. Call this before
/// allocating a serialize target or judging whether a received buffer is
/// large enough to decode.
pub fn serialized_request_header_size() -> usize {
    *REQUEST_HEADER_SIZE.get_or_init(|| {
        let mut probe = Vec::new();
        RequestHeader::default().put(&mut probe);
        probe.len()
    })
}

/// Byte length of a serialized [`ResponseHeader`].
///
/// Same caching contract as [`serialized_request_header_size`].
pub fn serialized_response_header_size() -> usize {
    *RESPONSE_HEADER_SIZE.get_or_init(|| {
        let mut probe = Vec::new();
        ResponseHeader::default().put(&mut probe);
        probe.len()
    })
}

/// Reject any header whose version byte differs from [`PROTOCOL_VERSION`].
///
/// Both communicating processes are expected to be built from matching
/// library revisions within one deployment; there is no negotiation and no
/// cross-version compatibility.
fn check_version(found: u8) -> Result<()> {
    if found != PROTOCOL_VERSION {
        debug!(
            expected = PROTOCOL_VERSION,
            found, "rejecting header with mismatched protocol version"
        );
        return Err(WireError::VersionMismatch {
            expected: PROTOCOL_VERSION,
            found,
        });
    }
    Ok(())
}

/// Fixed-layout metadata prefix describing a request.
///
/// `identifier` is an opaque correlation token chosen by the sender and
/// echoed unchanged in the matching response. `data_len` counts the body
/// bytes that follow this header on the channel; bytes after that belong to
/// the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct RequestHeader {
    pub version: u8,
    pub identifier: u64,
    pub data_len: u32,
    pub algorithm: Algorithm,
    pub operation: Operation,
}

impl RequestHeader {
    /// Build a request header stamped with the current [`PROTOCOL_VERSION`].
    pub fn new(identifier: u64, data_len: u32, algorithm: Algorithm, operation: Operation) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            identifier,
            data_len,
            algorithm,
            operation,
        }
    }

    fn put(&self, dst: &mut impl BufMut) {
        dst.put_u8(self.version);
        dst.put_u64_le(self.identifier);
        dst.put_u32_le(self.data_len);
        dst.put_u32_le(self.algorithm.tag());
        dst.put_u32_le(self.operation.tag());
    }

    /// Serialize into a freshly allocated buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(serialized_request_header_size());
        self.put(&mut out);
        out
    }

    /// Serialize into the front of `out`, returning the number of bytes
    /// written.
    ///
    /// Fails with [`WireError::BufferTooSmall`] when `out` is shorter than
    /// [`serialized_request_header_size`]. The buffer contents are
    /// unspecified on failure.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize> {
        let needed = serialized_request_header_size();
        if out.len() < needed {
            return Err(WireError::BufferTooSmall {
                needed,
                got: out.len(),
            });
        }
        self.put(&mut &mut out[..needed]);
        Ok(needed)
    }

    /// Parse a request header from the front of `buf`.
    ///
    /// Trailing bytes are ignored; use `data_len` to find the body. The
    /// buffer may come from another process, so the tags are validated and
    /// the version gate applies.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let needed = serialized_request_header_size();
        if buf.len() < needed {
            return Err(WireError::BufferTooSmall {
                needed,
                got: buf.len(),
            });
        }

        let mut src = &buf[..needed];
        let version = src.get_u8();
        let identifier = src.get_u64_le();
        let data_len = src.get_u32_le();
        let algorithm = Algorithm::try_from(src.get_u32_le())?;
        let operation = Operation::try_from(src.get_u32_le())?;
        check_version(version)?;

        Ok(Self {
            version,
            identifier,
            data_len,
            algorithm,
            operation,
        })
    }
}

/// Fixed-layout metadata prefix describing a response.
///
/// `identifier` echoes the request this response answers. `success` is `0`
/// when the operation succeeded and a nonzero failure code otherwise; a
/// failed response never carries a body, so `success != 0` implies
/// `data_len == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ResponseHeader {
    pub version: u8,
    pub identifier: u64,
    pub success: i8,
    pub data_len: u32,
}

impl ResponseHeader {
    /// Build a success header announcing `data_len` body bytes.
    pub fn ok(identifier: u64, data_len: u32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            identifier,
            success: 0,
            data_len,
        }
    }

    /// Build a failure header. A zero `status` is coerced to the generic
    /// failure code so the header cannot masquerade as a success; `data_len`
    /// is pinned to `0`.
    pub fn failure(identifier: u64, status: i8) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            identifier,
            success: if status == 0 { GENERIC_FAILURE } else { status },
            data_len: 0,
        }
    }

    fn put(&self, dst: &mut impl BufMut) {
        dst.put_u8(self.version);
        dst.put_u64_le(self.identifier);
        dst.put_i8(self.success);
        dst.put_u32_le(self.data_len);
    }

    /// Serialize into a freshly allocated buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(serialized_response_header_size());
        self.put(&mut out);
        out
    }

    /// Serialize into the front of `out`, returning the number of bytes
    /// written.
    ///
    /// Fails with [`WireError::BufferTooSmall`] when `out` is shorter than
    /// [`serialized_response_header_size`]. The buffer contents are
    /// unspecified on failure.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize> {
        let needed = serialized_response_header_size();
        if out.len() < needed {
            return Err(WireError::BufferTooSmall {
                needed,
                got: out.len(),
            });
        }
        self.put(&mut &mut out[..needed]);
        Ok(needed)
    }

    /// Parse a response header from the front of `buf`.
    ///
    /// Applies the version gate and rejects a header whose fields are
    /// mutually inconsistent (a failure claiming body bytes). On any error
    /// no header is produced.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let needed = serialized_response_header_size();
        if buf.len() < needed {
            return Err(WireError::BufferTooSmall {
                needed,
                got: buf.len(),
            });
        }

        let mut src = &buf[..needed];
        let version = src.get_u8();
        let identifier = src.get_u64_le();
        let success = src.get_i8();
        let data_len = src.get_u32_le();
        check_version(version)?;

        if success != 0 && data_len != 0 {
            debug!(success, data_len, "rejecting failed response that claims a body");
            return Err(WireError::InvalidResponse { data_len });
        }

        Ok(Self {
            version,
            identifier,
            success,
            data_len,
        })
    }
}

/// Serialize a complete response (header plus body) in one call.
///
/// `None`, or a body longer than `u32::MAX` bytes, produces a failure header
/// with no body bytes attached. The body length limit exists because
/// `data_len` is a 32-bit field.
pub fn serialize_response(identifier: u64, body: Option<&[u8]>) -> Vec<u8> {
    let header = match body {
        Some(body) => match u32::try_from(body.len()) {
            Ok(data_len) => ResponseHeader::ok(identifier, data_len),
            Err(_) => ResponseHeader::failure(identifier, GENERIC_FAILURE),
        },
        None => ResponseHeader::failure(identifier, GENERIC_FAILURE),
    };

    let mut out = header.encode();
    if header.success == 0 {
        if let Some(body) = body {
            out.extend_from_slice(body);
        }
    }
    out
}

/// A request header paired with its body bytes, for callers that prefer to
/// hand both around as one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub header: RequestHeader,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(header: RequestHeader, body: Vec<u8>) -> Self {
        Self { header, body }
    }
}

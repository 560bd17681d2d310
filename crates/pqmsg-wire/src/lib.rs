//! Fixed-layout message framing for post-quantum key-exchange IPC.
//!
//! One process requests a key-exchange operation by sending a
//! [`RequestHeader`] naming an [`Algorithm`], an [`Operation`], and an opaque
//! correlation identifier, followed by `data_len` body bytes. The executing
//! process answers with a [`ResponseHeader`] and, on success, a body. Bodies
//! carrying two variable-length byte strings (a public key plus a ciphertext,
//! or the two halves of a generated keypair) use the [`entries`] codec.
//!
//! This crate is framing only: it knows nothing about the channel carrying
//! the bytes and performs no cryptography itself. Take care that the channel
//! is not readable by other processes, as cryptographically sensitive
//! material crosses it.

pub mod entries;
pub mod error;
pub mod header;
pub mod kem;

pub use entries::{
    destructure_entries, structure_entries, structure_entries_into, structured_entries_len,
    LEN_FIELD_SIZE,
};
pub use error::{Result, WireError};
pub use header::{
    serialize_response, serialized_request_header_size, serialized_response_header_size, Request,
    RequestHeader, ResponseHeader, PROTOCOL_VERSION,
};
pub use kem::{Algorithm, Operation};

#![no_main]

use libfuzzer_sys::fuzz_target;
use pqmsg_wire::{RequestHeader, WireError, PROTOCOL_VERSION};

fuzz_target!(|header: RequestHeader| {
    let bytes = header.encode();

    if header.version == PROTOCOL_VERSION {
        let decoded = RequestHeader::decode(&bytes).expect("well-formed header must decode");
        assert_eq!(decoded, header);
    } else {
        assert!(matches!(
            RequestHeader::decode(&bytes),
            Err(WireError::VersionMismatch { .. })
        ));
    }
});

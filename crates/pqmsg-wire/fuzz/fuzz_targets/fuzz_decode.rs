#![no_main]

use libfuzzer_sys::fuzz_target;

// The decode paths accept buffers from another process; none of them may
// panic or read out of bounds, whatever the bytes.
fuzz_target!(|data: &[u8]| {
    let _ = pqmsg_wire::RequestHeader::decode(data);
    let _ = pqmsg_wire::ResponseHeader::decode(data);

    if let Ok((entry1, entry2)) = pqmsg_wire::destructure_entries(data) {
        // Validated views must lie inside the source buffer.
        assert!(entry1.len() + entry2.len() + 2 * pqmsg_wire::LEN_FIELD_SIZE <= data.len());
    }
});

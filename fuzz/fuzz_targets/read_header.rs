#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: the header state machine on arbitrary bytes.
//
// Catches bugs in:
// - Magic and format line handling
// - Line ordering checks
// - CRLF and UTF-8 handling
fuzz_target!(|data: &[u8]| {
    let mut reader = pcc_decoder::PlyReader::new(data);
    let _ = reader.read_header();
});

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pcc_driver::{OutputFormat, TranscodeConfig, Transcoder};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    format_id: u8,
    data: Vec<u8>,
}

// Fuzz target: a plain transcode of arbitrary input.
//
// When the pass succeeds, its output must itself transcode cleanly.
fuzz_target!(|input: FuzzInput| {
    let output = match input.format_id % 4 {
        0 => OutputFormat::Ascii,
        1 => OutputFormat::BinaryBigEndian,
        2 => OutputFormat::BinaryLittleEndian,
        _ => OutputFormat::Same,
    };
    let transcoder = Transcoder::new(TranscodeConfig {
        output,
        ..TranscodeConfig::default()
    });

    let mut first = Vec::new();
    if transcoder.convert(&input.data[..], &mut first).is_err() {
        return;
    }
    let mut second = Vec::new();
    transcoder
        .convert(&first[..], &mut second)
        .expect("transcoder output must be valid input");
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use pcc_driver::{BoundaryShape, TranscodeConfig, Transcoder};

const CUBE: &str = "ply\nformat ascii 1.0\nelement vertex 8\nproperty float x\n\
    property float y\nproperty float z\nelement face 12\n\
    property list uchar int vertex_indices\nend_header\n\
    0 0 0\n1 0 0\n1 1 0\n0 1 0\n0 0 1\n1 0 1\n1 1 1\n0 1 1\n\
    3 0 2 1\n3 0 3 2\n3 4 5 6\n3 4 6 7\n3 0 1 5\n3 0 5 4\n\
    3 1 2 6\n3 1 6 5\n3 2 3 7\n3 2 7 6\n3 3 0 4\n3 3 4 7\n";

// Fuzz target: drop-mode cleaning of arbitrary input against a unit cube.
//
// Drop mode rewrites the vertex count, so a successful pass must produce
// a file that reads back without error.
fuzz_target!(|data: &[u8]| {
    let transcoder = Transcoder::new(TranscodeConfig::default());
    let shape: BoundaryShape = transcoder.load_boundary(CUBE.as_bytes()).unwrap();

    let mut output = Vec::new();
    let Ok(report) = transcoder.clean(data, &mut output, &shape) else {
        return;
    };
    assert_eq!(report.bytes_written, output.len() as u64);

    let mut check = Vec::new();
    transcoder
        .convert(&output[..], &mut check)
        .expect("drop-mode output must be valid input");
});

//! Shared fixtures for the PCC integration tests and benchmarks.

use std::fmt::Write as _;
use std::path::Path;

use pcc_driver::{OutputFormat, TranscodeConfig, Transcoder};

/// Read `tests/golden/<name>` as bytes.
///
/// # Panics
///
/// Panics if the fixture is missing.
#[must_use]
pub fn golden(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(name);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Re-encode `input` in `format` without filtering.
///
/// # Panics
///
/// Panics if `input` is not valid PLY.
#[must_use]
pub fn convert(input: &[u8], format: OutputFormat) -> Vec<u8> {
    let config = TranscodeConfig {
        output: format,
        ..TranscodeConfig::default()
    };
    let mut output = Vec::new();
    Transcoder::new(config)
        .convert(input, &mut output)
        .unwrap_or_else(|e| panic!("convert to {format} failed: {e}"));
    output
}

/// Clean `input` against `boundary` with `config`.
///
/// # Panics
///
/// Panics if either input is rejected.
#[must_use]
pub fn clean(boundary: &[u8], input: &[u8], config: TranscodeConfig) -> Vec<u8> {
    let transcoder = Transcoder::new(config);
    let shape = transcoder
        .load_boundary(boundary)
        .unwrap_or_else(|e| panic!("boundary rejected: {e}"));
    let mut output = Vec::new();
    transcoder
        .clean(input, &mut output, &shape)
        .unwrap_or_else(|e| panic!("clean failed: {e}"));
    output
}

/// An ascii cloud of `side`³ points on a regular grid spanning
/// `[-0.5, 1.5]` on each axis, with an extra `uchar` property.
///
/// About an eighth of the points fall inside the unit cube.
#[must_use]
pub fn grid_cloud(side: u32) -> Vec<u8> {
    let count = u64::from(side).pow(3);
    let mut text = format!(
        "ply\nformat ascii 1.0\nelement vertex {count}\n\
         property float x\nproperty float y\nproperty float z\n\
         property uchar tag\nend_header\n"
    );
    let step = 2.0 / f64::from(side.max(2) - 1);
    for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                let [x, y, z] = [i, j, k].map(|n| f64::from(n).mul_add(step, -0.5));
                let tag = (i + j + k) % 256;
                let _ = writeln!(text, "{x} {y} {z} {tag}");
            }
        }
    }
    text.into_bytes()
}

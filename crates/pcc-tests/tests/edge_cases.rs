//! Edge cases: malformed headers, short data, unusual layouts and
//! boundary meshes the filter must refuse.

use pcc_decoder::DecodeError;
use pcc_driver::{DriverError, FilterMode, OutputFormat, TranscodeConfig, Transcoder};
use pcc_tests::{clean, convert, golden};
use pcc_types::HeaderError;

fn try_convert(input: &[u8]) -> Result<Vec<u8>, DriverError> {
    let mut output = Vec::new();
    Transcoder::new(TranscodeConfig::default()).convert(input, &mut output)?;
    Ok(output)
}

fn try_boundary(input: &str) -> Result<usize, DriverError> {
    Transcoder::new(TranscodeConfig::default())
        .load_boundary(input.as_bytes())
        .map(|shape| shape.triangles().len())
}

fn header_error(result: Result<Vec<u8>, DriverError>) -> HeaderError {
    match result {
        Err(DriverError::Decode(DecodeError::Header { error, .. })) => error,
        other => panic!("expected a header error, got {other:?}"),
    }
}

const TETRA_HEADER: &str = "ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\n\
    property float y\nproperty float z\nelement face 4\n\
    property list uchar int vertex_indices\nend_header\n0 0 0\n1 0 0\n0 1 0\n0 0 1\n";

// ── Header ────────────────────────────────────────────────────────────────────

#[test]
fn wrong_magic() {
    let err = header_error(try_convert(b"PLY\nformat ascii 1.0\nend_header\n"));
    assert!(matches!(err, HeaderError::InvalidMagic { .. }));
}

#[test]
fn unsupported_version() {
    let err = header_error(try_convert(b"ply\nformat ascii 2.0\nend_header\n"));
    assert!(matches!(err, HeaderError::UnsupportedVersion { .. }));
}

#[test]
fn property_before_element() {
    let err = header_error(try_convert(b"ply\nformat ascii 1.0\nproperty float x\nend_header\n"));
    assert!(matches!(err, HeaderError::PropertyWithoutElement { .. }));
}

#[test]
fn list_with_signed_size() {
    let result = try_convert(
        b"ply\nformat ascii 1.0\nelement f 0\nproperty list int int idx\nend_header\n",
    );
    assert!(matches!(
        result,
        Err(DriverError::Decode(DecodeError::Header { .. }))
    ));
}

#[test]
fn header_error_names_input_and_line() {
    let mut output = Vec::new();
    let config = TranscodeConfig {
        input_name: "scan.ply".to_string(),
        ..TranscodeConfig::default()
    };
    let err = Transcoder::new(config)
        .convert(&b"ply\nformat ascii 1.0\nelement vertex many\n"[..], &mut output)
        .unwrap_err();
    assert!(err.to_string().starts_with("scan.ply:3: "), "{err}");
}

#[test]
fn crlf_header_is_normalised() {
    let output = convert(
        b"ply\r\nformat ascii 1.0\r\nelement v 1\r\nproperty int i\r\nend_header\r\n4\r\n",
        OutputFormat::Same,
    );
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "ply\nformat ascii 1.0\nelement v 1\nproperty int i\nend_header\n4\n"
    );
}

#[test]
fn header_only_file() {
    let input = b"ply\nformat binary_little_endian 1.0\ncomment nothing here\nend_header\n";
    let output = convert(input, OutputFormat::Same);
    assert_eq!(output, input);
}

// ── Data section ──────────────────────────────────────────────────────────────

#[test]
fn short_binary_data() {
    let mut input = b"ply\nformat binary_little_endian 1.0\nelement vertex 2\nproperty double x\nend_header\n"
        .to_vec();
    input.extend_from_slice(&1.0f64.to_le_bytes());
    input.extend_from_slice(&[0, 0, 0]);
    let result = try_convert(&input);
    assert!(matches!(
        result,
        Err(DriverError::Decode(DecodeError::UnexpectedEof { ref element, record: 1, .. }))
            if element == "vertex"
    ));
}

#[test]
fn ascii_value_out_of_range() {
    let result = try_convert(b"ply\nformat ascii 1.0\nelement v 1\nproperty uchar c\nend_header\n256\n");
    assert!(matches!(
        result,
        Err(DriverError::Decode(DecodeError::InvalidValue { line: 6, .. }))
    ));
}

#[test]
fn ascii_trailing_values() {
    let result = try_convert(b"ply\nformat ascii 1.0\nelement v 1\nproperty int i\nend_header\n1 2\n");
    assert!(matches!(
        result,
        Err(DriverError::Decode(DecodeError::TrailingTokens { line: 6, .. }))
    ));
}

#[test]
fn trailing_bytes_after_data_are_ignored() {
    let output = convert(
        b"ply\nformat ascii 1.0\nelement v 1\nproperty int i\nend_header\n1\n\n\n",
        OutputFormat::Same,
    );
    assert!(String::from_utf8(output).unwrap().ends_with("end_header\n1\n"));
}

#[test]
fn negative_list_length_is_rejected() {
    let result = try_convert(
        b"ply\nformat ascii 1.0\nelement f 1\nproperty list uchar int idx\nend_header\n-1 2\n",
    );
    assert!(result.is_err());
}

// ── Filtering ─────────────────────────────────────────────────────────────────

#[test]
fn coordinates_in_any_order() {
    let input = b"ply\nformat ascii 1.0\nelement vertex 2\nproperty float z\n\
        property uchar tag\nproperty float x\nproperty float y\nend_header\n\
        0.5 1 0.5 0.5\n3 2 0.5 0.5\n";
    let output = clean(&golden("cube.ply"), input, TranscodeConfig::default());
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("element vertex 1\n"));
    assert!(text.ends_with("end_header\n0.5 1 0.5 0.5\n"));
}

#[test]
fn empty_vertex_element() {
    let input = b"ply\nformat ascii 1.0\nelement vertex 0\nproperty float x\n\
        property float y\nproperty float z\nend_header\n";
    let output = clean(&golden("cube.ply"), input, TranscodeConfig::default());
    assert_eq!(output, input);
}

#[test]
fn input_without_vertices_passes_through() {
    let input = b"ply\nformat ascii 1.0\nelement edge 1\nproperty int a\nend_header\n9\n";
    let output = clean(&golden("cube.ply"), input, TranscodeConfig::default());
    assert_eq!(output, input);
}

#[test]
fn sentinel_in_binary_output() {
    let config = TranscodeConfig {
        output: OutputFormat::BinaryLittleEndian,
        filter: FilterMode::Sentinel,
        sentinel: "XX".to_string(),
        ..TranscodeConfig::default()
    };
    let input = b"ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\n\
        property float y\nproperty float z\nend_header\n9 9 9\n0.5 0.5 0.5\n";
    let output = clean(&golden("cube.ply"), input, config);

    let mut expected_data = b"XX\n".to_vec();
    for _ in 0..3 {
        expected_data.extend_from_slice(&0.5f32.to_le_bytes());
    }
    assert!(output.ends_with(&expected_data));
    assert!(String::from_utf8_lossy(&output).contains("element vertex 2\n"));
}

#[test]
fn drop_mode_in_binary_output() {
    let config = TranscodeConfig {
        output: OutputFormat::BinaryBigEndian,
        ..TranscodeConfig::default()
    };
    let output = clean(&golden("cube.ply"), &golden("points.ply"), config);
    let back = convert(&output, OutputFormat::Ascii);
    let text = String::from_utf8(back).unwrap();
    assert!(text.contains("element vertex 3\n"));
    assert!(text.ends_with("0.9 0.9 0.9 50\n3 0 1 4\n"));
}

// ── Boundary ──────────────────────────────────────────────────────────────────

#[test]
fn boundary_index_out_of_range() {
    let input = format!("{TETRA_HEADER}3 0 1 2\n3 0 1 3\n3 0 2 3\n3 1 2 4\n");
    assert!(matches!(
        try_boundary(&input),
        Err(DriverError::FaceIndexOutOfRange {
            face: 3,
            index: 4,
            vertex_count: 4
        })
    ));
}

#[test]
fn boundary_negative_index() {
    let input = format!("{TETRA_HEADER}3 0 1 2\n3 0 -1 3\n3 0 2 3\n3 1 2 3\n");
    assert!(matches!(
        try_boundary(&input),
        Err(DriverError::InvalidFaceIndex { face: 1, .. })
    ));
}

#[test]
fn boundary_degenerate_face() {
    let input = format!("{TETRA_HEADER}2 0 1\n3 0 1 3\n3 0 2 3\n3 1 2 3\n");
    assert!(matches!(
        try_boundary(&input),
        Err(DriverError::DegenerateFace { face: 0, arity: 2 })
    ));
}

#[test]
fn boundary_tetrahedron_loads() {
    let input = format!("{TETRA_HEADER}3 0 1 2\n3 0 1 3\n3 0 2 3\n3 1 2 3\n");
    assert_eq!(try_boundary(&input).unwrap(), 4);
}

#[test]
fn boundary_without_triangles() {
    let input = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nproperty float y\n\
        property float z\nelement face 0\nproperty list uchar int vertex_indices\nend_header\n0 0 0\n";
    assert!(matches!(try_boundary(input), Err(DriverError::EmptyBoundary)));
}

#[test]
fn boundary_without_vertex_element() {
    let input = "ply\nformat ascii 1.0\nelement face 0\nproperty list uchar int vertex_indices\nend_header\n";
    assert!(matches!(
        try_boundary(input),
        Err(DriverError::MissingElement {
            element: "vertex",
            ..
        })
    ));
}

//! Round-trip tests: every encoding path must preserve every value.

use pcc_decoder::PlyReader;
use pcc_driver::OutputFormat;
use pcc_tests::{convert, golden};
use pcc_types::HeaderLine;
use pcc_wire::{Encoding, ListKind, ScalarKind};

/// Bytes after `end_header\n`.
fn data_section(bytes: &[u8]) -> &[u8] {
    let at = bytes
        .windows(11)
        .position(|w| w == b"end_header\n")
        .unwrap();
    &bytes[at + 11..]
}

fn header_lines(input: &[u8]) -> Vec<String> {
    let mut reader = PlyReader::new(input);
    let mut lines = Vec::new();
    while let Some(line) = reader.next_header_line().unwrap() {
        lines.push(line.to_string());
    }
    lines
}

/// A little-endian file holding the extremes of every scalar kind, a
/// negative zero, two NaN payloads and a list of extreme indices.
fn extremes_le() -> Vec<u8> {
    let mut bytes = b"ply\nformat binary_little_endian 1.0\nelement v 2\n\
        property char a\nproperty uchar b\nproperty short c\nproperty ushort d\n\
        property int e\nproperty uint f\nproperty float g\nproperty double h\n\
        property list uchar int idx\nend_header\n"
        .to_vec();

    bytes.extend_from_slice(&i8::MIN.to_le_bytes());
    bytes.extend_from_slice(&u8::MIN.to_le_bytes());
    bytes.extend_from_slice(&i16::MIN.to_le_bytes());
    bytes.extend_from_slice(&u16::MIN.to_le_bytes());
    bytes.extend_from_slice(&i32::MIN.to_le_bytes());
    bytes.extend_from_slice(&u32::MIN.to_le_bytes());
    bytes.extend_from_slice(&(-0.0f32).to_le_bytes());
    bytes.extend_from_slice(&0.1f64.to_le_bytes());
    bytes.push(2);
    bytes.extend_from_slice(&i32::MIN.to_le_bytes());
    bytes.extend_from_slice(&i32::MAX.to_le_bytes());

    bytes.extend_from_slice(&i8::MAX.to_le_bytes());
    bytes.extend_from_slice(&u8::MAX.to_le_bytes());
    bytes.extend_from_slice(&i16::MAX.to_le_bytes());
    bytes.extend_from_slice(&u16::MAX.to_le_bytes());
    bytes.extend_from_slice(&i32::MAX.to_le_bytes());
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(&f32::from_bits(0x7fc0_1234).to_le_bytes());
    bytes.extend_from_slice(&f64::from_bits(0xfff8_0000_0000_0001).to_le_bytes());
    bytes.push(0);
    bytes
}

#[test]
fn le_to_le_is_byte_identical() {
    let original = extremes_le();
    assert_eq!(convert(&original, OutputFormat::Same), original);
    assert_eq!(convert(&original, OutputFormat::BinaryLittleEndian), original);
}

#[test]
fn le_be_le_returns_original_bytes() {
    let original = extremes_le();
    let big = convert(&original, OutputFormat::BinaryBigEndian);
    assert_eq!(data_section(&big).len(), data_section(&original).len());
    assert_ne!(data_section(&big), data_section(&original));

    let back = convert(&big, OutputFormat::BinaryLittleEndian);
    assert_eq!(back, original);
}

#[test]
fn extremes_print_exactly_in_ascii() {
    let text = String::from_utf8(convert(&extremes_le(), OutputFormat::Ascii)).unwrap();
    let data = text.split_once("end_header\n").unwrap().1;
    assert_eq!(
        data,
        "-128 0 -32768 0 -2147483648 0 -0 0.1 2 -2147483648 2147483647\n\
         127 255 32767 65535 2147483647 4294967295 NaN NaN 0\n"
    );
}

#[test]
fn ascii_through_both_byte_orders() {
    let original = golden("points.ply");
    let big = convert(&original, OutputFormat::BinaryBigEndian);
    let little = convert(&big, OutputFormat::BinaryLittleEndian);
    let back = convert(&little, OutputFormat::Ascii);
    assert_eq!(String::from_utf8(back).unwrap(), String::from_utf8(original).unwrap());
}

#[test]
fn byte_orders_mirror_each_other() {
    let input = b"ply\nformat ascii 1.0\nelement v 1\nproperty float a\nproperty ushort b\nend_header\n0.5 258\n";
    let big = convert(input, OutputFormat::BinaryBigEndian);
    let little = convert(input, OutputFormat::BinaryLittleEndian);

    let mut expected_big = 0.5f32.to_be_bytes().to_vec();
    expected_big.extend_from_slice(&258u16.to_be_bytes());
    let mut expected_little = 0.5f32.to_le_bytes().to_vec();
    expected_little.extend_from_slice(&258u16.to_le_bytes());
    assert_eq!(data_section(&big), expected_big);
    assert_eq!(data_section(&little), expected_little);
}

#[test]
fn host_binary_resolves_to_native_order() {
    let output = convert(&golden("cube.ply"), OutputFormat::Binary);
    let lines = header_lines(&output);
    assert_eq!(lines[1], format!("format {} 1.0", Encoding::native_binary()));
}

#[test]
fn every_scalar_kind_survives_binary() {
    for kind in ScalarKind::ALL {
        let input = format!(
            "ply\nformat ascii 1.0\nelement v 2\nproperty {} p\nend_header\n7\n100\n",
            kind.name()
        );
        for format in [OutputFormat::BinaryBigEndian, OutputFormat::BinaryLittleEndian] {
            let binary = convert(input.as_bytes(), format);
            assert_eq!(data_section(&binary).len(), 2 * kind.width(), "{kind} as {format}");
            let back = convert(&binary, OutputFormat::Ascii);
            let text = String::from_utf8(back).unwrap();
            assert!(text.ends_with("end_header\n7\n100\n"), "{kind} as {format}: {text}");
        }
    }
}

#[test]
fn every_list_kind_survives_binary() {
    let kinds: Vec<ListKind> = ListKind::all().collect();
    assert_eq!(kinds.len(), 24);
    for kind in kinds {
        let input = format!(
            "ply\nformat ascii 1.0\nelement f 2\nproperty list {} {} idx\nend_header\n3 1 2 3\n0\n",
            kind.size().name(),
            kind.element().name()
        );
        let binary = convert(input.as_bytes(), OutputFormat::BinaryLittleEndian);
        let back = convert(&binary, OutputFormat::Ascii);
        let text = String::from_utf8(back).unwrap();
        assert!(text.ends_with("end_header\n3 1 2 3\n0\n"), "{kind}: {text}");
    }
}

#[test]
fn header_keeps_comments_and_uses_legacy_names() {
    let input = b"ply\nformat ascii 1.0\ncomment first\nelement vertex 1\nobj_info  spaced   out\n\
        property float32 x\nproperty uint8 tag\ncomment last\nend_header\n1 2\n";
    let output = convert(input, OutputFormat::BinaryBigEndian);
    assert_eq!(
        header_lines(&output),
        [
            "ply",
            "format binary_big_endian 1.0",
            "comment first",
            "element vertex 1",
            "obj_info  spaced   out",
            "property float x",
            "property uchar tag",
            "comment last",
            "end_header",
        ]
    );
}

#[test]
fn ascii_tokens_are_copied_verbatim() {
    let input = b"ply\nformat ascii 1.0\nelement v 1\nproperty double d\nproperty int i\nend_header\n1.000  +7\n";
    let output = convert(input, OutputFormat::Ascii);
    assert!(String::from_utf8(output).unwrap().ends_with("end_header\n1.000 +7\n"));
}

#[test]
fn binary_to_ascii_uses_shortest_form() {
    let input = b"ply\nformat ascii 1.0\nelement v 1\nproperty double d\nproperty int i\nend_header\n1.000  +7\n";
    let binary = convert(input, OutputFormat::BinaryLittleEndian);
    let output = convert(&binary, OutputFormat::Ascii);
    assert!(String::from_utf8(output).unwrap().ends_with("end_header\n1 7\n"));
}

#[test]
fn header_line_display_parses_back() {
    for line in [
        "ply",
        "format binary_little_endian 1.0",
        "element vertex 12",
        "property list uint int vertex_indices",
        "comment anything at all",
        "end_header",
    ] {
        let parsed = HeaderLine::parse(line).unwrap();
        assert_eq!(parsed.to_string(), line);
    }
}

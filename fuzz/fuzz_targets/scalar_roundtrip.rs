#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pcc_wire::{ByteOrder, ScalarKind};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    kind_id: u8,
    big_endian: bool,
    bytes: [u8; 8],
}

// Fuzz target: decode then encode one binary scalar.
//
// Every bit pattern of every kind, NaN payloads included, must come back
// unchanged in the same byte order.
fuzz_target!(|input: FuzzInput| {
    let kind = ScalarKind::ALL[usize::from(input.kind_id) % ScalarKind::ALL.len()];
    let order = if input.big_endian { ByteOrder::Big } else { ByteOrder::Little };
    let codec = kind.codec();

    let value = codec.decode(&input.bytes, order).unwrap();
    let mut out = [0u8; 8];
    let written = codec.encode(value, order, &mut out).unwrap();
    assert_eq!(written, codec.width());
    assert_eq!(out[..written], input.bytes[..written]);
});

use pcc_decoder::DecodeError;
use pcc_encoder::EncodeError;

/// Errors that abort a transcoding pass.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ Variant              │ Cause                                        │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ Decode               │ Malformed header or data section             │
/// │ Encode               │ Output could not be written                  │
/// │ MissingElement       │ Boundary has no vertex or face element       │
/// │ MissingCoordinate    │ Vertex element lacks x, y or z               │
/// │ InvalidListLength    │ List count prefix is not a usable length     │
/// │ NonTriangularFace    │ Boundary face with arity ≠ 3 (Reject policy) │
/// │ DegenerateFace       │ Boundary face with fewer than 3 indices      │
/// │ InvalidFaceIndex     │ Negative, fractional or oversized index      │
/// │ FaceIndexOutOfRange  │ Index ≥ boundary vertex count                │
/// │ EmptyBoundary        │ Boundary has no triangles                    │
/// │ UnknownOutputFormat  │ Unrecognised output format name              │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("{input}: no {element:?} element")]
    MissingElement {
        input: String,
        element: &'static str,
    },

    #[error("{input}: vertex element has no {axis:?} property")]
    MissingCoordinate { input: String, axis: &'static str },

    #[error("{element} record {record}: list length {value} is not a valid count")]
    InvalidListLength {
        element: String,
        record: u64,
        value: String,
    },

    #[error("boundary face {face} has {arity} vertices, expected 3")]
    NonTriangularFace { face: u64, arity: u64 },

    #[error("boundary face {face} has only {arity} vertices")]
    DegenerateFace { face: u64, arity: u64 },

    #[error("boundary face {face}: {value} is not a vertex index")]
    InvalidFaceIndex { face: u64, value: String },

    #[error("boundary face {face} refers to vertex {index}, but only {vertex_count} were loaded")]
    FaceIndexOutOfRange {
        face: u64,
        index: u32,
        vertex_count: usize,
    },

    #[error("boundary has no triangles")]
    EmptyBoundary,

    #[error("unknown output format {name:?}")]
    UnknownOutputFormat { name: String },
}

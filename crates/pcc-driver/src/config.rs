use std::fmt;
use std::str::FromStr;

use pcc_wire::Encoding;

use crate::error::DriverError;

/// Default token written in place of a rejected vertex in
/// [`FilterMode::Sentinel`].
pub const DEFAULT_SENTINEL: &str = "DEL";

/// Configuration for one transcoding session.
///
/// ```text
/// ┌───────────────┬──────────────────────────────────────────────────────┐
/// │ Field         │ Purpose                                              │
/// ├───────────────┼──────────────────────────────────────────────────────┤
/// │ output        │ Data encoding of the written stream                  │
/// │ filter        │ How rejected vertices are removed (drop / sentinel)  │
/// │ sentinel      │ Token written for a rejected vertex in sentinel mode │
/// │ face_arity    │ What to do with non-triangular boundary faces        │
/// │ input_name    │ Name of the main input in diagnostics                │
/// │ boundary_name │ Name of the boundary input in diagnostics            │
/// └───────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscodeConfig {
    pub output: OutputFormat,
    pub filter: FilterMode,
    pub sentinel: String,
    pub face_arity: FaceArity,
    pub input_name: String,
    pub boundary_name: String,
}

impl Default for TranscodeConfig {
    /// Keep the input encoding, drop rejected vertices, reject
    /// non-triangular boundary faces.
    fn default() -> Self {
        Self {
            output: OutputFormat::Same,
            filter: FilterMode::Drop,
            sentinel: DEFAULT_SENTINEL.to_string(),
            face_arity: FaceArity::Reject,
            input_name: String::from("-"),
            boundary_name: String::from("-"),
        }
    }
}

/// Requested output encoding.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────┐
/// │ Variant              │ Resolves to                              │
/// ├──────────────────────┼──────────────────────────────────────────┤
/// │ Same                 │ the input's own encoding                 │
/// │ Ascii                │ ascii                                    │
/// │ Binary               │ binary in host byte order                │
/// │ BinaryBigEndian      │ binary_big_endian                        │
/// │ BinaryLittleEndian   │ binary_little_endian                     │
/// └──────────────────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Same,
    Ascii,
    Binary,
    BinaryBigEndian,
    BinaryLittleEndian,
}

impl OutputFormat {
    /// Resolve against the encoding the input declares.
    #[must_use]
    pub fn resolve(self, input: Encoding) -> Encoding {
        match self {
            Self::Same => input,
            Self::Ascii => Encoding::Ascii,
            Self::Binary => Encoding::native_binary(),
            Self::BinaryBigEndian => Encoding::BinaryBigEndian,
            Self::BinaryLittleEndian => Encoding::BinaryLittleEndian,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::Ascii => "ascii",
            Self::Binary => "binary",
            Self::BinaryBigEndian => "binary_big_endian",
            Self::BinaryLittleEndian => "binary_little_endian",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "same" => Ok(Self::Same),
            "ascii" => Ok(Self::Ascii),
            "binary" => Ok(Self::Binary),
            "binary_big_endian" => Ok(Self::BinaryBigEndian),
            "binary_little_endian" => Ok(Self::BinaryLittleEndian),
            other => Err(DriverError::UnknownOutputFormat {
                name: other.to_string(),
            }),
        }
    }
}

/// How vertices outside the boundary are removed from the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Leave rejected records out and correct the vertex count in the
    /// header. The output is a valid PLY file.
    #[default]
    Drop,
    /// Write the sentinel token in place of each rejected record and keep
    /// the declared count. The output needs a line-oriented cleanup pass
    /// before it is valid again.
    Sentinel,
}

/// What the boundary pass does with a face whose index list does not
/// have exactly three entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaceArity {
    /// Fail with [`DriverError::NonTriangularFace`].
    #[default]
    Reject,
    /// Split polygons into a fan of triangles around their first vertex.
    Triangulate,
}

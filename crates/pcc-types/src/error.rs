use pcc_wire::WireError;

/// Errors raised while parsing or sequencing PLY header lines.
///
/// Line numbers and input names are attached one layer up, by the
/// decoder, which knows where the line came from.
///
/// # Error hierarchy
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ HeaderError (this crate)                                 │
/// │   ├── line grammar: InvalidMagic, UnknownKeyword,        │
/// │   │   MalformedLine, InvalidCount, UnsupportedVersion     │
/// │   ├── line order: PropertyWithoutElement, MissingFormat, │
/// │   │   DuplicateFormat, UnexpectedLine                    │
/// │   └── wraps WireError for bad type or format names       │
/// └──────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The first line was not `ply`.
  #[error("invalid magic line {found:?}, expected \"ply\"")]
  InvalidMagic { found: String },

  /// A line started with a keyword the grammar does not know.
  #[error("unknown header keyword {keyword:?}")]
  UnknownKeyword { keyword: String },

  /// A line was blank.
  #[error("empty header line")]
  EmptyLine,

  /// A known keyword had the wrong number of fields.
  #[error("malformed {keyword} line, expected `{expected}`")]
  MalformedLine {
    keyword: &'static str,
    expected: &'static str,
  },

  /// An element count was not a non-negative integer.
  #[error("invalid element count {token:?}")]
  InvalidCount { token: String },

  /// The format version was not `1.0`.
  #[error("unsupported format version {version:?}")]
  UnsupportedVersion { version: String },

  /// A `property` line appeared before any `element` line.
  #[error("property {name:?} declared before any element")]
  PropertyWithoutElement { name: String },

  /// An element, property or `end_header` line appeared before `format`.
  #[error("{keyword} line before format line")]
  MissingFormat { keyword: &'static str },

  /// A second `format` line appeared.
  #[error("duplicate format line")]
  DuplicateFormat,

  /// The magic line appeared somewhere other than the first line.
  #[error("unexpected {keyword} line")]
  UnexpectedLine { keyword: &'static str },

  /// A type or format name was not recognised.
  #[error(transparent)]
  Wire(#[from] WireError),
}

use pcc_types::HeaderError;
use pcc_wire::WireError;

/// Errors that can occur while reading a PLY stream.
///
/// Header errors carry the input name and 1-based line number so they
/// can be reported as `name:line: message`. Data-section errors carry
/// a line number (ASCII) or byte offset (binary).
///
/// ```text
///   DecodeError
///   ├── Header            ← grammar or ordering error on a header line
///   ├── HeaderEof         ← input ended before end_header
///   ├── InvalidUtf8       ← header or ASCII record line is not text
///   ├── UnexpectedEof     ← data section shorter than declared
///   ├── MissingToken      ← ASCII record line has too few values
///   ├── TrailingTokens    ← ASCII record line has too many values
///   ├── InvalidValue      ← ASCII token does not parse as its kind
///   ├── Wire(WireError)   ← from pcc-wire value decoding
///   └── Io(io::Error)     ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The header error is part of the message and is not a `source()`.
    #[error("{input}:{line}: {error}")]
    Header {
        input: String,
        line: usize,
        error: HeaderError,
    },

    #[error("{input}:{line}: input ended inside the header")]
    HeaderEof { input: String, line: usize },

    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("unexpected end of data in {element} record {record} (byte offset {offset})")]
    UnexpectedEof {
        element: String,
        record: u64,
        offset: u64,
    },

    #[error("line {line}: record has fewer values than declared")]
    MissingToken { line: usize },

    #[error("line {line}: record has unexpected trailing values {rest:?}")]
    TrailingTokens { line: usize, rest: String },

    #[error("line {line}: {error}")]
    InvalidValue { line: usize, error: WireError },

    /// A value was read before the header was complete.
    #[error("data read before end_header")]
    HeaderIncomplete,

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

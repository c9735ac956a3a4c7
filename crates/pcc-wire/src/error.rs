use crate::scalar::ScalarKind;

/// Errors raised while encoding or decoding individual PLY values.
///
/// These sit below the header and record layers: they know about byte
/// widths, type names and token text, but nothing about elements or
/// line numbers. The decoder wraps them with that context.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A byte buffer was shorter than the value being read or written.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// An ASCII token could not be parsed as the declared kind.
    #[error("invalid {kind} token {token:?}")]
    InvalidToken { token: String, kind: ScalarKind },

    /// A header named a scalar type that does not exist.
    #[error("unknown scalar type {name:?}")]
    UnknownScalarKind { name: String },

    /// A list declared a size type other than uint8/uint16/uint32.
    #[error("list size type must be an unsigned integer, got {kind}")]
    InvalidListSizeKind { kind: ScalarKind },

    /// A `format` line named an encoding that does not exist.
    #[error("unknown format {name:?}")]
    UnknownEncoding { name: String },

    /// A value was handed to the codec of a different kind.
    #[error("expected a {expected} value, got {found}")]
    KindMismatch {
        expected: ScalarKind,
        found: ScalarKind,
    },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

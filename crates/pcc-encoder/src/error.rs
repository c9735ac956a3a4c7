use pcc_wire::WireError;

/// Errors that can occur while writing a PLY stream.
///
/// ```text
///   EncodeError
///   ├── NotDeferred         ← count correction requested on a streaming header
///   ├── UnknownElement      ← count correction for an element never declared
///   ├── Wire(WireError)     ← from pcc-wire value encoding
///   └── Io(std::io::Error)  ← from the underlying writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("header has already been written, element counts can no longer change")]
    NotDeferred,

    #[error("no element {name:?} in the output header")]
    UnknownElement { name: String },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

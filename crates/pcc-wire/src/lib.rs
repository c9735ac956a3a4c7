#![warn(clippy::pedantic)]

pub mod encoding;
pub mod error;
pub mod list;
pub mod scalar;

pub use encoding::{ByteOrder, Encoding, HOST_BYTE_ORDER};
pub use error::WireError;
pub use list::{ListCodec, ListKind};
pub use scalar::{Scalar, ScalarCodec, ScalarKind};

#![warn(clippy::pedantic)]

pub mod element;
pub mod error;
pub mod header;
pub mod header_line;

pub use element::{ElementDeclaration, PropertyDeclaration, PropertyKind};
pub use error::HeaderError;
pub use header::{Header, HeaderBuilder, HeaderState};
pub use header_line::{HeaderLine, SUPPORTED_VERSION};

#![warn(clippy::pedantic)]

pub mod error;
pub mod writer;

mod record;

pub use error::EncodeError;
pub use writer::PlyWriter;

#![warn(clippy::pedantic)]

pub mod error;
pub mod reader;

mod ascii;

pub use error::DecodeError;
pub use reader::{PlyReader, Value};

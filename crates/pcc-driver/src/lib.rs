#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod filter;
pub mod inspect;
pub mod mesh;
pub mod oracle;
pub mod transcoder;

mod binding;
mod codec;

pub use config::{FaceArity, FilterMode, OutputFormat, TranscodeConfig};
pub use error::DriverError;
pub use filter::{ContainmentFilter, Verdict};
pub use inspect::inspect;
pub use mesh::{BoundaryShape, MeshAccumulator};
pub use oracle::{ContainmentOracle, RayCastOracle};
pub use transcoder::{ElementReport, TranscodeReport, Transcoder};

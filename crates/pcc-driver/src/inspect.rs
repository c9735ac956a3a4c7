use std::io::BufRead;

use pcc_decoder::PlyReader;
use pcc_types::Header;

use crate::error::DriverError;

/// Read only the header of `input`. The data section is left unread.
///
/// # Errors
///
/// Returns [`DriverError::Decode`] if the header is malformed or
/// truncated.
pub fn inspect<R: BufRead>(input: R, input_name: &str) -> Result<Header, DriverError> {
    let mut reader = PlyReader::new(input).with_input_name(input_name);
    let header = reader.read_header()?;
    tracing::debug!(input = input_name, elements = header.elements.len(), "header inspected");
    Ok(header.clone())
}

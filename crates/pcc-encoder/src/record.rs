use std::io::Write as _;

use pcc_wire::{ByteOrder, Scalar, WireError};

/// Staging buffer for one output record.
///
/// Values are encoded into the buffer as they arrive; the writer then
/// commits the whole record or drops it. Layout per encoding:
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────┐
/// │ ascii   │ v0 ␠ v1 ␠ ... ␠ vn ⏎                         │
/// │ binary  │ [v0 bytes][v1 bytes]...[vn bytes]            │
/// └─────────┴──────────────────────────────────────────────┘
/// ```
pub(crate) struct RecordBuffer {
    buf: Vec<u8>,
    /// Output byte order, `None` for ASCII.
    order: Option<ByteOrder>,
    /// No value written since the record started.
    at_start: bool,
}

impl RecordBuffer {
    pub(crate) fn new(order: Option<ByteOrder>) -> Self {
        Self {
            buf: Vec::with_capacity(64),
            order,
            at_start: true,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
        self.at_start = true;
    }

    /// Append one value.
    ///
    /// ASCII output uses `token` verbatim when given, otherwise the
    /// value's `Display` form. Binary output ignores `token`.
    pub(crate) fn push(&mut self, value: Scalar, token: Option<&str>) -> Result<(), WireError> {
        match self.order {
            Some(order) => {
                let codec = value.kind().codec();
                let start = self.buf.len();
                self.buf.resize(start + codec.width(), 0);
                codec.encode(value, order, &mut self.buf[start..])?;
            }
            None => {
                if !self.at_start {
                    self.buf.push(b' ');
                }
                match token {
                    Some(token) => self.buf.extend_from_slice(token.as_bytes()),
                    None => write!(self.buf, "{value}")?,
                }
            }
        }
        self.at_start = false;
        Ok(())
    }

    /// Close the record. ASCII records end with a newline.
    pub(crate) fn terminate(&mut self) {
        if self.order.is_none() {
            self.buf.push(b'\n');
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

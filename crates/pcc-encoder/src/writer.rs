use std::io::Write;

use pcc_types::HeaderLine;
use pcc_wire::{Encoding, Scalar};

use crate::error::EncodeError;
use crate::record::RecordBuffer;

/// Output held back until the header is final.
struct Deferred {
    lines: Vec<HeaderLine>,
    data: Vec<u8>,
}

/// Streaming PLY writer.
///
/// Header lines are written as they are handed over. Records are staged
/// one at a time and either committed with [`end_record`](Self::end_record),
/// dropped with [`discard_record`](Self::discard_record), or replaced by
/// a sentinel with [`write_sentinel`](Self::write_sentinel).
///
/// When an element count in the header depends on data not yet seen,
/// call [`defer`](Self::defer) before writing the header. Everything
/// written afterwards is held in memory until [`release`](Self::release),
/// and [`set_element_count`](Self::set_element_count) may rewrite counts
/// in the meantime:
///
/// ```text
///   defer() ─▶ header lines, records ─▶ set_element_count() ─▶ release()
///              (kept in memory)                                 (written)
/// ```
pub struct PlyWriter<W> {
    sink: W,
    encoding: Encoding,
    record: RecordBuffer,
    deferred: Option<Deferred>,
    bytes_written: u64,
}

impl<W: Write> PlyWriter<W> {
    /// Create a writer whose data section uses `encoding`.
    ///
    /// The `format` header line is written by the caller like any other
    /// line; it should name the same encoding.
    pub fn new(sink: W, encoding: Encoding) -> Self {
        Self {
            sink,
            encoding,
            record: RecordBuffer::new(encoding.byte_order()),
            deferred: None,
            bytes_written: 0,
        }
    }

    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Bytes handed to the sink so far. Deferred output is not counted
    /// until it is released.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Hold back all further output in memory.
    pub fn defer(&mut self) {
        if self.deferred.is_none() {
            self.deferred = Some(Deferred {
                lines: Vec::new(),
                data: Vec::new(),
            });
        }
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Write one header line followed by `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] if the sink fails.
    pub fn write_header_line(&mut self, line: &HeaderLine) -> Result<(), EncodeError> {
        if let Some(deferred) = &mut self.deferred {
            deferred.lines.push(line.clone());
            return Ok(());
        }
        let text = format!("{line}\n");
        self.emit(text.as_bytes())
    }

    /// Change the count of `element` in a deferred header.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::NotDeferred`] if the header has already been written.
    /// - [`EncodeError::UnknownElement`] if no such element was declared.
    pub fn set_element_count(&mut self, element: &str, count: u64) -> Result<(), EncodeError> {
        let deferred = self.deferred.as_mut().ok_or(EncodeError::NotDeferred)?;
        let slot = deferred.lines.iter_mut().find_map(|line| match line {
            HeaderLine::Element { name, count: slot } if name.as_str() == element => Some(slot),
            _ => None,
        });
        match slot {
            Some(slot) => {
                *slot = count;
                Ok(())
            }
            None => Err(EncodeError::UnknownElement {
                name: element.to_string(),
            }),
        }
    }

    /// Write out everything held back by [`defer`](Self::defer) and
    /// resume streaming. Does nothing if output is not deferred.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] if the sink fails.
    pub fn release(&mut self) -> Result<(), EncodeError> {
        let Some(deferred) = self.deferred.take() else {
            return Ok(());
        };
        let mut header = String::new();
        for line in &deferred.lines {
            header.push_str(&line.to_string());
            header.push('\n');
        }
        self.emit(header.as_bytes())?;
        self.emit(&deferred.data)?;
        tracing::trace!(
            header_lines = deferred.lines.len(),
            data_bytes = deferred.data.len(),
            "released deferred output"
        );
        Ok(())
    }

    /// Start a new record.
    pub fn begin_record(&mut self) {
        self.record.clear();
    }

    /// Append one value to the current record.
    ///
    /// For ASCII output `token`, when given, is written verbatim instead
    /// of the value's formatted form.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Wire`] if the value cannot be encoded.
    pub fn write_scalar(&mut self, value: Scalar, token: Option<&str>) -> Result<(), EncodeError> {
        self.record.push(value, token)?;
        Ok(())
    }

    /// Commit the current record.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] if the sink fails.
    pub fn end_record(&mut self) -> Result<(), EncodeError> {
        self.record.terminate();
        let Self {
            record,
            deferred,
            sink,
            bytes_written,
            ..
        } = self;
        emit_to(sink, deferred, bytes_written, record.as_bytes())?;
        record.clear();
        Ok(())
    }

    /// Drop the current record without writing it.
    pub fn discard_record(&mut self) {
        self.record.clear();
    }

    /// Replace the current record with `token` followed by `\n`.
    ///
    /// The token is written as raw bytes for binary output too.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] if the sink fails.
    pub fn write_sentinel(&mut self, token: &str) -> Result<(), EncodeError> {
        self.record.clear();
        let mut line = Vec::with_capacity(token.len() + 1);
        line.extend_from_slice(token.as_bytes());
        line.push(b'\n');
        self.emit(&line)
    }

    /// Release any deferred output, flush, and hand back the sink.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] if the sink fails.
    pub fn finish(mut self) -> Result<W, EncodeError> {
        self.release()?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        emit_to(&mut self.sink, &mut self.deferred, &mut self.bytes_written, bytes)
    }
}

fn emit_to<W: Write>(
    sink: &mut W,
    deferred: &mut Option<Deferred>,
    bytes_written: &mut u64,
    bytes: &[u8],
) -> Result<(), EncodeError> {
    match deferred {
        Some(deferred) => deferred.data.extend_from_slice(bytes),
        None => {
            sink.write_all(bytes)?;
            *bytes_written += bytes.len() as u64;
        }
    }
    Ok(())
}

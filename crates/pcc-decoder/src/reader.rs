use std::io::{BufRead, ErrorKind};

use pcc_types::{Header, HeaderBuilder, HeaderError, HeaderLine, HeaderState};
use pcc_wire::{ByteOrder, Scalar, ScalarCodec};

use crate::ascii::{AsciiRecord, strip_terminator};
use crate::error::DecodeError;

/// One decoded data-section value.
///
/// For ASCII input `token` is the exact text the value was parsed from,
/// so an ASCII writer can re-emit it unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Value<'a> {
    pub scalar: Scalar,
    pub token: Option<&'a str>,
}

/// Streaming PLY reader.
///
/// Reading happens in two phases that mirror the file layout:
///
/// ```text
///   header phase                       data phase
///   ─────────────────────────────      ─────────────────────────────────
///   next_header_line() → Some(line)    begin_record(element, index)
///   next_header_line() → Some(line)      read_scalar(codec)   (per value)
///   ...                                  read_scalar(codec)
///   next_header_line() → Some(end)     end_record()
///   next_header_line() → None          ...
///                                      finish()
/// ```
///
/// The header phase hands back each line as soon as it has been parsed
/// and accepted by the [`HeaderBuilder`], so a caller can re-emit lines
/// while reading. The data phase never buffers more than one ASCII line
/// or one binary value.
///
/// Header diagnostics are logged through `tracing` as
/// `name:line: message` and returned as [`DecodeError::Header`].
pub struct PlyReader<R> {
    reader: R,
    input: String,
    /// 1-based number of the last line consumed (header and ASCII data).
    line: usize,
    /// Bytes consumed from the start of the input.
    offset: u64,
    builder: HeaderBuilder,
    header: Option<Header>,
    /// Byte order of a binary data section, `None` for ASCII.
    order: Option<ByteOrder>,
    record: AsciiRecord,
    raw: Vec<u8>,
    scratch: [u8; 8],
    /// Element index and record index of the record being read.
    position: (usize, u64),
}

impl<R: BufRead> PlyReader<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            input: String::from("-"),
            line: 0,
            offset: 0,
            builder: HeaderBuilder::new(),
            header: None,
            order: None,
            record: AsciiRecord::default(),
            raw: Vec::with_capacity(256),
            scratch: [0; 8],
            position: (0, 0),
        }
    }

    /// Name used for this input in diagnostics. Defaults to `-`.
    #[must_use]
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input = name.into();
        self
    }

    /// 1-based number of the last line read.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The parsed header, once `end_header` has been read.
    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Read, parse and sequence the next header line.
    ///
    /// Returns `Ok(None)` once the header is complete.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Header`] for grammar and ordering errors. An
    ///   unparsable first line is reported as an invalid magic line.
    /// - [`DecodeError::HeaderEof`] if the input ends before `end_header`.
    /// - [`DecodeError::InvalidUtf8`] if the line is not text.
    pub fn next_header_line(&mut self) -> Result<Option<HeaderLine>, DecodeError> {
        if self.header.is_some() {
            return Ok(None);
        }

        self.raw.clear();
        let read = self.reader.read_until(b'\n', &mut self.raw)?;
        self.line += 1;
        if read == 0 {
            let err = DecodeError::HeaderEof {
                input: self.input.clone(),
                line: self.line,
            };
            tracing::error!(input = %self.input, line = self.line, "{err}");
            return Err(err);
        }
        self.offset += read as u64;
        strip_terminator(&mut self.raw);

        let text = std::str::from_utf8(&self.raw)
            .map_err(|_| DecodeError::InvalidUtf8 { line: self.line })?;
        let result = match HeaderLine::parse(text) {
            Ok(line) => self.builder.push(line.clone()).map(|()| line),
            Err(_) if self.builder.state() == HeaderState::Start => {
                Err(HeaderError::InvalidMagic {
                    found: text.to_string(),
                })
            }
            Err(e) => Err(e),
        };

        let line = match result {
            Ok(line) => line,
            Err(error) => {
                let err = DecodeError::Header {
                    input: self.input.clone(),
                    line: self.line,
                    error,
                };
                tracing::error!(input = %self.input, line = self.line, "{err}");
                return Err(err);
            }
        };

        match &line {
            HeaderLine::Format { encoding, .. } => {
                tracing::debug!(input = %self.input, line = self.line, %encoding, "format");
                self.order = encoding.byte_order();
            }
            HeaderLine::EndHeader => {
                let header = std::mem::take(&mut self.builder).finish();
                if let Some(header) = &header {
                    for element in &header.elements {
                        if element.properties.is_empty() && element.count > 0 {
                            tracing::warn!(
                                "{}:{}: warning: element {} has no properties",
                                self.input,
                                self.line,
                                element.name
                            );
                        }
                    }
                    tracing::debug!(
                        input = %self.input,
                        elements = header.elements.len(),
                        lines = self.line,
                        "header complete"
                    );
                }
                self.header = header;
            }
            _ => {}
        }
        Ok(Some(line))
    }

    /// Read the whole header.
    ///
    /// Lines already consumed with [`next_header_line`](Self::next_header_line)
    /// are not read again.
    ///
    /// # Errors
    ///
    /// Same as [`next_header_line`](Self::next_header_line).
    pub fn read_header(&mut self) -> Result<&Header, DecodeError> {
        while self.next_header_line()?.is_some() {}
        self.header.as_ref().ok_or(DecodeError::HeaderIncomplete)
    }

    /// Start record `record` of the element at index `element`.
    ///
    /// For ASCII input this reads the record's line.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::HeaderIncomplete`] before `end_header`.
    /// - [`DecodeError::UnexpectedEof`] if an ASCII input has no more lines.
    pub fn begin_record(&mut self, element: usize, record: u64) -> Result<(), DecodeError> {
        if self.header.is_none() {
            return Err(DecodeError::HeaderIncomplete);
        }
        self.position = (element, record);
        if self.order.is_none() {
            let line = self.line + 1;
            match self.record.load(&mut self.reader, &mut self.raw, line)? {
                Some(read) => {
                    self.line = line;
                    self.offset += read as u64;
                }
                None => return Err(self.unexpected_eof()),
            }
        }
        Ok(())
    }

    /// Read one value of the codec's kind from the current record.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MissingToken`] if an ASCII line has run out of values.
    /// - [`DecodeError::InvalidValue`] if an ASCII token does not parse.
    /// - [`DecodeError::UnexpectedEof`] if binary input ends mid-value.
    pub fn read_scalar(&mut self, codec: &'static ScalarCodec) -> Result<Value<'_>, DecodeError> {
        let Some(order) = self.order else {
            let line = self.line;
            let token = self
                .record
                .next_token()
                .ok_or(DecodeError::MissingToken { line })?;
            let scalar = codec
                .parse(token)
                .map_err(|error| DecodeError::InvalidValue { line, error })?;
            return Ok(Value {
                scalar,
                token: Some(token),
            });
        };

        let width = codec.width();
        if let Err(e) = self.reader.read_exact(&mut self.scratch[..width]) {
            return Err(match e.kind() {
                ErrorKind::UnexpectedEof => self.unexpected_eof(),
                _ => DecodeError::Io(e),
            });
        }
        self.offset += width as u64;
        let scalar = codec.decode(&self.scratch[..width], order)?;
        Ok(Value {
            scalar,
            token: None,
        })
    }

    /// Finish the current record.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TrailingTokens`] if an ASCII line has more
    /// values than the element declares.
    pub fn end_record(&mut self) -> Result<(), DecodeError> {
        if self.order.is_none() {
            let rest = self.record.rest();
            if !rest.is_empty() {
                return Err(DecodeError::TrailingTokens {
                    line: self.line,
                    rest: rest.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Drain whatever follows the last record, returning its length.
    ///
    /// Trailing bytes are not an error; anything other than blank lines
    /// after an ASCII data section, and any byte after a binary one, is
    /// logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Io`] if the underlying reader fails.
    pub fn finish(&mut self) -> Result<u64, DecodeError> {
        let mut trailing = 0u64;
        let mut significant = false;
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            significant |= self.order.is_some() || buf.iter().any(|b| !b.is_ascii_whitespace());
            let len = buf.len();
            trailing += len as u64;
            self.reader.consume(len);
        }
        if significant {
            tracing::warn!(
                "{}: warning: ignoring {trailing} bytes after the last record",
                self.input
            );
        }
        Ok(trailing)
    }

    fn unexpected_eof(&self) -> DecodeError {
        let (element, record) = self.position;
        let element = self
            .header
            .as_ref()
            .and_then(|h| h.elements.get(element))
            .map_or_else(String::new, |e| e.name.clone());
        DecodeError::UnexpectedEof {
            element,
            record,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcc_types::PropertyKind;
    use pcc_wire::{Encoding, ScalarKind};

    const ASCII: &str = "ply\n\
        format ascii 1.0\n\
        comment two points\n\
        element vertex 2\n\
        property float x\n\
        property uchar flag\n\
        end_header\n\
        0.5 1\n\
        -2 255\n";

    fn read_all(reader: &mut PlyReader<&[u8]>) -> Result<Vec<Vec<Scalar>>, DecodeError> {
        let header = reader.read_header()?.clone();
        let mut records = Vec::new();
        for (index, element) in header.elements.iter().enumerate() {
            for record in 0..element.count {
                reader.begin_record(index, record)?;
                let mut values = Vec::new();
                for property in &element.properties {
                    let PropertyKind::Scalar(kind) = property.kind else {
                        panic!("test inputs have scalar properties only");
                    };
                    values.push(reader.read_scalar(kind.codec())?.scalar);
                }
                reader.end_record()?;
                records.push(values);
            }
        }
        Ok(records)
    }

    #[test]
    fn header_lines_stream_in_order() {
        let mut reader = PlyReader::new(ASCII.as_bytes());
        let mut keywords = Vec::new();
        while let Some(line) = reader.next_header_line().unwrap() {
            keywords.push(line.keyword());
        }
        assert_eq!(
            keywords,
            ["ply", "format", "comment", "element", "property", "property", "end_header"]
        );
        assert_eq!(reader.line(), 7);
        assert_eq!(reader.header().unwrap().encoding, Encoding::Ascii);
    }

    #[test]
    fn ascii_records_keep_token_text() {
        let mut reader = PlyReader::new("ply\nformat ascii 1.0\nelement v 1\nproperty float x\nend_header\n1.50\n".as_bytes());
        reader.read_header().unwrap();
        reader.begin_record(0, 0).unwrap();
        let value = reader.read_scalar(ScalarKind::Float32.codec()).unwrap();
        assert_eq!(value.scalar, Scalar::Float32(1.5));
        assert_eq!(value.token, Some("1.50"));
        reader.end_record().unwrap();
    }

    #[test]
    fn ascii_data_section() {
        let mut reader = PlyReader::new(ASCII.as_bytes());
        let records = read_all(&mut reader).unwrap();
        assert_eq!(
            records,
            [
                vec![Scalar::Float32(0.5), Scalar::Uint8(1)],
                vec![Scalar::Float32(-2.0), Scalar::Uint8(255)],
            ]
        );
        assert_eq!(reader.finish().unwrap(), 0);
    }

    #[test]
    fn binary_data_section() {
        let mut input = b"ply\nformat binary_big_endian 1.0\nelement vertex 1\nproperty short a\nproperty uint b\nend_header\n".to_vec();
        input.extend_from_slice(&(-2i16).to_be_bytes());
        input.extend_from_slice(&7u32.to_be_bytes());
        let mut reader = PlyReader::new(input.as_slice());
        let records = read_all(&mut reader).unwrap();
        assert_eq!(records, [vec![Scalar::Int16(-2), Scalar::Uint32(7)]]);
    }

    #[test]
    fn crlf_header_lines() {
        let text = "ply\r\nformat ascii 1.0\r\nelement v 1\r\nproperty int i\r\nend_header\r\n42\r\n";
        let mut reader = PlyReader::new(text.as_bytes());
        let records = read_all(&mut reader).unwrap();
        assert_eq!(records, [vec![Scalar::Int32(42)]]);
    }

    #[test]
    fn bad_first_line_is_invalid_magic() {
        let mut reader = PlyReader::new("PLY\n".as_bytes()).with_input_name("cloud.ply");
        let err = reader.read_header().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Header {
                line: 1,
                error: HeaderError::InvalidMagic { .. },
                ..
            }
        ));
        assert!(err.to_string().starts_with("cloud.ply:1: "));
    }

    #[test]
    fn header_error_reports_line_number() {
        let mut reader = PlyReader::new("ply\nformat ascii 1.0\nelement v 1\nproperty quad q\n".as_bytes());
        let result = reader.read_header();
        assert!(matches!(result, Err(DecodeError::Header { line: 4, .. })));
    }

    #[test]
    fn header_eof() {
        let mut reader = PlyReader::new("ply\nformat ascii 1.0\n".as_bytes());
        let result = reader.read_header();
        assert!(matches!(result, Err(DecodeError::HeaderEof { line: 3, .. })));
    }

    #[test]
    fn ascii_missing_value() {
        let text = ASCII.replace("-2 255", "-2");
        let mut reader = PlyReader::new(text.as_bytes());
        let result = read_all(&mut reader);
        assert!(matches!(result, Err(DecodeError::MissingToken { line: 9 })));
    }

    #[test]
    fn ascii_trailing_values() {
        let text = ASCII.replace("-2 255", "-2 255 9");
        let mut reader = PlyReader::new(text.as_bytes());
        let result = read_all(&mut reader);
        assert!(matches!(result, Err(DecodeError::TrailingTokens { line: 9, .. })));
    }

    #[test]
    fn ascii_value_out_of_range() {
        let text = ASCII.replace("-2 255", "-2 256");
        let mut reader = PlyReader::new(text.as_bytes());
        let result = read_all(&mut reader);
        assert!(matches!(result, Err(DecodeError::InvalidValue { line: 9, .. })));
    }

    #[test]
    fn invalid_value_message_names_token_once() {
        let text = ASCII.replace("-2 255", "-2 256");
        let mut reader = PlyReader::new(text.as_bytes());
        let err = read_all(&mut reader).unwrap_err();
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(err.to_string().matches("\"256\"").count(), 1, "{err}");
    }

    #[test]
    fn ascii_too_few_records() {
        let text = ASCII.replace("-2 255\n", "");
        let mut reader = PlyReader::new(text.as_bytes());
        let result = read_all(&mut reader);
        assert!(matches!(
            result,
            Err(DecodeError::UnexpectedEof { ref element, record: 1, .. }) if element == "vertex"
        ));
    }

    #[test]
    fn binary_truncated_value() {
        let mut input = b"ply\nformat binary_little_endian 1.0\nelement vertex 2\nproperty int i\nend_header\n".to_vec();
        input.extend_from_slice(&1i32.to_le_bytes());
        input.extend_from_slice(&[0, 0]);
        let mut reader = PlyReader::new(input.as_slice());
        let result = read_all(&mut reader);
        assert!(matches!(
            result,
            Err(DecodeError::UnexpectedEof { record: 1, .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_counted() {
        let text = format!("{ASCII}\n\nextra\n");
        let mut reader = PlyReader::new(text.as_bytes());
        read_all(&mut reader).unwrap();
        assert_eq!(reader.finish().unwrap(), 8);
    }

    #[test]
    fn data_before_header_is_rejected() {
        let mut reader = PlyReader::new(ASCII.as_bytes());
        assert!(matches!(
            reader.begin_record(0, 0),
            Err(DecodeError::HeaderIncomplete)
        ));
    }
}

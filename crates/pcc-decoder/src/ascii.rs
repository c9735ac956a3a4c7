use std::io::BufRead;

use crate::error::DecodeError;

/// One ASCII data-section line, consumed token by token.
///
/// The line buffer is reused across records.
#[derive(Debug, Default)]
pub(crate) struct AsciiRecord {
  text: String,
  cursor: usize,
}

impl AsciiRecord {
  /// Load the next line, which will be reported as `line`. Returns the
  /// number of bytes consumed, or `None` at end of input.
  ///
  /// The terminator (`\n` or `\r\n`) is stripped.
  pub(crate) fn load(
    &mut self,
    reader: &mut impl BufRead,
    raw: &mut Vec<u8>,
    line: usize,
  ) -> Result<Option<usize>, DecodeError> {
    raw.clear();
    let read = reader.read_until(b'\n', raw)?;
    if read == 0 {
      return Ok(None);
    }
    strip_terminator(raw);
    let text = std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8 { line })?;
    self.text.clear();
    self.text.push_str(text);
    self.cursor = 0;
    Ok(Some(read))
  }

  /// Next whitespace-separated token, or `None` if the line is used up.
  pub(crate) fn next_token(&mut self) -> Option<&str> {
    let rest = &self.text[self.cursor..];
    let start = rest.len() - rest.trim_start_matches(is_separator).len();
    let rest = &rest[start..];
    if rest.is_empty() {
      self.cursor = self.text.len();
      return None;
    }
    let len = rest.find(is_separator).unwrap_or(rest.len());
    let begin = self.cursor + start;
    self.cursor = begin + len;
    Some(&self.text[begin..begin + len])
  }

  /// Whatever follows the last consumed token, trimmed.
  pub(crate) fn rest(&self) -> &str {
    self.text[self.cursor..].trim_matches(is_separator)
  }
}

fn is_separator(c: char) -> bool {
  c == ' ' || c == '\t'
}

pub(crate) fn strip_terminator(raw: &mut Vec<u8>) {
  if raw.last() == Some(&b'\n') {
    raw.pop();
    if raw.last() == Some(&b'\r') {
      raw.pop();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokens_split_on_runs_of_blanks() {
    let mut input: &[u8] = b"1  2\t\t-3.5 \r\nnext\n";
    let mut record = AsciiRecord::default();
    let mut raw = Vec::new();
    assert_eq!(record.load(&mut input, &mut raw, 1).unwrap(), Some(13));
    assert_eq!(record.next_token(), Some("1"));
    assert_eq!(record.next_token(), Some("2"));
    assert_eq!(record.next_token(), Some("-3.5"));
    assert_eq!(record.next_token(), None);
    assert_eq!(record.rest(), "");

    assert!(record.load(&mut input, &mut raw, 1).unwrap().is_some());
    assert_eq!(record.next_token(), Some("next"));
    assert!(record.load(&mut input, &mut raw, 1).unwrap().is_none());
  }

  #[test]
  fn rest_reports_unconsumed_tokens() {
    let mut input: &[u8] = b"1 2 3\n";
    let mut record = AsciiRecord::default();
    let mut raw = Vec::new();
    record.load(&mut input, &mut raw, 1).unwrap();
    record.next_token();
    assert_eq!(record.rest(), "2 3");
  }

  #[test]
  fn last_line_without_newline() {
    let mut input: &[u8] = b"7";
    let mut record = AsciiRecord::default();
    let mut raw = Vec::new();
    assert_eq!(record.load(&mut input, &mut raw, 1).unwrap(), Some(1));
    assert_eq!(record.next_token(), Some("7"));
  }
}

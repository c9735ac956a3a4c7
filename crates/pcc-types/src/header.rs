use pcc_wire::Encoding;

use crate::element::ElementDeclaration;
use crate::error::HeaderError;
use crate::header_line::HeaderLine;

/// Position of the header state machine.
///
/// ```text
///   Start ─ply─▶ Magic ─format─▶ Format ─element─▶ Element ─end_header─▶ Done
///                                                  ▲     │
///                                                  └─────┘ element | property
/// ```
///
/// `comment` and `obj_info` lines are accepted in every state between
/// `Magic` and `Done` and do not change the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
  Start,
  Magic,
  Format,
  Element,
  Done,
}

/// A fully parsed header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
  pub encoding: Encoding,
  pub version: String,
  pub elements: Vec<ElementDeclaration>,
  /// Every line in input order, `ply` and `end_header` included.
  pub lines: Vec<HeaderLine>,
}

impl Header {
  #[must_use]
  pub fn element(&self, name: &str) -> Option<&ElementDeclaration> {
    self.elements.iter().find(|e| e.name == name)
  }

  /// Number of comment and `obj_info` lines.
  #[must_use]
  pub fn comment_count(&self) -> usize {
    self
      .lines
      .iter()
      .filter(|l| matches!(l, HeaderLine::Comment(_) | HeaderLine::ObjInfo(_)))
      .count()
  }
}

/// Sequences header lines and accumulates the [`Header`] they describe.
///
/// Feed lines with [`push`](Self::push) in input order; once
/// `end_header` has been accepted, [`finish`](Self::finish) hands back
/// the header.
#[derive(Debug)]
pub struct HeaderBuilder {
  state: HeaderState,
  encoding: Option<Encoding>,
  version: String,
  elements: Vec<ElementDeclaration>,
  lines: Vec<HeaderLine>,
}

impl HeaderBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self {
      state: HeaderState::Start,
      encoding: None,
      version: String::new(),
      elements: Vec::new(),
      lines: Vec::new(),
    }
  }

  #[must_use]
  pub fn state(&self) -> HeaderState {
    self.state
  }

  /// Encoding declared by the `format` line, once seen.
  #[must_use]
  pub fn encoding(&self) -> Option<Encoding> {
    self.encoding
  }

  /// Accept the next header line.
  ///
  /// # Errors
  ///
  /// Returns a [`HeaderError`] if the line may not appear in the
  /// current state. The builder is left unchanged in that case.
  pub fn push(&mut self, line: HeaderLine) -> Result<(), HeaderError> {
    match (self.state, &line) {
      (HeaderState::Start, HeaderLine::Magic) => self.state = HeaderState::Magic,
      (HeaderState::Start, other) => {
        return Err(HeaderError::InvalidMagic {
          found: other.to_string(),
        });
      }
      (HeaderState::Done, other) => {
        return Err(HeaderError::UnexpectedLine {
          keyword: other.keyword(),
        });
      }
      (_, HeaderLine::Magic) => return Err(HeaderError::UnexpectedLine { keyword: "ply" }),
      (_, HeaderLine::Comment(_) | HeaderLine::ObjInfo(_)) => {}
      (HeaderState::Magic, HeaderLine::Format { encoding, version }) => {
        self.encoding = Some(*encoding);
        self.version.clone_from(version);
        self.state = HeaderState::Format;
      }
      (HeaderState::Magic, other) => {
        return Err(HeaderError::MissingFormat {
          keyword: other.keyword(),
        });
      }
      (_, HeaderLine::Format { .. }) => return Err(HeaderError::DuplicateFormat),
      (_, HeaderLine::Element { name, count }) => {
        self
          .elements
          .push(ElementDeclaration::new(name.clone(), *count));
        self.state = HeaderState::Element;
      }
      (_, HeaderLine::Property(property)) => {
        let Some(element) = self.elements.last_mut() else {
          return Err(HeaderError::PropertyWithoutElement {
            name: property.name.clone(),
          });
        };
        element.properties.push(property.clone());
      }
      (_, HeaderLine::EndHeader) => self.state = HeaderState::Done,
    }
    self.lines.push(line);
    Ok(())
  }

  /// Hand back the accumulated header, or `None` if `end_header` has
  /// not been accepted yet.
  #[must_use]
  pub fn finish(self) -> Option<Header> {
    if self.state != HeaderState::Done {
      return None;
    }
    Some(Header {
      encoding: self.encoding?,
      version: self.version,
      elements: self.elements,
      lines: self.lines,
    })
  }
}

impl Default for HeaderBuilder {
  fn default() -> Self {
    Self::new()
  }
}

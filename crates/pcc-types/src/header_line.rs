use std::fmt;

use pcc_wire::{Encoding, ListKind, ScalarKind};

use crate::element::{PropertyDeclaration, PropertyKind};
use crate::error::HeaderError;

/// The only format version the grammar accepts.
pub const SUPPORTED_VERSION: &str = "1.0";

/// One parsed line of a PLY header.
///
/// ```text
/// ┌─────────────────────────────────────────────┬──────────────┐
/// │ Line                                        │ Variant      │
/// ├─────────────────────────────────────────────┼──────────────┤
/// │ ply                                         │ Magic        │
/// │ format binary_little_endian 1.0             │ Format       │
/// │ element vertex 8                            │ Element      │
/// │ property float x                            │ Property     │
/// │ property list uchar int vertex_indices      │ Property     │
/// │ comment made by hand                        │ Comment      │
/// │ obj_info num_cols 10                        │ ObjInfo      │
/// │ end_header                                  │ EndHeader    │
/// └─────────────────────────────────────────────┴──────────────┘
/// ```
///
/// `Display` writes the line back out in canonical form, without the
/// trailing newline. Type names are written in their legacy spelling;
/// comment and `obj_info` lines are written verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderLine {
  Magic,
  Format { encoding: Encoding, version: String },
  Element { name: String, count: u64 },
  Property(PropertyDeclaration),
  /// The full line, keyword included.
  Comment(String),
  /// The full line, keyword included.
  ObjInfo(String),
  EndHeader,
}

impl HeaderLine {
  /// Parse a single header line. The line terminator must already be
  /// stripped.
  ///
  /// # Errors
  ///
  /// Returns a [`HeaderError`] describing the first grammar violation.
  /// Sequencing (which line may follow which) is not checked here.
  pub fn parse(line: &str) -> Result<Self, HeaderError> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
      return Err(HeaderError::EmptyLine);
    };
    let rest: Vec<&str> = tokens.collect();

    match keyword {
      "ply" => {
        if !rest.is_empty() {
          return Err(HeaderError::InvalidMagic {
            found: line.to_string(),
          });
        }
        Ok(Self::Magic)
      }
      "format" => {
        let [name, version] = rest[..] else {
          return Err(HeaderError::MalformedLine {
            keyword: "format",
            expected: "format <encoding> <version>",
          });
        };
        let encoding = name.parse::<Encoding>()?;
        if version != SUPPORTED_VERSION {
          return Err(HeaderError::UnsupportedVersion {
            version: version.to_string(),
          });
        }
        Ok(Self::Format {
          encoding,
          version: version.to_string(),
        })
      }
      "element" => {
        let [name, count] = rest[..] else {
          return Err(HeaderError::MalformedLine {
            keyword: "element",
            expected: "element <name> <count>",
          });
        };
        let count = count.parse::<u64>().map_err(|_| HeaderError::InvalidCount {
          token: count.to_string(),
        })?;
        Ok(Self::Element {
          name: name.to_string(),
          count,
        })
      }
      "property" => Self::parse_property(&rest),
      "comment" => Ok(Self::Comment(line.trim_end().to_string())),
      "obj_info" => Ok(Self::ObjInfo(line.trim_end().to_string())),
      "end_header" => {
        if !rest.is_empty() {
          return Err(HeaderError::MalformedLine {
            keyword: "end_header",
            expected: "end_header",
          });
        }
        Ok(Self::EndHeader)
      }
      other => Err(HeaderError::UnknownKeyword {
        keyword: other.to_string(),
      }),
    }
  }

  fn parse_property(rest: &[&str]) -> Result<Self, HeaderError> {
    match rest {
      ["list", size, element, name] => {
        let kind = ListKind::new(ScalarKind::from_name(size)?, ScalarKind::from_name(element)?)?;
        Ok(Self::Property(PropertyDeclaration::list(*name, kind)))
      }
      ["list", ..] => Err(HeaderError::MalformedLine {
        keyword: "property",
        expected: "property list <size-type> <type> <name>",
      }),
      [kind, name] => Ok(Self::Property(PropertyDeclaration::scalar(
        *name,
        ScalarKind::from_name(kind)?,
      ))),
      _ => Err(HeaderError::MalformedLine {
        keyword: "property",
        expected: "property <type> <name>",
      }),
    }
  }

  /// Keyword that starts this line.
  #[must_use]
  pub fn keyword(&self) -> &'static str {
    match self {
      Self::Magic => "ply",
      Self::Format { .. } => "format",
      Self::Element { .. } => "element",
      Self::Property(_) => "property",
      Self::Comment(_) => "comment",
      Self::ObjInfo(_) => "obj_info",
      Self::EndHeader => "end_header",
    }
  }
}

impl fmt::Display for HeaderLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Magic => f.write_str("ply"),
      Self::Format { encoding, version } => write!(f, "format {encoding} {version}"),
      Self::Element { name, count } => write!(f, "element {name} {count}"),
      Self::Property(property) => match property.kind {
        PropertyKind::Scalar(kind) => {
          write!(f, "property {} {}", kind.legacy_name(), property.name)
        }
        PropertyKind::List(kind) => write!(
          f,
          "property list {} {} {}",
          kind.size().legacy_name(),
          kind.element().legacy_name(),
          property.name
        ),
      },
      Self::Comment(line) | Self::ObjInfo(line) => f.write_str(line),
      Self::EndHeader => f.write_str("end_header"),
    }
  }
}

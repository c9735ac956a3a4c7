use std::fmt;

use pcc_wire::{ListKind, ScalarKind};

/// How a property's values are laid out in the data section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
  Scalar(ScalarKind),
  List(ListKind),
}

impl fmt::Display for PropertyKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Scalar(kind) => fmt::Display::fmt(kind, f),
      Self::List(kind) => fmt::Display::fmt(kind, f),
    }
  }
}

/// One `property` header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDeclaration {
  pub name: String,
  pub kind: PropertyKind,
}

impl PropertyDeclaration {
  pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
    Self {
      name: name.into(),
      kind: PropertyKind::Scalar(kind),
    }
  }

  pub fn list(name: impl Into<String>, kind: ListKind) -> Self {
    Self {
      name: name.into(),
      kind: PropertyKind::List(kind),
    }
  }
}

/// One `element` header line plus the properties declared under it.
///
/// `count` is the number of records of this element in the data
/// section; each record carries the properties in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDeclaration {
  pub name: String,
  pub count: u64,
  pub properties: Vec<PropertyDeclaration>,
}

impl ElementDeclaration {
  pub fn new(name: impl Into<String>, count: u64) -> Self {
    Self {
      name: name.into(),
      count,
      properties: Vec::new(),
    }
  }

  #[must_use]
  pub fn property(&self, name: &str) -> Option<&PropertyDeclaration> {
    self.properties.iter().find(|p| p.name == name)
  }

  /// Whether every property is a fixed-width scalar.
  #[must_use]
  pub fn is_fixed_width(&self) -> bool {
    self
      .properties
      .iter()
      .all(|p| matches!(p.kind, PropertyKind::Scalar(_)))
  }
}

use std::fmt;

use crate::error::WireError;
use crate::scalar::{ScalarCodec, ScalarKind};

/// The count-prefix kinds a list property may declare.
pub const LIST_SIZE_KINDS: [ScalarKind; 3] =
    [ScalarKind::Uint8, ScalarKind::Uint16, ScalarKind::Uint32];

/// Encoding of a variable-length list property: a count prefix of
/// `size` kind followed by that many values of `element` kind.
///
/// Only the three unsigned integer kinds are valid size kinds, so there
/// are 3 × 8 = 24 list kinds in total. [`ListKind::new`] is the only way
/// to build one, which keeps every `ListKind` inside that set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListKind {
    size: ScalarKind,
    element: ScalarKind,
}

impl ListKind {
    /// # Errors
    ///
    /// Returns [`WireError::InvalidListSizeKind`] if `size` is not
    /// uint8, uint16 or uint32.
    pub fn new(size: ScalarKind, element: ScalarKind) -> Result<Self, WireError> {
        if !size.is_unsigned_integer() {
            return Err(WireError::InvalidListSizeKind { kind: size });
        }
        Ok(Self { size, element })
    }

    /// All 24 list kinds, size-major.
    pub fn all() -> impl Iterator<Item = ListKind> {
        LIST_SIZE_KINDS.into_iter().flat_map(|size| {
            ScalarKind::ALL
                .into_iter()
                .map(move |element| ListKind { size, element })
        })
    }

    #[must_use]
    pub fn size(self) -> ScalarKind {
        self.size
    }

    #[must_use]
    pub fn element(self) -> ScalarKind {
        self.element
    }

    /// Look up the begin/element behavior for this list kind.
    #[must_use]
    pub fn codec(self) -> ListCodec {
        ListCodec {
            size: self.size.codec(),
            element: self.element.codec(),
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list {} {}", self.size, self.element)
    }
}

/// List dispatch entry: the count prefix is handled by `size`, each
/// element by `element`. The end-of-list step carries no wire data.
#[derive(Clone, Copy, Debug)]
pub struct ListCodec {
    pub size: &'static ScalarCodec,
    pub element: &'static ScalarCodec,
}

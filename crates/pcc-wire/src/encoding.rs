use std::fmt;
use std::str::FromStr;

use crate::error::WireError;

/// Byte order of a binary data section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// Byte order of the machine running the transcoder.
pub const HOST_BYTE_ORDER: ByteOrder = if cfg!(target_endian = "little") {
    ByteOrder::Little
} else {
    ByteOrder::Big
};

/// The three data-section encodings a PLY header can declare.
///
/// ```text
/// ┌──────────────────────┬───────────────────────────────────────────┐
/// │ Header name          │ Data section                              │
/// ├──────────────────────┼───────────────────────────────────────────┤
/// │ ascii                │ one record per line, space-separated      │
/// │ binary_little_endian │ packed fixed-width values, LSB first      │
/// │ binary_big_endian    │ packed fixed-width values, MSB first      │
/// └──────────────────────┴───────────────────────────────────────────┘
/// ```
///
/// The header itself is always ASCII text regardless of the encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl Encoding {
    /// The binary encoding that matches the host byte order.
    #[must_use]
    pub fn native_binary() -> Self {
        match HOST_BYTE_ORDER {
            ByteOrder::Little => Self::BinaryLittleEndian,
            ByteOrder::Big => Self::BinaryBigEndian,
        }
    }

    /// Name used on the `format` header line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::BinaryLittleEndian => "binary_little_endian",
            Self::BinaryBigEndian => "binary_big_endian",
        }
    }

    /// Byte order of the data section, `None` for ASCII.
    #[must_use]
    pub fn byte_order(self) -> Option<ByteOrder> {
        match self {
            Self::Ascii => None,
            Self::BinaryLittleEndian => Some(ByteOrder::Little),
            Self::BinaryBigEndian => Some(ByteOrder::Big),
        }
    }

    /// Whether binary values must be byte-swapped relative to host order.
    #[must_use]
    pub fn swaps_host_order(self) -> bool {
        self.byte_order().is_some_and(|order| order != HOST_BYTE_ORDER)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "binary_little_endian" => Ok(Self::BinaryLittleEndian),
            "binary_big_endian" => Ok(Self::BinaryBigEndian),
            other => Err(WireError::UnknownEncoding {
                name: other.to_string(),
            }),
        }
    }
}

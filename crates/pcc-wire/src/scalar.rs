use std::fmt;

use crate::encoding::ByteOrder;
use crate::error::WireError;

// ── Macro for the closed set of scalar kinds ─────────────────────────
//
// PLY has exactly eight numeric kinds. Each one needs the same things:
// an enum variant, a value variant carrying the Rust primitive, two
// header spellings, a byte width and a codec entry. The macro expands
// all of them from one table so the kind enum, the value enum and the
// codec table can never disagree on order.

macro_rules! scalar_kinds {
  (
    $( $kind:ident($ty:ty) => $name:literal | $legacy:literal ),+ $(,)?
  ) => {
    /// One of the eight fixed-width numeric types a property can declare.
    ///
    /// ```text
    /// ┌─────────┬────────┬───────┐
    /// │ Name    │ Legacy │ Width │
    /// ├─────────┼────────┼───────┤
    /// │ int8    │ char   │ 1     │
    /// │ int16   │ short  │ 2     │
    /// │ int32   │ int    │ 4     │
    /// │ uint8   │ uchar  │ 1     │
    /// │ uint16  │ ushort │ 2     │
    /// │ uint32  │ uint   │ 4     │
    /// │ float32 │ float  │ 4     │
    /// │ float64 │ double │ 8     │
    /// └─────────┴────────┴───────┘
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum ScalarKind {
      $( $kind ),+
    }

    /// A decoded value, tagged with its kind.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum Scalar {
      $( $kind($ty) ),+
    }

    impl ScalarKind {
      /// Every kind, in table order.
      pub const ALL: [ScalarKind; 8] = [ $( ScalarKind::$kind ),+ ];

      /// Modern header spelling (`int8`, `float32`, ...).
      #[must_use]
      pub fn name(self) -> &'static str {
        match self {
          $( Self::$kind => $name ),+
        }
      }

      /// Legacy header spelling (`char`, `float`, ...). This is the
      /// spelling written to output headers.
      #[must_use]
      pub fn legacy_name(self) -> &'static str {
        match self {
          $( Self::$kind => $legacy ),+
        }
      }

      /// Size of one binary value in bytes.
      #[must_use]
      pub fn width(self) -> usize {
        match self {
          $( Self::$kind => std::mem::size_of::<$ty>() ),+
        }
      }

      /// Resolve a header type name in either spelling.
      ///
      /// # Errors
      ///
      /// Returns [`WireError::UnknownScalarKind`] for any other name.
      pub fn from_name(name: &str) -> Result<Self, WireError> {
        match name {
          $( $name | $legacy => Ok(Self::$kind), )+
          other => Err(WireError::UnknownScalarKind {
            name: other.to_string(),
          }),
        }
      }
    }

    impl Scalar {
      #[must_use]
      pub fn kind(self) -> ScalarKind {
        match self {
          $( Self::$kind(_) => ScalarKind::$kind ),+
        }
      }

      /// Widen to `f64`. Lossless for every kind.
      #[must_use]
      pub fn to_f64(self) -> f64 {
        match self {
          $( Self::$kind(v) => f64::from(v) ),+
        }
      }
    }

    impl fmt::Display for Scalar {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
          $( Self::$kind(v) => fmt::Display::fmt(v, f) ),+
        }
      }
    }

    static SCALAR_CODECS: [ScalarCodec; 8] = [
      $(
        ScalarCodec {
          kind: ScalarKind::$kind,
          read: |bytes, order| {
            let mut raw = [0u8; std::mem::size_of::<$ty>()];
            raw.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
            Scalar::$kind(match order {
              ByteOrder::Little => <$ty>::from_le_bytes(raw),
              ByteOrder::Big => <$ty>::from_be_bytes(raw),
            })
          },
          write: |value, order, buf| {
            let Scalar::$kind(v) = value else {
              return false;
            };
            let raw = match order {
              ByteOrder::Little => v.to_le_bytes(),
              ByteOrder::Big => v.to_be_bytes(),
            };
            buf[..raw.len()].copy_from_slice(&raw);
            true
          },
          parse: |token| token.parse::<$ty>().ok().map(Scalar::$kind),
        }
      ),+
    ];
  };
}

scalar_kinds! {
  Int8(i8) => "int8" | "char",
  Int16(i16) => "int16" | "short",
  Int32(i32) => "int32" | "int",
  Uint8(u8) => "uint8" | "uchar",
  Uint16(u16) => "uint16" | "ushort",
  Uint32(u32) => "uint32" | "uint",
  Float32(f32) => "float32" | "float",
  Float64(f64) => "float64" | "double",
}

impl ScalarKind {
  /// Look up this kind's entry in the scalar dispatch table.
  ///
  /// The table is total over all eight kinds, so this never fails.
  #[must_use]
  pub fn codec(self) -> &'static ScalarCodec {
    &SCALAR_CODECS[self as usize]
  }

  #[must_use]
  pub fn is_unsigned_integer(self) -> bool {
    matches!(self, Self::Uint8 | Self::Uint16 | Self::Uint32)
  }
}

impl fmt::Display for ScalarKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl Scalar {
  /// Interpret this value as a non-negative integer index or count.
  ///
  /// Floats qualify only when finite, non-negative and integral.
  #[must_use]
  #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
  pub fn to_index(self) -> Option<u64> {
    match self {
      Self::Int8(v) => u64::try_from(v).ok(),
      Self::Int16(v) => u64::try_from(v).ok(),
      Self::Int32(v) => u64::try_from(v).ok(),
      Self::Uint8(v) => Some(u64::from(v)),
      Self::Uint16(v) => Some(u64::from(v)),
      Self::Uint32(v) => Some(u64::from(v)),
      Self::Float32(v) => float_index(f64::from(v)),
      Self::Float64(v) => float_index(v),
    }
  }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_index(v: f64) -> Option<u64> {
  (v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX))
    .then(|| v as u64)
}

/// Per-kind encode/decode behavior, one entry per [`ScalarKind`].
///
/// Header parsing resolves a property's kind to a `&'static ScalarCodec`
/// once; the data phase then calls through the entry without switching
/// on the kind again.
///
/// ```text
/// ┌──────────┬─────────────────────────────────────────────┐
/// │ Method   │ Direction                                   │
/// ├──────────┼─────────────────────────────────────────────┤
/// │ decode   │ width raw bytes in a byte order → Scalar    │
/// │ encode   │ Scalar → width raw bytes in a byte order    │
/// │ parse    │ one ASCII token → Scalar                    │
/// └──────────┴─────────────────────────────────────────────┘
/// ```
///
/// ASCII formatting goes through `Display` on [`Scalar`].
#[derive(Debug)]
pub struct ScalarCodec {
  kind: ScalarKind,
  read: fn(&[u8], ByteOrder) -> Scalar,
  write: fn(Scalar, ByteOrder, &mut [u8]) -> bool,
  parse: fn(&str) -> Option<Scalar>,
}

impl ScalarCodec {
  #[must_use]
  pub fn kind(&self) -> ScalarKind {
    self.kind
  }

  #[must_use]
  pub fn width(&self) -> usize {
    self.kind.width()
  }

  /// Decode one value from the front of `bytes`.
  ///
  /// # Errors
  ///
  /// Returns [`WireError::UnexpectedEof`] if `bytes` is shorter than the
  /// kind's width.
  pub fn decode(&self, bytes: &[u8], order: ByteOrder) -> Result<Scalar, WireError> {
    if bytes.len() < self.width() {
      return Err(WireError::UnexpectedEof { offset: bytes.len() });
    }
    Ok((self.read)(bytes, order))
  }

  /// Encode `value` into the front of `buf`, returning the bytes written.
  ///
  /// # Errors
  ///
  /// - [`WireError::KindMismatch`] if `value` is not of this codec's kind.
  /// - [`WireError::UnexpectedEof`] if `buf` is shorter than the width.
  pub fn encode(
    &self,
    value: Scalar,
    order: ByteOrder,
    buf: &mut [u8],
  ) -> Result<usize, WireError> {
    if buf.len() < self.width() {
      return Err(WireError::UnexpectedEof { offset: buf.len() });
    }
    if !(self.write)(value, order, buf) {
      return Err(WireError::KindMismatch {
        expected: self.kind,
        found: value.kind(),
      });
    }
    Ok(self.width())
  }

  /// Parse one whitespace-free ASCII token.
  ///
  /// # Errors
  ///
  /// Returns [`WireError::InvalidToken`] if the token is not a valid
  /// literal of this kind, including out-of-range integers.
  pub fn parse(&self, token: &str) -> Result<Scalar, WireError> {
    (self.parse)(token).ok_or_else(|| WireError::InvalidToken {
      token: token.to_string(),
      kind: self.kind,
    })
  }
}

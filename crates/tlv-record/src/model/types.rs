//! Primitive field types.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// Types a record field may be declared with.
///
/// Integers always carry an explicit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PrimitiveType {
    Bool = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    UInt8 = 6,
    UInt16 = 7,
    UInt32 = 8,
    UInt64 = 9,
    /// UTF-8 text, carried without terminator or length prefix.
    String = 10,
    /// Opaque byte sequence.
    Bytes = 11,
}

impl PrimitiveType {
    /// All supported types, in code order.
    pub const ALL: [PrimitiveType; 11] = [
        PrimitiveType::Bool,
        PrimitiveType::Int8,
        PrimitiveType::Int16,
        PrimitiveType::Int32,
        PrimitiveType::Int64,
        PrimitiveType::UInt8,
        PrimitiveType::UInt16,
        PrimitiveType::UInt32,
        PrimitiveType::UInt64,
        PrimitiveType::String,
        PrimitiveType::Bytes,
    ];

    /// Returns the stable numeric code of this type.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the exact payload width for fixed-width types, `None` for
    /// `String` and `Bytes`.
    pub const fn width(self) -> Option<usize> {
        match self {
            PrimitiveType::Bool | PrimitiveType::Int8 | PrimitiveType::UInt8 => Some(1),
            PrimitiveType::Int16 | PrimitiveType::UInt16 => Some(2),
            PrimitiveType::Int32 | PrimitiveType::UInt32 => Some(4),
            PrimitiveType::Int64 | PrimitiveType::UInt64 => Some(8),
            PrimitiveType::String | PrimitiveType::Bytes => None,
        }
    }

    /// Returns true for types whose payload length is fixed.
    pub const fn is_fixed_width(self) -> bool {
        self.width().is_some()
    }

    /// Returns the canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::String => "string",
            PrimitiveType::Bytes => "bytes",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveType {
    type Err = SchemaError;

    /// Parses a type name.
    ///
    /// Accepts the canonical names (`uint16`, `string`, ...) and the Rust
    /// primitive spellings (`u16`, `str`, ...). Width-less integer names
    /// are rejected with [`SchemaError::UnspecifiedWidth`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim() {
            "bool" => PrimitiveType::Bool,
            "int8" | "i8" => PrimitiveType::Int8,
            "int16" | "i16" => PrimitiveType::Int16,
            "int32" | "i32" => PrimitiveType::Int32,
            "int64" | "i64" => PrimitiveType::Int64,
            "uint8" | "u8" => PrimitiveType::UInt8,
            "uint16" | "u16" => PrimitiveType::UInt16,
            "uint32" | "u32" => PrimitiveType::UInt32,
            "uint64" | "u64" => PrimitiveType::UInt64,
            "string" | "str" => PrimitiveType::String,
            "bytes" | "[u8]" => PrimitiveType::Bytes,
            "int" | "uint" | "isize" | "usize" => {
                return Err(SchemaError::UnspecifiedWidth { name: s.trim().to_string() });
            }
            other => {
                return Err(SchemaError::UnsupportedType { name: other.to_string() });
            }
        };
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(PrimitiveType::Bool.width(), Some(1));
        assert_eq!(PrimitiveType::Int16.width(), Some(2));
        assert_eq!(PrimitiveType::UInt32.width(), Some(4));
        assert_eq!(PrimitiveType::Int64.width(), Some(8));
        assert_eq!(PrimitiveType::String.width(), None);
        assert!(!PrimitiveType::Bytes.is_fixed_width());
    }

    #[test]
    fn test_name_roundtrip() {
        for ty in PrimitiveType::ALL {
            assert_eq!(ty.name().parse::<PrimitiveType>(), Ok(ty));
        }
    }

    #[test]
    fn test_rust_spellings() {
        assert_eq!("u16".parse(), Ok(PrimitiveType::UInt16));
        assert_eq!(" i64 ".parse(), Ok(PrimitiveType::Int64));
        assert_eq!("str".parse(), Ok(PrimitiveType::String));
    }

    #[test]
    fn test_unspecified_width_rejected() {
        for name in ["int", "uint", "isize", "usize"] {
            assert!(matches!(
                name.parse::<PrimitiveType>(),
                Err(SchemaError::UnspecifiedWidth { .. })
            ));
        }
    }

    #[test]
    fn test_unsupported_rejected() {
        let result = "float64".parse::<PrimitiveType>();
        assert_eq!(
            result,
            Err(SchemaError::UnsupportedType { name: "float64".to_string() })
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes: FxHashSet<u8> = PrimitiveType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), PrimitiveType::ALL.len());
    }
}

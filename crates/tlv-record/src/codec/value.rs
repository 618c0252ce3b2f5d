//! Value encoding/decoding.
//!
//! Fixed-width types use exact-width little-endian payloads; `String` and
//! `Bytes` payloads are the raw bytes, with the length carried by the frame.
//!
//! | Type | Payload |
//! |---|---|
//! | `Bool` | 1 byte, `0x00` or `0x01` |
//! | `Int8` / `UInt8` | 1 byte |
//! | `Int16` / `UInt16` | 2 bytes LE |
//! | `Int32` / `UInt32` | 4 bytes LE |
//! | `Int64` / `UInt64` | 8 bytes LE |
//! | `String` | UTF-8 bytes, 0..=255 |
//! | `Bytes` | raw bytes, 0..=255 |

use std::borrow::Cow;
use std::ops::Deref;

use crate::error::ValueError;
use crate::limits::{MAX_FIXED_WIDTH, MAX_PAYLOAD_LEN};
use crate::model::{PrimitiveType, Value};

// =============================================================================
// ENCODING
// =============================================================================

/// Encoded payload of one value.
///
/// Only produced by [`encode_value`], so its length never exceeds
/// [`MAX_PAYLOAD_LEN`]. Fixed-width values are held inline; byte sequences
/// borrow from the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload<'v>(Repr<'v>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repr<'v> {
    Inline { buf: [u8; MAX_FIXED_WIDTH], len: u8 },
    Borrowed(&'v [u8]),
}

impl<'v> Payload<'v> {
    fn inline<const N: usize>(bytes: [u8; N]) -> Self {
        const { assert!(N <= MAX_FIXED_WIDTH) };
        let mut buf = [0u8; MAX_FIXED_WIDTH];
        buf[..N].copy_from_slice(&bytes);
        Payload(Repr::Inline { buf, len: N as u8 })
    }

    fn borrowed(bytes: &'v [u8]) -> Self {
        Payload(Repr::Borrowed(bytes))
    }

    /// Returns the payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.0 {
            Repr::Inline { buf, len } => &buf[..*len as usize],
            Repr::Borrowed(bytes) => bytes,
        }
    }

    /// Returns true when the bytes point into the encoded value.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.0, Repr::Borrowed(_))
    }
}

impl Deref for Payload<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Payload<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encodes a value as the payload for a field declared as `ty`.
///
/// Fails with [`ValueError::TypeMismatch`] when the value's variant does
/// not match `ty`, and with [`ValueError::PayloadTooLarge`] for byte
/// sequences longer than 255 bytes.
pub fn encode_value<'v>(value: &'v Value<'_>, ty: PrimitiveType) -> Result<Payload<'v>, ValueError> {
    let found = value.primitive_type();
    if found != ty {
        return Err(ValueError::TypeMismatch { expected: ty, found });
    }

    let payload = match value {
        Value::Bool(v) => Payload::inline([u8::from(*v)]),
        Value::Int8(v) => Payload::inline(v.to_le_bytes()),
        Value::Int16(v) => Payload::inline(v.to_le_bytes()),
        Value::Int32(v) => Payload::inline(v.to_le_bytes()),
        Value::Int64(v) => Payload::inline(v.to_le_bytes()),
        Value::UInt8(v) => Payload::inline(v.to_le_bytes()),
        Value::UInt16(v) => Payload::inline(v.to_le_bytes()),
        Value::UInt32(v) => Payload::inline(v.to_le_bytes()),
        Value::UInt64(v) => Payload::inline(v.to_le_bytes()),
        Value::String(s) => Payload::borrowed(s.as_bytes()),
        Value::Bytes(b) => Payload::borrowed(b.as_ref()),
    };

    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(ValueError::PayloadTooLarge {
            ty,
            len: payload.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }
    Ok(payload)
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a payload as a value of type `ty` (zero-copy for byte sequences).
///
/// The payload must be exactly one frame's payload: fixed-width types
/// reject any other length with [`ValueError::LengthMismatch`].
pub fn decode_value(payload: &[u8], ty: PrimitiveType) -> Result<Value<'_>, ValueError> {
    let value = match ty {
        PrimitiveType::Bool => decode_bool(payload)?,
        PrimitiveType::Int8 => Value::Int8(i8::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::Int16 => Value::Int16(i16::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::Int32 => Value::Int32(i32::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::Int64 => Value::Int64(i64::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::UInt8 => Value::UInt8(u8::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::UInt16 => Value::UInt16(u16::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::UInt32 => Value::UInt32(u32::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::UInt64 => Value::UInt64(u64::from_le_bytes(fixed(payload, ty)?)),
        PrimitiveType::String => {
            let s = std::str::from_utf8(payload).map_err(|e| ValueError::InvalidUtf8 {
                valid_up_to: e.valid_up_to(),
            })?;
            Value::String(Cow::Borrowed(s))
        }
        PrimitiveType::Bytes => Value::Bytes(Cow::Borrowed(payload)),
    };
    Ok(value)
}

/// Copies out an exact-width payload.
#[inline]
fn fixed<const N: usize>(payload: &[u8], ty: PrimitiveType) -> Result<[u8; N], ValueError> {
    payload.try_into().map_err(|_| ValueError::LengthMismatch {
        ty,
        expected: N,
        actual: payload.len(),
    })
}

fn decode_bool(payload: &[u8]) -> Result<Value<'_>, ValueError> {
    let [byte] = fixed::<1>(payload, PrimitiveType::Bool)?;
    match byte {
        0x00 => Ok(Value::Bool(false)),
        0x01 => Ok(Value::Bool(true)),
        _ => Err(ValueError::InvalidBool { value: byte }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: Value<'_>) -> Vec<u8> {
        let ty = value.primitive_type();
        encode_value(&value, ty).unwrap().to_vec()
    }

    #[test]
    fn test_fixed_width_little_endian() {
        assert_eq!(encoded(Value::Int32(-1)), vec![0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(encoded(Value::UInt16(300)), vec![0x2C, 0x01]);
        assert_eq!(encoded(Value::Int8(-2)), vec![0xFE]);
        assert_eq!(
            encoded(Value::UInt64(0x0102_0304_0506_0708)),
            vec![8, 7, 6, 5, 4, 3, 2, 1]
        );
        assert_eq!(encoded(Value::Int16(i16::MIN)), vec![0x00, 0x80]);
    }

    #[test]
    fn test_bool_encoding() {
        assert_eq!(encoded(Value::Bool(false)), vec![0x00]);
        assert_eq!(encoded(Value::Bool(true)), vec![0x01]);
    }

    #[test]
    fn test_bytes_are_verbatim() {
        assert_eq!(encoded(Value::from("héllo")), "héllo".as_bytes().to_vec());
        assert_eq!(encoded(Value::from(vec![0u8, 0xFF])), vec![0x00, 0xFF]);
        assert!(encoded(Value::from("")).is_empty());
    }

    #[test]
    fn test_encode_borrows_byte_sequences() {
        let value = Value::from("abc");
        let payload = encode_value(&value, PrimitiveType::String).unwrap();
        assert!(payload.is_borrowed());
        assert_eq!(payload.as_ptr(), value.as_str().unwrap().as_ptr());
    }

    #[test]
    fn test_inline_payload_length_is_type_width() {
        let one = Payload::inline([0xAB]);
        assert!(!one.is_borrowed());
        assert_eq!(one.as_bytes(), &[0xAB]);

        let eight = Payload::inline(u64::MAX.to_le_bytes());
        assert_eq!(eight.as_bytes(), &[0xFF; 8]);
        assert_eq!(&*eight, eight.as_ref());

        let value = Value::Int16(-2);
        let payload = encode_value(&value, PrimitiveType::Int16).unwrap();
        assert!(!payload.is_borrowed());
        assert_eq!(payload.as_bytes(), &[0xFE, 0xFF]);
    }

    #[test]
    fn test_encode_type_mismatch() {
        let value = Value::UInt8(1);
        assert_eq!(
            encode_value(&value, PrimitiveType::Int8),
            Err(ValueError::TypeMismatch {
                expected: PrimitiveType::Int8,
                found: PrimitiveType::UInt8,
            })
        );
    }

    #[test]
    fn test_payload_limit() {
        let at_limit = Value::from(vec![7u8; 255]);
        assert_eq!(encode_value(&at_limit, PrimitiveType::Bytes).unwrap().len(), 255);

        let over = Value::from("x".repeat(256));
        assert_eq!(
            encode_value(&over, PrimitiveType::String),
            Err(ValueError::PayloadTooLarge {
                ty: PrimitiveType::String,
                len: 256,
                max: 255,
            })
        );
    }

    #[test]
    fn test_decode_fixed_width() {
        assert_eq!(
            decode_value(&[0xFF, 0xFF, 0xFF, 0xFF], PrimitiveType::Int32),
            Ok(Value::Int32(-1))
        );
        assert_eq!(decode_value(&[0x2C, 0x01], PrimitiveType::UInt16), Ok(Value::UInt16(300)));
        assert_eq!(
            decode_value(&[0xFF, 0xFF, 0xFF, 0xFF], PrimitiveType::UInt32),
            Ok(Value::UInt32(u32::MAX))
        );
    }

    #[test]
    fn test_decode_length_mismatch() {
        assert_eq!(
            decode_value(&[1, 2, 3], PrimitiveType::UInt16),
            Err(ValueError::LengthMismatch {
                ty: PrimitiveType::UInt16,
                expected: 2,
                actual: 3,
            })
        );
        assert!(matches!(
            decode_value(&[], PrimitiveType::Int64),
            Err(ValueError::LengthMismatch { expected: 8, actual: 0, .. })
        ));
        assert!(matches!(
            decode_value(&[1, 0], PrimitiveType::Bool),
            Err(ValueError::LengthMismatch { expected: 1, actual: 2, .. })
        ));
    }

    #[test]
    fn test_decode_bool_strict() {
        assert_eq!(decode_value(&[0x00], PrimitiveType::Bool), Ok(Value::Bool(false)));
        assert_eq!(decode_value(&[0x01], PrimitiveType::Bool), Ok(Value::Bool(true)));
        assert_eq!(
            decode_value(&[0x02], PrimitiveType::Bool),
            Err(ValueError::InvalidBool { value: 0x02 })
        );
        assert_eq!(
            decode_value(&[0xFF], PrimitiveType::Bool),
            Err(ValueError::InvalidBool { value: 0xFF })
        );
    }

    #[test]
    fn test_decode_string_zero_copy() {
        let payload = b"sensor-1".to_vec();
        let value = decode_value(&payload, PrimitiveType::String).unwrap();
        assert!(matches!(value, Value::String(Cow::Borrowed("sensor-1"))));
        assert_eq!(decode_value(b"", PrimitiveType::String), Ok(Value::from("")));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert_eq!(
            decode_value(&[b'o', b'k', 0xC3, 0x28], PrimitiveType::String),
            Err(ValueError::InvalidUtf8 { valid_up_to: 2 })
        );
    }

    #[test]
    fn test_decode_bytes_any_length() {
        assert_eq!(
            decode_value(&[], PrimitiveType::Bytes),
            Ok(Value::Bytes(Cow::Borrowed(&[])))
        );
        let raw = [0xC3u8, 0x28];
        assert_eq!(decode_value(&raw, PrimitiveType::Bytes), Ok(Value::from(&raw[..])));
    }

    #[test]
    fn test_every_type_roundtrips_at_extremes() {
        let values = [
            Value::Bool(true),
            Value::Int8(i8::MIN),
            Value::Int16(i16::MAX),
            Value::Int32(i32::MIN),
            Value::Int64(i64::MIN),
            Value::UInt8(u8::MAX),
            Value::UInt16(0),
            Value::UInt32(u32::MAX),
            Value::UInt64(u64::MAX),
            Value::from("∑ unicode"),
            Value::from(vec![0u8; 255]),
        ];
        for value in values {
            let ty = value.primitive_type();
            let payload = encode_value(&value, ty).unwrap();
            if let Some(width) = ty.width() {
                assert_eq!(payload.len(), width, "{ty}");
            }
            assert_eq!(decode_value(&payload, ty).unwrap(), value, "{ty}");
        }
    }
}

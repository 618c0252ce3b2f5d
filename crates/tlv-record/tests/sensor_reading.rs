//! End-to-end encoding of a hand-written record type.

use lazy_static::lazy_static;
use proptest::prelude::*;

use tlv_record::{
    decode, decode_into, encode, validate_required, AccessError, DecodeError, EncodeError,
    FieldAccessor, FrameReader, PrimitiveType, Record, Schema, Value, ValueError,
};

lazy_static! {
    static ref SENSOR_READING: Schema = Schema::builder("sensor_reading")
        .required("id", PrimitiveType::UInt32)
        .required("name", PrimitiveType::String)
        .required("active", PrimitiveType::Bool)
        .optional("offset", PrimitiveType::Int16)
        .optional("tag", PrimitiveType::Bytes)
        .build()
        .unwrap();
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SensorReading {
    id: u32,
    name: String,
    active: bool,
    offset: Option<i16>,
    tag: Option<Vec<u8>>,
}

impl FieldAccessor for SensorReading {
    fn get_field(&self, index: u8) -> Option<Value<'_>> {
        match index {
            0 => Some(Value::UInt32(self.id)),
            1 => Some(Value::from(self.name.as_str())),
            2 => Some(Value::Bool(self.active)),
            3 => self.offset.map(Value::Int16),
            4 => self.tag.as_deref().map(Value::from),
            _ => None,
        }
    }

    fn set_field(&mut self, index: u8, value: Value<'_>) -> Result<(), AccessError> {
        let found = value.primitive_type();
        match (index, value) {
            (0, Value::UInt32(v)) => self.id = v,
            (1, Value::String(s)) => self.name = s.into_owned(),
            (2, Value::Bool(b)) => self.active = b,
            (3, Value::Int16(v)) => self.offset = Some(v),
            (4, Value::Bytes(b)) => self.tag = Some(b.into_owned()),
            (0..=4, _) => {
                let expected = SENSOR_READING.fields()[index as usize].ty;
                return Err(AccessError::TypeMismatch { index, expected, found });
            }
            _ => return Err(AccessError::NoSuchField { index }),
        }
        Ok(())
    }
}

impl Record for SensorReading {
    fn schema() -> &'static Schema {
        &SENSOR_READING
    }
}

/// Same layout, but refuses to store an empty name.
#[derive(Debug, Default)]
struct NonEmptyName(SensorReading);

impl FieldAccessor for NonEmptyName {
    fn get_field(&self, index: u8) -> Option<Value<'_>> {
        self.0.get_field(index)
    }

    fn set_field(&mut self, index: u8, value: Value<'_>) -> Result<(), AccessError> {
        if index == 1 && value.as_str() == Some("") {
            return Err(AccessError::Rejected {
                index,
                reason: "name must not be empty".to_string(),
            });
        }
        self.0.set_field(index, value)
    }
}

impl Record for NonEmptyName {
    fn schema() -> &'static Schema {
        &SENSOR_READING
    }
}

fn sample() -> SensorReading {
    SensorReading {
        id: 0x0102_0304,
        name: "boiler".to_string(),
        active: true,
        offset: Some(-3),
        tag: None,
    }
}

#[test]
fn test_wire_layout() {
    let bytes = encode(&sample()).unwrap();
    #[rustfmt::skip]
    let expected = vec![
        0x00, 0x04, 0x04, 0x03, 0x02, 0x01,
        0x01, 0x06, b'b', b'o', b'i', b'l', b'e', b'r',
        0x02, 0x01, 0x01,
        0x03, 0x02, 0xFD, 0xFF,
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn test_roundtrip() {
    let reading = SensorReading {
        tag: Some(vec![0xDE, 0xAD]),
        ..sample()
    };
    let bytes = encode(&reading).unwrap();
    let decoded: SensorReading = decode(&bytes).unwrap();
    assert_eq!(decoded, reading);
    assert_eq!(validate_required(&SENSOR_READING, &decoded), Ok(()));
}

#[test]
fn test_decode_into_keeps_untouched_fields() {
    let mut target = SensorReading {
        tag: Some(vec![1]),
        ..SensorReading::default()
    };
    // Only `id` on the wire.
    let count = decode_into(&[0x00, 0x04, 9, 0, 0, 0], &mut target).unwrap();
    assert_eq!(count, 1);
    assert_eq!(target.id, 9);
    assert_eq!(target.tag, Some(vec![1]));
}

#[test]
fn test_name_too_long() {
    let reading = SensorReading {
        name: "n".repeat(256),
        ..sample()
    };
    let err = encode(&reading).unwrap_err();
    assert_eq!(
        err,
        EncodeError::Value {
            index: 1,
            source: ValueError::PayloadTooLarge {
                ty: PrimitiveType::String,
                len: 256,
                max: 255,
            },
        }
    );
    assert_eq!(err.code().code(), "E002");
}

#[test]
fn test_accessor_rejection() {
    let bytes = encode(&SensorReading {
        name: String::new(),
        ..sample()
    })
    .unwrap();
    let err = decode::<NonEmptyName>(&bytes).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Access {
            index: 1,
            source: AccessError::Rejected {
                index: 1,
                reason: "name must not be empty".to_string(),
            },
        }
    );
}

#[test]
fn test_wrong_width_for_declared_type() {
    // `offset` is Int16 but the frame carries 4 bytes.
    let err = decode::<SensorReading>(&[0x03, 0x04, 0, 0, 0, 0]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Value {
            index: 3,
            source: ValueError::LengthMismatch {
                ty: PrimitiveType::Int16,
                expected: 2,
                actual: 4,
            },
        }
    );
}

fn arb_reading() -> impl Strategy<Value = SensorReading> {
    (
        any::<u32>(),
        "[a-z0-9 ]{0,40}",
        any::<bool>(),
        proptest::option::of(any::<i16>()),
        proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)),
    )
        .prop_map(|(id, name, active, offset, tag)| SensorReading {
            id,
            name,
            active,
            offset,
            tag,
        })
}

proptest! {
    #[test]
    fn prop_roundtrip(reading in arb_reading()) {
        let bytes = encode(&reading).unwrap();
        let decoded: SensorReading = decode(&bytes).unwrap();
        prop_assert_eq!(decoded, reading);
    }

    #[test]
    fn prop_encoded_length(reading in arb_reading()) {
        let bytes = encode(&reading).unwrap();
        let mut expected = 2 + 4 + 2 + reading.name.len() + 2 + 1;
        if reading.offset.is_some() {
            expected += 2 + 2;
        }
        if let Some(tag) = &reading.tag {
            expected += 2 + tag.len();
        }
        prop_assert_eq!(bytes.len(), expected);
    }

    #[test]
    fn prop_absent_optionals_add_nothing(reading in arb_reading()) {
        let bare = SensorReading { offset: None, tag: None, ..reading.clone() };
        let full = encode(&reading).unwrap();
        let prefix = encode(&bare).unwrap();
        prop_assert!(full.starts_with(&prefix));

        let decoded: SensorReading = decode(&prefix).unwrap();
        prop_assert_eq!(encode(&decoded).unwrap(), prefix);
    }

    #[test]
    fn prop_truncated_mid_frame(reading in arb_reading(), cut in any::<proptest::sample::Index>()) {
        let bytes = encode(&reading).unwrap();
        let mut boundaries = vec![0];
        for frame in FrameReader::new(&bytes) {
            let end = boundaries.last().copied().unwrap_or(0);
            boundaries.push(end + frame.unwrap().encoded_len());
        }
        let cut = cut.index(bytes.len());
        prop_assume!(!boundaries.contains(&cut));

        let result = decode::<SensorReading>(&bytes[..cut]);
        prop_assert!(
            matches!(result, Err(DecodeError::TruncatedStream { .. })),
            "expected truncation error, got {:?}",
            result
        );
    }

    #[test]
    fn prop_arbitrary_input_never_panics(input in proptest::collection::vec(any::<u8>(), 0..128)) {
        let _ = decode::<SensorReading>(&input);
    }
}

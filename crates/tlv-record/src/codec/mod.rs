//! Binary encoding/decoding of records.
//!
//! Layered bottom-up: byte [`primitives`], TLV [`frame`]s, single
//! [`value`] payloads, schema-ordered [`fields`], and whole [`record`]s.

pub mod fields;
pub mod frame;
pub mod primitives;
pub mod record;
pub mod value;

pub use fields::{enumerate_fields, EnumeratedField, FieldEnumerator};
pub use frame::{Frame, FrameReader};
pub use primitives::{Reader, Writer};
pub use record::{
    decode, decode_into, decode_record, decode_record_with_options, encode, encode_record,
    DecodeOptions,
};
pub use value::{decode_value, encode_value, Payload};

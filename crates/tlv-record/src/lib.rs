//! tlv-record: schema-driven TLV encoding for flat records.
//!
//! This crate encodes records of primitive-typed fields into a compact
//! tag-length-value byte stream and decodes them back, guided by a
//! [`Schema`] that fixes each field's index, type and presence.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tlv_record::{decode_record, encode_record, DynamicRecord, PrimitiveType, Schema, Value};
//!
//! let schema = Arc::new(
//!     Schema::builder("reading")
//!         .required("sensor", PrimitiveType::UInt8)
//!         .optional("label", PrimitiveType::String)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let record = DynamicRecord::new(schema.clone()).with("sensor", 5u8).unwrap();
//!
//! // Absent optional fields take no space.
//! let bytes = encode_record(&schema, &record).unwrap();
//! assert_eq!(bytes, [0x00, 0x01, 0x05]);
//!
//! let mut decoded = DynamicRecord::new(schema.clone());
//! decode_record(&schema, &bytes, &mut decoded).unwrap();
//! assert_eq!(decoded.get("sensor"), Some(&Value::UInt8(5)));
//! ```
//!
//! Types with a fixed layout implement [`Record`] and use [`encode`] and
//! [`decode`] directly.
//!
//! # Modules
//!
//! - [`model`]: Schemas, primitive types, values, record access traits
//! - [`codec`]: Frame, value and record encoding/decoding
//! - [`validate`]: Required-field and type checks on decoded records
//! - [`error`]: Error types
//! - [`limits`]: Wire-format limits
//!
//! # Wire Format
//!
//! A record is a concatenation of frames, one per present field, in
//! ascending index order:
//!
//! ```text
//! +-------------+-----------+---------------------+
//! | index (u8)  | len (u8)  | payload (len bytes) |
//! +-------------+-----------+---------------------+
//! ```
//!
//! Integers are little-endian at their exact width, `Bool` is one byte
//! (`0x00`/`0x01`), and strings and byte sequences are stored raw. There
//! is no header or terminator; a payload is limited to 255 bytes.
//!
//! # Security
//!
//! The decoder handles untrusted input without panicking: lengths are
//! bounds-checked against the remaining input, payload lengths are checked
//! against the declared type, and no allocation depends on a length read
//! from the stream.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    decode, decode_into, decode_record, decode_record_with_options, decode_value, encode,
    encode_record, encode_value, enumerate_fields, DecodeOptions, Frame, FrameReader,
};
pub use error::{
    AccessError, DecodeError, EncodeError, ErrorCode, SchemaError, ValidationError, ValueError,
};
pub use model::{
    format_schema_id, DynamicRecord, FieldAccessor, FieldDescriptor, Presence, PrimitiveType,
    Record, Schema, SchemaBuilder, SchemaId, Value,
};
pub use validate::{missing_required, validate_record, validate_required};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Record encoding/decoding.
//!
//! A record is written as one frame per present field, in schema order.
//! Decoding walks the frames left to right, resolves each index against
//! the schema and stores the decoded values through the record's
//! [`FieldAccessor`].

use tracing::{debug, trace, warn};

use crate::codec::fields::enumerate_fields;
use crate::codec::frame::{Frame, FrameReader};
use crate::codec::primitives::Writer;
use crate::codec::value::{decode_value, encode_value};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{FRAME_HEADER_LEN, MAX_FIELDS};
use crate::model::{FieldAccessor, Record, Schema, Value};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a record according to `schema`.
///
/// Absent optional fields are skipped; an absent required field fails with
/// [`EncodeError::MissingRequiredField`]. The first failing field aborts
/// the encode and no bytes are returned.
pub fn encode_record<R: FieldAccessor + ?Sized>(
    schema: &Schema,
    record: &R,
) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(schema.len() * (FRAME_HEADER_LEN + 4));
    let mut frames = 0usize;

    for field in enumerate_fields(schema, record) {
        let descriptor = field.descriptor;
        let index = descriptor.index;

        let Some(value) = field.value else {
            if descriptor.presence.is_required() {
                return Err(EncodeError::MissingRequiredField {
                    index,
                    name: descriptor.name.to_string(),
                });
            }
            trace!(index, "Skipping absent optional field");
            continue;
        };

        let payload = encode_value(&value, descriptor.ty)
            .map_err(|source| EncodeError::Value { index, source })?;
        let frame = Frame::from_payload(index, &payload);
        trace!(index, len = frame.len(), ty = %descriptor.ty, "Writing frame");
        frame.write(&mut writer);
        frames += 1;
    }

    debug!(
        schema = schema.name(),
        frames,
        bytes = writer.len(),
        "Encoded record"
    );
    Ok(writer.into_bytes())
}

/// Encodes a [`Record`] with its own schema.
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>, EncodeError> {
    encode_record(R::schema(), record)
}

// =============================================================================
// DECODING
// =============================================================================

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail with [`DecodeError::DuplicateField`] when a stream carries the
    /// same field index twice.
    ///
    /// When disabled (the default) the later frame wins.
    pub reject_duplicate_fields: bool,

    /// Fail with [`DecodeError::UnknownFieldIndex`] on frames whose index
    /// the schema does not declare.
    ///
    /// Enabled by default. Disabling it lets a reader with an older schema
    /// skip trailing fields added by a newer writer. Skipped frames are
    /// still bounds-checked.
    pub reject_unknown_fields: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            reject_duplicate_fields: false,
            reject_unknown_fields: true,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject both duplicate and unknown fields.
    pub fn strict() -> Self {
        Self {
            reject_duplicate_fields: true,
            reject_unknown_fields: true,
        }
    }

    pub fn reject_duplicate_fields(mut self, reject: bool) -> Self {
        self.reject_duplicate_fields = reject;
        self
    }

    pub fn reject_unknown_fields(mut self, reject: bool) -> Self {
        self.reject_unknown_fields = reject;
        self
    }
}

/// Decodes `input` into `target` with default options.
///
/// Returns the number of fields written into the target.
pub fn decode_record<R: FieldAccessor + ?Sized>(
    schema: &Schema,
    input: &[u8],
    target: &mut R,
) -> Result<usize, DecodeError> {
    decode_record_with_options(schema, input, target, DecodeOptions::default())
}

/// Decodes `input` into `target`.
///
/// The whole stream is parsed and every payload decoded before the target
/// is touched, so a malformed stream leaves the target unchanged. Only an
/// error from the target's own [`FieldAccessor::set_field`] can leave it
/// partially updated.
///
/// Whether every required field was present is not checked here; see
/// [`validate_required`](crate::validate::validate_required).
pub fn decode_record_with_options<R: FieldAccessor + ?Sized>(
    schema: &Schema,
    input: &[u8],
    target: &mut R,
    options: DecodeOptions,
) -> Result<usize, DecodeError> {
    let decoded = decode_fields(schema, input, options)?;
    let count = decoded.len();

    for (index, value) in decoded {
        target
            .set_field(index, value)
            .map_err(|source| DecodeError::Access { index, source })?;
    }

    debug!(
        schema = schema.name(),
        fields = count,
        bytes = input.len(),
        "Decoded record"
    );
    Ok(count)
}

/// Decodes a [`Record`] in place with its own schema.
pub fn decode_into<R: Record>(input: &[u8], target: &mut R) -> Result<usize, DecodeError> {
    decode_record(R::schema(), input, target)
}

/// Decodes a fresh [`Record`] starting from its default value.
pub fn decode<R: Record + Default>(input: &[u8]) -> Result<R, DecodeError> {
    let mut record = R::default();
    decode_into(input, &mut record)?;
    Ok(record)
}

/// Parses every frame and decodes its payload against the schema.
///
/// Values borrow from `input`. A repeated index keeps only its last value.
fn decode_fields<'a>(
    schema: &Schema,
    input: &'a [u8],
    options: DecodeOptions,
) -> Result<Vec<(u8, Value<'a>)>, DecodeError> {
    let mut decoded: Vec<(u8, Value<'a>)> = Vec::with_capacity(schema.len());
    let mut slots = [None::<usize>; MAX_FIELDS];

    for frame in FrameReader::new(input) {
        let frame = frame?;
        let index = frame.index();

        let Some(descriptor) = schema.field(index) else {
            if options.reject_unknown_fields {
                return Err(DecodeError::UnknownFieldIndex {
                    index,
                    field_count: schema.len(),
                });
            }
            debug!(index, len = frame.len(), "Skipping frame for undeclared field");
            continue;
        };

        let value = decode_value(frame.payload(), descriptor.ty)
            .map_err(|source| DecodeError::Value { index, source })?;
        trace!(index, len = frame.len(), ty = %descriptor.ty, "Read frame");

        match slots[index as usize] {
            Some(slot) => {
                if options.reject_duplicate_fields {
                    return Err(DecodeError::DuplicateField { index });
                }
                warn!(index, "Field repeated in stream, keeping the later value");
                decoded[slot].1 = value;
            }
            None => {
                slots[index as usize] = Some(decoded.len());
                decoded.push((index, value));
            }
        }
    }

    Ok(decoded)
}

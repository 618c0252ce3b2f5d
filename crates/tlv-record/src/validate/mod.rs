//! Record validation against a schema.
//!
//! Encoding already refuses an absent required field, but decoding does
//! not: a stream that simply omits a required frame decodes without error.
//! Callers that need the guarantee check the decoded record here.
//!
//! **Note:** These checks are advisory. They read the record through its
//! [`FieldAccessor`] and never modify it.

use crate::error::ValidationError;
use crate::model::{FieldAccessor, FieldDescriptor, Schema};

/// Returns the required fields for which `record` holds no value.
pub fn missing_required<'s, R: FieldAccessor + ?Sized>(
    schema: &'s Schema,
    record: &R,
) -> Vec<&'s FieldDescriptor> {
    schema
        .required_fields()
        .filter(|field| record.get_field(field.index).is_none())
        .collect()
}

/// Fails on the first required field that `record` leaves absent.
pub fn validate_required<R: FieldAccessor + ?Sized>(
    schema: &Schema,
    record: &R,
) -> Result<(), ValidationError> {
    match missing_required(schema, record).first() {
        Some(field) => Err(ValidationError::MissingRequiredField {
            index: field.index,
            name: field.name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Validates presence and value types of every field.
///
/// Catches the same conditions the encoder would, without encoding.
pub fn validate_record<R: FieldAccessor + ?Sized>(
    schema: &Schema,
    record: &R,
) -> Result<(), ValidationError> {
    for field in schema.fields() {
        match record.get_field(field.index) {
            Some(value) => {
                let found = value.primitive_type();
                if found != field.ty {
                    return Err(ValidationError::TypeMismatch {
                        index: field.index,
                        name: field.name.to_string(),
                        expected: field.ty,
                        found,
                    });
                }
            }
            None if field.presence.is_required() => {
                return Err(ValidationError::MissingRequiredField {
                    index: field.index,
                    name: field.name.to_string(),
                });
            }
            None => {}
        }
    }

    Ok(())
}

//! Field enumeration: pairs each schema field with a record's current value.

use std::slice;

use crate::model::{FieldAccessor, FieldDescriptor, Schema, Value};

/// One field as seen by the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumeratedField<'s, 'r> {
    pub descriptor: &'s FieldDescriptor,
    /// `None` when the record has no value for this field.
    pub value: Option<Value<'r>>,
}

impl EnumeratedField<'_, '_> {
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Iterator over a record's fields in schema (index) order.
///
/// The order depends only on the schema, so encoder and decoder agree on
/// it for the same schema.
#[derive(Debug)]
pub struct FieldEnumerator<'s, 'r, R: ?Sized> {
    fields: slice::Iter<'s, FieldDescriptor>,
    record: &'r R,
}

impl<'s, 'r, R: FieldAccessor + ?Sized> Iterator for FieldEnumerator<'s, 'r, R> {
    type Item = EnumeratedField<'s, 'r>;

    fn next(&mut self) -> Option<Self::Item> {
        let descriptor = self.fields.next()?;
        Some(EnumeratedField {
            descriptor,
            value: self.record.get_field(descriptor.index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fields.size_hint()
    }
}

impl<R: FieldAccessor + ?Sized> ExactSizeIterator for FieldEnumerator<'_, '_, R> {}

/// Enumerates `record`'s fields according to `schema`.
pub fn enumerate_fields<'s, 'r, R: FieldAccessor + ?Sized>(
    schema: &'s Schema,
    record: &'r R,
) -> FieldEnumerator<'s, 'r, R> {
    FieldEnumerator {
        fields: schema.fields().iter(),
        record,
    }
}

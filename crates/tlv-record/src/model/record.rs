//! Record access: the seam between the codec and caller-owned records.
//!
//! The codec never touches a record's internals. It asks a
//! [`FieldAccessor`] for values by index and hands decoded values back the
//! same way; [`Record`] additionally ties a type to its static schema.

use std::sync::Arc;

use crate::error::AccessError;
use crate::model::{Schema, Value};

/// Per-index get/set access to a record's fields.
pub trait FieldAccessor {
    /// Returns the value of field `index`, or `None` when it is absent.
    fn get_field(&self, index: u8) -> Option<Value<'_>>;

    /// Stores a decoded value into field `index`.
    fn set_field(&mut self, index: u8, value: Value<'_>) -> Result<(), AccessError>;
}

/// A record type with a fixed schema.
///
/// ```rust
/// use std::sync::OnceLock;
/// use tlv_record::{AccessError, FieldAccessor, PrimitiveType, Record, Schema, Value};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Ping {
///     seq: u32,
///     note: Option<String>,
/// }
///
/// impl FieldAccessor for Ping {
///     fn get_field(&self, index: u8) -> Option<Value<'_>> {
///         match index {
///             0 => Some(Value::UInt32(self.seq)),
///             1 => self.note.as_deref().map(Value::from),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, index: u8, value: Value<'_>) -> Result<(), AccessError> {
///         let found = value.primitive_type();
///         match (index, value) {
///             (0, Value::UInt32(v)) => self.seq = v,
///             (1, Value::String(s)) => self.note = Some(s.into_owned()),
///             (0 | 1, _) => {
///                 let expected = Self::schema().fields()[index as usize].ty;
///                 return Err(AccessError::TypeMismatch { index, expected, found });
///             }
///             _ => return Err(AccessError::NoSuchField { index }),
///         }
///         Ok(())
///     }
/// }
///
/// impl Record for Ping {
///     fn schema() -> &'static Schema {
///         static SCHEMA: OnceLock<Schema> = OnceLock::new();
///         SCHEMA.get_or_init(|| {
///             Schema::builder("ping")
///                 .required("seq", PrimitiveType::UInt32)
///                 .optional("note", PrimitiveType::String)
///                 .build()
///                 .unwrap()
///         })
///     }
/// }
///
/// let ping = Ping { seq: 7, note: None };
/// let bytes = tlv_record::encode(&ping).unwrap();
/// assert_eq!(bytes, [0x00, 0x04, 0x07, 0x00, 0x00, 0x00]);
/// assert_eq!(tlv_record::decode::<Ping>(&bytes).unwrap(), ping);
/// ```
pub trait Record: FieldAccessor {
    /// Returns the schema shared by all instances of this type.
    fn schema() -> &'static Schema;
}

/// A schema-backed record with one optional slot per field.
///
/// Useful for tooling and tests where no bespoke struct exists. Values are
/// type-checked against the schema on every store.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    schema: Arc<Schema>,
    values: Vec<Option<Value<'static>>>,
}

impl DynamicRecord {
    /// Creates a record with every field absent.
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = vec![None; schema.len()];
        Self { schema, values }
    }

    /// Returns the record's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the value of a field by name.
    pub fn get(&self, name: &str) -> Option<&Value<'static>> {
        let index = self.schema.index_of(name)?;
        self.values[index as usize].as_ref()
    }

    /// Sets a field by name.
    pub fn set<'v>(&mut self, name: &str, value: impl Into<Value<'v>>) -> Result<(), AccessError> {
        let index = self
            .schema
            .index_of(name)
            .ok_or_else(|| AccessError::UnknownName { name: name.to_string() })?;
        self.set_field(index, value.into())
    }

    /// Sets a field by name, returning the record for chaining.
    pub fn with<'v>(mut self, name: &str, value: impl Into<Value<'v>>) -> Result<Self, AccessError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Clears a field by name, returning its previous value.
    pub fn clear(&mut self, name: &str) -> Option<Value<'static>> {
        let index = self.schema.index_of(name)?;
        self.values[index as usize].take()
    }

    /// Iterates over present fields as (index, value).
    pub fn present(&self) -> impl Iterator<Item = (u8, &Value<'static>)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (i as u8, v)))
    }
}

impl FieldAccessor for DynamicRecord {
    fn get_field(&self, index: u8) -> Option<Value<'_>> {
        self.values.get(index as usize)?.as_ref().map(Value::reborrow)
    }

    fn set_field(&mut self, index: u8, value: Value<'_>) -> Result<(), AccessError> {
        let field = self.schema.field(index).ok_or(AccessError::NoSuchField { index })?;
        let found = value.primitive_type();
        if found != field.ty {
            return Err(AccessError::TypeMismatch {
                index,
                expected: field.ty,
                found,
            });
        }
        self.values[index as usize] = Some(value.into_owned());
        Ok(())
    }
}

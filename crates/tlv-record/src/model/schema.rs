//! Record schemas: the immutable index → (name, type, presence) table.
//!
//! A schema is built once with [`SchemaBuilder`], which assigns each field
//! the next free index and rejects malformed declarations up front. After
//! that the codec only reads it.
//!
//! ```rust
//! use tlv_record::{PrimitiveType, Schema};
//!
//! let schema = Schema::builder("reading")
//!     .required("sensor", PrimitiveType::UInt8)
//!     .optional("label", PrimitiveType::String)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.len(), 2);
//! assert_eq!(schema.index_of("label"), Some(1));
//! ```

use std::borrow::Cow;
use std::fmt;

use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};

use crate::error::SchemaError;
use crate::limits::MAX_FIELDS;
use crate::model::PrimitiveType;

/// Whether a field must carry a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Always encoded; encoding fails when the record has no value.
    Required,
    /// May be absent; absent values contribute no bytes.
    Optional,
}

impl Presence {
    pub fn is_required(self) -> bool {
        self == Presence::Required
    }

    fn code(self) -> u8 {
        match self {
            Presence::Required => 0,
            Presence::Optional => 1,
        }
    }
}

/// One slot of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Position in the schema, also the tag written on the wire.
    pub index: u8,
    /// Field name (not part of the wire format).
    pub name: Cow<'static, str>,
    /// Declared type.
    pub ty: PrimitiveType,
    pub presence: Presence,
}

/// A 16-byte schema fingerprint.
pub type SchemaId = [u8; 16];

/// Immutable description of a record type.
#[derive(Debug, Clone)]
pub struct Schema {
    name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
    by_name: FxHashMap<Cow<'static, str>, u8>,
    fingerprint: SchemaId,
}

impl Schema {
    /// Starts building a schema with the given record name.
    pub fn builder(name: impl Into<Cow<'static, str>>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Returns the record name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns all fields in index order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the field with the given index, if declared.
    #[inline]
    pub fn field(&self, index: u8) -> Option<&FieldDescriptor> {
        self.fields.get(index as usize)
    }

    /// Returns the field at `index`, failing for indices past the end.
    pub fn try_field(&self, index: usize) -> Result<&FieldDescriptor, SchemaError> {
        self.fields.get(index).ok_or(SchemaError::IndexOutOfRange {
            index,
            len: self.fields.len(),
        })
    }

    /// Looks up a field index by name.
    pub fn index_of(&self, name: &str) -> Option<u8> {
        self.by_name.get(name).copied()
    }

    /// Looks up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index_of(name).and_then(|index| self.field(index))
    }

    /// Returns the fingerprint of the wire-relevant layout.
    ///
    /// Covers each field's index, type and presence; field and record names
    /// do not contribute. Two peers with equal fingerprints encode and
    /// decode identically.
    pub fn fingerprint(&self) -> SchemaId {
        self.fingerprint
    }

    /// Iterates over the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.presence.is_required())
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for Schema {}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            let marker = if field.presence.is_required() { "" } else { "?" };
            write!(f, " {}: {}{}", field.index, field.ty, marker)?;
        }
        f.write_str(" }")
    }
}

/// Formats a schema fingerprint as lowercase hex.
pub fn format_schema_id(id: &SchemaId) -> String {
    id.iter().map(|b| format!("{b:02x}")).collect()
}

/// SHA-256 over (field count, then index/type/presence per field), truncated.
fn compute_fingerprint(fields: &[FieldDescriptor]) -> SchemaId {
    let mut hasher = Sha256::new();
    hasher.update((fields.len() as u16).to_le_bytes());
    for field in fields {
        hasher.update([field.index, field.ty.code(), field.presence.code()]);
    }
    let hash = hasher.finalize();

    let mut id = [0u8; 16];
    id.copy_from_slice(&hash[..16]);
    id
}

/// Builder for [`Schema`].
///
/// Fields receive consecutive indices in declaration order. Errors are
/// held until [`build`](SchemaBuilder::build) so declarations can be
/// chained.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
    error: Option<SchemaError>,
}

impl SchemaBuilder {
    /// Creates an empty builder.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            error: None,
        }
    }

    /// Declares a required field.
    pub fn required(self, name: impl Into<Cow<'static, str>>, ty: PrimitiveType) -> Self {
        self.field(name, ty, Presence::Required)
    }

    /// Declares an optional field.
    pub fn optional(self, name: impl Into<Cow<'static, str>>, ty: PrimitiveType) -> Self {
        self.field(name, ty, Presence::Optional)
    }

    /// Declares a field at the next index.
    pub fn field(
        mut self,
        name: impl Into<Cow<'static, str>>,
        ty: PrimitiveType,
        presence: Presence,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        let Ok(index) = u8::try_from(self.fields.len()) else {
            self.error = Some(SchemaError::TooManyFields { max: MAX_FIELDS });
            return self;
        };
        self.fields.push(FieldDescriptor {
            index,
            name: name.into(),
            ty,
            presence,
        });
        self
    }

    /// Declares a field from a type name such as `"uint32"` or `"string"`.
    ///
    /// Names without an explicit integer width (`"int"`, `"usize"`) fail
    /// the build with [`SchemaError::UnspecifiedWidth`]; unknown names with
    /// [`SchemaError::UnsupportedType`].
    pub fn field_named(
        mut self,
        name: impl Into<Cow<'static, str>>,
        type_name: &str,
        presence: Presence,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        match type_name.parse::<PrimitiveType>() {
            Ok(ty) => self.field(name, ty, presence),
            Err(e) => {
                self.error = Some(e);
                self
            }
        }
    }

    /// Validates the declarations and builds the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let mut by_name =
            FxHashMap::with_capacity_and_hasher(self.fields.len(), Default::default());
        for field in &self.fields {
            if by_name.insert(field.name.clone(), field.index).is_some() {
                return Err(SchemaError::DuplicateFieldName {
                    name: field.name.to_string(),
                });
            }
        }

        let fingerprint = compute_fingerprint(&self.fields);
        Ok(Schema {
            name: self.name,
            fields: self.fields,
            by_name,
            fingerprint,
        })
    }
}

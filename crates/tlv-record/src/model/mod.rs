//! Data model types.
//!
//! - Primitive field types and values
//! - Schemas (field descriptor tables)
//! - Record access traits and a schema-backed dynamic record

pub mod record;
pub mod schema;
pub mod types;
pub mod value;

pub use record::{DynamicRecord, FieldAccessor, Record};
pub use schema::{format_schema_id, FieldDescriptor, Presence, Schema, SchemaBuilder, SchemaId};
pub use types::PrimitiveType;
pub use value::Value;

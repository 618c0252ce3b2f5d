//! Error types for schema construction, encoding, decoding and validation.

use thiserror::Error;

use crate::model::PrimitiveType;

/// Error classes of the codec.
///
/// Every concrete error maps onto exactly one class, so callers can branch
/// on the class without matching nested variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Malformed or inconsistent schema
    Schema,
    /// E002: Value encodes to more than 255 bytes
    PayloadTooLarge,
    /// E003: Stream ends in the middle of a frame
    TruncatedStream,
    /// E004: Frame references an index the schema does not declare
    UnknownFieldIndex,
    /// E005: Bool payload other than 0x00/0x01
    InvalidBool,
    /// E006: Payload length differs from the declared type's width
    LengthMismatch,
    /// E007: String payload is not valid UTF-8
    InvalidUtf8,
    /// E008: Declared type outside the supported set
    UnsupportedType,
    /// E009: Record-side failure (missing required value, type mismatch, rejected value)
    FieldAccess,
    /// E010: Stream repeats a field index (strict decoding only)
    DuplicateField,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Schema => "E001",
            ErrorCode::PayloadTooLarge => "E002",
            ErrorCode::TruncatedStream => "E003",
            ErrorCode::UnknownFieldIndex => "E004",
            ErrorCode::InvalidBool => "E005",
            ErrorCode::LengthMismatch => "E006",
            ErrorCode::InvalidUtf8 => "E007",
            ErrorCode::UnsupportedType => "E008",
            ErrorCode::FieldAccess => "E009",
            ErrorCode::DuplicateField => "E010",
        }
    }
}

/// Error while building or querying a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("[E001] type {name:?} has no explicit width (use int8..int64 or uint8..uint64)")]
    UnspecifiedWidth { name: String },

    #[error("[E008] unsupported field type {name:?}")]
    UnsupportedType { name: String },

    #[error("[E001] schema declares more than {max} fields")]
    TooManyFields { max: usize },

    #[error("[E001] duplicate field name {name:?}")]
    DuplicateFieldName { name: String },

    #[error("[E001] field index {index} out of range (schema has {len} fields)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SchemaError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchemaError::UnsupportedType { .. } => ErrorCode::UnsupportedType,
            _ => ErrorCode::Schema,
        }
    }
}

/// Error converting a single value to or from its payload.
///
/// Carries no field index; the record codec wraps it together with the
/// index of the field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("[E002] {ty} payload of {len} bytes exceeds maximum {max}")]
    PayloadTooLarge {
        ty: PrimitiveType,
        len: usize,
        max: usize,
    },

    #[error("[E009] value of type {found} given for field declared as {expected}")]
    TypeMismatch {
        expected: PrimitiveType,
        found: PrimitiveType,
    },

    #[error("[E005] invalid bool value: {value:#04x} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("[E006] {ty} payload is {actual} bytes, expected {expected}")]
    LengthMismatch {
        ty: PrimitiveType,
        expected: usize,
        actual: usize,
    },

    #[error("[E007] invalid UTF-8 in string payload (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

impl ValueError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValueError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            ValueError::TypeMismatch { .. } => ErrorCode::FieldAccess,
            ValueError::InvalidBool { .. } => ErrorCode::InvalidBool,
            ValueError::LengthMismatch { .. } => ErrorCode::LengthMismatch,
            ValueError::InvalidUtf8 { .. } => ErrorCode::InvalidUtf8,
        }
    }
}

/// Error raised by a [`FieldAccessor`](crate::FieldAccessor) when it cannot
/// store a decoded value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("[E009] record has no field with index {index}")]
    NoSuchField { index: u8 },

    #[error("[E009] record has no field named {name:?}")]
    UnknownName { name: String },

    #[error("[E009] field {index} holds {expected}, cannot store {found}")]
    TypeMismatch {
        index: u8,
        expected: PrimitiveType,
        found: PrimitiveType,
    },

    #[error("[E009] field {index} rejected value: {reason}")]
    Rejected { index: u8, reason: String },
}

impl AccessError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::FieldAccess
    }
}

/// Error during record encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("[E009] required field {index} ({name}) has no value")]
    MissingRequiredField { index: u8, name: String },

    #[error("field {index}: {source}")]
    Value {
        index: u8,
        #[source]
        source: ValueError,
    },
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EncodeError::MissingRequiredField { .. } => ErrorCode::FieldAccess,
            EncodeError::Value { source, .. } => source.code(),
        }
    }
}

/// Error during record decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[E003] stream truncated in {context} at offset {offset}: need {needed} bytes, {remaining} remain")]
    TruncatedStream {
        context: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("[E004] frame references field index {index}, schema has {field_count} fields")]
    UnknownFieldIndex { index: u8, field_count: usize },

    #[error("[E010] field index {index} appears more than once")]
    DuplicateField { index: u8 },

    #[error("field {index}: {source}")]
    Value {
        index: u8,
        #[source]
        source: ValueError,
    },

    #[error("field {index}: {source}")]
    Access {
        index: u8,
        #[source]
        source: AccessError,
    },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::TruncatedStream { .. } => ErrorCode::TruncatedStream,
            DecodeError::UnknownFieldIndex { .. } => ErrorCode::UnknownFieldIndex,
            DecodeError::DuplicateField { .. } => ErrorCode::DuplicateField,
            DecodeError::Value { source, .. } => source.code(),
            DecodeError::Access { source, .. } => source.code(),
        }
    }
}

/// Error during advisory record validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("[E009] required field {index} ({name}) is absent")]
    MissingRequiredField { index: u8, name: String },

    #[error("[E009] field {index} ({name}) holds {found}, schema declares {expected}")]
    TypeMismatch {
        index: u8,
        name: String,
        expected: PrimitiveType,
        found: PrimitiveType,
    },
}

impl ValidationError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::MissingRequiredField { .. } => ErrorCode::FieldAccess,
            ValidationError::TypeMismatch { .. } => ErrorCode::FieldAccess,
        }
    }
}

//! Wire-format limits.
//!
//! The frame header is two single bytes (field index, payload length), so
//! both the number of addressable fields and the payload size are bounded
//! by what fits in a `u8`.

/// Bytes preceding every payload: field index + payload length.
pub const FRAME_HEADER_LEN: usize = 2;

/// Maximum payload length of a single frame.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// Maximum number of fields in a schema (indices 0..=255).
pub const MAX_FIELDS: usize = u8::MAX as usize + 1;

/// Widest fixed-width payload (64-bit integers).
pub const MAX_FIXED_WIDTH: usize = 8;

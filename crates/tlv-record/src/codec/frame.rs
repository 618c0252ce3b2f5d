//! TLV frames: `field_index (u8) | length (u8) | payload (length bytes)`.
//!
//! A stream is a bare concatenation of frames. There is no header, trailer
//! or overall length; the caller supplies the stream boundary.

use crate::codec::primitives::{Reader, Writer};
use crate::codec::value::Payload;
use crate::error::{DecodeError, ValueError};
use crate::limits::{FRAME_HEADER_LEN, MAX_PAYLOAD_LEN};
use crate::model::PrimitiveType;

/// A single frame borrowing its payload.
///
/// Construction guarantees `payload.len() <= 255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    index: u8,
    payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Creates a frame for field `index`.
    ///
    /// `ty` is only used to describe an oversized payload in the error.
    pub fn new(index: u8, ty: PrimitiveType, payload: &'a [u8]) -> Result<Self, ValueError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(ValueError::PayloadTooLarge {
                ty,
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }
        Ok(Self { index, payload })
    }

    /// Creates a frame for field `index` from an encoded value.
    ///
    /// Infallible: [`encode_value`](crate::codec::encode_value) has already
    /// bounded the payload length.
    pub fn from_payload(index: u8, payload: &'a Payload<'_>) -> Self {
        Self {
            index,
            payload: payload.as_bytes(),
        }
    }

    /// Returns the field index.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Returns the payload.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Returns the payload length as written in the header.
    pub fn len(&self) -> u8 {
        // Bounded by construction.
        self.payload.len() as u8
    }

    /// Returns true for zero-length payloads.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Returns the number of bytes this frame occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_LEN + self.payload.len()
    }

    /// Appends this frame to the writer.
    pub fn write(&self, writer: &mut Writer) {
        writer.write_byte(self.index);
        writer.write_byte(self.len());
        writer.write_bytes(self.payload);
    }
}

/// Iterates over the frames of a stream.
///
/// Yields `Err` once for a frame that runs past the end of the input and
/// then stops.
#[derive(Debug, Clone)]
pub struct FrameReader<'a> {
    reader: Reader<'a>,
    failed: bool,
}

impl<'a> FrameReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(input),
            failed: false,
        }
    }

    /// Returns the offset of the next frame.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    fn read_frame(&mut self) -> Result<Frame<'a>, DecodeError> {
        self.reader.ensure(FRAME_HEADER_LEN, "frame header")?;
        let index = self.reader.read_byte("field index")?;
        let len = self.reader.read_byte("frame length")?;
        let payload = self.reader.read_bytes(len as usize, "frame payload")?;
        Ok(Frame { index, payload })
    }
}

impl<'a> Iterator for FrameReader<'a> {
    type Item = Result<Frame<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let result = self.read_frame();
        self.failed = result.is_err();
        Some(result)
    }
}

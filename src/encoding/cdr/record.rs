// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-layout sample record: `int32 x`, `string name`, `float64 value`.
//!
//! Layout with the default origin (start of buffer):
//!
//! ```text
//! 0..4    encapsulation header 00 01 00 00
//! 4..8    x (i32)
//! 8..12   name length incl. NUL (u32)
//! 12..    name bytes + NUL
//! pad     to a multiple of 8 from the origin
//! ..+8    value (f64)
//! ```

use super::{CdrCursor, CdrEncoder};
use crate::core::Result;

/// Schema name advertised for channels carrying [`SampleRecord`] payloads.
pub const SAMPLE_SCHEMA_NAME: &str = "example_msgs/msg/Sample";

/// Schema encoding for the message definition text.
pub const SAMPLE_SCHEMA_ENCODING: &str = "ros2msg";

/// Message definition of [`SampleRecord`].
pub const SAMPLE_SCHEMA_TEXT: &str = "int32 x\nstring name\nfloat64 value\n";

/// Message encoding of the channel.
pub const SAMPLE_MESSAGE_ENCODING: &str = "cdr";

/// A small typed record serialized as little-endian CDR.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub x: i32,
    pub name: String,
    pub value: f64,
}

impl SampleRecord {
    pub fn new(x: i32, name: impl Into<String>, value: f64) -> Self {
        Self {
            x,
            name: name.into(),
            value,
        }
    }

    /// Encode with alignment measured from the start of the buffer.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.encode_with_origin(0)
    }

    /// Encode with alignment measured from `origin`.
    ///
    /// The payload is built in its own buffer; on error nothing escapes.
    pub fn encode_with_origin(&self, origin: usize) -> Result<Vec<u8>> {
        let mut encoder = CdrEncoder::with_origin(origin);
        encoder.int32(self.x)?;
        encoder.string(&self.name)?;
        encoder.float64(self.value)?;
        Ok(encoder.finish())
    }

    /// Decode a payload produced by [`encode`](Self::encode).
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with_origin(data, 0)
    }

    pub fn decode_with_origin(data: &[u8], origin: usize) -> Result<Self> {
        let mut cursor = CdrCursor::with_origin(data, origin)?;
        let x = cursor.read_i32()?;
        let name = cursor.read_string()?;
        let value = cursor.read_f64()?;
        Ok(Self { x, name, value })
    }
}

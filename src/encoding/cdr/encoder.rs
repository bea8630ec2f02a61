// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR encoder for writing little-endian CDR payloads.
//!
//! Each primitive is aligned to its own width (1, 2, 4 or 8 bytes), measured
//! from an origin offset inside the output buffer. The default origin is the
//! start of the buffer, so the 4-byte encapsulation header counts towards
//! alignment. Encoders composed into a larger payload can pick another origin.

use super::{CDR_HEADER_SIZE, ENCAPSULATION_CDR_LE};
use crate::core::{CodecError, Result};
use crate::types::ByteBuffer;

/// CDR encoder.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robomcap::encoding::cdr::CdrEncoder;
///
/// let mut encoder = CdrEncoder::new();
/// encoder.int32(42)?;
/// encoder.string("hello")?;
/// let data = encoder.finish();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CdrEncoder {
    /// Output buffer, header included
    buffer: ByteBuffer,
    /// Origin offset for alignment calculation
    origin: usize,
}

impl Default for CdrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrEncoder {
    /// Create an encoder that aligns relative to the start of the buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_origin(0)
    }

    /// Create an encoder that aligns relative to `origin`.
    #[must_use]
    pub fn with_origin(origin: usize) -> Self {
        let mut buffer = ByteBuffer::new();
        buffer.put_bytes(&ENCAPSULATION_CDR_LE);
        debug_assert_eq!(buffer.len(), CDR_HEADER_SIZE);
        Self { buffer, origin }
    }

    /// Alignment origin.
    #[must_use]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// Current size of the encoded data, header included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Encoded bytes so far.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Consume the encoder and return the encoded data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer.into_vec()
    }

    fn align(&mut self, size: usize) {
        self.buffer.align(size, self.origin);
    }

    /// Write an 8-bit unsigned integer.
    pub fn uint8(&mut self, value: u8) -> Result<&mut Self> {
        self.buffer.put_u8(value);
        Ok(self)
    }

    /// Write a 16-bit unsigned integer.
    pub fn uint16(&mut self, value: u16) -> Result<&mut Self> {
        self.align(2);
        self.buffer.put_u16(value);
        Ok(self)
    }

    /// Write a 32-bit signed integer.
    pub fn int32(&mut self, value: i32) -> Result<&mut Self> {
        self.align(4);
        self.buffer.put_i32(value);
        Ok(self)
    }

    /// Write a 32-bit unsigned integer.
    pub fn uint32(&mut self, value: u32) -> Result<&mut Self> {
        self.align(4);
        self.buffer.put_u32(value);
        Ok(self)
    }

    /// Write a 64-bit signed integer.
    pub fn int64(&mut self, value: i64) -> Result<&mut Self> {
        self.align(8);
        self.buffer.put_i64(value);
        Ok(self)
    }

    /// Write a 64-bit unsigned integer.
    pub fn uint64(&mut self, value: u64) -> Result<&mut Self> {
        self.align(8);
        self.buffer.put_u64(value);
        Ok(self)
    }

    /// Write a 64-bit double.
    pub fn float64(&mut self, value: f64) -> Result<&mut Self> {
        self.align(8);
        self.buffer.put_f64(value);
        Ok(self)
    }

    /// Write a string: aligned `u32` length (terminator included), the UTF-8
    /// bytes, then one NUL byte.
    ///
    /// Fails without touching the buffer if the string contains a NUL byte,
    /// since a reader would cut it short at the first terminator.
    pub fn string(&mut self, value: &str) -> Result<&mut Self> {
        if let Some(pos) = value.bytes().position(|b| b == 0) {
            return Err(CodecError::encode(
                "CDR",
                format!("string contains a NUL byte at index {pos}"),
            ));
        }
        let encoded_len = u32::try_from(value.len() + 1).map_err(|_| {
            CodecError::encode(
                "CDR",
                format!("string of {} bytes exceeds u32 length", value.len()),
            )
        })?;

        self.uint32(encoded_len)?;
        self.buffer.put_bytes(value.as_bytes()).put_u8(0);
        Ok(self)
    }

    /// Write raw bytes without alignment.
    pub fn bytes(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.buffer.put_bytes(data);
        Ok(self)
    }
}

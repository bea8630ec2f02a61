// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR cursor for reading little-endian CDR payloads with proper alignment.
//!
//! Alignment is `(offset - origin) % size`, mirroring [`CdrEncoder`](super::CdrEncoder).

use byteorder::{ByteOrder, LittleEndian};

use super::{CDR_HEADER_SIZE, ENCAPSULATION_CDR_LE};
use crate::core::{CodecError, Result};
use crate::types::padding_for;

/// Cursor over CDR-encoded data.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robomcap::encoding::cdr::CdrCursor;
///
/// let data = vec![0x00, 0x01, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00];
/// let mut cursor = CdrCursor::new(&data)?;
/// assert_eq!(cursor.read_u32()?, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CdrCursor<'a> {
    /// The data buffer (includes CDR header)
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Origin offset for alignment calculation
    origin: usize,
}

impl<'a> CdrCursor<'a> {
    /// Create a cursor that aligns relative to the start of the buffer.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Self::with_origin(data, 0)
    }

    /// Create a cursor that aligns relative to `origin`.
    ///
    /// Only the little-endian CDR encapsulation is accepted.
    pub fn with_origin(data: &'a [u8], origin: usize) -> Result<Self> {
        if data.len() < CDR_HEADER_SIZE {
            return Err(CodecError::buffer_too_short(CDR_HEADER_SIZE, data.len(), 0));
        }
        if data[..2] != ENCAPSULATION_CDR_LE[..2] {
            return Err(CodecError::parse(
                "CDR header",
                format!(
                    "unsupported encapsulation {:#04x} {:#04x}",
                    data[0], data[1]
                ),
            ));
        }

        Ok(Self {
            data,
            offset: CDR_HEADER_SIZE,
            origin,
        })
    }

    /// Current position, header included.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Skip padding up to the next `size` boundary relative to the origin.
    pub fn align(&mut self, size: usize) -> Result<()> {
        let padding = padding_for(self.offset, size, self.origin);
        self.take(padding)?;
        Ok(())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.align(4)?;
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.align(8)?;
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.align(8)?;
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Read a length-prefixed, NUL-terminated string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        let text = match bytes.split_last() {
            Some((&0, text)) => text,
            Some(_) => {
                return Err(CodecError::parse(
                    "CDR string",
                    "missing NUL terminator",
                ))
            }
            None => bytes,
        };
        String::from_utf8(text.to_vec())
            .map_err(|e| CodecError::parse("CDR string", format!("invalid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32() {
        let data = [0x00, 0x01, 0x00, 0x00, 0x34, 0x12, 0x00, 0x00];
        let mut cursor = CdrCursor::new(&data).unwrap();
        assert_eq!(cursor.read_u32().unwrap(), 0x1234);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_short_header_rejected() {
        let err = CdrCursor::new(&[0x00, 0x01]).err().unwrap();
        assert!(matches!(err, CodecError::BufferTooShort { .. }));
    }

    #[test]
    fn test_big_endian_rejected() {
        let err = CdrCursor::new(&[0x00, 0x00, 0x00, 0x00]).err().unwrap();
        assert!(matches!(err, CodecError::ParseError { .. }));
    }

    #[test]
    fn test_f64_skips_padding() {
        let mut data = vec![0x00, 0x01, 0x00, 0x00, 0, 0, 0, 0];
        data.extend_from_slice(&1.5f64.to_le_bytes());
        let mut cursor = CdrCursor::new(&data).unwrap();
        assert_eq!(cursor.read_f64().unwrap(), 1.5);
    }

    #[test]
    fn test_truncated_read() {
        let data = [0x00, 0x01, 0x00, 0x00, 0x01, 0x00];
        let mut cursor = CdrCursor::new(&data).unwrap();
        let err = cursor.read_u32().unwrap_err();
        assert_eq!(err, CodecError::buffer_too_short(4, 2, 4));
    }

    #[test]
    fn test_read_string() {
        let data = [0x00, 0x01, 0x00, 0x00, 3, 0, 0, 0, b'o', b'k', 0];
        let mut cursor = CdrCursor::new(&data).unwrap();
        assert_eq!(cursor.read_string().unwrap(), "ok");
    }
}

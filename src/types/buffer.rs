// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Growable little-endian byte buffer with aligned appends.
//!
//! Used by the CDR encoder for payload layout and by the MCAP record
//! serializer for record bodies, so every record is fully built in memory
//! before it reaches the output sink.

/// Default initial capacity for new buffers.
const DEFAULT_CAPACITY: usize = 64;

/// Number of zero bytes needed so that `len` becomes a multiple of `alignment`
/// when measured from `base`.
///
/// `base` may lie beyond `len`; the distance is taken modulo `alignment`
/// either way. An alignment of 0 or 1 never pads.
#[inline]
pub fn padding_for(len: usize, alignment: usize, base: usize) -> usize {
    if alignment <= 1 {
        return 0;
    }
    let rel = (len as i128 - base as i128).rem_euclid(alignment as i128) as usize;
    (alignment - rel) % alignment
}

/// Append-only byte buffer.
///
/// All multi-byte values are written little-endian.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Current length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Drop everything, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Roll back to an earlier length.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Pad with zero bytes until the length is a multiple of `alignment`
    /// relative to `base`. Returns the number of padding bytes written.
    pub fn align(&mut self, alignment: usize, base: usize) -> usize {
        let padding = padding_for(self.data.len(), alignment, base);
        self.data.resize(self.data.len() + padding, 0);
        padding
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_i32(&mut self, value: i32) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_i64(&mut self, value: i64) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_f64(&mut self, value: f64) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.data
    }
}

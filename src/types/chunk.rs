// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-progress chunk buffer.
//!
//! Message records are serialized into the chunk as they arrive. The buffer
//! tracks the time range and the per-channel message offsets that become
//! MessageIndex records once the chunk is closed.

use std::collections::BTreeMap;

use super::buffer::ByteBuffer;

/// Message index entry: where a message starts inside the uncompressed chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageIndexEntry {
    /// Message log time
    pub log_time: u64,
    /// Offset of the message record within the uncompressed chunk records
    pub offset: u64,
}

/// Accumulates serialized records for one chunk.
///
/// Owned by the writer; never handed out to callers.
#[derive(Debug, Clone)]
pub struct ChunkBuffer {
    records: ByteBuffer,
    message_start_time: u64,
    message_end_time: u64,
    message_count: usize,
    message_indexes: BTreeMap<u16, Vec<MessageIndexEntry>>,
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self {
            records: ByteBuffer::new(),
            message_start_time: u64::MAX,
            message_end_time: 0,
            message_count: 0,
            message_indexes: BTreeMap::new(),
        }
    }

    /// Append one serialized message record.
    pub fn push_message(&mut self, channel_id: u16, log_time: u64, record: &[u8]) {
        let offset = self.records.len() as u64;
        self.message_indexes
            .entry(channel_id)
            .or_default()
            .push(MessageIndexEntry { log_time, offset });
        self.records.put_bytes(record);

        self.message_start_time = self.message_start_time.min(log_time);
        self.message_end_time = self.message_end_time.max(log_time);
        self.message_count += 1;
    }

    /// Uncompressed size of the records collected so far.
    #[inline]
    pub fn uncompressed_size(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn message_count(&self) -> usize {
        self.message_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.message_count == 0
    }

    /// Earliest log time, 0 when empty.
    pub fn message_start_time(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.message_start_time
        }
    }

    /// Latest log time, 0 when empty.
    pub fn message_end_time(&self) -> u64 {
        self.message_end_time
    }

    pub fn records(&self) -> &[u8] {
        self.records.as_slice()
    }

    pub fn message_indexes(&self) -> &BTreeMap<u16, Vec<MessageIndexEntry>> {
        &self.message_indexes
    }

    /// Reset for the next chunk, keeping the record allocation.
    pub fn reset(&mut self) {
        self.records.clear();
        self.message_start_time = u64::MAX;
        self.message_end_time = 0;
        self.message_count = 0;
        self.message_indexes.clear();
    }
}

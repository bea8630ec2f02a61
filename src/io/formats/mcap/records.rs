// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MCAP record serialization.
//!
//! Every function returns a complete record (opcode, length, body) built in
//! memory, so a record either reaches the sink whole or not at all.
//!
//! Field layouts follow the MCAP specification:
//! - strings: `u32` byte length + UTF-8 bytes
//! - byte arrays: `u32` length + bytes (schema data), `u64` length + bytes (chunk records)
//! - maps and arrays: `u32` total byte length + entries

use std::collections::BTreeMap;

use super::constants::{
    FOOTER_BODY_LEN, OP_CHANNEL, OP_CHUNK, OP_CHUNK_INDEX, OP_DATA_END, OP_FOOTER, OP_HEADER,
    OP_MESSAGE, OP_MESSAGE_INDEX, OP_SCHEMA, OP_STATISTICS, OP_SUMMARY_OFFSET,
    RECORD_PREFIX_LEN,
};
use crate::core::{ChannelDescriptor, CodecError, Result, SchemaDescriptor};
use crate::types::{ByteBuffer, MessageIndexEntry};

/// Chunk record fields preceding the records payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkHeader {
    pub message_start_time: u64,
    pub message_end_time: u64,
    pub uncompressed_size: u64,
    /// 0 when not computed
    pub uncompressed_crc: u32,
    /// "" for uncompressed chunks
    pub compression: String,
}

/// Chunk index record for the summary section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkIndexRecord {
    pub message_start_time: u64,
    pub message_end_time: u64,
    /// Offset of the chunk record from file start
    pub chunk_start_offset: u64,
    /// Total length of the chunk record, prefix included
    pub chunk_length: u64,
    /// channel_id -> offset of that channel's MessageIndex record
    pub message_index_offsets: BTreeMap<u16, u64>,
    /// Total length of the MessageIndex records following the chunk
    pub message_index_length: u64,
    pub compression: String,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

/// Statistics record for the summary section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub message_count: u64,
    pub schema_count: u16,
    pub channel_count: u32,
    pub chunk_count: u32,
    pub message_start_time: u64,
    pub message_end_time: u64,
    pub channel_message_counts: BTreeMap<u16, u64>,
}

/// Summary offset record: locates one group of same-opcode summary records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOffset {
    pub group_opcode: u8,
    pub group_start: u64,
    pub group_length: u64,
}

fn u32_len(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| CodecError::encode("MCAP", format!("{what} of {len} bytes exceeds u32 length")))
}

fn put_str(body: &mut ByteBuffer, value: &str) -> Result<()> {
    body.put_u32(u32_len(value.len(), "string")?)
        .put_bytes(value.as_bytes());
    Ok(())
}

fn put_string_map(body: &mut ByteBuffer, map: &BTreeMap<String, String>) -> Result<()> {
    let byte_len: usize = map.iter().map(|(k, v)| 4 + k.len() + 4 + v.len()).sum();
    body.put_u32(u32_len(byte_len, "string map")?);
    for (key, value) in map {
        put_str(body, key)?;
        put_str(body, value)?;
    }
    Ok(())
}

fn put_u16_u64_map(body: &mut ByteBuffer, map: &BTreeMap<u16, u64>) -> Result<()> {
    body.put_u32(u32_len(map.len() * 10, "int map")?);
    for (&key, &value) in map {
        body.put_u16(key).put_u64(value);
    }
    Ok(())
}

/// Prefix a body with its opcode and length.
fn frame(opcode: u8, body: &ByteBuffer) -> Vec<u8> {
    let mut record = ByteBuffer::with_capacity(RECORD_PREFIX_LEN + body.len());
    record
        .put_u8(opcode)
        .put_u64(body.len() as u64)
        .put_bytes(body.as_slice());
    record.into_vec()
}

pub fn header(profile: &str, library: &str) -> Result<Vec<u8>> {
    let mut body = ByteBuffer::new();
    put_str(&mut body, profile)?;
    put_str(&mut body, library)?;
    Ok(frame(OP_HEADER, &body))
}

pub fn schema(schema: &SchemaDescriptor) -> Result<Vec<u8>> {
    let mut body = ByteBuffer::with_capacity(14 + schema.data.len());
    body.put_u16(schema.id);
    put_str(&mut body, &schema.name)?;
    put_str(&mut body, &schema.encoding)?;
    body.put_u32(u32_len(schema.data.len(), "schema data")?)
        .put_bytes(&schema.data);
    Ok(frame(OP_SCHEMA, &body))
}

pub fn channel(channel: &ChannelDescriptor) -> Result<Vec<u8>> {
    let mut body = ByteBuffer::new();
    body.put_u16(channel.id).put_u16(channel.schema_id);
    put_str(&mut body, &channel.topic)?;
    put_str(&mut body, &channel.message_encoding)?;
    put_string_map(&mut body, &channel.metadata)?;
    Ok(frame(OP_CHANNEL, &body))
}

pub fn message(
    channel_id: u16,
    sequence: u32,
    log_time: u64,
    publish_time: u64,
    data: &[u8],
) -> Vec<u8> {
    let mut body = ByteBuffer::with_capacity(22 + data.len());
    body.put_u16(channel_id)
        .put_u32(sequence)
        .put_u64(log_time)
        .put_u64(publish_time)
        .put_bytes(data);
    frame(OP_MESSAGE, &body)
}

/// `records` is the chunk payload as stored (compressed or not).
pub fn chunk(header: &ChunkHeader, records: &[u8]) -> Result<Vec<u8>> {
    let mut body = ByteBuffer::with_capacity(48 + header.compression.len() + records.len());
    body.put_u64(header.message_start_time)
        .put_u64(header.message_end_time)
        .put_u64(header.uncompressed_size)
        .put_u32(header.uncompressed_crc);
    put_str(&mut body, &header.compression)?;
    body.put_u64(records.len() as u64).put_bytes(records);
    Ok(frame(OP_CHUNK, &body))
}

pub fn message_index(channel_id: u16, entries: &[MessageIndexEntry]) -> Result<Vec<u8>> {
    let mut body = ByteBuffer::with_capacity(6 + entries.len() * 16);
    body.put_u16(channel_id)
        .put_u32(u32_len(entries.len() * 16, "message index")?);
    for entry in entries {
        body.put_u64(entry.log_time).put_u64(entry.offset);
    }
    Ok(frame(OP_MESSAGE_INDEX, &body))
}

pub fn chunk_index(index: &ChunkIndexRecord) -> Result<Vec<u8>> {
    let mut body = ByteBuffer::new();
    body.put_u64(index.message_start_time)
        .put_u64(index.message_end_time)
        .put_u64(index.chunk_start_offset)
        .put_u64(index.chunk_length);
    put_u16_u64_map(&mut body, &index.message_index_offsets)?;
    body.put_u64(index.message_index_length);
    put_str(&mut body, &index.compression)?;
    body.put_u64(index.compressed_size)
        .put_u64(index.uncompressed_size);
    Ok(frame(OP_CHUNK_INDEX, &body))
}

/// Attachment and metadata counts are always zero.
pub fn statistics(stats: &Statistics) -> Result<Vec<u8>> {
    let mut body = ByteBuffer::new();
    body.put_u64(stats.message_count)
        .put_u16(stats.schema_count)
        .put_u32(stats.channel_count)
        .put_u32(0)
        .put_u32(0)
        .put_u32(stats.chunk_count)
        .put_u64(stats.message_start_time)
        .put_u64(stats.message_end_time);
    put_u16_u64_map(&mut body, &stats.channel_message_counts)?;
    Ok(frame(OP_STATISTICS, &body))
}

pub fn summary_offset(offset: &SummaryOffset) -> Vec<u8> {
    let mut body = ByteBuffer::with_capacity(17);
    body.put_u8(offset.group_opcode)
        .put_u64(offset.group_start)
        .put_u64(offset.group_length);
    frame(OP_SUMMARY_OFFSET, &body)
}

pub fn data_end(data_section_crc: u32) -> Vec<u8> {
    let mut body = ByteBuffer::with_capacity(4);
    body.put_u32(data_section_crc);
    frame(OP_DATA_END, &body)
}

pub fn footer(summary_start: u64, summary_offset_start: u64, summary_crc: u32) -> Vec<u8> {
    let mut body = ByteBuffer::with_capacity(FOOTER_BODY_LEN as usize);
    body.put_u64(summary_start)
        .put_u64(summary_offset_start)
        .put_u32(summary_crc);
    frame(OP_FOOTER, &body)
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Incremental MCAP writer with optional chunking and summary section.
//!
//! # Lifecycle
//!
//! `NotStarted --start()--> Started --finish()--> Finished`
//!
//! Registering schemas and channels and adding messages is only legal while
//! `Started`. Any call made in the wrong state fails with
//! [`CodecError::InvalidState`] before touching the output. A second
//! `finish()` is rejected the same way.
//!
//! # Layout
//!
//! ```text
//! magic, Header, {Schema | Channel | Message | Chunk [MessageIndex...]}*, DataEnd,
//! [Schema* Channel* Statistics ChunkIndex*], [SummaryOffset*], Footer, magic
//! ```
//!
//! Schema and channel records always go straight to the sink. Message records
//! go either to the sink or to a chunk buffer, depending on the
//! [`WriteStrategy`] resolved at `start()`. A chunk is closed as soon as its
//! uncompressed records reach `chunk_size` bytes, and at `finish()`.
//!
//! If the sink fails mid-write the error is returned as is and the output
//! must be considered corrupt; the writer does not retry or roll back.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::constants::{
    FOOTER_CRC_COVERED_LEN, MCAP_MAGIC, OP_CHANNEL, OP_CHUNK_INDEX, OP_SCHEMA, OP_STATISTICS,
};
use super::options::{Compression, McapWriteOptions, WriteStrategy};
use super::records::{self, ChunkHeader, ChunkIndexRecord, Statistics, SummaryOffset};
use crate::core::{ChannelRegistry, CodecError, Result};
use crate::types::ChunkBuffer;

/// Writer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    NotStarted,
    Started,
    Finished,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterState::NotStarted => "not started",
            WriterState::Started => "started",
            WriterState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Sink wrapper that tracks the write position and a running CRC.
///
/// BufWriter does not expose stream_position, so the position is counted.
struct CountingWriter<W> {
    inner: W,
    position: u64,
    crc: crc32fast::Hasher,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            position: 0,
            crc: crc32fast::Hasher::new(),
        }
    }

    fn write_record(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        self.crc.update(bytes);
        Ok(())
    }

    fn reset_crc(&mut self) {
        self.crc = crc32fast::Hasher::new();
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Where message records go.
enum MessageSink {
    Direct,
    Chunked { chunk_size: u64, chunk: ChunkBuffer },
}

impl From<WriteStrategy> for MessageSink {
    fn from(strategy: WriteStrategy) -> Self {
        match strategy {
            WriteStrategy::Direct => MessageSink::Direct,
            WriteStrategy::Chunked { chunk_size } => MessageSink::Chunked {
                chunk_size,
                chunk: ChunkBuffer::new(),
            },
        }
    }
}

/// Per-channel write bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelProgress {
    next_sequence: u32,
    last_log_time: Option<u64>,
}

/// MCAP writer.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::io::Cursor;
/// use robomcap::{McapWriteOptions, McapWriter};
///
/// let mut writer = McapWriter::new(Cursor::new(Vec::new()), McapWriteOptions::default())?;
/// writer.start("", "my-tool")?;
/// let schema_id = writer.register_schema("test.Msg", "jsonschema", br#"{"type":"object"}"#)?;
/// let channel_id = writer.register_channel("/decoded", "json", schema_id)?;
/// writer.add_message(channel_id, 1, 1, br#"{"x":1}"#)?;
/// writer.finish()?;
/// let bytes = writer.into_inner().into_inner();
/// # Ok(())
/// # }
/// ```
pub struct McapWriter<W: Write> {
    sink: CountingWriter<W>,
    options: McapWriteOptions,
    state: WriterState,
    registry: ChannelRegistry,
    messages: MessageSink,
    progress: HashMap<u16, ChannelProgress>,
    stats: Statistics,
    chunk_indexes: Vec<ChunkIndexRecord>,
}

impl McapWriter<BufWriter<File>> {
    /// Create a writer for a new file at `path`.
    pub fn create<P: AsRef<Path>>(path: P, options: McapWriteOptions) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Self::new(BufWriter::new(file), options)
    }
}

impl<W: Write> McapWriter<W> {
    /// Create a writer in the `NotStarted` state. Nothing is written yet.
    pub fn new(writer: W, options: McapWriteOptions) -> Result<Self> {
        options.validate()?;
        let messages = MessageSink::from(options.strategy());
        Ok(Self {
            sink: CountingWriter::new(writer),
            options,
            state: WriterState::NotStarted,
            registry: ChannelRegistry::new(),
            messages,
            progress: HashMap::new(),
            stats: Statistics::default(),
            chunk_indexes: Vec::new(),
        })
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn options(&self) -> &McapWriteOptions {
        &self.options
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Bytes written to the sink so far. Chunked messages count once their
    /// chunk is flushed.
    pub fn position(&self) -> u64 {
        self.sink.position
    }

    /// Statistics as they would be written to the summary right now.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            schema_count: self.registry.schema_count() as u16,
            channel_count: self.registry.channel_count() as u32,
            ..self.stats.clone()
        }
    }

    /// Number of chunks flushed so far.
    pub fn chunks_written(&self) -> u32 {
        self.stats.chunk_count
    }

    pub fn get_ref(&self) -> &W {
        &self.sink.inner
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.sink.inner
    }

    fn ensure_state(&self, expected: WriterState, operation: &str) -> Result<()> {
        if self.state != expected {
            return Err(CodecError::invalid_state(operation, self.state));
        }
        Ok(())
    }

    /// Write the magic and Header record.
    pub fn start(&mut self, profile: &str, library: &str) -> Result<()> {
        self.ensure_state(WriterState::NotStarted, "start")?;

        let header = records::header(profile, library)?;
        self.sink.write_record(&MCAP_MAGIC)?;
        self.sink.write_record(&header)?;

        self.registry = ChannelRegistry::new();
        self.stats = Statistics::default();
        self.messages = MessageSink::from(self.options.strategy());
        self.state = WriterState::Started;

        tracing::debug!(
            profile,
            library,
            strategy = ?self.options.strategy(),
            "MCAP writer started"
        );
        Ok(())
    }

    /// Register a schema and write its record. Returns the new schema ID.
    ///
    /// Every call gets a fresh ID, even for identical content.
    pub fn register_schema(&mut self, name: &str, encoding: &str, data: &[u8]) -> Result<u16> {
        self.ensure_state(WriterState::Started, "register a schema")?;

        let id = self.registry.register_schema(name, encoding, data)?;
        let record = match self.registry.schema(id) {
            Some(schema) => records::schema(schema)?,
            None => return Err(CodecError::unknown_schema(id)),
        };
        self.sink.write_record(&record)?;
        Ok(id)
    }

    /// Register a channel without metadata. Returns the new channel ID.
    ///
    /// `schema_id` is 0 for schemaless channels, otherwise it must come from
    /// [`register_schema`](Self::register_schema).
    pub fn register_channel(
        &mut self,
        topic: &str,
        message_encoding: &str,
        schema_id: u16,
    ) -> Result<u16> {
        self.register_channel_with_metadata(topic, message_encoding, schema_id, BTreeMap::new())
    }

    /// Register a channel carrying string metadata.
    pub fn register_channel_with_metadata(
        &mut self,
        topic: &str,
        message_encoding: &str,
        schema_id: u16,
        metadata: BTreeMap<String, String>,
    ) -> Result<u16> {
        self.ensure_state(WriterState::Started, "register a channel")?;

        let id = self
            .registry
            .register_channel(topic, message_encoding, schema_id, metadata)?;
        let record = match self.registry.channel(id) {
            Some(channel) => records::channel(channel)?,
            None => return Err(CodecError::unknown_channel(id)),
        };
        self.sink.write_record(&record)?;

        self.progress.insert(id, ChannelProgress::default());
        self.stats.channel_message_counts.insert(id, 0);
        Ok(id)
    }

    /// Append a message to a registered channel.
    ///
    /// `log_time` should not decrease within a channel; a decrease is logged
    /// but accepted.
    pub fn add_message(
        &mut self,
        channel_id: u16,
        log_time: u64,
        publish_time: u64,
        data: &[u8],
    ) -> Result<()> {
        self.ensure_state(WriterState::Started, "add a message")?;
        if self.registry.channel(channel_id).is_none() {
            return Err(CodecError::unknown_channel(channel_id));
        }

        let progress = self.progress.entry(channel_id).or_default();
        let sequence = progress.next_sequence;
        if let Some(last) = progress.last_log_time {
            if log_time < last {
                tracing::warn!(
                    channel_id,
                    log_time,
                    previous = last,
                    "log_time decreased within channel"
                );
            }
        }

        let record = records::message(channel_id, sequence, log_time, publish_time, data);

        let flush_chunk = match &mut self.messages {
            MessageSink::Direct => {
                self.sink.write_record(&record)?;
                false
            }
            MessageSink::Chunked { chunk_size, chunk } => {
                chunk.push_message(channel_id, log_time, &record);
                chunk.uncompressed_size() as u64 >= *chunk_size
            }
        };

        self.record_message(channel_id, log_time);

        if flush_chunk {
            self.flush_chunk()?;
        }
        Ok(())
    }

    fn record_message(&mut self, channel_id: u16, log_time: u64) {
        let progress = self.progress.entry(channel_id).or_default();
        progress.next_sequence = progress.next_sequence.wrapping_add(1);
        progress.last_log_time = Some(log_time);

        if self.stats.message_count == 0 {
            self.stats.message_start_time = log_time;
            self.stats.message_end_time = log_time;
        } else {
            self.stats.message_start_time = self.stats.message_start_time.min(log_time);
            self.stats.message_end_time = self.stats.message_end_time.max(log_time);
        }
        self.stats.message_count += 1;
        *self
            .stats
            .channel_message_counts
            .entry(channel_id)
            .or_insert(0) += 1;
    }

    /// Write the pending chunk, if any, followed by its message indexes.
    fn flush_chunk(&mut self) -> Result<()> {
        let mut chunk = match &mut self.messages {
            MessageSink::Chunked { chunk, .. } if !chunk.is_empty() => std::mem::take(chunk),
            _ => return Ok(()),
        };

        let uncompressed = chunk.records();
        let uncompressed_crc = if self.options.emit_crcs {
            crc32fast::hash(uncompressed)
        } else {
            0
        };
        let payload: Cow<'_, [u8]> = match self.options.compression {
            Compression::None => Cow::Borrowed(uncompressed),
            Compression::Zstd => Cow::Owned(
                zstd::bulk::compress(uncompressed, self.options.compression_level).map_err(
                    |e| CodecError::encode("MCAP", format!("Zstd compression failed: {e}")),
                )?,
            ),
        };

        let header = ChunkHeader {
            message_start_time: chunk.message_start_time(),
            message_end_time: chunk.message_end_time(),
            uncompressed_size: uncompressed.len() as u64,
            uncompressed_crc,
            compression: self.options.compression.as_str().to_string(),
        };
        let record = records::chunk(&header, &payload)?;

        let chunk_start_offset = self.sink.position;
        self.sink.write_record(&record)?;
        let chunk_length = record.len() as u64;

        if self.options.emit_indexes {
            let message_index_start = self.sink.position;
            let mut message_index_offsets = BTreeMap::new();
            for (&channel_id, entries) in chunk.message_indexes() {
                message_index_offsets.insert(channel_id, self.sink.position);
                self.sink
                    .write_record(&records::message_index(channel_id, entries)?)?;
            }

            self.chunk_indexes.push(ChunkIndexRecord {
                message_start_time: header.message_start_time,
                message_end_time: header.message_end_time,
                chunk_start_offset,
                chunk_length,
                message_index_offsets,
                message_index_length: self.sink.position - message_index_start,
                compression: header.compression.clone(),
                compressed_size: payload.len() as u64,
                uncompressed_size: header.uncompressed_size,
            });
        }

        self.stats.chunk_count += 1;

        tracing::debug!(
            messages = chunk.message_count(),
            uncompressed_size = header.uncompressed_size,
            stored_size = payload.len(),
            offset = chunk_start_offset,
            "Flushed chunk"
        );

        // Hand the buffer back so its allocation is reused.
        chunk.reset();
        if let MessageSink::Chunked { chunk: slot, .. } = &mut self.messages {
            *slot = chunk;
        }
        Ok(())
    }

    /// Write one group of summary records and remember where it lives.
    fn write_summary_group(
        &mut self,
        opcode: u8,
        group: &[Vec<u8>],
        offsets: &mut Vec<SummaryOffset>,
    ) -> Result<()> {
        if group.is_empty() {
            return Ok(());
        }
        let group_start = self.sink.position;
        for record in group {
            self.sink.write_record(record)?;
        }
        offsets.push(SummaryOffset {
            group_opcode: opcode,
            group_start,
            group_length: self.sink.position - group_start,
        });
        Ok(())
    }

    /// Flush pending data and write DataEnd, the summary, the footer and the
    /// closing magic.
    ///
    /// Returns the total number of bytes written.
    pub fn finish(&mut self) -> Result<u64> {
        self.ensure_state(WriterState::Started, "finish")?;

        self.flush_chunk()?;
        self.sink.write_record(&records::data_end(0))?;

        let summary_start = self.sink.position;
        self.sink.reset_crc();
        let mut groups = Vec::new();

        if self.options.repeat_schemas {
            let schemas = self
                .registry
                .schemas()
                .map(records::schema)
                .collect::<Result<Vec<_>>>()?;
            self.write_summary_group(OP_SCHEMA, &schemas, &mut groups)?;
        }

        if self.options.repeat_channels {
            let channels = self
                .registry
                .channels()
                .map(records::channel)
                .collect::<Result<Vec<_>>>()?;
            self.write_summary_group(OP_CHANNEL, &channels, &mut groups)?;
        }

        if self.options.emit_statistics {
            let statistics = records::statistics(&self.statistics())?;
            self.write_summary_group(OP_STATISTICS, &[statistics], &mut groups)?;
        }

        if self.options.emit_indexes {
            let chunk_indexes = self
                .chunk_indexes
                .iter()
                .map(records::chunk_index)
                .collect::<Result<Vec<_>>>()?;
            self.write_summary_group(OP_CHUNK_INDEX, &chunk_indexes, &mut groups)?;
        }

        let has_summary = !groups.is_empty();
        let mut summary_offset_start = 0;
        if has_summary && self.options.emit_summary_offsets {
            summary_offset_start = self.sink.position;
            for group in &groups {
                self.sink.write_record(&records::summary_offset(group))?;
            }
        }
        let summary_start = if has_summary { summary_start } else { 0 };

        let mut footer = records::footer(summary_start, summary_offset_start, 0);
        if has_summary && self.options.emit_crcs {
            let mut crc = self.sink.crc.clone();
            crc.update(&footer[..FOOTER_CRC_COVERED_LEN]);
            footer = records::footer(summary_start, summary_offset_start, crc.finalize());
        }
        self.sink.write_record(&footer)?;
        self.sink.write_record(&MCAP_MAGIC)?;
        self.sink.flush()?;

        self.state = WriterState::Finished;

        tracing::debug!(
            schemas = self.registry.schema_count(),
            channels = self.registry.channel_count(),
            messages = self.stats.message_count,
            chunks = self.stats.chunk_count,
            summary_groups = groups.len(),
            bytes = self.sink.position,
            "MCAP writer finished"
        );

        Ok(self.sink.position)
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomcap
//!
//! Incremental MCAP writer and a small CDR record codec.
//!
//! - **MCAP** writing in [`io::formats::mcap`](crate::io::formats::mcap):
//!   header, schemas, channels, messages, optional chunking with zstd, and a
//!   configurable summary section (repeated schemas and channels, statistics,
//!   chunk indexes, summary offsets).
//! - **CDR** payloads in [`encoding::cdr`](crate::encoding::cdr): an aligned
//!   little-endian encoder and cursor, plus the fixed [`SampleRecord`] layout.
//!
//! ## Architecture
//!
//! - `core/` - error type and schema/channel registry
//! - `types/` - byte buffer with alignment helpers, chunk accumulation
//! - `encoding/` - CDR encoder, cursor and sample record
//! - `io/formats/mcap/` - record serialization, options, writer
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robomcap::{McapWriteOptions, McapWriter, SampleRecord};
//! use robomcap::encoding::cdr::record::{
//!     SAMPLE_MESSAGE_ENCODING, SAMPLE_SCHEMA_ENCODING, SAMPLE_SCHEMA_NAME, SAMPLE_SCHEMA_TEXT,
//! };
//!
//! let mut writer = McapWriter::create("sample.mcap", McapWriteOptions::default())?;
//! writer.start("ros2", "my-tool")?;
//! let schema_id = writer.register_schema(
//!     SAMPLE_SCHEMA_NAME,
//!     SAMPLE_SCHEMA_ENCODING,
//!     SAMPLE_SCHEMA_TEXT.as_bytes(),
//! )?;
//! let channel_id = writer.register_channel("/example/sample", SAMPLE_MESSAGE_ENCODING, schema_id)?;
//! let payload = SampleRecord::new(10, "alpha", 1.5).encode()?;
//! writer.add_message(channel_id, 1, 1, &payload)?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{ChannelDescriptor, ChannelRegistry, CodecError, Result, SchemaDescriptor};

// CDR encoding
pub mod encoding;

pub use encoding::{CdrCursor, CdrEncoder, SampleRecord};

// Buffers and chunk accumulation
pub mod types;

// Container writers
pub mod io;

pub use io::formats::mcap::{Compression, McapWriteOptions, McapWriter, Statistics, WriterState};

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Writer configuration.
//!
//! Options can be built fluently or loaded from TOML:
//!
//! ```toml
//! use_chunking = true
//! chunk_size = 65536
//! compression = "zstd"
//! emit_statistics = false
//! ```
//!
//! Fields missing from the TOML keep their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::core::{CodecError, Result};

/// Default chunk flush threshold (1 MiB of uncompressed records).
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// Default zstd level when compression is enabled.
pub const DEFAULT_ZSTD_LEVEL: i32 = 3;

/// Chunk payload compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    None,
    Zstd,
}

impl Compression {
    /// Name stored in chunk and chunk index records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "",
            Compression::Zstd => "zstd",
        }
    }
}

/// How message records reach the output, fixed when the writer starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Each message record goes straight to the sink
    Direct,
    /// Messages are batched into chunks of roughly `chunk_size` bytes
    Chunked { chunk_size: u64 },
}

/// Options for [`McapWriter`](super::McapWriter).
///
/// The summary toggles are independent; with all of them off the file is
/// still a valid container, readers just have to scan it linearly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct McapWriteOptions {
    /// Batch messages into chunks
    pub use_chunking: bool,
    /// Close a chunk once its uncompressed records reach this many bytes
    pub chunk_size: u64,
    /// Chunk payload compression
    pub compression: Compression,
    /// zstd compression level
    pub compression_level: i32,
    /// MessageIndex records after chunks, ChunkIndex records in the summary
    pub emit_indexes: bool,
    /// Repeat schema records in the summary
    pub repeat_schemas: bool,
    /// Repeat channel records in the summary
    pub repeat_channels: bool,
    /// Statistics record in the summary
    pub emit_statistics: bool,
    /// SummaryOffset records after the summary
    pub emit_summary_offsets: bool,
    /// Chunk and summary CRCs
    pub emit_crcs: bool,
}

impl Default for McapWriteOptions {
    fn default() -> Self {
        Self {
            use_chunking: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression: Compression::None,
            compression_level: DEFAULT_ZSTD_LEVEL,
            emit_indexes: true,
            repeat_schemas: true,
            repeat_channels: true,
            emit_statistics: true,
            emit_summary_offsets: true,
            emit_crcs: true,
        }
    }
}

impl McapWriteOptions {
    /// Default options: chunked, every summary feature on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every summary feature off. Chunking and CRCs keep their defaults.
    pub fn minimal() -> Self {
        Self {
            emit_indexes: false,
            repeat_schemas: false,
            repeat_channels: false,
            emit_statistics: false,
            emit_summary_offsets: false,
            ..Self::default()
        }
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text)
            .map_err(|e| CodecError::parse("McapWriteOptions", e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Reject settings that can never produce a chunk.
    pub fn validate(&self) -> Result<()> {
        if self.use_chunking && self.chunk_size == 0 {
            return Err(CodecError::parse(
                "McapWriteOptions",
                "chunk_size must be greater than zero when chunking is enabled",
            ));
        }
        Ok(())
    }

    /// Resolve the message write strategy.
    pub fn strategy(&self) -> WriteStrategy {
        if self.use_chunking {
            WriteStrategy::Chunked {
                chunk_size: self.chunk_size,
            }
        } else {
            WriteStrategy::Direct
        }
    }

    pub fn use_chunking(mut self, enabled: bool) -> Self {
        self.use_chunking = enabled;
        self
    }

    pub fn chunk_size(mut self, size: u64) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn emit_indexes(mut self, enabled: bool) -> Self {
        self.emit_indexes = enabled;
        self
    }

    pub fn repeat_schemas(mut self, enabled: bool) -> Self {
        self.repeat_schemas = enabled;
        self
    }

    pub fn repeat_channels(mut self, enabled: bool) -> Self {
        self.repeat_channels = enabled;
        self
    }

    pub fn emit_statistics(mut self, enabled: bool) -> Self {
        self.emit_statistics = enabled;
        self
    }

    pub fn emit_summary_offsets(mut self, enabled: bool) -> Self {
        self.emit_summary_offsets = enabled;
        self
    }

    pub fn emit_crcs(mut self, enabled: bool) -> Self {
        self.emit_crcs = enabled;
        self
    }
}

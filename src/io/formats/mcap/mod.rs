// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MCAP container writer.
//!
//! - [`constants`]: magic bytes and record opcodes
//! - [`records`]: serialization of individual records
//! - [`options`]: writer configuration and TOML loading
//! - [`writer`]: the incremental [`McapWriter`]
//!
//! Reading is left to the `mcap` crate.

// Re-export constants at module level for convenience
pub use constants::{
    MCAP_MAGIC, OP_CHANNEL, OP_CHUNK, OP_CHUNK_INDEX, OP_DATA_END, OP_FOOTER, OP_HEADER,
    OP_MESSAGE, OP_MESSAGE_INDEX, OP_SCHEMA, OP_STATISTICS, OP_SUMMARY_OFFSET,
};

pub mod constants;
pub mod options;
pub mod records;
pub mod writer;

pub use options::{Compression, McapWriteOptions, WriteStrategy};
pub use records::Statistics;
pub use writer::{McapWriter, WriterState};

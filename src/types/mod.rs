// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Buffer data structures.
//!
//! This module contains the byte buffer used for aligned payload and record
//! serialization, and the chunk buffer that batches message records.

pub mod buffer;
pub mod chunk;

pub use buffer::{padding_for, ByteBuffer};
pub use chunk::{ChunkBuffer, MessageIndexEntry};

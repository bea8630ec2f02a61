// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer: container formats written by this crate.

pub mod formats;

pub use formats::mcap::{Compression, McapWriteOptions, McapWriter, WriterState};

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MCAP format constants.
//!
//! Opcodes and magic bytes as defined by the
//! [MCAP specification](https://mcap.dev/spec).

/// MCAP file magic bytes (at start and end of file).
pub const MCAP_MAGIC: [u8; 8] = [0x89, 0x4D, 0x43, 0x41, 0x50, 0x30, 0x0D, 0x0A];

/// Header record - must be first record after magic.
pub const OP_HEADER: u8 = 0x01;
/// Footer record - locates the summary section.
pub const OP_FOOTER: u8 = 0x02;
pub const OP_SCHEMA: u8 = 0x03;
pub const OP_CHANNEL: u8 = 0x04;
pub const OP_MESSAGE: u8 = 0x05;
pub const OP_CHUNK: u8 = 0x06;
/// Message index record - follows a chunk, one per channel.
pub const OP_MESSAGE_INDEX: u8 = 0x07;
/// Chunk index record - summary section.
pub const OP_CHUNK_INDEX: u8 = 0x08;
/// Statistics record - summary section.
pub const OP_STATISTICS: u8 = 0x0B;
/// Summary offset record - locates one group of summary records.
pub const OP_SUMMARY_OFFSET: u8 = 0x0E;
/// Data end record - marks end of data section.
pub const OP_DATA_END: u8 = 0x0F;

/// Opcode (1) + record length (8).
pub const RECORD_PREFIX_LEN: usize = 9;

/// Footer body: summary_start (8) + summary_offset_start (8) + summary_crc (4).
pub const FOOTER_BODY_LEN: u64 = 20;

/// Bytes of the footer record covered by the summary CRC: everything before
/// the `summary_crc` field.
pub const FOOTER_CRC_COVERED_LEN: usize = RECORD_PREFIX_LEN + 16;

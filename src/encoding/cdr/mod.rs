// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) module.
//!
//! Provides little-endian CDR encoding and decoding with alignment measured
//! from a configurable origin, plus the fixed-layout [`SampleRecord`].

pub mod cursor;
pub mod encoder;
pub mod record;

pub use cursor::CdrCursor;
pub use encoder::CdrEncoder;
pub use record::SampleRecord;

/// Size of the CDR encapsulation header (4 bytes).
pub const CDR_HEADER_SIZE: usize = 4;

/// Encapsulation header for plain CDR, little endian, no options.
pub const ENCAPSULATION_CDR_LE: [u8; CDR_HEADER_SIZE] = [0x00, 0x01, 0x00, 0x00];

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout robomcap.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling for writers and codecs
//! - [`ChannelRegistry`] - Schema and channel ID allocation

pub mod error;
pub mod registry;

pub use error::{CodecError, Result};
pub use registry::{ChannelDescriptor, ChannelRegistry, SchemaDescriptor};

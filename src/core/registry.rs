// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema and channel registry.
//!
//! Hands out identifiers for registered schemas and channels. IDs come from
//! two independent counters that both start at 1, so schema ID 0 stays free
//! to mean "no schema". The registry only grows: there is no removal, no
//! deduplication, and a rejected registration does not consume an ID.

use std::collections::BTreeMap;

use super::error::{CodecError, Result};

/// A registered schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub id: u16,
    pub name: String,
    pub encoding: String,
    pub data: Vec<u8>,
}

/// A registered channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDescriptor {
    pub id: u16,
    pub topic: String,
    pub message_encoding: String,
    /// 0 when the channel has no schema
    pub schema_id: u16,
    pub metadata: BTreeMap<String, String>,
}

/// Append-only registry of schemas and channels.
///
/// IDs are monotonic, so iterating the maps yields registration order.
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    schemas: BTreeMap<u16, SchemaDescriptor>,
    channels: BTreeMap<u16, ChannelDescriptor>,
    next_schema_id: Option<u16>,
    next_channel_id: Option<u16>,
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
            channels: BTreeMap::new(),
            next_schema_id: Some(1),
            next_channel_id: Some(1),
        }
    }

    /// Register a schema and return its freshly assigned ID.
    ///
    /// Identical content registered twice gets two IDs.
    pub fn register_schema(&mut self, name: &str, encoding: &str, data: &[u8]) -> Result<u16> {
        let id = self
            .next_schema_id
            .ok_or_else(|| CodecError::id_exhausted("schema"))?;
        self.next_schema_id = id.checked_add(1);

        self.schemas.insert(
            id,
            SchemaDescriptor {
                id,
                name: name.to_string(),
                encoding: encoding.to_string(),
                data: data.to_vec(),
            },
        );
        Ok(id)
    }

    /// Register a channel and return its freshly assigned ID.
    ///
    /// `schema_id` must be 0 or an ID previously returned by
    /// [`register_schema`](Self::register_schema).
    pub fn register_channel(
        &mut self,
        topic: &str,
        message_encoding: &str,
        schema_id: u16,
        metadata: BTreeMap<String, String>,
    ) -> Result<u16> {
        if schema_id != 0 && !self.schemas.contains_key(&schema_id) {
            return Err(CodecError::unknown_schema(schema_id));
        }

        let id = self
            .next_channel_id
            .ok_or_else(|| CodecError::id_exhausted("channel"))?;
        self.next_channel_id = id.checked_add(1);

        self.channels.insert(
            id,
            ChannelDescriptor {
                id,
                topic: topic.to_string(),
                message_encoding: message_encoding.to_string(),
                schema_id,
                metadata,
            },
        );
        Ok(id)
    }

    /// Look up a schema by ID.
    pub fn schema(&self, id: u16) -> Option<&SchemaDescriptor> {
        self.schemas.get(&id)
    }

    /// Look up a channel by ID.
    pub fn channel(&self, id: u16) -> Option<&ChannelDescriptor> {
        self.channels.get(&id)
    }

    /// Schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &SchemaDescriptor> {
        self.schemas.values()
    }

    /// Channels in registration order.
    pub fn channels(&self) -> impl Iterator<Item = &ChannelDescriptor> {
        self.channels.values()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_ids_start_at_one_and_never_dedup() {
        let mut registry = ChannelRegistry::new();
        assert_eq!(registry.register_schema("a", "ros2msg", b"x").unwrap(), 1);
        assert_eq!(registry.register_schema("a", "ros2msg", b"x").unwrap(), 2);
        assert_eq!(registry.register_schema("b", "jsonschema", b"").unwrap(), 3);
        assert_eq!(registry.schema_count(), 3);
        assert_eq!(registry.schema(2).unwrap().name, "a");
    }

    #[test]
    fn test_channel_ids_independent_of_schema_ids() {
        let mut registry = ChannelRegistry::new();
        registry.register_schema("a", "ros2msg", b"").unwrap();
        registry.register_schema("b", "ros2msg", b"").unwrap();

        let first = registry
            .register_channel("/a", "cdr", 2, BTreeMap::new())
            .unwrap();
        let second = registry
            .register_channel("/b", "json", 0, BTreeMap::new())
            .unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[test]
    fn test_unknown_schema_does_not_consume_channel_id() {
        let mut registry = ChannelRegistry::new();
        let err = registry
            .register_channel("/a", "cdr", 5, BTreeMap::new())
            .unwrap_err();
        assert_eq!(err, CodecError::unknown_schema(5));
        assert_eq!(registry.channel_count(), 0);

        let id = registry
            .register_channel("/a", "cdr", 0, BTreeMap::new())
            .unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_channels_iterate_in_registration_order() {
        let mut registry = ChannelRegistry::new();
        for topic in ["/z", "/a", "/m"] {
            registry
                .register_channel(topic, "cdr", 0, BTreeMap::new())
                .unwrap();
        }
        let topics: Vec<_> = registry.channels().map(|c| c.topic.as_str()).collect();
        assert_eq!(topics, vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn test_schema_id_space_exhaustion() {
        let mut registry = ChannelRegistry::new();
        registry.next_schema_id = Some(u16::MAX);
        assert_eq!(registry.register_schema("last", "", b"").unwrap(), u16::MAX);
        let err = registry.register_schema("overflow", "", b"").unwrap_err();
        assert!(matches!(err, CodecError::IdExhausted { .. }));
    }
}

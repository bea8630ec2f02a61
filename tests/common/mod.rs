// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use robomcap::io::formats::mcap::{MCAP_MAGIC, OP_DATA_END, OP_FOOTER};
use robomcap::{McapWriteOptions, McapWriter};

/// A top-level record as found in the file.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub opcode: u8,
    pub offset: u64,
    pub body: Vec<u8>,
}

/// Walk the top-level records between the two magic sequences.
///
/// Chunk contents are not descended into.
pub fn scan_records(bytes: &[u8]) -> Vec<RawRecord> {
    assert!(bytes.len() >= 16, "file too short: {} bytes", bytes.len());
    assert_eq!(&bytes[..8], &MCAP_MAGIC, "missing leading magic");
    assert_eq!(&bytes[bytes.len() - 8..], &MCAP_MAGIC, "missing trailing magic");

    let end = bytes.len() - 8;
    let mut pos = 8;
    let mut records = Vec::new();
    while pos < end {
        let opcode = bytes[pos];
        let len = u64::from_le_bytes(bytes[pos + 1..pos + 9].try_into().unwrap()) as usize;
        let body = bytes[pos + 9..pos + 9 + len].to_vec();
        records.push(RawRecord {
            opcode,
            offset: pos as u64,
            body,
        });
        pos += 9 + len;
    }
    assert_eq!(pos, end, "records overrun the trailing magic");
    records
}

/// Opcodes of every top-level record, in file order.
pub fn opcodes(bytes: &[u8]) -> Vec<u8> {
    scan_records(bytes).iter().map(|r| r.opcode).collect()
}

/// Opcodes between DataEnd and the footer.
pub fn summary_opcodes(bytes: &[u8]) -> Vec<u8> {
    let ops = opcodes(bytes);
    let data_end = ops
        .iter()
        .position(|&op| op == OP_DATA_END)
        .expect("no DataEnd record");
    assert_eq!(ops.last(), Some(&OP_FOOTER), "last record is not the footer");
    ops[data_end + 1..ops.len() - 1].to_vec()
}

/// Message as seen by the `mcap` crate reader.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadMessage {
    pub channel_id: u16,
    pub topic: String,
    pub sequence: u32,
    pub log_time: u64,
    pub publish_time: u64,
    pub data: Vec<u8>,
}

/// Read every message back with the `mcap` crate.
pub fn read_messages(bytes: &[u8]) -> Vec<ReadMessage> {
    mcap::MessageStream::new(bytes)
        .expect("failed to open stream")
        .map(|m| {
            let m = m.expect("failed to read message");
            ReadMessage {
                channel_id: m.channel.id,
                topic: m.channel.topic.clone(),
                sequence: m.sequence,
                log_time: m.log_time,
                publish_time: m.publish_time,
                data: m.data.into_owned(),
            }
        })
        .collect()
}

/// Run `body` against an in-memory writer and return the finished bytes.
pub fn write_in_memory<F>(options: McapWriteOptions, body: F) -> Vec<u8>
where
    F: FnOnce(&mut McapWriter<Cursor<Vec<u8>>>),
{
    let mut writer = McapWriter::new(Cursor::new(Vec::new()), options).unwrap();
    writer.start("", "robomcap-test").unwrap();
    body(&mut writer);
    writer.finish().unwrap();
    writer.into_inner().into_inner()
}

/// One schema, a channel bound to it, a schemaless channel, three messages.
pub fn write_two_channel(options: McapWriteOptions) -> Vec<u8> {
    write_in_memory(options, |w| {
        let schema = w
            .register_schema("test.Msg", "jsonschema", br#"{"type":"object"}"#)
            .unwrap();
        let decoded = w.register_channel("/decoded", "json", schema).unwrap();
        let raw = w
            .register_channel("/raw", "application/octet-stream", 0)
            .unwrap();
        w.add_message(decoded, 1, 1, br#"{"x":1}"#).unwrap();
        w.add_message(decoded, 2, 2, br#"{"x":2}"#).unwrap();
        w.add_message(raw, 3, 3, &[1, 2, 3]).unwrap();
    })
}

/// A unique path in the system temp directory.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("robomcap_{}_{}", std::process::id(), name))
}

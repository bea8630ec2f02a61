// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixtures command - write the reference MCAP files used by readers' tests.

use std::path::Path;

use anyhow::Context as _;
use serde_json::json;

use crate::common::Result;
use robomcap::encoding::cdr::CDR_HEADER_SIZE;
use robomcap::encoding::cdr::record::{
    SAMPLE_MESSAGE_ENCODING, SAMPLE_SCHEMA_ENCODING, SAMPLE_SCHEMA_NAME, SAMPLE_SCHEMA_TEXT,
};
use robomcap::{McapWriteOptions, McapWriter, SampleRecord};

const SUMMARY_LIBRARY: &str = "transmcap-test";
const ROS2MSG_LIBRARY: &str = "transmcap-ros2msg-test";

// Key order matters to readers comparing payload bytes.
const FIRST_PAYLOAD: &[u8] = br#"{"x":1,"nested":{"y":"a"}}"#;
const SECOND_PAYLOAD: &[u8] = br#"{"x":2,"nested":{"y":"b"}}"#;

/// Write `with_summary.mcap`, `no_summary.mcap` and `ros2msg_test.mcap`
/// into `output`.
pub fn run(output: &Path, config: Option<&Path>) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    let options = match config {
        Some(path) => McapWriteOptions::from_toml_file(path)
            .with_context(|| format!("invalid writer config {}", path.display()))?,
        None => McapWriteOptions::default(),
    };
    let minimal = McapWriteOptions {
        use_chunking: options.use_chunking,
        chunk_size: options.chunk_size,
        compression: options.compression,
        compression_level: options.compression_level,
        emit_crcs: options.emit_crcs,
        ..McapWriteOptions::minimal()
    };

    let targets = [
        ("with_summary.mcap", options),
        ("no_summary.mcap", minimal),
    ];
    for (name, options) in targets {
        let path = output.join(name);
        write_json_fixture(&path, options)?;
        println!("Wrote {}", path.display());
    }

    let path = output.join("ros2msg_test.mcap");
    write_ros2msg_fixture(&path)?;
    println!("Wrote {}", path.display());

    Ok(())
}

/// One JSON-schema channel with two messages and one schemaless raw channel.
fn write_json_fixture(path: &Path, options: McapWriteOptions) -> Result<()> {
    let mut writer = McapWriter::create(path, options)?;
    writer.start("", SUMMARY_LIBRARY)?;

    let schema = serde_json::to_vec(&json!({ "type": "object" }))?;
    let schema_id = writer.register_schema("test.Msg", "jsonschema", &schema)?;
    let decoded = writer.register_channel("/decoded", "json", schema_id)?;
    let raw = writer.register_channel("/raw", "application/octet-stream", 0)?;

    writer.add_message(decoded, 1, 1, FIRST_PAYLOAD)?;
    writer.add_message(decoded, 2, 2, SECOND_PAYLOAD)?;
    writer.add_message(raw, 3, 3, &[1, 2, 3])?;

    writer.finish()?;
    Ok(())
}

/// One CDR channel carrying two sample records.
///
/// Payloads align relative to the end of the encapsulation header, the way
/// ROS 2 CDR readers expect.
fn write_ros2msg_fixture(path: &Path) -> Result<()> {
    let mut writer = McapWriter::create(path, McapWriteOptions::default())?;
    writer.start("ros2", ROS2MSG_LIBRARY)?;

    let schema_id = writer.register_schema(
        SAMPLE_SCHEMA_NAME,
        SAMPLE_SCHEMA_ENCODING,
        SAMPLE_SCHEMA_TEXT.as_bytes(),
    )?;
    let channel_id =
        writer.register_channel("/example/sample", SAMPLE_MESSAGE_ENCODING, schema_id)?;

    let records = [
        (1, SampleRecord::new(10, "alpha", 1.5)),
        (2, SampleRecord::new(20, "beta", 2.5)),
    ];
    for (time, record) in records {
        let payload = record.encode_with_origin(CDR_HEADER_SIZE)?;
        writer.add_message(channel_id, time, time, &payload)?;
    }

    writer.finish()?;
    Ok(())
}

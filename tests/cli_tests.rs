// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual robomcap binary and verify its behavior.

mod common;

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use common::{read_messages, temp_path};
use robomcap::encoding::cdr::CDR_HEADER_SIZE;
use robomcap::SampleRecord;

/// Get the path to the built robomcap binary
fn robomcap_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The robomcap binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push("robomcap");
    path
}

/// Run robomcap with arguments
fn run(args: &[&str]) -> Output {
    let bin = robomcap_bin();
    Command::new(&bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run robomcap and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run robomcap and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_fixtures(dir: &Path, config: Option<&Path>) {
    let dir = dir.to_str().unwrap();
    match config {
        Some(config) => run_ok(&["fixtures", dir, "--config", config.to_str().unwrap()]),
        None => run_ok(&["fixtures", dir]),
    };
}

#[test]
fn test_help() {
    let stdout = run_ok(&["--help"]);
    assert!(stdout.contains("fixtures"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_fixtures_with_and_without_summary() {
    let dir = temp_path("cli_fixtures");
    write_fixtures(&dir, None);

    let with_summary = std::fs::read(dir.join("with_summary.mcap")).unwrap();
    let no_summary = std::fs::read(dir.join("no_summary.mcap")).unwrap();

    let summary = mcap::Summary::read(&with_summary).unwrap().unwrap();
    assert_eq!(summary.stats.as_ref().unwrap().message_count, 3);
    assert_eq!(summary.schemas[&1].name, "test.Msg");
    assert!(mcap::Summary::read(&no_summary).unwrap().is_none());

    for bytes in [&with_summary, &no_summary] {
        let messages = read_messages(bytes);
        let times: Vec<u64> = messages.iter().map(|m| m.log_time).collect();
        assert_eq!(times, vec![1, 2, 3]);

        assert_eq!(messages[0].data, br#"{"x":1,"nested":{"y":"a"}}"#);
        assert_eq!(messages[1].data, br#"{"x":2,"nested":{"y":"b"}}"#);

        let first: serde_json::Value = serde_json::from_slice(&messages[0].data).unwrap();
        assert_eq!(first["x"], 1);
        assert_eq!(first["nested"]["y"], "a");
        assert_eq!(messages[2].topic, "/raw");
        assert_eq!(messages[2].data, vec![1, 2, 3]);
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_fixtures_ros2msg() {
    let dir = temp_path("cli_ros2msg");
    write_fixtures(&dir, None);

    let bytes = std::fs::read(dir.join("ros2msg_test.mcap")).unwrap();
    let messages = read_messages(&bytes);
    // "alpha\0" ends at 18; aligned after the header the double sits at 20
    assert_eq!(messages[0].data.len(), 28);
    assert_eq!(&messages[0].data[20..], &1.5f64.to_le_bytes());

    let records: Vec<SampleRecord> = read_messages(&bytes)
        .iter()
        .map(|m| SampleRecord::decode_with_origin(&m.data, CDR_HEADER_SIZE).unwrap())
        .collect();
    assert_eq!(
        records,
        vec![
            SampleRecord::new(10, "alpha", 1.5),
            SampleRecord::new(20, "beta", 2.5),
        ]
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_fixtures_with_config() {
    let dir = temp_path("cli_config");
    std::fs::create_dir_all(&dir).unwrap();
    let config = dir.join("writer.toml");
    std::fs::write(&config, "compression = \"zstd\"\nemit_statistics = false\n").unwrap();
    write_fixtures(&dir, Some(&config));

    let bytes = std::fs::read(dir.join("with_summary.mcap")).unwrap();
    let summary = mcap::Summary::read(&bytes).unwrap().unwrap();
    assert!(summary.stats.is_none());
    assert_eq!(summary.chunk_indexes[0].compression, "zstd");
    assert_eq!(read_messages(&bytes).len(), 3);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_fixtures_bad_config() {
    let dir = temp_path("cli_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let config = dir.join("writer.toml");
    std::fs::write(&config, "chunk_size = 0\n").unwrap();

    let stderr = run_err(&[
        "fixtures",
        dir.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(stderr.contains("Error:"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_inspect() {
    let dir = temp_path("cli_inspect");
    write_fixtures(&dir, None);

    let path = dir.join("with_summary.mcap");
    let stdout = run_ok(&["inspect", path.to_str().unwrap()]);
    assert!(stdout.contains("Messages: 3"));
    assert!(stdout.contains("/decoded | test.Msg | 2 messages"));
    assert!(stdout.contains("/raw | - | 1 messages"));
    assert!(stdout.contains("Statistics: 3 messages, 1 chunks"));

    let path = dir.join("no_summary.mcap");
    let stdout = run_ok(&["inspect", path.to_str().unwrap()]);
    assert!(stdout.contains("Summary: none"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_inspect_missing_file() {
    let stderr = run_err(&["inspect", "/nonexistent/file.mcap"]);
    assert!(stderr.contains("failed to read"));
}

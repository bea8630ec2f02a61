// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - read a file back and print what a reader sees.

use std::collections::BTreeMap;
use std::path::Path;

use crate::common::{format_time_range, read_file, Result};

/// Cmd: Show channels, message counts and summary contents
pub fn run(input: &Path) -> Result<()> {
    let bytes = read_file(input)?;

    let mut counts: BTreeMap<u16, (String, String, u64)> = BTreeMap::new();
    let mut times: Option<(u64, u64)> = None;
    for message in mcap::MessageStream::new(&bytes)? {
        let message = message?;
        let entry = counts.entry(message.channel.id).or_insert_with(|| {
            let schema = message
                .channel
                .schema
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "-".to_string());
            (message.channel.topic.clone(), schema, 0)
        });
        entry.2 += 1;
        times = Some(match times {
            Some((start, end)) => (start.min(message.log_time), end.max(message.log_time)),
            None => (message.log_time, message.log_time),
        });
    }

    println!("=== {} ===", input.display());
    println!("Messages: {}", counts.values().map(|c| c.2).sum::<u64>());
    if let Some((start, end)) = times {
        println!("Log time: {}", format_time_range(start, end));
    }

    println!();
    println!("Channels:");
    for (id, (topic, schema, count)) in &counts {
        println!("  [{id}] {topic} | {schema} | {count} messages");
    }

    println!();
    match mcap::Summary::read(&bytes)? {
        Some(summary) => {
            println!("Summary:");
            println!("  Schemas: {}", summary.schemas.len());
            println!("  Channels: {}", summary.channels.len());
            println!("  Chunk indexes: {}", summary.chunk_indexes.len());
            match summary.stats {
                Some(stats) => println!(
                    "  Statistics: {} messages, {} chunks",
                    stats.message_count, stats.chunk_count
                ),
                None => println!("  Statistics: none"),
            }
        }
        None => println!("Summary: none"),
    }

    Ok(())
}

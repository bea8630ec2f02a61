// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomcap CLI
//!
//! ## Usage
//!
//! ```sh
//! # Write the reference fixture files into a directory
//! robomcap fixtures out/
//!
//! # Same, with writer options loaded from TOML
//! robomcap fixtures out/ --config writer.toml
//!
//! # Read a file back and print its channels
//! robomcap inspect out/with_summary.mcap
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use common::Result;

/// Robomcap - MCAP writer toolkit
#[derive(Parser, Clone)]
#[command(name = "robomcap")]
#[command(about = "Write and inspect MCAP files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Write reference fixture files (with and without summary, CDR sample)
    Fixtures {
        /// Output directory, created if missing
        #[arg(value_name = "DIR")]
        output: PathBuf,

        /// Writer options as TOML, applied to the summary fixture
        #[arg(short, long, value_name = "TOML")]
        config: Option<PathBuf>,
    },

    /// Read an MCAP file back and print channels and message counts
    Inspect {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fixtures { output, config } => cmd::fixtures::run(&output, config.as_deref()),
        Commands::Inspect { input } => cmd::inspect::run(&input),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

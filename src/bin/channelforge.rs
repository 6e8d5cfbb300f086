// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Channelforge CLI
//!
//! Command-line tool for rewriting and deploying channel exports.
//!
//! ## Usage
//!
//! ```sh
//! # Rewrite the channel roster for another environment
//! channelforge transform exports/ deploy/ --database warehouse
//!
//! # Rewrite a single export
//! channelforge transform exports/my_channel.xml deploy/ -u deploy -p secret
//!
//! # Import and deploy the transformed roster
//! channelforge deploy deploy/
//!
//! # Export the live roster for inspection
//! channelforge export backups/
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DeployCmd, ExportCmd, TransformCmd};
use common::Result;

/// Channelforge - channel deployment toolkit
///
/// Rewrite exported integration channels for another environment and drive
/// the engine's admin shell to deploy them. Values come from the
/// configuration file unless overridden by flags.
#[derive(Parser, Clone)]
#[command(name = "channelforge")]
#[command(about = "Channel deployment toolkit for integration-engine exports", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Transform channel exports for another environment
    Transform(TransformCmd),

    /// Import the channel roster and deploy it via the admin shell
    Deploy(DeployCmd),

    /// Export the live channel roster via the admin shell
    Export(ExportCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transform(cmd) => cmd.run(),
        Commands::Deploy(cmd) => cmd.run(),
        Commands::Export(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

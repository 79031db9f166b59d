//! CLI for the amv archive mirror verifier.

mod commands;

use amv_core::config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_checksum, run_make, run_size, run_verify};

/// Top-level CLI for the amv archive mirror verifier.
#[derive(Debug, Parser)]
#[command(name = "amv")]
#[command(about = "amv: verify a local archive mirror against its file manifest", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate a download-URL list from a manifest.
    Make {
        /// Path to the `_files.xml` manifest.
        manifest: PathBuf,
        /// Archive item identifier the URLs point at.
        archive: String,
        /// Output file, one URL per line.
        out: PathBuf,
    },

    /// Verify a local mirror directory against a manifest.
    Verify {
        /// Path to the `_files.xml` manifest.
        manifest: PathBuf,
        /// Directory holding the mirrored files.
        dir: PathBuf,
    },

    /// Report the total size of all files listed in a manifest.
    Size {
        /// Path to the `_files.xml` manifest.
        manifest: PathBuf,
    },

    /// Compute the SHA-1 of a single local file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Make {
                manifest,
                archive,
                out,
            } => run_make(&manifest, &archive, &out, &cfg),
            CliCommand::Verify { manifest, dir } => run_verify(&manifest, &dir, &cfg),
            CliCommand::Size { manifest } => run_size(&manifest),
            CliCommand::Checksum { path } => run_checksum(&path, &cfg),
        }
    }
}

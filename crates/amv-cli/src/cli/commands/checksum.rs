//! Checksum command: compute SHA-1 of a file.

use amv_core::config::AmvConfig;
use amv_core::hasher;
use anyhow::Result;
use std::path::Path;

/// Compute and print SHA-1 of the given file.
pub fn run_checksum(path: &Path, cfg: &AmvConfig) -> Result<()> {
    let digest = hasher::sha1_file(path, cfg.buf_size())?;
    println!("{}  {}", digest.to_hex(), path.display());
    Ok(())
}

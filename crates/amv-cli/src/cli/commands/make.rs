//! `amv make <manifest> <archive> <out>` – write a download-URL list.

use amv_core::config::AmvConfig;
use amv_core::manifest::Manifest;
use amv_core::urls;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write one download URL per named manifest entry to `out`, in manifest
/// order. An unopenable or unwritable output file aborts the run; entries
/// with no name are reported and skipped.
pub fn run_make(manifest_path: &Path, archive: &str, out_path: &Path, cfg: &AmvConfig) -> Result<()> {
    let manifest = Manifest::parse(manifest_path)?;
    let file = File::create(out_path)
        .with_context(|| format!("can't open {}", out_path.display()))?;
    let mut out = BufWriter::new(file);

    let mut written = 0u32;
    let mut failed = 0u32;
    for entry in manifest.entries() {
        match entry.name() {
            Ok(name) => {
                writeln!(
                    out,
                    "{}",
                    urls::download_url(&cfg.download_base_url, archive, name)
                )
                .with_context(|| format!("write {}", out_path.display()))?;
                written += 1;
            }
            Err(err) => {
                println!("{err}");
                failed += 1;
            }
        }
    }
    out.flush()
        .with_context(|| format!("write {}", out_path.display()))?;

    tracing::info!("wrote {} URLs to {}", written, out_path.display());
    println!("Wrote {written} URLs to {}", out_path.display());
    if failed > 0 {
        println!("Couldn't list {failed} entries");
    }
    Ok(())
}

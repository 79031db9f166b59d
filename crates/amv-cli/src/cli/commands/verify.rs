//! `amv verify <manifest> <dir>` – stream-verify a mirror directory.

use amv_core::config::AmvConfig;
use amv_core::report::EntryVerdict;
use amv_core::verify::{self, VerifyEvent};
use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

/// Verify every manifest entry against the mirror under `dir`, printing
/// each entry's line as it is decided and the summary at the end. Bad or
/// failed files do not affect the exit status; only run-fatal errors do.
pub fn run_verify(manifest_path: &Path, dir: &Path, cfg: &AmvConfig) -> Result<()> {
    let stats = verify::verify_mirror_at(manifest_path, dir, cfg.buf_size(), |event| {
        match event {
            VerifyEvent::Skipped { name } => println!("Skipping unverifiable file {name}"),
            VerifyEvent::Started { name } => {
                // Keep the name visible while a large file hashes.
                print!("Verifying {name}...");
                let _ = io::stdout().flush();
            }
            VerifyEvent::Finished { verdict } => match verdict {
                EntryVerdict::Ok(digest) => println!("{}...OK", digest.to_hex()),
                EntryVerdict::Bad { actual, expected } => {
                    println!("{}...BAD, expected {expected}", actual.to_hex());
                }
                EntryVerdict::Failed(err) => println!("{err:#}"),
            },
        }
    })?;

    tracing::info!(
        "verify done: {} ok, {} bad, {} failed",
        stats.verified,
        stats.bad,
        stats.failed
    );
    print!("{}", stats.render());
    Ok(())
}

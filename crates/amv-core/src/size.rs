//! Total-size summation over a manifest, no mirror required.

use anyhow::Result;
use std::path::Path;

use crate::manifest::{EntryError, Manifest};
use crate::report::SizeStats;

/// Outcome of size-checking one manifest entry.
pub enum SizeEvent<'a> {
    /// A meta-entry was skipped; it never carries a size.
    Skipped { name: &'a str },
    /// The entry's declared size was folded into the total.
    Checked { name: &'a str, bytes: u64 },
    /// The entry has no usable name or size field.
    Failed {
        name: Option<&'a str>,
        error: EntryError,
    },
}

/// Sum the declared sizes of all non-meta entries, in document order.
/// Field failures are per-entry; the fold always reaches the end.
pub fn sum_sizes(manifest: &Manifest, mut observe: impl FnMut(SizeEvent<'_>)) -> SizeStats {
    let mut stats = SizeStats::default();
    for entry in manifest.entries() {
        if entry.is_meta() {
            if let Ok(name) = entry.name() {
                observe(SizeEvent::Skipped { name });
            }
            continue;
        }
        match entry.name() {
            Err(error) => {
                observe(SizeEvent::Failed { name: None, error });
                stats.record_failed();
            }
            Ok(name) => match entry.size_bytes() {
                Ok(bytes) => {
                    observe(SizeEvent::Checked { name, bytes });
                    stats.record_checked(bytes);
                }
                Err(error) => {
                    observe(SizeEvent::Failed {
                        name: Some(name),
                        error,
                    });
                    stats.record_failed();
                }
            },
        }
    }
    stats
}

/// Parse the manifest at `path` and sum its sizes in one call.
pub fn sum_sizes_at(path: &Path, observe: impl FnMut(SizeEvent<'_>)) -> Result<SizeStats> {
    let manifest = Manifest::parse(path)?;
    Ok(sum_sizes(&manifest, observe))
}

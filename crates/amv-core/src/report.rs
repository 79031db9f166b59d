//! Run statistics and the human-readable end-of-run report.
//!
//! Each entry lands in exactly one bucket exactly once; meta-entries are
//! skipped before they reach the statistics. Totals use `u64` so
//! multi-terabyte archives sum without overflow.

use crate::hasher::Sha1Digest;

/// Outcome of hash-verifying one manifest entry.
#[derive(Debug)]
pub enum EntryVerdict {
    /// Computed digest matched the manifest.
    Ok(Sha1Digest),
    /// File was readable but its content digest differs.
    Bad {
        actual: Sha1Digest,
        expected: String,
    },
    /// The entry could not be verified at all (missing field, unopenable
    /// or unreadable file, unsafe name).
    Failed(anyhow::Error),
}

/// Bucket counts for one verification run. Reset per invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyStats {
    pub verified: u32,
    pub bad: u32,
    pub failed: u32,
}

impl VerifyStats {
    pub fn record(&mut self, verdict: &EntryVerdict) {
        match verdict {
            EntryVerdict::Ok(_) => self.verified += 1,
            EntryVerdict::Bad { .. } => self.bad += 1,
            EntryVerdict::Failed(_) => self.failed += 1,
        }
    }

    /// Number of entries that reached a bucket.
    pub fn attempted(&self) -> u32 {
        self.verified + self.bad + self.failed
    }

    pub fn render(&self) -> String {
        format!(
            "\nVerified {} files\nCouldn't verify {} files\n{} bad files\n",
            self.verified, self.failed, self.bad
        )
    }
}

/// Bucket counts and byte total for one size-summation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SizeStats {
    pub checked: u32,
    pub failed: u32,
    pub total_size: u64,
}

impl SizeStats {
    pub fn record_checked(&mut self, bytes: u64) {
        self.checked += 1;
        self.total_size += bytes;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn render(&self) -> String {
        format!(
            "\nChecked {} files\nCouldn't check {} files\nTotal size: {}\n",
            self.checked,
            self.failed,
            human_size(self.total_size)
        )
    }
}

/// Render a byte count in the largest binary unit it reaches; plain bytes
/// below 1 KiB. Single unit only, lower bound inclusive.
pub fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1 << 10;
    const MIB: u64 = 1 << 20;
    const GIB: u64 = 1 << 30;
    const TIB: u64 = 1 << 40;

    if bytes >= TIB {
        format!("{:.6} TiB", bytes as f64 / TIB as f64)
    } else if bytes >= GIB {
        format!("{:.6} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.6} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.6} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

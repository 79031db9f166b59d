//! Manifest-driven verification of a local mirror.
//!
//! [`verify_mirror`] walks the manifest in document order, hashing each
//! non-meta entry against the mirror and folding the verdicts into
//! [`VerifyStats`]. The caller observes progress through a callback (the
//! CLI prints; tests collect), so diagnostics surface as they happen
//! instead of at the end of a long run.

use anyhow::Result;
use std::path::Path;

use crate::hasher;
use crate::manifest::{FileEntry, Manifest};
use crate::mirror::MirrorRoot;
use crate::report::{EntryVerdict, VerifyStats};

/// Progress notification for one manifest entry.
pub enum VerifyEvent<'a> {
    /// A meta-entry was skipped without touching the mirror.
    Skipped { name: &'a str },
    /// Hashing of `name` is starting.
    Started { name: &'a str },
    /// The entry landed in a bucket.
    Finished { verdict: &'a EntryVerdict },
}

/// Verify every manifest entry against the mirror, strictly in document
/// order. Entry failures are folded into the statistics; nothing here
/// aborts the run.
pub fn verify_mirror(
    manifest: &Manifest,
    root: &MirrorRoot,
    buf_size: usize,
    mut observe: impl FnMut(VerifyEvent<'_>),
) -> VerifyStats {
    let mut stats = VerifyStats::default();
    for entry in manifest.entries() {
        if entry.is_meta() {
            if let Ok(name) = entry.name() {
                observe(VerifyEvent::Skipped { name });
            }
            continue;
        }
        if let Ok(name) = entry.name() {
            observe(VerifyEvent::Started { name });
        }
        let verdict = verify_entry(entry, root, buf_size);
        observe(VerifyEvent::Finished { verdict: &verdict });
        stats.record(&verdict);
    }
    stats
}

/// Verify one entry: resolve its path under the root, stream-hash the file
/// and compare against the manifest digest. All failures are entry-local.
pub fn verify_entry(entry: &FileEntry, root: &MirrorRoot, buf_size: usize) -> EntryVerdict {
    match try_verify(entry, root, buf_size) {
        Ok(verdict) => verdict,
        Err(err) => EntryVerdict::Failed(err),
    }
}

fn try_verify(entry: &FileEntry, root: &MirrorRoot, buf_size: usize) -> Result<EntryVerdict> {
    let name = entry.name()?;
    let expected = entry.expected_sha1()?;
    let path = root.resolve(name)?;
    let digest = hasher::sha1_file(&path, buf_size)?;
    Ok(if digest.matches_hex(expected) {
        EntryVerdict::Ok(digest)
    } else {
        EntryVerdict::Bad {
            actual: digest,
            expected: expected.to_string(),
        }
    })
}

/// Verify a manifest file against a mirror directory in one call.
/// Manifest parse failures and an unusable root abort the run; everything
/// per-entry is already folded into the returned statistics.
pub fn verify_mirror_at(
    manifest_path: &Path,
    dir: &Path,
    buf_size: usize,
    observe: impl FnMut(VerifyEvent<'_>),
) -> Result<VerifyStats> {
    let manifest = Manifest::parse(manifest_path)?;
    let root = MirrorRoot::new(dir)?;
    Ok(verify_mirror(&manifest, &root, buf_size, observe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::DEFAULT_BUF_SIZE;
    use std::fs;

    const ALPHA_SHA1: &str = "d046cd9b7ffb7661e449683313d41f6fc33e3130";
    const BETA_SHA1: &str = "6c007a14875d53d9bf0ef5a6fc0257c817f0fb83";
    const GAMMA_SHA1: &str = "37f385b028bf2f93a4b497ca9ff44eea63945b7f";

    fn manifest_for(entries: &[(&str, &str)]) -> Manifest {
        let body: String = entries
            .iter()
            .map(|(name, sha1)| {
                format!("<file name=\"{name}\"><sha1>{sha1}</sha1><size>6</size></file>")
            })
            .collect();
        Manifest::parse_str(&format!("<files>{body}</files>")).unwrap()
    }

    fn write_mirror(dir: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn all_good_mirror_verifies_every_entry() {
        let dir = tempfile::tempdir().unwrap();
        write_mirror(dir.path(), &[("alpha.txt", "alpha\n"), ("beta.txt", "beta\n")]);
        let manifest = manifest_for(&[("alpha.txt", ALPHA_SHA1), ("beta.txt", BETA_SHA1)]);
        let root = MirrorRoot::new(dir.path()).unwrap();

        let stats = verify_mirror(&manifest, &root, DEFAULT_BUF_SIZE, |_| {});
        assert_eq!(
            stats,
            VerifyStats {
                verified: 2,
                bad: 0,
                failed: 0
            }
        );
    }

    #[test]
    fn missing_file_fails_once_and_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        write_mirror(dir.path(), &[("alpha.txt", "alpha\n"), ("gamma.txt", "gamma\n")]);
        let manifest = manifest_for(&[
            ("alpha.txt", ALPHA_SHA1),
            ("missing.txt", BETA_SHA1),
            ("gamma.txt", GAMMA_SHA1),
        ]);
        let root = MirrorRoot::new(dir.path()).unwrap();

        let mut finished = 0;
        let stats = verify_mirror(&manifest, &root, DEFAULT_BUF_SIZE, |event| {
            if matches!(event, VerifyEvent::Finished { .. }) {
                finished += 1;
            }
        });
        assert_eq!(
            stats,
            VerifyStats {
                verified: 2,
                bad: 0,
                failed: 1
            }
        );
        assert_eq!(finished, 3);
    }

    #[test]
    fn corrupted_file_is_bad_with_expected_digest_kept() {
        let dir = tempfile::tempdir().unwrap();
        write_mirror(dir.path(), &[("alpha.txt", "not the right content\n")]);
        let manifest = manifest_for(&[("alpha.txt", ALPHA_SHA1)]);
        let root = MirrorRoot::new(dir.path()).unwrap();

        let verdict = verify_entry(manifest.entries().next().unwrap(), &root, DEFAULT_BUF_SIZE);
        match verdict {
            EntryVerdict::Bad { actual, expected } => {
                assert_eq!(expected, ALPHA_SHA1);
                assert_eq!(actual.to_hex(), "f1a74a8e1df10bd892e40eb9a26e41399451aaae");
            }
            other => panic!("expected Bad, got {other:?}"),
        }
    }

    #[test]
    fn meta_entry_is_skipped_not_failed() {
        let dir = tempfile::tempdir().unwrap();
        write_mirror(dir.path(), &[("alpha.txt", "alpha\n")]);
        let manifest = Manifest::parse_str(&format!(
            "<files>\
               <file name=\"item_files.xml\"/>\
               <file name=\"alpha.txt\"><sha1>{ALPHA_SHA1}</sha1><size>6</size></file>\
             </files>"
        ))
        .unwrap();
        let root = MirrorRoot::new(dir.path()).unwrap();

        let mut skipped = Vec::new();
        let stats = verify_mirror(&manifest, &root, DEFAULT_BUF_SIZE, |event| {
            if let VerifyEvent::Skipped { name } = event {
                skipped.push(name.to_string());
            }
        });
        assert_eq!(skipped, ["item_files.xml"]);
        assert_eq!(
            stats,
            VerifyStats {
                verified: 1,
                bad: 0,
                failed: 0
            }
        );
    }

    #[test]
    fn missing_sha1_and_missing_name_are_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_mirror(dir.path(), &[("alpha.txt", "alpha\n")]);
        let manifest = Manifest::parse_str(
            r#"<files>
                 <file name="alpha.txt"><size>6</size></file>
                 <file><sha1>deadbeef</sha1></file>
               </files>"#,
        )
        .unwrap();
        let root = MirrorRoot::new(dir.path()).unwrap();

        let stats = verify_mirror(&manifest, &root, DEFAULT_BUF_SIZE, |_| {});
        assert_eq!(
            stats,
            VerifyStats {
                verified: 0,
                bad: 0,
                failed: 2
            }
        );
    }

    #[test]
    fn unsafe_name_is_an_entry_failure() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest_for(&[("../escape.txt", ALPHA_SHA1)]);
        let root = MirrorRoot::new(dir.path()).unwrap();

        let verdict = verify_entry(manifest.entries().next().unwrap(), &root, DEFAULT_BUF_SIZE);
        assert!(matches!(verdict, EntryVerdict::Failed(_)));
    }

    #[test]
    fn buckets_sum_to_non_meta_entry_count() {
        let dir = tempfile::tempdir().unwrap();
        write_mirror(
            dir.path(),
            &[("alpha.txt", "alpha\n"), ("beta.txt", "wrong\n")],
        );
        let manifest = Manifest::parse_str(&format!(
            "<files>\
               <file name=\"alpha.txt\"><sha1>{ALPHA_SHA1}</sha1></file>\
               <file name=\"beta.txt\"><sha1>{BETA_SHA1}</sha1></file>\
               <file name=\"missing.txt\"><sha1>{GAMMA_SHA1}</sha1></file>\
               <file name=\"item_files.xml\"/>\
             </files>"
        ))
        .unwrap();
        let root = MirrorRoot::new(dir.path()).unwrap();

        let stats = verify_mirror(&manifest, &root, DEFAULT_BUF_SIZE, |_| {});
        let non_meta = manifest.entries().filter(|e| !e.is_meta()).count() as u32;
        assert_eq!(stats.attempted(), non_meta);
        assert_eq!(stats.verified, 1);
        assert_eq!(stats.bad, 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn entries_are_visited_in_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest_for(&[
            ("c.txt", ALPHA_SHA1),
            ("a.txt", BETA_SHA1),
            ("b.txt", GAMMA_SHA1),
        ]);
        let root = MirrorRoot::new(dir.path()).unwrap();

        let mut started = Vec::new();
        verify_mirror(&manifest, &root, DEFAULT_BUF_SIZE, |event| {
            if let VerifyEvent::Started { name } = event {
                started.push(name.to_string());
            }
        });
        assert_eq!(started, ["c.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn verify_mirror_at_rejects_bad_manifest_and_root() {
        let dir = tempfile::tempdir().unwrap();
        let bad_manifest = dir.path().join("m.xml");
        fs::write(&bad_manifest, "<notfiles/>").unwrap();
        assert!(verify_mirror_at(&bad_manifest, dir.path(), DEFAULT_BUF_SIZE, |_| {}).is_err());

        let good_manifest = dir.path().join("good.xml");
        fs::write(&good_manifest, "<files/>").unwrap();
        let missing_dir = dir.path().join("nope");
        assert!(verify_mirror_at(&good_manifest, &missing_dir, DEFAULT_BUF_SIZE, |_| {}).is_err());
    }
}

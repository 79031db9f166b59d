//! Streaming SHA-1 hashing for mirror verification.
//!
//! The manifest format fixes the digest to SHA-1, so that is the one
//! algorithm here. Files are read in chunks to keep memory use bounded;
//! suitable for large files.

use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Default read chunk size (64 KiB).
pub const DEFAULT_BUF_SIZE: usize = 64 * 1024;

/// Failure while hashing one file. Scoped to that entry; the run continues.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("can't open file: {0}")]
    Open(#[source] std::io::Error),
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),
}

/// A finalized 20-byte SHA-1 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha1Digest(pub [u8; 20]);

impl Sha1Digest {
    /// Lowercase 40-character hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compare against the manifest's expected lowercase-hex string.
    pub fn matches_hex(&self, expected: &str) -> bool {
        self.to_hex() == expected
    }
}

/// Compute the SHA-1 of the file at `path`, reading `buf_size` bytes at a
/// time into a reusable buffer.
pub fn sha1_file(path: &Path, buf_size: usize) -> Result<Sha1Digest, HashError> {
    let mut f = File::open(path).map_err(HashError::Open)?;
    let mut hasher = Sha1::new();
    // A zero-size buffer would read nothing and finalize an empty digest.
    let mut buf = vec![0u8; buf_size.max(1)];
    loop {
        let n = f.read(&mut buf).map_err(HashError::Read)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Sha1Digest(hasher.finalize().into()))
}

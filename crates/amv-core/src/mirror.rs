//! Mirror-root path handling for manifest-relative filenames.
//!
//! Manifest names are UTF-8 and `std::path` accepts UTF-8 natively on every
//! supported platform, so no encoding conversion happens here; what remains
//! is building the on-disk path and refusing names that would escape the
//! mirror root.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// The mirror root itself is unusable; aborts the whole run.
    #[error("mirror root {0} is not a directory")]
    RootNotDir(PathBuf),
    /// One manifest name can't be used under the root; the entry is
    /// recorded as failed and the run continues.
    #[error("unsafe filename in manifest: {0}")]
    Unsafe(String),
}

/// The local directory a manifest is checked against.
#[derive(Debug, Clone)]
pub struct MirrorRoot {
    dir: PathBuf,
}

impl MirrorRoot {
    pub fn new(dir: &Path) -> Result<Self, PathError> {
        if !dir.is_dir() {
            return Err(PathError::RootNotDir(dir.to_path_buf()));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a manifest-relative name to its on-disk path. Absolute names
    /// and parent traversal are rejected; no legitimate manifest contains
    /// them.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, PathError> {
        let rel = Path::new(name);
        if rel.is_absolute() {
            return Err(PathError::Unsafe(name.to_string()));
        }
        for comp in rel.components() {
            if matches!(comp, Component::ParentDir) {
                return Err(PathError::Unsafe(name.to_string()));
            }
        }
        Ok(self.dir.join(rel))
    }
}

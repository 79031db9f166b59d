//! Manifest parsing and per-entry field dispatch.
//!
//! An archive item's `_files.xml` manifest is a single `<files>` element
//! whose `<file name="...">` children carry optional `<sha1>` and `<size>`
//! metadata. Parsing materializes the entries in document order; every
//! consumer (url-list, verify, size) is a fold over [`Manifest::entries`].

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Reserved suffix of the manifest's own entry. Such entries never carry a
/// hash or size and are exempt from verification and size summation.
pub const META_SUFFIX: &str = "_files.xml";

/// Root element tag every manifest must carry.
const ROOT_TAG: &str = "files";

/// Manifest-level parse failure. Always fatal for the whole run.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("can't read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("error parsing manifest: {0}")]
    Syntax(roxmltree::Error),
    #[error("manifest document is empty")]
    EmptyDocument,
    #[error("bad manifest, root element is \"{0}\", not \"files\"")]
    WrongRoot(String),
}

/// Entry-local dispatch failure. Recorded against the one entry, never
/// escalated to the run.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("entry has no name attribute")]
    MissingName,
    #[error("no sha1 element")]
    MissingSha1,
    #[error("no size element")]
    MissingSize,
}

/// One `<file>` entry with its raw extracted fields.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: Option<String>,
    sha1: Option<String>,
    size_text: Option<String>,
}

impl FileEntry {
    /// Manifest-relative filename. Required by every operation.
    pub fn name(&self) -> Result<&str, EntryError> {
        self.name.as_deref().ok_or(EntryError::MissingName)
    }

    /// True for the manifest's self-descriptor entry (`*_files.xml`).
    /// Suffix match is byte-wise and case-sensitive.
    pub fn is_meta(&self) -> bool {
        matches!(&self.name, Some(n) if n.ends_with(META_SUFFIX))
    }

    /// Expected lowercase-hex SHA-1 from the `<sha1>` child.
    pub fn expected_sha1(&self) -> Result<&str, EntryError> {
        self.sha1.as_deref().ok_or(EntryError::MissingSha1)
    }

    /// Declared size in bytes from the `<size>` child. The text is an
    /// unsigned decimal or `0x`-prefixed hex integer; malformed text counts
    /// as 0 rather than an error, since existing manifests rely on it.
    pub fn size_bytes(&self) -> Result<u64, EntryError> {
        let text = self.size_text.as_deref().ok_or(EntryError::MissingSize)?;
        Ok(parse_size_text(text))
    }
}

fn parse_size_text(text: &str) -> u64 {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex_digits) => u64::from_str_radix(hex_digits, 16),
        None => text.parse::<u64>(),
    };
    parsed.unwrap_or(0)
}

/// A parsed manifest: the ordered `<file>` entries of one archive item.
#[derive(Debug)]
pub struct Manifest {
    entries: Vec<FileEntry>,
}

impl Manifest {
    /// Parse the manifest at `path`. A well-formed document with no `<file>`
    /// children is simply empty, not an error.
    pub fn parse(path: &Path) -> Result<Self, ParseError> {
        let text = fs::read_to_string(path)?;
        Self::parse_str(&text)
    }

    /// Parse manifest text that is already in memory.
    pub fn parse_str(text: &str) -> Result<Self, ParseError> {
        let doc = roxmltree::Document::parse(text).map_err(|e| match e {
            roxmltree::Error::NoRootNode => ParseError::EmptyDocument,
            other => ParseError::Syntax(other),
        })?;
        let root = doc
            .root()
            .first_element_child()
            .ok_or(ParseError::EmptyDocument)?;
        if root.tag_name().name() != ROOT_TAG {
            return Err(ParseError::WrongRoot(root.tag_name().name().to_string()));
        }

        // Children with other tags are tolerated manifest noise, not errors.
        let entries = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "file")
            .map(|n| FileEntry {
                name: n.attribute("name").map(str::to_string),
                sha1: child_text(n, "sha1"),
                size_text: child_text(n, "size"),
            })
            .collect();
        Ok(Manifest { entries })
    }

    /// Entries in document order. Restartable: call again for a fresh pass.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text content of the first direct child element tagged `tag`.
fn child_text(node: roxmltree::Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == tag)
        .and_then(|c| c.text())
        .map(str::to_string)
}

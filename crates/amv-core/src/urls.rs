//! Download-URL formatting for manifest entries.

/// Build the download URL for one manifest entry.
///
/// `base` carries no trailing slash (e.g. `https://archive.org/download`);
/// `name` is the manifest-relative filename, used verbatim.
///
/// # Examples
///
/// - `download_url("https://archive.org/download", "item", "a.flac")` →
///   `"https://archive.org/download/item/a.flac"`
pub fn download_url(base: &str, archive: &str, name: &str) -> String {
    format!("{base}/{archive}/{name}")
}

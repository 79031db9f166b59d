use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::hasher;

/// Global configuration loaded from `~/.config/amv/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmvConfig {
    /// Base URL generated download links point at.
    pub download_base_url: String,
    /// Optional read-buffer size in bytes for streaming hashing
    /// (None = built-in 64 KiB default).
    #[serde(default)]
    pub read_buffer_bytes: Option<usize>,
}

impl Default for AmvConfig {
    fn default() -> Self {
        Self {
            download_base_url: "https://archive.org/download".to_string(),
            read_buffer_bytes: None,
        }
    }
}

impl AmvConfig {
    /// Effective chunk size for streaming reads.
    pub fn buf_size(&self) -> usize {
        self.read_buffer_bytes.unwrap_or(hasher::DEFAULT_BUF_SIZE)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("amv")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AmvConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AmvConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: AmvConfig = toml::from_str(&data)?;
    Ok(cfg)
}

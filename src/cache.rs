//! Per-scroll cache: visit history and config overrides under `.cache/`.
//!
//! Files are stored using a hash of the scroll asset path as the directory
//! name to avoid filesystem issues. Write errors are ignored to keep the UI
//! responsive.

use crate::config::AppConfig;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const CACHE_DIR: &str = ".cache";

/// Most-recent-first list of visited hotspot ids.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct VisitHistory {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Load the persisted visit history for a scroll, if present.
pub fn load_history(scroll_dir: &Path) -> Option<VisitHistory> {
    let data = fs::read_to_string(history_path(scroll_dir)).ok()?;
    toml::from_str(&data).ok()
}

pub fn save_history(scroll_dir: &Path, history: &VisitHistory) {
    let path = history_path(scroll_dir);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = toml::to_string(history) {
        let _ = fs::write(path, contents);
    }
}

/// Per-scroll config override saved the last time this scroll was open.
pub fn load_scroll_config(scroll_dir: &Path) -> Option<AppConfig> {
    let data = fs::read_to_string(hash_dir(scroll_dir).join("config.toml")).ok()?;
    crate::config::parse_config(&data).ok()
}

pub fn save_scroll_config(scroll_dir: &Path, config: &AppConfig) {
    let dir = hash_dir(scroll_dir);
    let _ = fs::create_dir_all(&dir);
    if let Ok(contents) = crate::config::serialize_config(config) {
        let _ = fs::write(dir.join("config.toml"), contents);
    }
}

pub fn hash_dir(scroll_dir: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(scroll_dir.as_os_str().to_string_lossy().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    Path::new(CACHE_DIR).join(hash)
}

fn history_path(scroll_dir: &Path) -> PathBuf {
    hash_dir(scroll_dir).join("history.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_dirs_are_stable_and_distinct() {
        let a = hash_dir(Path::new("/scrolls/binfeng"));
        let b = hash_dir(Path::new("/scrolls/binfeng"));
        let c = hash_dir(Path::new("/scrolls/other"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with(CACHE_DIR));
    }
}

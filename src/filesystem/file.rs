// src/filesystem/file.rs
use super::{Entry, EntryKind};
use crate::error::ProviderError;
use std::time::{SystemTime, UNIX_EPOCH};

impl Entry {
    /// Snapshot of a local path in listing shape: `mtime` and `created` as
    /// Unix seconds, `size` in bytes, `uid` on Unix.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        let name = path.file_name()?.to_string_lossy().to_string();
        let kind = if metadata.is_dir() { EntryKind::Directory } else { EntryKind::File };

        let mut entry = Entry::new(name, Some(kind));
        if let Some(secs) = metadata.modified().ok().and_then(unix_seconds) {
            entry = entry.with("mtime", secs);
        }
        if let Some(secs) = metadata.created().ok().and_then(unix_seconds) {
            entry = entry.with("created", secs);
        }
        if kind == EntryKind::File {
            entry = entry.with("size", metadata.len());
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            entry = entry.with("uid", metadata.uid().to_string());
        }
        Some(entry)
    }
}

fn unix_seconds(time: SystemTime) -> Option<i64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs() as i64)
}

/// Parse a JSON array of listing entries.
pub fn entries_from_json(content: &str) -> Result<Vec<Entry>, ProviderError> {
    Ok(serde_json::from_str(content)?)
}

// src/filesystem/memory.rs
use super::{Entry, EntryProvider};
use crate::error::ProviderError;
use std::collections::BTreeMap;

/// Listing tree held in memory, keyed by slash-joined path (`""` is the root).
///
/// Loaded from an exported listing such as
/// `{"": [{"name": "docs", "type": "directory"}], "docs": [...]}`.
/// File contents only exist for uploaded files; listed files read as empty.
#[derive(Debug, Clone, Default)]
pub struct MemoryFolder {
    listings: BTreeMap<String, Vec<Entry>>,
    contents: BTreeMap<String, Vec<u8>>,
}

impl MemoryFolder {
    pub fn new() -> Self {
        MemoryFolder::default()
    }

    pub fn from_json(content: &str) -> Result<Self, ProviderError> {
        let listings: BTreeMap<String, Vec<Entry>> = serde_json::from_str(content)?;
        Ok(MemoryFolder { listings, contents: BTreeMap::new() })
    }

    pub fn insert(&mut self, path: &str, entries: Vec<Entry>) {
        self.listings.insert(path.to_string(), entries);
    }

    fn key(path: &[String]) -> String {
        path.join("/")
    }

    fn child_key(path: &[String], name: &str) -> String {
        if path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", Self::key(path), name)
        }
    }

    /// Names become path keys, so they must be a single non-empty segment.
    fn check_name(name: &str) -> Result<(), ProviderError> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(ProviderError::InvalidPath(name.to_string()));
        }
        Ok(())
    }

    fn listing_mut(&mut self, path: &[String]) -> Result<&mut Vec<Entry>, ProviderError> {
        let key = Self::key(path);
        self.listings.get_mut(&key).ok_or(ProviderError::NotFound(key))
    }
}

/// Moves every key at or below `from` to the same place under `to`.
fn rekey<V>(map: &mut BTreeMap<String, V>, from: &str, to: &str) {
    let prefix = format!("{}/", from);
    let keys: Vec<String> = map
        .keys()
        .filter(|k| k.as_str() == from || k.starts_with(&prefix))
        .cloned()
        .collect();
    for key in keys {
        if let Some(value) = map.remove(&key) {
            map.insert(format!("{}{}", to, &key[from.len()..]), value);
        }
    }
}

fn drop_subtree<V>(map: &mut BTreeMap<String, V>, key: &str) {
    let prefix = format!("{}/", key);
    map.retain(|k, _| k != key && !k.starts_with(&prefix));
}

impl EntryProvider for MemoryFolder {
    fn list(&self, path: &[String]) -> Result<Vec<Entry>, ProviderError> {
        let key = Self::key(path);
        self.listings.get(&key).cloned().ok_or(ProviderError::NotFound(key))
    }

    fn add_folder(&mut self, path: &[String], name: &str) -> Result<(), ProviderError> {
        Self::check_name(name)?;
        let listing = self.listing_mut(path)?;
        if listing.iter().any(|e| e.name == name) {
            return Err(ProviderError::AlreadyExists(name.to_string()));
        }
        listing.push(Entry::directory(name));
        self.listings.insert(Self::child_key(path, name), Vec::new());
        Ok(())
    }

    fn rename(&mut self, path: &[String], old: &str, new: &str) -> Result<(), ProviderError> {
        Self::check_name(new)?;
        let listing = self.listing_mut(path)?;
        if listing.iter().any(|e| e.name == new) {
            return Err(ProviderError::AlreadyExists(new.to_string()));
        }
        let entry = listing
            .iter_mut()
            .find(|e| e.name == old)
            .ok_or_else(|| ProviderError::NotFound(old.to_string()))?;
        entry.name = new.to_string();
        let is_dir = entry.is_dir();
        let (from, to) = (Self::child_key(path, old), Self::child_key(path, new));
        if is_dir {
            rekey(&mut self.listings, &from, &to);
        }
        rekey(&mut self.contents, &from, &to);
        Ok(())
    }

    fn delete(&mut self, path: &[String], name: &str) -> Result<(), ProviderError> {
        let listing = self.listing_mut(path)?;
        let before = listing.len();
        listing.retain(|e| e.name != name);
        if listing.len() == before {
            return Err(ProviderError::NotFound(name.to_string()));
        }
        let child = Self::child_key(path, name);
        drop_subtree(&mut self.listings, &child);
        drop_subtree(&mut self.contents, &child);
        Ok(())
    }

    fn upload(&mut self, path: &[String], name: &str, content: &[u8]) -> Result<(), ProviderError> {
        Self::check_name(name)?;
        let listing = self.listing_mut(path)?;
        if listing.iter().any(|e| e.name == name) {
            return Err(ProviderError::AlreadyExists(name.to_string()));
        }
        listing.push(Entry::file(name).with("size", content.len()));
        self.contents.insert(Self::child_key(path, name), content.to_vec());
        Ok(())
    }

    fn read(&self, path: &[String], name: &str) -> Result<Vec<u8>, ProviderError> {
        let listing = self.list(path)?;
        if !listing.iter().any(|e| e.name == name && !e.is_dir()) {
            return Err(ProviderError::NotFound(name.to_string()));
        }
        Ok(self.contents.get(&Self::child_key(path, name)).cloned().unwrap_or_default())
    }
}

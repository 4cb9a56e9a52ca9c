// src/filesystem/mod.rs
pub mod actions;
pub mod dir;
pub mod file;
pub mod icon;
pub mod local;
pub mod memory;
pub mod preview;

pub use actions::ItemAction;
pub use dir::{Clipboard, ClipboardMode, FolderView};
pub use file::entries_from_json;
pub use icon::FileIcon;
pub use local::LocalFolder;
pub use memory::MemoryFolder;
pub use preview::{PreviewContent, PreviewManager};

use crate::error::ProviderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::File => "file",
        }
    }
}

/// One item of a folder listing.
///
/// `kind` is optional because listings from some backends omit it; such
/// entries are ordered as directories. Every other key of the listing is
/// kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: Option<EntryKind>) -> Self {
        Entry { name: name.into(), kind, extra: Map::new() }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, Some(EntryKind::Directory))
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, Some(EntryKind::File))
    }

    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Kind tag used by the name ordering; a missing kind counts as a directory.
    pub fn kind_tag(&self) -> &'static str {
        self.kind.unwrap_or(EntryKind::Directory).as_str()
    }

    pub fn is_dir(&self) -> bool {
        self.kind_tag() == EntryKind::Directory.as_str()
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Own attribute `key` in comparable form.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::Text(self.name.clone())),
            "type" => self.kind.map(|k| Value::Text(k.as_str().to_string())),
            _ => self.extra.get(key).and_then(Value::from_json),
        }
    }

    /// Nested lookup with a JSON pointer, e.g. `/item_info/description`.
    pub fn pointer(&self, pointer: &str) -> Option<&serde_json::Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        let value = self.extra.get(head)?;
        if tail.is_empty() {
            Some(value)
        } else {
            value.pointer(tail)
        }
    }

    pub fn pointer_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(|v| v.as_str())
    }
}

/// Comparable form of an entry attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Scalars only; `null`, arrays and objects have no comparable form.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Empty => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::DateTime(_) => true,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::DateTime(dt) => dt.to_rfc3339(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Empty => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::DateTime(_) => 3,
            Value::Text(_) => 4,
        }
    }

    /// Total order: same-variant values compare naturally, otherwise by
    /// variant rank `Empty < Bool < Number < DateTime < Text`.
    pub fn generic_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Source of entries for a location inside a folder.
///
/// Only `list` is required; providers that cannot mutate keep the default
/// `Unsupported` answers.
pub trait EntryProvider {
    fn list(&self, path: &[String]) -> Result<Vec<Entry>, ProviderError>;

    fn add_folder(&mut self, _path: &[String], _name: &str) -> Result<(), ProviderError> {
        Err(ProviderError::Unsupported("add folder"))
    }

    fn rename(&mut self, _path: &[String], _old: &str, _new: &str) -> Result<(), ProviderError> {
        Err(ProviderError::Unsupported("rename"))
    }

    fn delete(&mut self, _path: &[String], _name: &str) -> Result<(), ProviderError> {
        Err(ProviderError::Unsupported("delete"))
    }

    fn paste(
        &mut self,
        _path: &[String],
        _origin: &[String],
        _name: &str,
        _move_entry: bool,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::Unsupported("paste"))
    }

    /// Stores `content` as a new file `name` under `path`.
    fn upload(
        &mut self,
        _path: &[String],
        _name: &str,
        _content: &[u8],
    ) -> Result<(), ProviderError> {
        Err(ProviderError::Unsupported("upload"))
    }

    /// Contents of file `name` under `path`, for preview and download.
    fn read(&self, _path: &[String], _name: &str) -> Result<Vec<u8>, ProviderError> {
        Err(ProviderError::Unsupported("download"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_kind_is_directory() {
        let entry = Entry::new("docs", None);
        assert_eq!(entry.kind_tag(), "directory");
        assert!(entry.is_dir());
        assert!(!Entry::file("a.txt").is_dir());
    }

    #[test]
    fn test_attribute_lookup() {
        let entry = Entry::file("a.txt").with("mtime", 12).with("owner", serde_json::Value::Null);
        assert_eq!(entry.attribute("name"), Some(Value::Text("a.txt".into())));
        assert_eq!(entry.attribute("type"), Some(Value::Text("file".into())));
        assert_eq!(entry.attribute("mtime"), Some(Value::Number(12.0)));
        assert_eq!(entry.attribute("owner"), None);
        assert_eq!(entry.attribute("missing"), None);
    }

    #[test]
    fn test_pointer_into_nested_metadata() {
        let entry = Entry::file("report.docx").with(
            "item_info",
            serde_json::json!({"createdBy": {"user": {"displayName": "Ana"}}}),
        );
        assert_eq!(entry.pointer_str("/item_info/createdBy/user/displayName"), Some("Ana"));
        assert!(entry.pointer("/item_info/missing").is_none());
        assert!(entry.pointer("item_info").is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Empty.is_truthy());
        assert!(!Value::Text(String::new()).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Text("x".into()).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
    }

    #[test]
    fn test_generic_cmp() {
        assert_eq!(Value::Empty.generic_cmp(&Value::Number(1.0)), Ordering::Less);
        assert_eq!(Value::Number(2.0).generic_cmp(&Value::Number(1.0)), Ordering::Greater);
        assert_eq!(Value::Number(2.0).generic_cmp(&Value::Text("a".into())), Ordering::Less);
        assert_eq!(Value::Text("a".into()).generic_cmp(&Value::Number(2.0)), Ordering::Greater);
        assert_eq!(Value::Bool(true).generic_cmp(&Value::Number(0.5)), Ordering::Less);
        assert_eq!(Value::Number(f64::NAN).generic_cmp(&Value::Number(1.0)), Ordering::Greater);
    }
}

// src/filesystem/dir.rs
use super::{Entry, EntryProvider, ItemAction, PreviewContent, PreviewManager};
use crate::error::{ProviderError, ViewError};
use crate::fields::{FieldDescriptor, FieldSet};
use crate::sort::SortStack;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Copy,
    Move,
}

/// Entry waiting to be pasted, with the path it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    pub path: Vec<String>,
    pub entry: Entry,
    pub mode: ClipboardMode,
}

/// One browsing session over a provider: where we are, what is listed and
/// how it is ordered. Every data-affecting operation re-fetches.
pub struct FolderView {
    provider: Box<dyn EntryProvider>,
    pub fields: FieldSet,
    pub sort: SortStack,
    pub path: Vec<String>,
    pub entries: Vec<Entry>,
    pub hidden_fields: Vec<String>,
    pub show_hidden: bool,
    pub filter: Option<Pattern>,
    pub clipboard: Option<Clipboard>,
    previews: PreviewManager,
}

impl FolderView {
    pub fn new(provider: Box<dyn EntryProvider>, fields: FieldSet) -> Self {
        FolderView {
            provider,
            fields,
            sort: SortStack::new(),
            path: Vec::new(),
            entries: Vec::new(),
            hidden_fields: Vec::new(),
            show_hidden: false,
            filter: None,
            clipboard: None,
            previews: PreviewManager::new(),
        }
    }

    /// Listing of `path` with hidden files and the search filter applied, sorted.
    fn fetch(&self, path: &[String]) -> Result<Vec<Entry>, ViewError> {
        let mut entries = self.provider.list(path)?;
        let fetched = entries.len();

        if !self.show_hidden {
            entries.retain(|e| !e.is_hidden());
        }
        if let Some(ref pattern) = self.filter {
            let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };
            entries.retain(|e| pattern.matches_with(&e.name, options));
        }
        self.sort.sort(&mut entries);

        log::debug!("listed /{}: {} fetched, {} shown", path.join("/"), fetched, entries.len());
        Ok(entries)
    }

    pub fn refresh(&mut self) -> Result<(), ViewError> {
        self.entries = self.fetch(&self.path)?;
        Ok(())
    }

    /// The path only changes once its listing has been fetched.
    fn go_to(&mut self, path: Vec<String>) -> Result<(), ViewError> {
        let entries = self.fetch(&path)?;
        self.path = path;
        self.entries = entries;
        Ok(())
    }

    /// Re-sorts the current listing without fetching.
    pub fn toggle_sort(&mut self, field_name: &str) -> Result<(), ViewError> {
        let field = self
            .fields
            .get(field_name)
            .ok_or_else(|| ViewError::UnknownField(field_name.to_string()))?;
        self.sort.toggle(field);
        self.sort.sort(&mut self.entries);
        Ok(())
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn open(&mut self, name: &str) -> Result<(), ViewError> {
        match self.entry(name) {
            Some(entry) if entry.is_dir() => {
                let mut path = self.path.clone();
                path.push(name.to_string());
                self.go_to(path)
            }
            _ => Err(ViewError::NotADirectory(name.to_string())),
        }
    }

    /// `None` goes back to the root, `Some(i)` keeps the first `i + 1` segments.
    pub fn return_parent(&mut self, index: Option<usize>) -> Result<(), ViewError> {
        let path = match index {
            None => Vec::new(),
            Some(i) => self.path.iter().take(i + 1).cloned().collect(),
        };
        self.go_to(path)
    }

    pub fn navigate_up(&mut self) -> Result<(), ViewError> {
        match self.path.len() {
            0 => Ok(()),
            1 => self.return_parent(None),
            n => self.return_parent(Some(n - 2)),
        }
    }

    pub fn is_field_visible(&self, name: &str) -> bool {
        !self.hidden_fields.iter().any(|f| f == name)
    }

    pub fn toggle_field(&mut self, name: &str) -> Result<(), ViewError> {
        let field = self.fields.get(name).ok_or_else(|| ViewError::UnknownField(name.to_string()))?;
        if !field.optional {
            return Err(ViewError::RequiredField(name.to_string()));
        }
        if self.is_field_visible(name) {
            self.hidden_fields.push(name.to_string());
        } else {
            self.hidden_fields.retain(|f| f != name);
        }
        Ok(())
    }

    pub fn visible_fields(&self) -> Vec<&FieldDescriptor> {
        self.fields.by_sequence().into_iter().filter(|f| self.is_field_visible(&f.name)).collect()
    }

    pub fn set_show_hidden(&mut self, show: bool) -> Result<(), ViewError> {
        self.show_hidden = show;
        self.refresh()
    }

    pub fn search(&mut self, pattern: &str) -> Result<(), ViewError> {
        self.filter = Some(Pattern::new(pattern)?);
        self.refresh()
    }

    pub fn clear_search(&mut self) -> Result<(), ViewError> {
        self.filter = None;
        self.refresh()
    }

    pub fn actions_for(&self, name: &str) -> Vec<ItemAction> {
        self.entry(name).map(ItemAction::for_entry).unwrap_or_default()
    }

    pub fn copy(&mut self, name: &str, mode: ClipboardMode) -> Result<(), ViewError> {
        let entry = self
            .entry(name)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(name.to_string()))?;
        self.clipboard = Some(Clipboard { path: self.path.clone(), entry, mode });
        Ok(())
    }

    pub fn paste(&mut self) -> Result<(), ViewError> {
        let clipboard = self.clipboard.take().ok_or(ViewError::EmptyClipboard)?;
        let result = self.provider.paste(
            &self.path,
            &clipboard.path,
            &clipboard.entry.name,
            clipboard.mode == ClipboardMode::Move,
        );
        if let Err(e) = result {
            log::warn!("paste of '{}' failed: {}", clipboard.entry.name, e);
            self.clipboard = Some(clipboard);
            return Err(e.into());
        }
        self.refresh()
    }

    pub fn add_folder(&mut self, name: &str) -> Result<(), ViewError> {
        self.provider.add_folder(&self.path, name)?;
        self.refresh()
    }

    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), ViewError> {
        self.provider.rename(&self.path, old, new)?;
        self.refresh()
    }

    pub fn delete(&mut self, name: &str) -> Result<(), ViewError> {
        self.provider.delete(&self.path, name)?;
        self.refresh()
    }

    pub fn upload(&mut self, name: &str, content: &[u8]) -> Result<(), ViewError> {
        self.provider.upload(&self.path, name, content)?;
        log::info!("uploaded '{}' ({} bytes) to /{}", name, content.len(), self.path.join("/"));
        self.refresh()
    }

    /// Uploads a local file under its own file name.
    pub fn upload_file(&mut self, source: &Path) -> Result<(), ViewError> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ProviderError::InvalidPath(source.display().to_string()))?;
        let content = fs::read(source).map_err(|e| ProviderError::io(source, e))?;
        self.upload(name, &content)
    }

    fn file_entry(&self, name: &str) -> Result<&Entry, ViewError> {
        match self.entry(name) {
            Some(entry) if entry.is_dir() => Err(ViewError::NotAFile(name.to_string())),
            Some(entry) => Ok(entry),
            None => Err(ProviderError::NotFound(name.to_string()).into()),
        }
    }

    pub fn preview(&self, name: &str) -> Result<PreviewContent, ViewError> {
        self.file_entry(name)?;
        let content = self.provider.read(&self.path, name)?;
        Ok(self.previews.get_preview(name, &content))
    }

    /// Writes the file to `destination`, or into it when it is a directory.
    pub fn download(&self, name: &str, destination: &Path) -> Result<PathBuf, ViewError> {
        self.file_entry(name)?;
        let content = self.provider.read(&self.path, name)?;
        let target = if destination.is_dir() {
            destination.join(name)
        } else {
            destination.to_path_buf()
        };
        fs::write(&target, &content).map_err(|e| ProviderError::io(&target, e))?;
        log::info!("downloaded '{}' to {:?}", name, target);
        Ok(target)
    }
}

// src/filesystem/local.rs
use super::{Entry, EntryProvider};
use crate::error::ProviderError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Entries read from a directory on local disk. All paths stay under `root`.
#[derive(Debug, Clone)]
pub struct LocalFolder {
    root: PathBuf,
}

impl LocalFolder {
    pub fn new(root: PathBuf) -> Self {
        LocalFolder { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `path` (plus an optional final `name`), refusing
    /// any segment that is not a plain file name.
    fn resolve(&self, path: &[String], name: Option<&str>) -> Result<PathBuf, ProviderError> {
        let mut resolved = self.root.clone();
        for segment in path.iter().map(String::as_str).chain(name) {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(part)), None) if part == segment => resolved.push(part),
                _ => return Err(ProviderError::InvalidPath(segment.to_string())),
            }
        }
        Ok(resolved)
    }

    fn existing(&self, path: &[String], name: &str) -> Result<PathBuf, ProviderError> {
        let target = self.resolve(path, Some(name))?;
        if fs::symlink_metadata(&target).is_err() {
            return Err(ProviderError::NotFound(name.to_string()));
        }
        Ok(target)
    }

    fn vacant(&self, path: &[String], name: &str) -> Result<PathBuf, ProviderError> {
        let target = self.resolve(path, Some(name))?;
        if target.exists() {
            return Err(ProviderError::AlreadyExists(name.to_string()));
        }
        Ok(target)
    }
}

impl EntryProvider for LocalFolder {
    fn list(&self, path: &[String]) -> Result<Vec<Entry>, ProviderError> {
        let dir = self.resolve(path, None)?;
        let mut entries = Vec::new();

        for item in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            match item {
                Ok(item) => {
                    if let Some(entry) = Entry::from_path(item.path()) {
                        entries.push(entry);
                    }
                }
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    return Err(ProviderError::io(dir, source));
                }
                Err(e) => log::warn!("skipping unreadable entry in {:?}: {}", dir, e),
            }
        }
        Ok(entries)
    }

    fn add_folder(&mut self, path: &[String], name: &str) -> Result<(), ProviderError> {
        let target = self.vacant(path, name)?;
        fs::create_dir(&target).map_err(|e| ProviderError::io(&target, e))
    }

    fn rename(&mut self, path: &[String], old: &str, new: &str) -> Result<(), ProviderError> {
        let from = self.existing(path, old)?;
        let to = self.vacant(path, new)?;
        fs::rename(&from, &to).map_err(|e| ProviderError::io(&from, e))
    }

    fn delete(&mut self, path: &[String], name: &str) -> Result<(), ProviderError> {
        let target = self.existing(path, name)?;
        let is_dir = fs::symlink_metadata(&target).map(|m| m.is_dir()).unwrap_or(false);
        let result = if is_dir { fs::remove_dir_all(&target) } else { fs::remove_file(&target) };
        result.map_err(|e| ProviderError::io(&target, e))
    }

    fn paste(
        &mut self,
        path: &[String],
        origin: &[String],
        name: &str,
        move_entry: bool,
    ) -> Result<(), ProviderError> {
        let from = self.existing(origin, name)?;
        let to = self.vacant(path, name)?;
        if to.starts_with(&from) {
            return Err(ProviderError::InvalidPath(name.to_string()));
        }
        if move_entry {
            return fs::rename(&from, &to).map_err(|e| ProviderError::io(&from, e));
        }
        copy_recursive(&from, &to)
    }

    fn upload(&mut self, path: &[String], name: &str, content: &[u8]) -> Result<(), ProviderError> {
        let target = self.vacant(path, name)?;
        fs::write(&target, content).map_err(|e| ProviderError::io(&target, e))
    }

    fn read(&self, path: &[String], name: &str) -> Result<Vec<u8>, ProviderError> {
        let target = self.existing(path, name)?;
        fs::read(&target).map_err(|e| ProviderError::io(&target, e))
    }
}

fn copy_recursive(from: &Path, to: &Path) -> Result<(), ProviderError> {
    if !from.is_dir() {
        return fs::copy(from, to).map(|_| ()).map_err(|e| ProviderError::io(from, e));
    }
    for item in WalkDir::new(from) {
        let item = item.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| from.to_path_buf());
            let source = e.into_io_error().unwrap_or_else(|| std::io::Error::other("walk failed"));
            ProviderError::io(path, source)
        })?;
        let relative = item.path().strip_prefix(from).unwrap_or(item.path());
        let target = to.join(relative);
        if item.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| ProviderError::io(&target, e))?;
        } else {
            fs::copy(item.path(), &target).map_err(|e| ProviderError::io(item.path(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::EntryKind;

    fn folder() -> (tempfile::TempDir, LocalFolder) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/readme.md"), "hello").unwrap();
        fs::write(dir.path().join("notes.txt"), "abc").unwrap();
        let folder = LocalFolder::new(dir.path().to_path_buf());
        (dir, folder)
    }

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_list_one_level() {
        let (_dir, folder) = folder();
        let mut entries = folder.list(&[]).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "docs");
        assert_eq!(entries[0].kind, Some(EntryKind::Directory));
        assert_eq!(entries[1].extra["size"], 3);
    }

    #[test]
    fn test_rejects_escaping_segments() {
        let (_dir, folder) = folder();
        for bad in ["..", "docs/..", "/etc", "."] {
            assert!(matches!(folder.list(&path(&[bad])), Err(ProviderError::InvalidPath(_))), "{}", bad);
        }
    }

    #[test]
    fn test_missing_directory() {
        let (_dir, folder) = folder();
        assert!(matches!(folder.list(&path(&["ghost"])), Err(ProviderError::Io { .. })));
    }

    #[test]
    fn test_mutations() {
        let (dir, mut folder) = folder();
        folder.add_folder(&[], "assets").unwrap();
        assert!(dir.path().join("assets").is_dir());
        assert!(matches!(folder.add_folder(&[], "assets"), Err(ProviderError::AlreadyExists(_))));

        folder.rename(&[], "notes.txt", "todo.txt").unwrap();
        assert!(dir.path().join("todo.txt").exists());
        assert!(matches!(folder.rename(&[], "notes.txt", "x"), Err(ProviderError::NotFound(_))));

        folder.delete(&[], "assets").unwrap();
        assert!(!dir.path().join("assets").exists());
    }

    #[test]
    fn test_paste_copy_and_move() {
        let (dir, mut folder) = folder();
        folder.add_folder(&[], "backup").unwrap();
        folder.paste(&path(&["backup"]), &[], "docs", false).unwrap();
        assert!(dir.path().join("backup/docs/readme.md").exists());
        assert!(dir.path().join("docs/readme.md").exists());

        folder.paste(&path(&["docs"]), &[], "todo.txt", true).unwrap_err();
        folder.paste(&path(&["docs"]), &[], "notes.txt", true).unwrap();
        assert!(dir.path().join("docs/notes.txt").exists());
        assert!(!dir.path().join("notes.txt").exists());

        assert!(matches!(
            folder.paste(&[], &[], "docs", false),
            Err(ProviderError::AlreadyExists(_))
        ));
        assert!(matches!(
            folder.paste(&path(&["docs"]), &[], "docs", false),
            Err(ProviderError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_upload_and_read() {
        let (dir, mut folder) = folder();
        folder.upload(&path(&["docs"]), "data.bin", &[1, 2, 3]).unwrap();
        assert_eq!(fs::read(dir.path().join("docs/data.bin")).unwrap(), vec![1, 2, 3]);
        assert_eq!(folder.read(&path(&["docs"]), "data.bin").unwrap(), vec![1, 2, 3]);
        assert_eq!(folder.read(&[], "notes.txt").unwrap(), b"abc".to_vec());

        assert!(matches!(folder.upload(&[], "notes.txt", b"x"), Err(ProviderError::AlreadyExists(_))));
        assert!(matches!(folder.upload(&[], "../x", b"x"), Err(ProviderError::InvalidPath(_))));
        assert!(matches!(folder.read(&[], "ghost"), Err(ProviderError::NotFound(_))));
    }
}

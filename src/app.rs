// src/app.rs
//! Key handling and table contents for the terminal browser.

use crate::error::ViewError;
use crate::filesystem::{ClipboardMode, Entry, FolderView, ItemAction, PreviewContent};
use crossterm::event::KeyCode;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    NewFolder,
    Rename(String),
    /// Local file to upload into the current folder
    Upload,
    /// Local destination for the named file
    Download(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Waiting for the digit of the column to hide or show
    ColumnPick,
    Prompt { kind: PromptKind, input: String },
    ConfirmDelete(String),
    Preview { name: String, content: PreviewContent },
}

pub struct App {
    pub view: FolderView,
    pub selected: usize,
    pub mode: Mode,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(view: FolderView) -> Self {
        App { view, selected: 0, mode: Mode::Browse, status: None, should_quit: false }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.view.entries.get(self.selected)
    }

    fn selected_name(&self) -> Option<String> {
        self.selected_entry().map(|e| e.name.clone())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let mode = std::mem::replace(&mut self.mode, Mode::Browse);
        match mode {
            Mode::Browse => self.handle_browse(key),
            Mode::ColumnPick => {
                if let KeyCode::Char(c) = key {
                    if let Some(name) = digit_index(c)
                        .and_then(|i| self.view.fields.by_sequence().get(i).map(|f| f.name.clone()))
                    {
                        let result = self.view.toggle_field(&name);
                        self.report(result);
                    }
                }
            }
            Mode::Prompt { kind, mut input } => match key {
                KeyCode::Esc => {}
                KeyCode::Enter => self.submit(kind, input),
                KeyCode::Backspace => {
                    input.pop();
                    self.mode = Mode::Prompt { kind, input };
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.mode = Mode::Prompt { kind, input };
                }
                _ => self.mode = Mode::Prompt { kind, input },
            },
            Mode::Preview { name, content } => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {}
                KeyCode::Char('s') => self.mode = download_prompt(name),
                _ => self.mode = Mode::Preview { name, content },
            },
            Mode::ConfirmDelete(name) => {
                if matches!(key, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    let result = self.view.delete(&name);
                    if result.is_ok() {
                        self.status = Some(format!("Deleted {}", name));
                    }
                    self.report(result);
                }
            }
        }
        self.clamp_selection();
    }

    fn handle_browse(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected += 1,
            KeyCode::Enter => match self.selected_entry().map(|e| (e.name.clone(), e.is_dir())) {
                Some((name, true)) => {
                    let result = self.view.open(&name);
                    if result.is_ok() {
                        self.selected = 0;
                    }
                    self.report(result);
                }
                Some((name, false)) => match self.view.preview(&name) {
                    Ok(content) => self.mode = Mode::Preview { name, content },
                    Err(e) => self.report(Err(e)),
                },
                None => {}
            },
            KeyCode::Backspace => {
                let result = self.view.navigate_up();
                self.selected = 0;
                self.report(result);
            }
            KeyCode::Char('h') => {
                let show = !self.view.show_hidden;
                let result = self.view.set_show_hidden(show);
                self.report(result);
            }
            KeyCode::Char('v') => self.mode = Mode::ColumnPick,
            KeyCode::Char('/') => {
                self.mode = Mode::Prompt { kind: PromptKind::Search, input: String::new() }
            }
            KeyCode::Esc if self.view.filter.is_some() => {
                let result = self.view.clear_search();
                self.report(result);
            }
            KeyCode::Char('n') => {
                self.mode = Mode::Prompt { kind: PromptKind::NewFolder, input: String::new() }
            }
            KeyCode::Char('p') => {
                let result = self.view.paste();
                self.report(result);
            }
            KeyCode::Char('u') => {
                self.mode = Mode::Prompt { kind: PromptKind::Upload, input: String::new() }
            }
            KeyCode::Char('s') => {
                if let Some(entry) = self.selected_entry().filter(|e| !e.is_dir()) {
                    self.mode = download_prompt(entry.name.clone());
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let field = digit_index(c)
                    .and_then(|i| self.view.visible_fields().get(i).map(|f| f.name.clone()));
                if let Some(name) = field {
                    let result = self.view.toggle_sort(&name);
                    self.report(result);
                }
            }
            KeyCode::Char(c) => {
                if let Some(action) = ItemAction::ALL.into_iter().find(|a| a.key() == c) {
                    self.item_action(action);
                }
            }
            _ => {}
        }
    }

    fn item_action(&mut self, action: ItemAction) {
        let Some(name) = self.selected_name() else {
            return;
        };
        if !self.view.actions_for(&name).contains(&action) {
            return;
        }
        match action {
            ItemAction::Rename => {
                self.mode = Mode::Prompt { kind: PromptKind::Rename(name.clone()), input: name };
            }
            ItemAction::Copy | ItemAction::Cut => {
                let mode = if action == ItemAction::Cut { ClipboardMode::Move } else { ClipboardMode::Copy };
                let result = self.view.copy(&name, mode);
                if result.is_ok() {
                    self.status = Some(format!("{} {}", action.label(), name));
                }
                self.report(result);
            }
            ItemAction::Delete => self.mode = Mode::ConfirmDelete(name),
        }
    }

    fn submit(&mut self, kind: PromptKind, input: String) {
        let input = input.trim().to_string();
        let result = match kind {
            PromptKind::Search if input.is_empty() => self.view.clear_search(),
            PromptKind::Search => self.view.search(&input),
            _ if input.is_empty() => Ok(()),
            PromptKind::NewFolder => self.view.add_folder(&input),
            PromptKind::Rename(old) if old == input => Ok(()),
            PromptKind::Rename(old) => self.view.rename(&old, &input),
            PromptKind::Upload => self.view.upload_file(Path::new(&input)),
            PromptKind::Download(name) => match self.view.download(&name, Path::new(&input)) {
                Ok(target) => {
                    self.status = Some(format!("Saved {}", target.display()));
                    Ok(())
                }
                Err(e) => Err(e),
            },
        };
        self.report(result);
    }

    fn report(&mut self, result: Result<(), ViewError>) {
        if let Err(e) = result {
            log::warn!("{}", e);
            self.status = Some(e.to_string());
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.view.entries.len().saturating_sub(1));
    }

    pub fn breadcrumb(&self) -> String {
        format!("/{}", self.view.path.join("/"))
    }

    /// Column titles, numbered for the sort keys, with the direction of
    /// active criteria.
    pub fn header(&self) -> Vec<String> {
        self.view
            .visible_fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let arrow = self.view.sort.direction_of(&field.name).map(|d| d.arrow()).unwrap_or("");
                format!("{} {}{}", i + 1, field.label, arrow)
            })
            .collect()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        let fields = self.view.visible_fields();
        self.view
            .entries
            .iter()
            .map(|entry| fields.iter().map(|f| f.render(entry)).collect())
            .collect()
    }

    pub fn prompt_line(&self) -> Option<String> {
        match &self.mode {
            Mode::Browse => None,
            Mode::ColumnPick => {
                let columns: Vec<String> = self
                    .view
                    .fields
                    .by_sequence()
                    .iter()
                    .enumerate()
                    .map(|(i, f)| {
                        let mark = if self.view.is_field_visible(&f.name) { "x" } else { " " };
                        format!("{}[{}]{}", i + 1, mark, f.label)
                    })
                    .collect();
                Some(format!("Toggle column: {}", columns.join("  ")))
            }
            Mode::Prompt { kind, input } => {
                let label = match kind {
                    PromptKind::Search => "Search (glob)",
                    PromptKind::NewFolder => "New folder",
                    PromptKind::Rename(_) => "Rename to",
                    PromptKind::Upload => "Upload file",
                    PromptKind::Download(_) => "Save to",
                };
                Some(format!("{}: {}", label, input))
            }
            Mode::ConfirmDelete(name) => Some(format!("Delete '{}'? (y/n)", name)),
            Mode::Preview { name, .. } => Some(format!("{}  (s save, Esc close)", name)),
        }
    }

    pub fn preview(&self) -> Option<&PreviewContent> {
        match &self.mode {
            Mode::Preview { content, .. } => Some(content),
            _ => None,
        }
    }
}

fn download_prompt(name: String) -> Mode {
    Mode::Prompt { kind: PromptKind::Download(name), input: ".".to_string() }
}

fn digit_index(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        0 => None,
        d => Some(d as usize - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldSet;
    use crate::filesystem::MemoryFolder;
    use crate::utils::DateFormat;

    fn app() -> App {
        let provider = MemoryFolder::from_json(
            r#"{"": [
                    {"name": "b.txt", "type": "file", "mtime": 1},
                    {"name": "src", "type": "directory", "mtime": 2},
                    {"name": "a.txt", "type": "file", "mtime": 3}
                ],
                "src": [{"name": "main.rs", "type": "file"}]}"#,
        )
        .unwrap();
        let format = DateFormat { pattern: "%Y".to_string(), utc: true };
        let mut view = FolderView::new(Box::new(provider), FieldSet::base(&format));
        view.toggle_sort("name").unwrap();
        view.refresh().unwrap();
        App::new(view)
    }

    fn names(app: &App) -> Vec<&str> {
        app.view.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_digit_sorts_by_visible_column() {
        let mut app = app();
        assert_eq!(names(&app), vec!["src", "a.txt", "b.txt"]);
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(names(&app), vec!["src", "b.txt", "a.txt"]);
        app.handle_key(KeyCode::Char('4'));
        assert_eq!(names(&app), vec!["b.txt", "src", "a.txt"]);
        assert_eq!(app.header()[3], "4 Modified on▲");
        assert_eq!(app.header()[0], "1 Name▼");
    }

    #[test]
    fn test_open_and_back() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.breadcrumb(), "/src");
        assert_eq!(names(&app), vec!["main.rs"]);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.preview(), Some(&PreviewContent::Text(String::new())));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.mode, Mode::Browse);
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.breadcrumb(), "/");
    }

    #[test]
    fn test_upload_then_preview_and_save() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("c.txt");
        std::fs::write(&source, "line one\nline two").unwrap();

        app.handle_key(KeyCode::Char('u'));
        type_text(&mut app, &source.display().to_string());
        app.handle_key(KeyCode::Enter);
        assert_eq!(names(&app), vec!["src", "a.txt", "b.txt", "c.txt"]);

        app.selected = 3;
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.preview().map(|p| p.lines()), Some(vec!["line one", "line two"]));

        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.prompt_line().as_deref(), Some("Save to: ."));
        app.handle_key(KeyCode::Backspace);
        let out = dir.path().join("copy.txt");
        type_text(&mut app, &out.display().to_string());
        app.handle_key(KeyCode::Enter);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "line one\nline two");
        assert!(app.status.as_deref().unwrap_or("").starts_with("Saved"));
    }

    #[test]
    fn test_column_toggle() {
        let mut app = app();
        app.handle_key(KeyCode::Char('v'));
        assert!(app.prompt_line().unwrap().starts_with("Toggle column"));
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.header().len(), 3);
        assert_eq!(app.rows()[0].len(), 3);
    }

    #[test]
    fn test_new_folder_and_rename_prompts() {
        let mut app = app();
        app.handle_key(KeyCode::Char('n'));
        type_text(&mut app, "lib");
        app.handle_key(KeyCode::Enter);
        assert_eq!(names(&app), vec!["lib", "src", "a.txt", "b.txt"]);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('r'));
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        type_text(&mut app, "app");
        app.handle_key(KeyCode::Enter);
        assert_eq!(names(&app), vec!["app", "lib", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.view.entries.len(), 3);
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('y'));
        assert_eq!(names(&app), vec!["src", "b.txt"]);
        assert_eq!(app.status.as_deref(), Some("Deleted a.txt"));
    }

    #[test]
    fn test_search_and_escape() {
        let mut app = app();
        app.handle_key(KeyCode::Char('/'));
        type_text(&mut app, "a*");
        app.handle_key(KeyCode::Enter);
        assert_eq!(names(&app), vec!["a.txt"]);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.view.entries.len(), 3);
    }

    #[test]
    fn test_paste_unsupported_reports_status() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.status.as_deref(), Some("Copy src"));
        app.handle_key(KeyCode::Char('p'));
        assert!(app.status.as_deref().unwrap_or("").contains("not supported"));
    }
}

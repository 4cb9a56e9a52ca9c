// src/filesystem/preview.rs
use crate::utils::formatter::format_size;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    Text(String),
    /// One-line summary for content that cannot be shown as text
    Binary(String),
}

impl PreviewContent {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            PreviewContent::Text(text) => text.lines().collect(),
            PreviewContent::Binary(summary) => vec![summary.as_str()],
        }
    }
}

pub trait PreviewProvider {
    fn can_preview(&self, name: &str, content: &[u8]) -> bool;
    fn generate_preview(&self, name: &str, content: &[u8]) -> PreviewContent;
}

pub struct TextPreview {
    max_lines: usize,
    max_width: usize,
}

impl TextPreview {
    pub fn new() -> Self {
        TextPreview { max_lines: 500, max_width: 200 }
    }
}

impl Default for TextPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewProvider for TextPreview {
    fn can_preview(&self, _name: &str, content: &[u8]) -> bool {
        !content.contains(&0) && std::str::from_utf8(content).is_ok()
    }

    fn generate_preview(&self, _name: &str, content: &[u8]) -> PreviewContent {
        let text = String::from_utf8_lossy(content);
        let lines: Vec<String> = text
            .lines()
            .take(self.max_lines)
            .map(|line| line.chars().take(self.max_width).collect())
            .collect();
        PreviewContent::Text(lines.join("\n"))
    }
}

pub struct BinaryPreview;

impl PreviewProvider for BinaryPreview {
    fn can_preview(&self, _name: &str, _content: &[u8]) -> bool {
        true
    }

    fn generate_preview(&self, name: &str, content: &[u8]) -> PreviewContent {
        PreviewContent::Binary(format!(
            "{}: binary content, {}",
            name,
            format_size(content.len() as u64)
        ))
    }
}

/// Picks the first registered provider that accepts the content.
pub struct PreviewManager {
    providers: Vec<Box<dyn PreviewProvider>>,
}

impl PreviewManager {
    pub fn new() -> Self {
        let mut manager = PreviewManager { providers: Vec::new() };
        manager.register(Box::new(TextPreview::new()));
        manager.register(Box::new(BinaryPreview));
        manager
    }

    pub fn register(&mut self, provider: Box<dyn PreviewProvider>) {
        self.providers.push(provider);
    }

    pub fn get_preview(&self, name: &str, content: &[u8]) -> PreviewContent {
        self.providers
            .iter()
            .find(|p| p.can_preview(name, content))
            .map(|p| p.generate_preview(name, content))
            .unwrap_or_else(|| BinaryPreview.generate_preview(name, content))
    }
}

impl Default for PreviewManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_preview_truncates() {
        let preview = TextPreview { max_lines: 2, max_width: 3 };
        let content = "héllo\nworld\nthird".as_bytes();
        assert!(preview.can_preview("a.txt", content));
        assert_eq!(preview.generate_preview("a.txt", content), PreviewContent::Text("hél\nwor".into()));
    }

    #[test]
    fn test_binary_fallback() {
        let manager = PreviewManager::new();
        let preview = manager.get_preview("logo.png", &[0x89, b'P', b'N', b'G', 0, 0]);
        assert_eq!(preview, PreviewContent::Binary("logo.png: binary content, 6B".into()));
        assert_eq!(preview.lines().len(), 1);
    }

    #[test]
    fn test_manager_prefers_text() {
        let manager = PreviewManager::default();
        let preview = manager.get_preview("notes.md", b"# Title\nbody");
        assert_eq!(preview.lines(), vec!["# Title", "body"]);
    }
}

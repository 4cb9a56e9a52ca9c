// src/filesystem/icon.rs
use super::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Folder,
    Audio,
    Video,
    Code,
    Csv,
    Word,
    Image,
    Archive,
    Pdf,
    Powerpoint,
    Text,
    Excel,
    Generic,
}

impl FileIcon {
    pub fn for_entry(entry: &Entry) -> Self {
        if entry.kind == Some(super::EntryKind::Directory) {
            return FileIcon::Folder;
        }
        match entry.name.rfind('.') {
            Some(pos) => Self::for_extension(&entry.name[pos + 1..]),
            None => FileIcon::Generic,
        }
    }

    pub fn for_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "aac" | "ogg" | "mp3" | "audio" => FileIcon::Audio,
            "avi" | "flv" | "mkv" | "mp4" | "video" => FileIcon::Video,
            "css" | "html" | "js" | "code" => FileIcon::Code,
            "csv" => FileIcon::Csv,
            "doc" | "docx" | "word" => FileIcon::Word,
            "gif" | "jpeg" | "jpg" | "png" | "image" => FileIcon::Image,
            "gz" | "zip" | "archive" => FileIcon::Archive,
            "pdf" => FileIcon::Pdf,
            "ppt" | "pptx" | "powerpoint" => FileIcon::Powerpoint,
            "txt" | "text" => FileIcon::Text,
            "xls" | "xlsx" | "excel" => FileIcon::Excel,
            _ => FileIcon::Generic,
        }
    }

    /// Font Awesome class used by web front-ends.
    pub fn css_class(&self) -> &'static str {
        match self {
            FileIcon::Folder => "fa-folder",
            FileIcon::Audio => "fa-file-audio-o",
            FileIcon::Video => "fa-file-video-o",
            FileIcon::Code => "fa-file-code-o",
            FileIcon::Csv => "fa-file-csv-o",
            FileIcon::Word => "fa-file-word-o",
            FileIcon::Image => "fa-file-image-o",
            FileIcon::Archive => "fa-file-archive-o",
            FileIcon::Pdf => "fa-file-pdf-o",
            FileIcon::Powerpoint => "fa-file-powerpoint-o",
            FileIcon::Text => "fa-file-alt-o",
            FileIcon::Excel => "fa-file-excel-o",
            FileIcon::Generic => "fa-file-o",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            FileIcon::Folder => "📁",
            FileIcon::Audio => "🎵",
            FileIcon::Video => "🎬",
            FileIcon::Code => "🧩",
            FileIcon::Csv | FileIcon::Excel => "📊",
            FileIcon::Word | FileIcon::Text => "📝",
            FileIcon::Image => "🖼",
            FileIcon::Archive => "📦",
            FileIcon::Pdf => "📕",
            FileIcon::Powerpoint => "📽",
            FileIcon::Generic => "📄",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons() {
        assert_eq!(FileIcon::for_entry(&Entry::directory("music.mp3")), FileIcon::Folder);
        assert_eq!(FileIcon::for_entry(&Entry::file("Song.MP3")), FileIcon::Audio);
        assert_eq!(FileIcon::for_entry(&Entry::file("archive.tar.gz")), FileIcon::Archive);
        assert_eq!(FileIcon::for_entry(&Entry::file("Makefile")), FileIcon::Generic);
        assert_eq!(FileIcon::for_entry(&Entry::file("notes.")), FileIcon::Generic);
        assert_eq!(FileIcon::Pdf.css_class(), "fa-file-pdf-o");
    }
}

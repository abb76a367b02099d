use std::path::PathBuf;

use crate::source::SourceHandle;

/// One picked file, as produced by the file or folder picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    /// File name without directories.
    pub name: String,
    /// MIME type guessed from the extension; empty when unknown.
    pub mime: String,
    /// `<picked folder>/<sub dirs>/<file>`; only set by the folder picker.
    pub relative_path: Option<String>,
}

impl FileHandle {
    pub fn is_audio(&self) -> bool {
        self.mime.starts_with("audio")
    }

    /// Name shown in the playlist: the relative path when there is one.
    pub fn display_name(&self) -> &str {
        self.relative_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.name)
    }
}

/// A playlist entry. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub source: SourceHandle,
}

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::FileHandle;

fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Name of the picked folder itself, used as the first relative path segment.
fn folder_label(dir: &Path) -> Option<String> {
    let named = |p: &Path| p.file_name().map(|s| s.to_string_lossy().into_owned());
    named(dir).or_else(|| dir.canonicalize().ok().and_then(|p| named(&p)))
}

fn relative_path(dir: &Path, label: Option<&str>, path: &Path) -> String {
    let rel: Vec<String> = path
        .strip_prefix(dir)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let rel = rel.join("/");
    match label {
        Some(l) if !l.is_empty() => format!("{l}/{rel}"),
        _ => rel,
    }
}

fn handle_for(path: &Path, relative_path: Option<String>) -> FileHandle {
    FileHandle {
        path: path.to_path_buf(),
        name: file_name(path),
        mime: guess_mime(path),
        relative_path,
    }
}

/// Multi-file picker: one handle per existing file, in the given order.
pub fn pick_files(paths: &[PathBuf]) -> Vec<FileHandle> {
    paths
        .iter()
        .filter(|p| {
            let ok = p.is_file();
            if !ok {
                debug!(path = %p.display(), "skipping non-file selection");
            }
            ok
        })
        .map(|p| handle_for(p, None))
        .collect()
}

/// Folder picker: every file below `dir`, sorted by name within each directory.
pub fn pick_folder(dir: &Path, settings: &LibrarySettings) -> Vec<FileHandle> {
    let label = folder_label(dir);

    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = relative_path(dir, label.as_deref(), e.path());
            handle_for(e.path(), Some(rel))
        })
        .collect()
}

/// Command-line selection: directories go through the folder picker, anything
/// else through the file picker, concatenated in argument order.
pub fn pick_paths(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<FileHandle> {
    let mut out = Vec::new();
    for p in paths {
        if p.is_dir() {
            out.extend(pick_folder(p, settings));
        } else {
            out.extend(pick_files(std::slice::from_ref(p)));
        }
    }
    out
}

//! Application model types: `App`, `Prompt` and `PromptKind`.

use std::path::PathBuf;

use crate::controller::{Command, Surface};

/// Which picker an open prompt stands in for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// One or more files, separated by `;`.
    Files,
    /// A single folder.
    Folder,
}

/// An in-progress path prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// The view model rendered by `ui::draw`.
#[derive(Debug, Clone)]
pub struct App {
    pub playlist: Vec<String>,
    /// Cursor position in `playlist`.
    pub selected: usize,
    /// Entry currently loaded by the controller.
    pub current: Option<usize>,
    pub title: String,
    pub progress: f64,
    pub time_text: String,
    pub playing: bool,
    pub shuffle_label: String,
    pub rate: f64,
    pub prompt: Option<Prompt>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            playlist: Vec::new(),
            selected: 0,
            current: None,
            title: String::new(),
            progress: 0.0,
            time_text: String::new(),
            playing: false,
            shuffle_label: String::new(),
            rate: 1.0,
            prompt: None,
        }
    }

    /// Return true if the playlist contains any entries.
    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    /// Move the cursor to the next entry, wrapping to the first.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.playlist.len();
        }
    }

    /// Move the cursor to the previous entry, wrapping to the last.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            let len = self.playlist.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.playlist.len().saturating_sub(1);
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            input: String::new(),
        });
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(p) = self.prompt.as_mut() {
            p.input.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.prompt.as_mut() {
            p.input.pop();
        }
    }

    /// Close the prompt and turn its input into a load command.
    ///
    /// Returns `None` when no prompt was open or nothing was entered.
    pub fn submit_prompt(&mut self) -> Option<Command> {
        let prompt = self.prompt.take()?;
        match prompt.kind {
            PromptKind::Files => {
                let paths: Vec<PathBuf> = prompt
                    .input
                    .split(';')
                    .map(clean_path)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect();
                if paths.is_empty() {
                    None
                } else {
                    Some(Command::LoadFiles(paths))
                }
            }
            PromptKind::Folder => {
                let dir = clean_path(&prompt.input);
                if dir.is_empty() {
                    None
                } else {
                    Some(Command::LoadFolder(PathBuf::from(dir)))
                }
            }
        }
    }
}

/// Trim whitespace and one pair of surrounding quotes (terminals add them
/// when a file is dragged in).
fn clean_path(raw: &str) -> &str {
    let s = raw.trim();
    for q in ['\'', '"'] {
        if let Some(inner) = s.strip_prefix(q).and_then(|r| r.strip_suffix(q)) {
            return inner.trim();
        }
    }
    s
}

impl Surface for App {
    fn show_playlist(&mut self, names: Vec<String>) {
        self.playlist = names;
        self.selected = 0;
        self.current = None;
    }

    fn show_current(&mut self, index: Option<usize>) {
        self.current = index;
        // The cursor follows whatever starts playing.
        if let Some(i) = index {
            self.selected = i;
        }
    }

    fn show_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn show_time(&mut self, progress_percent: f64, text: &str) {
        self.progress = progress_percent;
        self.time_text = text.to_string();
    }

    fn show_transport(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn show_shuffle(&mut self, label: &str) {
        self.shuffle_label = label.to_string();
    }

    fn show_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

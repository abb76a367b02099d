use std::path::PathBuf;

/// User-facing commands, one per transport control or picker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Next,
    Previous,
    /// Play the playlist entry at the given index.
    PlayAt(usize),
    ToggleShuffle,
    /// Move to the given position, in percent of the track (0-100).
    Seek(f64),
    SetPlaybackRate(f64),
    /// Replace the playlist with the given files.
    LoadFiles(Vec<PathBuf>),
    /// Replace the playlist with the contents of a folder.
    LoadFolder(PathBuf),
    Quit,
}

use crate::library::Track;

/// Everything the controller knows about the playlist and playback.
///
/// `current` is `None` while nothing has been started and always `None`
/// when `tracks` is empty; otherwise it indexes into `tracks`.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub tracks: Vec<Track>,
    pub current: Option<usize>,
    pub shuffle: bool,
    pub playing: bool,
    pub playback_rate: f64,
}

impl PlayerState {
    pub fn new(shuffle: bool, playback_rate: f64) -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            shuffle,
            playing: false,
            playback_rate,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }
}

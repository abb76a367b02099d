use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{LibrarySettings, Settings};
use crate::library::{self, FileHandle, Track};
use crate::media::{Media, MediaEvent};
use crate::source::SourceRegistry;

use super::command::Command;
use super::format::format_time;
use super::state::PlayerState;
use super::surface::Surface;

/// Owns the playlist state and drives a `Media` element and a `Surface`.
///
/// All methods run to completion on the caller's thread. Media failures are
/// logged and otherwise ignored.
pub struct PlaylistController<M: Media, S: Surface> {
    state: PlayerState,
    media: M,
    surface: S,
    sources: SourceRegistry,
    library: LibrarySettings,
    shuffle_on_label: String,
    shuffle_off_label: String,
    rng: StdRng,
}

impl<M: Media, S: Surface> PlaylistController<M, S> {
    pub fn new(media: M, surface: S, sources: SourceRegistry, settings: &Settings) -> Self {
        let mut controller = Self {
            state: PlayerState::new(settings.playback.shuffle, settings.playback.playback_rate),
            media,
            surface,
            sources,
            library: settings.library.clone(),
            shuffle_on_label: settings.ui.shuffle_on_label.clone(),
            shuffle_off_label: settings.ui.shuffle_off_label.clone(),
            rng: StdRng::from_entropy(),
        };

        controller.media.set_playback_rate(controller.state.playback_rate);
        controller.surface.show_playlist(Vec::new());
        controller.surface.show_current(None);
        controller.show_shuffle_label();
        controller.surface.show_rate(controller.state.playback_rate);
        controller.show_idle();
        controller
    }

    /// Replace the random source used by shuffle.
    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Dispatch a user command. Returns `true` when the command asks the
    /// player to quit.
    pub fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Next => self.play_next(),
            Command::Previous => self.play_previous(),
            Command::PlayAt(i) => self.play_at(i),
            Command::ToggleShuffle => self.toggle_shuffle(),
            Command::Seek(pct) => self.seek(pct),
            Command::SetPlaybackRate(rate) => self.set_playback_rate(rate),
            Command::LoadFiles(paths) => self.load_files(&paths),
            Command::LoadFolder(dir) => self.load_folder(&dir),
            Command::Quit => return true,
        }
        false
    }

    /// Dispatch a notification from the media element.
    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::Ended(source) => {
                let is_current = self
                    .state
                    .current_track()
                    .map(|t| t.source == source)
                    .unwrap_or(false);
                if is_current {
                    self.on_playback_ended();
                } else {
                    debug!(%source, "ignoring end of a source that is no longer current");
                }
            }
        }
    }

    fn load_files(&mut self, paths: &[PathBuf]) {
        if !paths.iter().any(|p| p.exists()) {
            // Nothing real was picked; treat it like a cancelled chooser.
            debug!(?paths, "file selection contained no existing paths");
            return;
        }
        self.load_selection(library::pick_files(paths));
    }

    fn load_folder(&mut self, dir: &Path) {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "folder selection is not a directory");
            return;
        }
        let picked = library::pick_folder(dir, &self.library);
        self.load_selection(picked);
    }

    /// Replace the playlist with the audio items of `items`, in order, and
    /// start the first one. Handles of the previous playlist are revoked.
    pub fn load_selection(&mut self, items: Vec<FileHandle>) {
        let picked = items.len();

        for old in self.state.tracks.drain(..) {
            self.sources.revoke(&old.source);
        }

        let sources = &self.sources;
        let tracks: Vec<Track> = items
            .into_iter()
            .filter(|h| {
                if !h.is_audio() {
                    debug!(name = %h.name, mime = %h.mime, "dropping non-audio item");
                }
                h.is_audio()
            })
            .map(|h| Track {
                name: h.display_name().to_string(),
                source: sources.create(&h.path),
            })
            .collect();

        info!(
            tracks = tracks.len(),
            skipped = picked - tracks.len(),
            "playlist replaced"
        );

        self.state.tracks = tracks;
        self.state.current = None;
        self.surface
            .show_playlist(self.state.tracks.iter().map(|t| t.name.clone()).collect());
        self.surface.show_current(None);

        if self.state.has_tracks() {
            self.play_at(0);
        } else {
            self.media.pause();
            self.state.playing = false;
            self.show_idle();
        }
    }

    /// Start or resume the current track. Does nothing when no track has
    /// been started.
    pub fn play(&mut self) {
        if self.state.current.is_none() {
            debug!("play ignored: no current track");
            return;
        }
        if let Err(err) = self.media.play() {
            warn!(error = %err, "play failed");
        }
        self.state.playing = true;
        self.surface.show_transport(true);
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.state.playing = false;
        self.surface.show_transport(false);
    }

    /// Make `index` the current track and start playing it.
    pub fn play_at(&mut self, index: usize) {
        let Some(track) = self.state.tracks.get(index) else {
            debug!(index, len = self.state.tracks.len(), "play_at out of range");
            return;
        };
        let (name, source) = (track.name.clone(), track.source.clone());

        self.state.current = Some(index);
        self.surface.show_current(Some(index));
        self.surface.show_title(&name);

        if let Err(err) = self.media.set_source(&source) {
            warn!(%source, error = %err, "could not load track");
            // The previous source must not keep playing under this title.
            self.media.unload();
            self.state.playing = false;
            self.surface.show_transport(false);
            self.on_time_update();
            return;
        }
        self.media.set_playback_rate(self.state.playback_rate);
        self.on_time_update();
        self.play();
    }

    /// Advance to the next track: a random one with shuffle on (possibly the
    /// same track again), otherwise the following one, wrapping at the end.
    pub fn play_next(&mut self) {
        let len = self.state.tracks.len();
        if len == 0 {
            return;
        }
        let next = if self.state.shuffle {
            self.rng.gen_range(0..len)
        } else {
            self.state.current.map(|c| (c + 1) % len).unwrap_or(0)
        };
        self.play_at(next);
    }

    /// Step back one track, wrapping at the start. Shuffle is not consulted.
    pub fn play_previous(&mut self) {
        let len = self.state.tracks.len();
        if len == 0 {
            return;
        }
        let prev = self
            .state
            .current
            .map(|c| (c + len - 1) % len)
            .unwrap_or(len - 1);
        self.play_at(prev);
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        self.show_shuffle_label();
    }

    /// Jump to `percent` (clamped to 0-100) of the current track. An unknown
    /// duration counts as zero.
    pub fn seek(&mut self, percent: f64) {
        if self.state.current.is_none() {
            return;
        }
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let duration = self
            .media
            .duration()
            .filter(|d| d.is_finite())
            .unwrap_or(0.0);
        self.media.set_current_time(percent / 100.0 * duration);
    }

    /// Forward a new speed multiplier. Non-positive or non-finite rates are
    /// ignored.
    pub fn set_playback_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            debug!(rate, "ignoring unusable playback rate");
            return;
        }
        self.state.playback_rate = rate;
        self.media.set_playback_rate(rate);
        self.surface.show_rate(rate);
    }

    /// Refresh the seek bar and the elapsed/total text from the media element.
    pub fn on_time_update(&mut self) {
        let elapsed = self.media.current_time();
        let duration = self.media.duration();
        let progress = duration
            .map(|d| elapsed / d * 100.0)
            .filter(|p| p.is_finite())
            .unwrap_or(0.0);
        self.surface.show_time(progress, &time_text(elapsed, duration));
    }

    pub fn on_playback_ended(&mut self) {
        self.play_next();
    }

    fn show_shuffle_label(&mut self) {
        let label = if self.state.shuffle {
            &self.shuffle_on_label
        } else {
            &self.shuffle_off_label
        };
        self.surface.show_shuffle(label);
    }

    fn show_idle(&mut self) {
        self.surface.show_title("");
        self.surface.show_transport(false);
        self.surface.show_time(0.0, &time_text(0.0, None));
    }
}

fn time_text(elapsed: f64, duration: Option<f64>) -> String {
    format!(
        "{} / {}",
        format_time(elapsed),
        format_time(duration.unwrap_or(0.0))
    )
}

use super::*;
use crate::app::App;
use crate::config::Settings;
use crate::error::PlayerError;
use crate::library::FileHandle;
use crate::media::{Media, MediaEvent};
use crate::source::{SourceHandle, SourceRegistry};
use proptest::prelude::*;
use std::path::PathBuf;

/// In-memory media element: remembers what it was told and resolves
/// sources through the same registry as the controller.
struct FakeMedia {
    registry: SourceRegistry,
    source: Option<SourceHandle>,
    loads: Vec<SourceHandle>,
    playing: bool,
    time: f64,
    duration: Option<f64>,
    rate: f64,
    fail_loads: bool,
}

impl FakeMedia {
    fn new(registry: SourceRegistry) -> Self {
        Self {
            registry,
            source: None,
            loads: Vec::new(),
            playing: false,
            time: 0.0,
            duration: Some(200.0),
            rate: 1.0,
            fail_loads: false,
        }
    }
}

impl Media for FakeMedia {
    fn set_source(&mut self, source: &SourceHandle) -> crate::error::Result<()> {
        if self.fail_loads || self.registry.resolve(source).is_none() {
            return Err(PlayerError::RevokedSource(source.clone()));
        }
        self.source = Some(source.clone());
        self.loads.push(source.clone());
        self.playing = false;
        self.time = 0.0;
        Ok(())
    }

    fn play(&mut self) -> crate::error::Result<()> {
        self.playing = self.source.is_some();
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn unload(&mut self) {
        self.source = None;
        self.playing = false;
        self.time = 0.0;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.time = secs;
    }

    fn duration(&self) -> Option<f64> {
        self.source.as_ref().and(self.duration)
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

type Controller = PlaylistController<FakeMedia, App>;

fn controller() -> (Controller, SourceRegistry) {
    let registry = SourceRegistry::new();
    let media = FakeMedia::new(registry.clone());
    let c = PlaylistController::new(media, App::new(), registry.clone(), &Settings::default())
        .with_seed(7);
    (c, registry)
}

fn handle(name: &str, mime: &str) -> FileHandle {
    FileHandle {
        path: PathBuf::from("/music").join(name),
        name: name.to_string(),
        mime: mime.to_string(),
        relative_path: None,
    }
}

fn audio(n: usize) -> Vec<FileHandle> {
    (0..n)
        .map(|i| handle(&format!("{i:02}.mp3"), "audio/mpeg"))
        .collect()
}

fn loaded(n: usize) -> Controller {
    let (mut c, _) = controller();
    c.load_selection(audio(n));
    c
}

#[test]
fn format_time_pads_seconds_only() {
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(5.0), "0:05");
    assert_eq!(format_time(3600.0), "60:00");
    assert_eq!(format_time(59.99), "0:59");
    assert_eq!(format_time(f64::NAN), "0:00");
    assert_eq!(format_time(-3.0), "0:00");
}

#[test]
fn new_controller_starts_idle() {
    let (c, _) = controller();
    assert!(!c.state().has_tracks());
    assert_eq!(c.state().current, None);
    assert!(!c.surface().playing);
    assert_eq!(c.surface().shuffle_label, "🔀 off");
    assert_eq!(c.surface().time_text, "0:00 / 0:00");
}

#[test]
fn load_selection_keeps_only_audio_in_order_and_starts_first() {
    let (mut c, _) = controller();
    let mut folder_item = handle("b.wav", "audio/wav");
    folder_item.relative_path = Some("Mix/b.wav".into());

    c.load_selection(vec![
        handle("a.mp3", "audio/mp3"),
        handle("notes.txt", "text/plain"),
        folder_item,
    ]);

    let names: Vec<&str> = c.state().tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a.mp3", "Mix/b.wav"]);
    assert_eq!(c.surface().playlist, vec!["a.mp3", "Mix/b.wav"]);
    assert_eq!(c.state().current, Some(0));
    assert!(c.state().playing);
    assert!(c.media().playing);
    assert_eq!(c.surface().title, "a.mp3");
    assert_eq!(
        c.media().source.as_ref(),
        Some(&c.state().tracks[0].source)
    );
}

#[test]
fn loading_only_non_audio_leaves_player_idle() {
    let (mut c, registry) = controller();
    c.load_selection(vec![handle("a.txt", "text/plain"), handle("b", "")]);

    assert!(!c.state().has_tracks());
    assert_eq!(c.state().current, None);
    assert!(!c.state().playing);
    assert!(c.media().loads.is_empty());
    assert!(c.surface().playlist.is_empty());
    assert_eq!(registry.live(), 0);
}

#[test]
fn reloading_stops_old_playlist_and_revokes_its_handles() {
    let (mut c, registry) = controller();
    c.load_selection(audio(3));
    let old: Vec<SourceHandle> = c.state().tracks.iter().map(|t| t.source.clone()).collect();
    assert_eq!(registry.live(), 3);

    c.load_selection(audio(2));
    assert_eq!(registry.live(), 2);
    assert!(old.iter().all(|h| registry.resolve(h).is_none()));
    assert_eq!(c.state().current, Some(0));

    c.load_selection(vec![handle("x.txt", "text/plain")]);
    assert_eq!(registry.live(), 0);
    assert!(!c.media().playing);
    assert_eq!(c.surface().title, "");
}

#[test]
fn play_without_a_track_does_nothing() {
    let (mut c, _) = controller();
    c.play();
    assert!(!c.state().playing);
    assert!(!c.surface().playing);
    assert!(c.media().source.is_none());
}

#[test]
fn pause_and_play_toggle_transport() {
    let mut c = loaded(2);
    c.pause();
    assert!(!c.state().playing);
    assert!(!c.surface().playing);
    assert!(!c.media().playing);

    c.play();
    assert!(c.state().playing);
    assert!(c.surface().playing);
    assert!(c.media().playing);
}

#[test]
fn next_and_previous_wrap_around() {
    let mut c = loaded(3);
    c.play_previous();
    assert_eq!(c.state().current, Some(2));
    c.play_next();
    assert_eq!(c.state().current, Some(0));
    c.play_next();
    assert_eq!(c.state().current, Some(1));
    assert_eq!(c.surface().current, Some(1));
    assert_eq!(c.surface().title, "01.mp3");
}

#[test]
fn previous_ignores_shuffle() {
    let mut c = loaded(5);
    c.play_at(3);
    c.toggle_shuffle();
    c.play_previous();
    assert_eq!(c.state().current, Some(2));
}

#[test]
fn next_and_previous_on_empty_playlist_are_noops() {
    let (mut c, _) = controller();
    c.play_next();
    c.play_previous();
    c.on_playback_ended();
    assert_eq!(c.state().current, None);
    assert!(c.media().loads.is_empty());
}

#[test]
fn play_at_out_of_range_is_ignored() {
    let mut c = loaded(2);
    c.play_at(5);
    assert_eq!(c.state().current, Some(0));
    assert_eq!(c.media().loads.len(), 1);
}

#[test]
fn shuffle_picks_indices_in_range() {
    let mut c = loaded(4);
    c.toggle_shuffle();
    let mut seen = [false; 4];
    for _ in 0..200 {
        c.play_next();
        let i = c.state().current.unwrap();
        assert!(i < 4);
        seen[i] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn toggling_shuffle_twice_restores_flag_and_label() {
    let (mut c, _) = controller();
    let before = (c.state().shuffle, c.surface().shuffle_label.clone());

    c.toggle_shuffle();
    assert!(c.state().shuffle);
    assert_eq!(c.surface().shuffle_label, "🔀 on");

    c.toggle_shuffle();
    assert_eq!((c.state().shuffle, c.surface().shuffle_label.clone()), before);
}

#[test]
fn seek_maps_percent_onto_duration() {
    let mut c = loaded(1);
    c.seek(50.0);
    assert_eq!(c.media().time, 100.0);

    c.seek(150.0);
    assert_eq!(c.media().time, 200.0);

    c.seek(f64::NAN);
    assert_eq!(c.media().time, 0.0);
}

#[test]
fn seek_with_unknown_duration_goes_to_start() {
    let registry = SourceRegistry::new();
    let mut media = FakeMedia::new(registry.clone());
    media.duration = None;
    let mut c = PlaylistController::new(media, App::new(), registry, &Settings::default());
    c.load_selection(audio(1));
    c.seek(75.0);
    assert_eq!(c.media().time, 0.0);
}

#[test]
fn seek_without_a_track_is_ignored() {
    let (mut c, _) = controller();
    c.seek(50.0);
    assert_eq!(c.media().time, 0.0);
}

#[test]
fn time_update_refreshes_progress_and_text() {
    let mut c = loaded(1);
    c.seek(50.0);
    c.on_media_event(MediaEvent::TimeUpdate);
    assert_eq!(c.surface().progress, 50.0);
    assert_eq!(c.surface().time_text, "1:40 / 3:20");
}

#[test]
fn time_update_without_duration_reports_zero_progress() {
    let registry = SourceRegistry::new();
    let mut media = FakeMedia::new(registry.clone());
    media.duration = None;
    let mut c = PlaylistController::new(media, App::new(), registry, &Settings::default());
    c.load_selection(audio(1));
    c.on_time_update();
    assert_eq!(c.surface().progress, 0.0);
    assert_eq!(c.surface().time_text, "0:00 / 0:00");
}

#[test]
fn playback_rate_is_forwarded_and_kept_across_tracks() {
    let mut c = loaded(2);
    c.set_playback_rate(1.5);
    assert_eq!(c.media().rate, 1.5);
    assert_eq!(c.surface().rate, 1.5);

    c.set_playback_rate(0.0);
    c.set_playback_rate(f64::INFINITY);
    assert_eq!(c.state().playback_rate, 1.5);

    c.play_next();
    assert_eq!(c.media().rate, 1.5);
}

#[test]
fn ended_event_advances_only_for_current_source() {
    let mut c = loaded(3);
    let first = c.state().tracks[0].source.clone();

    c.on_media_event(MediaEvent::Ended(first.clone()));
    assert_eq!(c.state().current, Some(1));

    // A late notification about the first track must not skip the second.
    c.on_media_event(MediaEvent::Ended(first));
    assert_eq!(c.state().current, Some(1));
}

#[test]
fn failed_load_keeps_title_but_stays_paused() {
    let registry = SourceRegistry::new();
    let mut media = FakeMedia::new(registry.clone());
    media.fail_loads = true;
    let mut c = PlaylistController::new(media, App::new(), registry, &Settings::default());

    c.load_selection(audio(2));
    assert_eq!(c.state().current, Some(0));
    assert_eq!(c.surface().title, "00.mp3");
    assert!(!c.state().playing);
    assert!(!c.surface().playing);
}

#[test]
fn failed_load_stops_the_previous_track() {
    let mut c = loaded(2);
    c.seek(50.0);
    c.on_time_update();
    assert!(c.media().playing);
    assert_eq!(c.surface().time_text, "1:40 / 3:20");

    c.media_mut().fail_loads = true;
    c.play_next();

    assert_eq!(c.state().current, Some(1));
    assert_eq!(c.surface().title, "01.mp3");
    assert!(!c.state().playing);
    assert!(!c.media().playing);
    assert_eq!(c.media().source, None);
    assert_eq!(c.surface().time_text, "0:00 / 0:00");
    assert_eq!(c.surface().progress, 0.0);

    // A late tick must not bring the old position back.
    c.on_media_event(MediaEvent::TimeUpdate);
    assert_eq!(c.surface().time_text, "0:00 / 0:00");

    // Resuming does not restart the abandoned track.
    c.play();
    assert_eq!(c.media().source, None);
    assert!(!c.media().playing);
}

#[test]
fn time_update_with_zero_duration_reports_zero_progress() {
    let mut c = loaded(1);
    c.media_mut().duration = Some(0.0);
    c.on_time_update();
    assert_eq!(c.surface().progress, 0.0);
    assert_eq!(c.surface().time_text, "0:00 / 0:00");
}

#[test]
fn handle_dispatches_commands_and_reports_quit() {
    let mut c = loaded(3);
    assert!(!c.handle(Command::Next));
    assert_eq!(c.state().current, Some(1));
    assert!(!c.handle(Command::PlayAt(2)));
    assert_eq!(c.state().current, Some(2));
    assert!(!c.handle(Command::Pause));
    assert!(!c.state().playing);
    assert!(c.handle(Command::Quit));
}

#[test]
fn handle_load_folder_replaces_playlist_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Live");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("b.mp3"), b"x").unwrap();
    std::fs::write(root.join("a.flac"), b"x").unwrap();
    std::fs::write(root.join("cover.jpg"), b"x").unwrap();

    let mut c = loaded(1);
    c.handle(Command::LoadFolder(root));
    assert_eq!(c.surface().playlist, vec!["Live/a.flac", "Live/b.mp3"]);
    assert_eq!(c.state().current, Some(0));
}

#[test]
fn handle_ignores_selections_that_do_not_exist() {
    let mut c = loaded(2);
    c.handle(Command::LoadFolder(PathBuf::from("/definitely/not/here")));
    c.handle(Command::LoadFiles(vec![PathBuf::from("/nope.mp3")]));
    assert_eq!(c.state().tracks.len(), 2);
}

fn len_and_index() -> impl Strategy<Value = (usize, usize)> {
    (1usize..40).prop_flat_map(|n| (Just(n), 0..n))
}

proptest! {
    #[test]
    fn next_then_previous_restores_current((n, start) in len_and_index()) {
        let mut c = loaded(n);
        c.play_at(start);
        c.play_next();
        c.play_previous();
        prop_assert_eq!(c.state().current, Some(start));
    }

    #[test]
    fn n_nexts_return_to_start((n, start) in len_and_index()) {
        let mut c = loaded(n);
        c.play_at(start);
        for _ in 0..n {
            c.play_next();
        }
        prop_assert_eq!(c.state().current, Some(start));
    }

    #[test]
    fn current_stays_in_bounds_under_any_commands(
        n in 0usize..10,
        ops in prop::collection::vec(0u8..5, 0..60),
    ) {
        let mut c = loaded(n);
        for op in ops {
            match op {
                0 => c.play_next(),
                1 => c.play_previous(),
                2 => c.toggle_shuffle(),
                3 => c.on_playback_ended(),
                _ => c.play_at(n / 2),
            }
            match c.state().current {
                Some(i) => prop_assert!(i < n),
                None => prop_assert_eq!(n, 0),
            }
        }
    }
}

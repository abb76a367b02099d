use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::error::{PlayerError, Result};
use crate::source::{SourceHandle, SourceRegistry};

use super::sink::open_source;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, Media, MediaEvent, PlaybackHandle, PlaybackInfo};

/// `Media` backed by a rodio output stream on a dedicated thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    registry: SourceRegistry,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Open the default output device and start the audio thread.
    ///
    /// Progress and end-of-track notifications are sent to `events`.
    pub fn new(registry: SourceRegistry, events: Sender<MediaEvent>) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, events, playback_info.clone(), ready_tx);
        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(err),
            Err(_) => return Err(PlayerError::AudioThreadGone),
        }

        Ok(Self {
            tx,
            registry,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    fn send(&self, cmd: AudioCmd) -> Result<()> {
        self.tx.send(cmd).map_err(|_| PlayerError::AudioThreadGone)
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Media for AudioPlayer {
    fn set_source(&mut self, source: &SourceHandle) -> Result<()> {
        let path = self
            .registry
            .resolve(source)
            .ok_or_else(|| PlayerError::RevokedSource(source.clone()))?;
        let (decoder, duration) = open_source(&path)?;
        debug!(%source, path = %path.display(), ?duration, "opened source");

        if let Ok(mut info) = self.playback.lock() {
            info.elapsed = Duration::ZERO;
            info.duration = duration;
        }
        self.send(AudioCmd::Load {
            source: source.clone(),
            decoder,
        })
    }

    fn play(&mut self) -> Result<()> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn unload(&mut self) {
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo::default();
        }
        let _ = self.send(AudioCmd::Unload);
    }

    fn current_time(&self) -> f64 {
        self.playback
            .lock()
            .map(|info| info.elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, secs: f64) {
        let pos = Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO);
        let _ = self.send(AudioCmd::Seek(pos));
    }

    fn duration(&self) -> Option<f64> {
        self.playback
            .lock()
            .ok()
            .and_then(|info| info.duration)
            .map(|d| d.as_secs_f64())
    }

    fn set_playback_rate(&mut self, rate: f64) {
        let _ = self.send(AudioCmd::SetSpeed(rate as f32));
    }
}

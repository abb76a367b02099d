//! Media-related small types and handles.
//!
//! This module defines the `Media` trait, the events a backend emits, the
//! commands sent to the audio thread and the shared playback snapshot.

use std::fs::File;
use std::io::BufReader;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::Decoder;

use crate::error::Result;
use crate::source::SourceHandle;

/// A single-source media element: load a source, play/pause it, read and
/// move its position, change its speed.
pub trait Media {
    /// Point the element at `source`. Playback stays paused until `play`.
    fn set_source(&mut self, source: &SourceHandle) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    /// Drop whatever is loaded. Time and duration read as zero and unknown
    /// until the next successful `set_source`.
    fn unload(&mut self);
    /// Elapsed position of the loaded source, in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    /// Length of the loaded source in seconds, when known.
    fn duration(&self) -> Option<f64>;
    fn set_playback_rate(&mut self, rate: f64);
}

/// Notifications a media backend delivers to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The playback position moved.
    TimeUpdate,
    /// The given source played to its end.
    Ended(SourceHandle),
}

pub(super) enum AudioCmd {
    /// Replace the current sink with a paused one playing `decoder`.
    Load {
        source: SourceHandle,
        decoder: Decoder<BufReader<File>>,
    },
    Play,
    Pause,
    /// Jump to the given position in the loaded source.
    Seek(Duration),
    SetSpeed(f32),
    /// Stop and drop the current sink without loading a replacement.
    Unload,
    /// Stop playback and exit the audio thread.
    Quit,
}

#[derive(Debug, Clone, Default)]
/// Position snapshot the audio thread publishes for the loaded source.
pub(super) struct PlaybackInfo {
    /// Elapsed playback time of the loaded source.
    pub elapsed: Duration,
    /// Total length of the loaded source, when it could be determined.
    pub duration: Option<Duration>,
}

pub(super) type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

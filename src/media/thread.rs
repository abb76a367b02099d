use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::PlayerError;
use crate::source::SourceHandle;

use super::types::{AudioCmd, MediaEvent, PlaybackHandle, PlaybackInfo};

/// How often progress is published while playing.
const TICK: Duration = Duration::from_millis(250);

/// State owned by the audio thread for the currently loaded source.
struct Loaded {
    sink: Sink,
    source: SourceHandle,
    paused: bool,
    ended: bool,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<MediaEvent>,
    playback_info: PlaybackHandle,
    ready: SyncSender<Result<(), PlayerError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(err) => {
                let _ = ready.send(Err(PlayerError::NoOutputDevice(err.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut loaded: Option<Loaded> = None;
        let mut speed: f32 = 1.0;

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { source, decoder } => {
                        if let Some(old) = loaded.take() {
                            old.sink.stop();
                        }

                        let sink = Sink::connect_new(stream.mixer());
                        sink.pause();
                        sink.set_speed(speed);
                        sink.append(decoder);

                        debug!(%source, "loaded source");
                        if let Ok(mut info) = playback_info.lock() {
                            info.elapsed = Duration::ZERO;
                        }
                        loaded = Some(Loaded {
                            sink,
                            source,
                            paused: true,
                            ended: false,
                        });
                    }

                    AudioCmd::Play => {
                        let Some(l) = loaded.as_mut() else {
                            continue;
                        };
                        l.sink.play();
                        l.paused = false;
                    }

                    AudioCmd::Pause => {
                        let Some(l) = loaded.as_mut() else {
                            continue;
                        };
                        l.sink.pause();
                        l.paused = true;
                    }

                    AudioCmd::Seek(pos) => {
                        let Some(l) = loaded.as_mut() else {
                            continue;
                        };
                        if let Err(err) = l.sink.try_seek(pos) {
                            warn!(source = %l.source, error = %err, "seek failed");
                            continue;
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.elapsed = pos;
                        }
                        let _ = events.send(MediaEvent::TimeUpdate);
                    }

                    AudioCmd::SetSpeed(s) => {
                        speed = s;
                        if let Some(l) = loaded.as_ref() {
                            l.sink.set_speed(s);
                        }
                    }

                    AudioCmd::Unload => {
                        if let Some(old) = loaded.take() {
                            debug!(source = %old.source, "unloaded source");
                            old.sink.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            *info = PlaybackInfo::default();
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(l) = loaded.take() {
                            l.sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic progress report and end-of-track check
                    let Some(l) = loaded.as_mut() else {
                        continue;
                    };
                    if l.paused || l.ended {
                        continue;
                    }

                    if l.sink.empty() {
                        l.ended = true;
                        l.paused = true;
                        if let Ok(mut info) = playback_info.lock() {
                            if let Some(d) = info.duration {
                                info.elapsed = d;
                            }
                        }
                        let _ = events.send(MediaEvent::TimeUpdate);
                        let _ = events.send(MediaEvent::Ended(l.source.clone()));
                    } else {
                        if let Ok(mut info) = playback_info.lock() {
                            info.elapsed = l.sink.get_pos();
                        }
                        let _ = events.send(MediaEvent::TimeUpdate);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

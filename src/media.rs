//! Media playback: the `Media` abstraction the controller drives and the
//! rodio-backed implementation used by the binary.
//!
//! The real player runs decoding and output on its own thread (see
//! `thread.rs`) and reports progress and end-of-track back over a channel
//! as `MediaEvent`s.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{Media, MediaEvent};

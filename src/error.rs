//! Error types for the player.
//!
//! Media failures are reported through these variants so the controller can
//! log them; none of them are shown to the user.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceHandle;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// No audio output device could be opened.
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    /// A source handle was used after it had been revoked.
    #[error("source handle {0} has been revoked")]
    RevokedSource(SourceHandle),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// The audio thread has exited and no longer accepts commands.
    #[error("audio thread is gone")]
    AudioThreadGone,
}

pub type Result<T> = std::result::Result<T, PlayerError>;

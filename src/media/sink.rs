//! Opening and decoding a file before it is handed to the audio thread.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, Source};
use tracing::debug;

use crate::error::{PlayerError, Result};

/// Open and decode `path`, returning the decoder and the track length.
///
/// The decoder's own length is used when it reports one; otherwise the
/// container properties read by `lofty` fill in (common for MP3).
pub(super) fn open_source(path: &Path) -> Result<(Decoder<BufReader<File>>, Option<Duration>)> {
    let file = File::open(path).map_err(|source| PlayerError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| PlayerError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let duration = decoder.total_duration().or_else(|| probe_duration(path));
    Ok((decoder, duration))
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "could not probe duration");
            None
        }
    }
}

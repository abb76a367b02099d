//! Tracing setup.
//!
//! The terminal belongs to the TUI, so log lines go to a file. Without a
//! configured file no subscriber is installed and events are discarded.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;

/// Install the global subscriber. Returns `Ok(false)` when logging is off.
///
/// `RUST_LOG` takes precedence over `log.level`.
pub fn init(settings: &LogSettings) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(path) = settings.file.as_deref() else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(true)
}

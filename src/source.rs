//! Revocable handles to the bytes behind a playlist entry.
//!
//! A `SourceHandle` is an opaque token handed out once per loaded file. The
//! media backend resolves it back to a path when it starts playback; after
//! `revoke` the token no longer resolves.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceHandle(u64);

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source:{}", self.0)
    }
}

#[derive(Debug, Default)]
struct Inner {
    next_id: AtomicU64,
    live: Mutex<HashMap<u64, PathBuf>>,
}

/// Shared handle factory. Clones refer to the same set of live handles.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    inner: Arc<Inner>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` and return a fresh handle for it.
    pub fn create(&self, path: &Path) -> SourceHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut live) = self.inner.live.lock() {
            live.insert(id, path.to_path_buf());
        }
        SourceHandle(id)
    }

    /// Look up the path behind `handle`, or `None` once it has been revoked.
    pub fn resolve(&self, handle: &SourceHandle) -> Option<PathBuf> {
        self.inner
            .live
            .lock()
            .ok()
            .and_then(|live| live.get(&handle.0).cloned())
    }

    pub fn revoke(&self, handle: &SourceHandle) {
        if let Ok(mut live) = self.inner.live.lock() {
            live.remove(&handle.0);
        }
    }

    /// Number of handles that still resolve.
    pub fn live(&self) -> usize {
        self.inner.live.lock().map(|live| live.len()).unwrap_or(0)
    }
}

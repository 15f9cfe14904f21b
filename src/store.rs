//! In-memory holder of the current snapshot.
//!
//! The store is either unloaded or holds exactly one snapshot paired with the
//! timestamp at which it became current. Replacement swaps both under one write
//! lock, so readers never observe a half-updated pair.

use crate::snapshot::Snapshot;
use std::sync::{Arc, RwLock};

/// A snapshot together with its load timestamp.
#[derive(Debug)]
struct Loaded {
    snapshot: Arc<Snapshot>,
    loaded_at: u64,
}

/// Thread-safe cache store.
#[derive(Debug, Default)]
pub struct CacheStore {
    current: RwLock<Option<Loaded>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, `None` before the first successful load.
    pub fn current_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.read(|loaded| Arc::clone(&loaded.snapshot))
    }

    /// Timestamp (ms) at which the current snapshot was loaded.
    pub fn loaded_at(&self) -> Option<u64> {
        self.read(|loaded| loaded.loaded_at)
    }

    pub fn is_loaded(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    /// Swap in a new snapshot and its timestamp.
    pub fn replace(&self, snapshot: Snapshot, loaded_at: u64) {
        let entries = snapshot.len();
        let loaded = Loaded {
            snapshot: Arc::new(snapshot),
            loaded_at,
        };
        // A poisoned lock still holds a whole `Loaded`; swapping it is safe.
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(loaded);
        debug!("✓ Store REPLACE {} entries (loaded_at: {})", entries, loaded_at);
    }

    fn read<R>(&self, f: impl FnOnce(&Loaded) -> R) -> Option<R> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(f)
    }
}

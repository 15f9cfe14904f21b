//! TTL bookkeeping and background refresh gating.
//!
//! Each `(key, ttl)` pair a caller reads with is a [`CallSiteKey`] with its own
//! sliding expiry. Reads never wait on a refresh:
//!
//! ```text
//!            first read                      read, now < expiry
//!   (none) ───────────────► Fresh ◄───────────────────────────┐
//!                             │                               │
//!                             │ read, now >= expiry           │
//!                             ▼                               │
//!                          Expired ── gate open ──► RefreshTriggered
//!                             │                         (task completes)
//!                             └── gate held ──► stale value served, no new task
//! ```
//!
//! The refresh gate allows at most one background reload per engine. A reload reloads
//! the whole snapshot, not just the expired key.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Identity of a (configuration key, requested TTL) pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSiteKey {
    pub key: String,
    pub ttl: Duration,
}

impl CallSiteKey {
    pub fn new(key: impl Into<String>, ttl: Duration) -> Self {
        CallSiteKey {
            key: key.into(),
            ttl,
        }
    }
}

/// Outcome of observing a TTL read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtlState {
    /// Within the TTL window (or first read).
    Fresh,
    /// The window elapsed; a refresh should be attempted.
    Expired,
}

/// Per-engine TTL tracker and refresh gate.
#[derive(Debug, Default)]
pub struct RefreshEngine {
    expiries: DashMap<CallSiteKey, u64>,
    refreshing: AtomicBool,
    closed: AtomicBool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl RefreshEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a read of `key` with `ttl` at `now` (ms) and report whether it expired.
    ///
    /// The expiry is re-armed to `now + ttl` on every call, so freshness slides with reads.
    /// The check and the update happen under the entry's shard lock.
    pub fn observe(&self, key: &str, ttl: Duration, now: u64) -> TtlState {
        let next_expiry = now.saturating_add(ttl.as_millis().min(u64::MAX as u128) as u64);

        match self.expiries.entry(CallSiteKey::new(key, ttl)) {
            Entry::Occupied(mut entry) => {
                let state = if now >= *entry.get() {
                    TtlState::Expired
                } else {
                    TtlState::Fresh
                };
                entry.insert(next_expiry);
                state
            }
            Entry::Vacant(entry) => {
                entry.insert(next_expiry);
                TtlState::Fresh
            }
        }
    }

    /// Next expiry (ms) recorded for a call site.
    pub fn expiry_of(&self, key: &str, ttl: Duration) -> Option<u64> {
        self.expiries
            .get(&CallSiteKey::new(key, ttl))
            .map(|entry| *entry.value())
    }

    /// Number of tracked call sites.
    pub fn call_sites(&self) -> usize {
        self.expiries.len()
    }

    /// Try to take the refresh gate. Returns `false` if a refresh is already in flight
    /// or the engine is closed.
    pub fn try_begin(&self) -> bool {
        if self.closed.load(Ordering::Acquire) {
            return false;
        }
        self.refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Release the refresh gate.
    pub fn finish(&self) {
        self.refreshing.store(false, Ordering::Release);
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// Take the gate and start a refresh with `spawn`, keeping its handle.
    ///
    /// `spawn` runs only when the engine is open and no refresh is in flight. The closed
    /// check, the gate and the tracking happen under the task list lock, which
    /// [`RefreshEngine::close`] also takes, so no refresh starts once `close` returns.
    pub fn try_spawn(&self, spawn: impl FnOnce() -> JoinHandle<()>) -> bool {
        let mut tasks = self.lock_tasks();
        if !self.try_begin() {
            return false;
        }
        tasks.retain(|task| !task.is_finished());
        tasks.push(spawn());
        true
    }

    /// Take every tracked handle.
    pub fn take_tasks(&self) -> Vec<JoinHandle<()>> {
        std::mem::take(&mut *self.lock_tasks())
    }

    /// Refuse any further refreshes.
    ///
    /// Waits for a [`RefreshEngine::try_spawn`] in progress, so its task is visible to
    /// [`RefreshEngine::take_tasks`] afterwards.
    pub fn close(&self) {
        let _tasks = self.lock_tasks();
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn lock_tasks(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

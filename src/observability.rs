//! Observability hooks for loads and background refreshes.
//!
//! Implement [`FigMetrics`] to forward configuration events to your monitoring system:
//!
//! ```ignore
//! use fig_kit::observability::FigMetrics;
//! use std::time::Duration;
//!
//! struct PrometheusMetrics;
//!
//! impl FigMetrics for PrometheusMetrics {
//!     fn record_load(&self, source: &str, entries: usize, duration: Duration) {
//!         // histogram!("fig_load_seconds").record(duration);
//!     }
//!     // ... implement other methods
//! }
//!
//! // let fig = Fig::builder(transport)
//! //     .metrics(Arc::new(PrometheusMetrics))
//! //     .build()?;
//! ```
//!
//! Every method has a default implementation that logs through the `log` crate, so
//! [`LogMetrics`] (the default) needs no code. Use [`NoOpMetrics`] to silence them.

use std::time::Duration;

/// Trait for configuration lifecycle events.
pub trait FigMetrics: Send + Sync {
    /// A load (explicit or background) produced a snapshot.
    fn record_load(&self, source: &str, entries: usize, duration: Duration) {
        info!(
            "✓ Fig loaded {} values from {} in {:?}",
            entries, source, duration
        );
    }

    /// A load failed on every source.
    fn record_load_error(&self, error: &str) {
        warn!("Fig load failed: {}", error);
    }

    /// A TTL expiry started a background refresh.
    fn record_refresh_started(&self, key: &str) {
        debug!("Fig refresh triggered by expired key: {}", key);
    }

    /// A TTL expiry found a refresh already in flight.
    fn record_refresh_skipped(&self, key: &str) {
        debug!("Fig refresh already in flight, skipping for key: {}", key);
    }

    /// A background refresh failed; the previous snapshot stays current.
    fn record_refresh_failed(&self, error: &str) {
        warn!("Fig background refresh failed: {}", error);
    }

    /// A read was served the caller's default because nothing is loaded yet.
    fn record_unloaded_read(&self, key: &str) {
        warn!(
            "Fig not loaded, failed or not completed yet; returning default for '{}'",
            key
        );
    }
}

/// Default metrics: log every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMetrics;

impl FigMetrics for LogMetrics {}

/// Metrics implementation that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMetrics;

impl FigMetrics for NoOpMetrics {
    fn record_load(&self, _source: &str, _entries: usize, _duration: Duration) {}
    fn record_load_error(&self, _error: &str) {}
    fn record_refresh_started(&self, _key: &str) {}
    fn record_refresh_skipped(&self, _key: &str) {}
    fn record_refresh_failed(&self, _error: &str) {}
    fn record_unloaded_read(&self, _key: &str) {}
}

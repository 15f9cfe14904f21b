//! The configuration engine.

use crate::clock::{Clock, SystemClock};
use crate::coerce::{coerce, FromConfigValue};
use crate::config::FigConfig;
use crate::error::{Error, Result};
use crate::observability::{FigMetrics, LogMetrics};
use crate::refresh::{RefreshEngine, TtlState};
use crate::serialization::{encode_snapshot, SnapshotFormat};
use crate::snapshot::Snapshot;
use crate::source::{file, SheetTransport, SheetUrl, Source, SourceLoader};
use crate::store::CacheStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Remote configuration client.
///
/// Holds one snapshot of the sheet in memory and serves typed reads from it. Reads never
/// perform I/O and never fail: a missing key, an unparsable value, or an engine that has
/// not loaded yet all resolve to the caller's default.
///
/// `Fig` is cheap to clone; clones share the same snapshot and refresh state.
///
/// # Example
///
/// ```ignore
/// use fig_kit::{Fig, FigConfig};
/// use std::time::Duration;
///
/// let fig = Fig::from_config(
///     FigConfig::new()
///         .with_sheet_url("https://docs.google.com/spreadsheets/d/your-sheet-id/edit?usp=sharing")
///         .with_fallback_file("config/fallback.json"),
/// )?;
/// fig.load().await?;
///
/// let app_name = fig.get_string("app_name", Some("Default App".to_string()));
/// let retries = fig.get_int("max_retries", Some(3));
///
/// // Re-fetch the sheet in the background once this call site is 5 minutes stale
/// let banner = fig.get_string_with_ttl("banner", None, Duration::from_secs(300));
/// ```
pub struct Fig<T: SheetTransport> {
    inner: Arc<FigInner<T>>,
}

struct FigInner<T: SheetTransport> {
    config: FigConfig,
    loader: SourceLoader<T>,
    store: CacheStore,
    refresh: RefreshEngine,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn FigMetrics>,
}

impl<T: SheetTransport> Clone for Fig<T> {
    fn clone(&self) -> Self {
        Fig {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: SheetTransport> FigInner<T> {
    /// Load through the chain and swap the store on success.
    async fn load_and_store(&self, primary: &Source) -> Result<()> {
        let timer = Instant::now();
        debug!("» Loading configuration from {}", primary);

        match self.loader.load(primary, &self.config.fallbacks).await {
            Ok((snapshot, source)) => {
                let entries = snapshot.len();
                self.store.replace(snapshot, self.clock.now_millis());
                self.metrics
                    .record_load(&source.to_string(), entries, timer.elapsed());
                Ok(())
            }
            Err(e) => {
                self.metrics.record_load_error(&e.to_string());
                Err(e)
            }
        }
    }
}

impl<T: SheetTransport> Fig<T> {
    /// Create an engine with default clock and metrics.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `config` fails validation.
    pub fn new(config: FigConfig, transport: T) -> Result<Self> {
        Self::builder(transport).config(config).build()
    }

    pub fn builder(transport: T) -> FigBuilder<T> {
        FigBuilder::new(transport)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Load from the configured sheet, falling back through the configured chain.
    ///
    /// This is the only way (besides [`Fig::load_from`]) to populate the engine, and it
    /// waits for network or disk I/O.
    ///
    /// # Errors
    ///
    /// - `Error::ConfigError`: no sheet URL configured
    /// - `Error::FallbackExhausted`: the sheet and every fallback failed; the previous
    ///   snapshot, if any, stays current
    pub async fn load(&self) -> Result<()> {
        let primary = self.inner.config.primary()?;
        self.inner.load_and_store(&primary).await
    }

    /// Load from `url` instead of the configured sheet, still using the configured
    /// fallbacks.
    ///
    /// # Errors
    ///
    /// Returns `Error::FallbackExhausted` when `url` and every fallback fail.
    pub async fn load_from(&self, url: &str) -> Result<()> {
        let primary = Source::Sheet(SheetUrl::new(url));
        self.inner.load_and_store(&primary).await
    }

    /// Write the current snapshot to `path` in the configured export format.
    ///
    /// The file can be used as a fallback source later.
    ///
    /// # Errors
    ///
    /// - `Error::ExportWithoutLoad`: nothing has been loaded yet
    /// - `Error::Io`: the file or its parent directories cannot be written
    pub async fn export_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.export_snapshot_as(path, self.inner.config.export_format)
            .await
    }

    /// Write the current snapshot to `path` in `format`.
    ///
    /// # Errors
    ///
    /// Same as [`Fig::export_snapshot`], plus `Error::SerializationError` when the snapshot
    /// holds a value `format` cannot represent.
    pub async fn export_snapshot_as(
        &self,
        path: impl AsRef<Path>,
        format: SnapshotFormat,
    ) -> Result<()> {
        let snapshot = self
            .inner
            .store
            .current_snapshot()
            .ok_or(Error::ExportWithoutLoad)?;
        file::write_snapshot(path.as_ref(), &snapshot, format).await
    }

    /// Encode the current snapshot without touching the file system.
    ///
    /// # Errors
    ///
    /// `Error::ExportWithoutLoad` when unloaded, or an encoding error.
    pub fn export_bytes(&self, format: SnapshotFormat) -> Result<Vec<u8>> {
        let snapshot = self
            .inner
            .store
            .current_snapshot()
            .ok_or(Error::ExportWithoutLoad)?;
        encode_snapshot(&snapshot, format)
    }

    /// Wait for any background refresh currently in flight.
    pub async fn drain_refreshes(&self) {
        loop {
            let tasks = self.inner.refresh.take_tasks();
            if tasks.is_empty() {
                return;
            }
            for result in futures::future::join_all(tasks).await {
                if let Err(e) = result {
                    warn!("Fig refresh task did not complete: {}", e);
                }
            }
        }
    }

    /// Stop scheduling refreshes and wait for outstanding ones.
    ///
    /// Reads keep working after shutdown; they just never trigger a refresh again.
    pub async fn shutdown(&self) {
        self.inner.refresh.close();
        self.drain_refreshes().await;
        debug!("Fig shut down");
    }

    // ========================================================================
    // Snapshot-level reads
    // ========================================================================

    /// Every loaded key/value pair, `None` before the first successful load.
    pub fn get_all(&self) -> Option<Arc<Snapshot>> {
        let snapshot = self.inner.store.current_snapshot();
        if snapshot.is_none() {
            self.inner.metrics.record_unloaded_read("*");
        }
        snapshot
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.store.is_loaded()
    }

    /// When the current snapshot was loaded (ms since the Unix epoch).
    pub fn loaded_at(&self) -> Option<u64> {
        self.inner.store.loaded_at()
    }

    /// Whether a background refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh.is_refreshing()
    }

    pub fn config(&self) -> &FigConfig {
        &self.inner.config
    }

    pub fn transport(&self) -> &T {
        self.inner.loader.transport()
    }

    // ========================================================================
    // Typed reads
    // ========================================================================

    /// Read `key` as `V`, or `default` if it is absent, null, or does not parse.
    pub fn get<V: FromConfigValue>(&self, key: &str, default: Option<V>) -> Option<V> {
        match self.inner.store.current_snapshot() {
            Some(snapshot) => coerce(snapshot.get(key), default),
            None => {
                self.inner.metrics.record_unloaded_read(key);
                default
            }
        }
    }

    /// Like [`Fig::get`], and schedule a background reload once this `(key, ttl)` call
    /// site has gone `ttl` without a read.
    ///
    /// The returned value always comes from the current snapshot; the reload only
    /// affects later reads.
    pub fn get_with_ttl<V: FromConfigValue>(
        &self,
        key: &str,
        default: Option<V>,
        ttl: Duration,
    ) -> Option<V> {
        let value = self.get(key, default);
        let now = self.inner.clock.now_millis();
        if self.inner.refresh.observe(key, ttl, now) == TtlState::Expired {
            self.spawn_refresh(key);
        }
        value
    }

    pub fn get_string(&self, key: &str, default: Option<String>) -> Option<String> {
        self.get(key, default)
    }

    pub fn get_int(&self, key: &str, default: Option<i32>) -> Option<i32> {
        self.get(key, default)
    }

    pub fn get_long(&self, key: &str, default: Option<i64>) -> Option<i64> {
        self.get(key, default)
    }

    pub fn get_float(&self, key: &str, default: Option<f32>) -> Option<f32> {
        self.get(key, default)
    }

    pub fn get_double(&self, key: &str, default: Option<f64>) -> Option<f64> {
        self.get(key, default)
    }

    pub fn get_bool(&self, key: &str, default: Option<bool>) -> Option<bool> {
        self.get(key, default)
    }

    pub fn get_string_with_ttl(
        &self,
        key: &str,
        default: Option<String>,
        ttl: Duration,
    ) -> Option<String> {
        self.get_with_ttl(key, default, ttl)
    }

    pub fn get_int_with_ttl(&self, key: &str, default: Option<i32>, ttl: Duration) -> Option<i32> {
        self.get_with_ttl(key, default, ttl)
    }

    pub fn get_long_with_ttl(&self, key: &str, default: Option<i64>, ttl: Duration) -> Option<i64> {
        self.get_with_ttl(key, default, ttl)
    }

    pub fn get_float_with_ttl(&self, key: &str, default: Option<f32>, ttl: Duration) -> Option<f32> {
        self.get_with_ttl(key, default, ttl)
    }

    pub fn get_double_with_ttl(
        &self,
        key: &str,
        default: Option<f64>,
        ttl: Duration,
    ) -> Option<f64> {
        self.get_with_ttl(key, default, ttl)
    }

    pub fn get_bool_with_ttl(&self, key: &str, default: Option<bool>, ttl: Duration) -> Option<bool> {
        self.get_with_ttl(key, default, ttl)
    }

    // ========================================================================
    // Background refresh
    // ========================================================================

    fn spawn_refresh(&self, key: &str) {
        let inner = &self.inner;

        if inner.refresh.is_closed() {
            debug!("Fig is shut down; not refreshing for '{}'", key);
            return;
        }

        let primary = match inner.config.primary() {
            Ok(primary) => primary,
            Err(_) => {
                debug!("No sheet URL configured; not refreshing for '{}'", key);
                return;
            }
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No tokio runtime available; not refreshing for '{}'", key);
                return;
            }
        };

        let started = inner.refresh.try_spawn(|| {
            inner.metrics.record_refresh_started(key);
            let release = ReleaseOnDrop(Arc::clone(inner));
            runtime.spawn(async move {
                let inner = &release.0;
                if let Err(e) = inner.load_and_store(&primary).await {
                    inner.metrics.record_refresh_failed(&e.to_string());
                }
            })
        });
        if !started {
            inner.metrics.record_refresh_skipped(key);
        }
    }
}

/// Releases the refresh gate when the reload ends, panics, or is dropped unpolled.
struct ReleaseOnDrop<T: SheetTransport>(Arc<FigInner<T>>);

impl<T: SheetTransport> Drop for ReleaseOnDrop<T> {
    fn drop(&mut self) {
        self.0.refresh.finish();
    }
}

#[cfg(feature = "sheets")]
impl Fig<crate::source::HttpSheetTransport> {
    /// Create an engine reading sheets over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `config` is invalid or the HTTP client cannot be built.
    ///
    /// `config.request_timeout_ms`, when set, overrides the transport's request timeout.
    pub fn from_config(config: FigConfig) -> Result<Self> {
        let mut transport = crate::source::HttpSheetTransport::builder();
        if let Some(timeout) = config.request_timeout() {
            transport = transport.timeout(timeout);
        }
        Fig::new(config, transport.build()?)
    }
}

/// Builder for [`Fig`].
pub struct FigBuilder<T: SheetTransport> {
    transport: T,
    config: FigConfig,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn FigMetrics>,
}

impl<T: SheetTransport> FigBuilder<T> {
    pub fn new(transport: T) -> Self {
        FigBuilder {
            transport,
            config: FigConfig::default(),
            clock: Arc::new(SystemClock),
            metrics: Arc::new(LogMetrics),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: FigConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sheet_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_sheet_url(url);
        self
    }

    pub fn fallback_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_fallback_file(path);
        self
    }

    pub fn fallback_sheet(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_fallback_sheet(url);
        self
    }

    pub fn export_format(mut self, format: SnapshotFormat) -> Self {
        self.config = self.config.with_export_format(format);
        self
    }

    /// Set a custom clock (e.g. [`ManualClock`](crate::clock::ManualClock) in tests).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set custom metrics handler.
    pub fn metrics(mut self, metrics: Arc<dyn FigMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the configuration fails validation.
    pub fn build(self) -> Result<Fig<T>> {
        self.config.validate()?;
        Ok(Fig {
            inner: Arc::new(FigInner {
                config: self.config,
                loader: SourceLoader::new(self.transport),
                store: CacheStore::new(),
                refresh: RefreshEngine::new(),
                clock: self.clock,
                metrics: self.metrics,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::snapshot::Row;
    use crate::source::testing::StubTransport;

    const SHEET: &str = "https://docs.google.com/spreadsheets/d/test/";

    fn rows() -> Vec<Row> {
        vec![
            Row::new("app_name", "Fig"),
            Row::new("age", "25.7"),
            Row::new("debug", "TRUE"),
            Row::new("ratio", "0.25"),
            Row::new("flag", "yes"),
        ]
    }

    fn fig_with(transport: StubTransport, clock: Arc<ManualClock>) -> Fig<StubTransport> {
        Fig::builder(transport)
            .sheet_url(SHEET)
            .clock(clock)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_before_load_return_default() {
        let fig = fig_with(StubTransport::default(), Arc::new(ManualClock::new(0)));

        assert!(!fig.is_loaded());
        assert!(fig.get_all().is_none());
        assert_eq!(fig.get_int("age", Some(1)), Some(1));
        assert_eq!(fig.get_string("app_name", None), None);
    }

    #[tokio::test]
    async fn test_typed_reads_after_load() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let fig = fig_with(transport, Arc::new(ManualClock::new(42)));

        fig.load().await.unwrap();

        assert!(fig.is_loaded());
        assert_eq!(fig.loaded_at(), Some(42));
        assert_eq!(fig.get_string("app_name", None), Some("Fig".to_string()));
        assert_eq!(fig.get_int("age", None), Some(26));
        assert_eq!(fig.get_long("age", None), Some(26));
        assert_eq!(fig.get_bool("debug", None), Some(true));
        assert_eq!(fig.get_bool("flag", Some(false)), Some(false));
        assert_eq!(fig.get_double("ratio", None), Some(0.25));
        assert_eq!(fig.get_float("ratio", None), Some(0.25));
        assert_eq!(fig.get_int("missing", Some(9)), Some(9));
    }

    #[tokio::test]
    async fn test_load_without_sheet_url() {
        let fig = Fig::builder(StubTransport::default()).build().unwrap();
        assert!(matches!(fig.load().await, Err(Error::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_load_from_overrides_primary() {
        let transport =
            StubTransport::default().with("https://override/", Ok(vec![Row::new("k", "v")]));
        let fig = fig_with(transport, Arc::new(ManualClock::new(0)));

        fig.load_from("https://override/edit?usp=sharing").await.unwrap();
        assert_eq!(fig.get_string("k", None), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let fig = fig_with(transport.clone(), Arc::new(ManualClock::new(0)));
        fig.load().await.unwrap();
        let before = fig.get_all().unwrap();

        transport.responses.lock().unwrap().clear();
        assert!(fig.load().await.is_err());

        assert_eq!(*fig.get_all().unwrap(), *before);
    }

    #[tokio::test]
    async fn test_export_without_load() {
        let fig = fig_with(StubTransport::default(), Arc::new(ManualClock::new(0)));
        assert!(matches!(
            fig.export_bytes(SnapshotFormat::Json),
            Err(Error::ExportWithoutLoad)
        ));
        assert!(matches!(
            fig.export_snapshot("/tmp/should_fail.json").await,
            Err(Error::ExportWithoutLoad)
        ));
    }

    #[tokio::test]
    async fn test_ttl_expiry_triggers_one_refresh() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let clock = Arc::new(ManualClock::new(0));
        let fig = fig_with(transport.clone(), clock.clone());
        fig.load().await.unwrap();
        assert_eq!(transport.calls(), 1);

        let ttl = Duration::from_secs(5);
        fig.get_string_with_ttl("app_name", None, ttl);
        clock.set(6_000);
        fig.get_string_with_ttl("app_name", None, ttl);
        fig.drain_refreshes().await;

        assert_eq!(transport.calls(), 2);
        assert!(!fig.is_refreshing());
        assert_eq!(fig.loaded_at(), Some(6_000));
    }

    #[tokio::test]
    async fn test_reads_without_ttl_never_refresh() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let clock = Arc::new(ManualClock::new(0));
        let fig = fig_with(transport.clone(), clock.clone());
        fig.load().await.unwrap();

        fig.get_string("app_name", None);
        clock.set(1_000_000);
        fig.get_string("app_name", None);
        fig.drain_refreshes().await;

        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_swallowed() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let clock = Arc::new(ManualClock::new(0));
        let fig = fig_with(transport.clone(), clock.clone());
        fig.load().await.unwrap();

        transport.responses.lock().unwrap().clear();
        let ttl = Duration::from_millis(10);
        fig.get_int_with_ttl("age", None, ttl);
        clock.set(100);
        assert_eq!(fig.get_int_with_ttl("age", None, ttl), Some(26));
        fig.drain_refreshes().await;

        assert_eq!(transport.calls(), 2);
        assert!(!fig.is_refreshing());
        assert_eq!(fig.get_int("age", None), Some(26));
    }

    #[tokio::test]
    async fn test_shutdown_stops_refreshes() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let clock = Arc::new(ManualClock::new(0));
        let fig = fig_with(transport.clone(), clock.clone());
        fig.load().await.unwrap();
        fig.shutdown().await;

        let ttl = Duration::from_millis(10);
        fig.get_bool_with_ttl("debug", None, ttl);
        clock.set(100);
        assert_eq!(fig.get_bool_with_ttl("debug", None, ttl), Some(true));
        fig.drain_refreshes().await;

        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_ttl_read_without_runtime_does_not_panic() {
        let transport = StubTransport::default();
        let clock = Arc::new(ManualClock::new(0));
        let fig = fig_with(transport.clone(), clock.clone());

        let ttl = Duration::from_millis(1);
        fig.get_double_with_ttl("ratio", Some(1.0), ttl);
        clock.set(10);
        assert_eq!(fig.get_double_with_ttl("ratio", Some(1.0), ttl), Some(1.0));
        assert_eq!(transport.calls(), 0);
        assert!(!fig.is_refreshing());
    }

    #[test]
    fn test_refresh_dropped_with_runtime_releases_gate() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let clock = Arc::new(ManualClock::new(0));
        let fig = fig_with(transport.clone(), clock.clone());
        let ttl = Duration::from_millis(10);

        fig.get_string_with_ttl("app_name", None, ttl);
        clock.set(100);

        // The spawned reload is never polled before this runtime goes away
        let first = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        first.block_on(async {
            fig.get_string_with_ttl("app_name", None, ttl);
        });
        drop(first);

        assert!(!fig.is_refreshing());
        assert_eq!(transport.calls(), 0);

        let second = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        second.block_on(async {
            clock.set(200);
            fig.get_string_with_ttl("app_name", None, ttl);
            fig.drain_refreshes().await;
        });

        assert_eq!(transport.calls(), 1);
        assert!(!fig.is_refreshing());
        assert_eq!(fig.loaded_at(), Some(200));
    }

    #[tokio::test]
    async fn test_no_refresh_starts_after_shutdown_returns() {
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let clock = Arc::new(ManualClock::new(0));
        let fig = fig_with(transport.clone(), clock.clone());
        fig.load().await.unwrap();

        let ttl = Duration::from_millis(10);
        fig.get_int_with_ttl("age", None, ttl);
        clock.set(100);
        fig.get_int_with_ttl("age", None, ttl);
        fig.shutdown().await;

        // The in-flight reload was awaited by shutdown
        assert_eq!(transport.calls(), 2);
        assert!(!fig.is_refreshing());

        clock.set(200);
        fig.get_int_with_ttl("age", None, ttl);
        fig.drain_refreshes().await;
        assert_eq!(transport.calls(), 2);
    }

    /// Counts unloaded reads.
    #[derive(Default)]
    struct CountingMetrics {
        unloaded: std::sync::atomic::AtomicUsize,
    }

    impl FigMetrics for CountingMetrics {
        fn record_unloaded_read(&self, _key: &str) {
            self.unloaded
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_unloaded_reads_are_reported() {
        let metrics = Arc::new(CountingMetrics::default());
        let transport = StubTransport::default().with(SHEET, Ok(rows()));
        let fig = Fig::builder(transport)
            .sheet_url(SHEET)
            .metrics(metrics.clone())
            .build()
            .unwrap();
        let unloaded = || metrics.unloaded.load(std::sync::atomic::Ordering::SeqCst);

        assert_eq!(fig.get_string("app_name", None), None);
        assert_eq!(fig.get_bool("debug", Some(true)), Some(true));
        assert_eq!(fig.get_int_with_ttl("age", Some(1), Duration::from_secs(1)), Some(1));
        assert!(fig.get_all().is_none());
        assert_eq!(unloaded(), 4);

        fig.load().await.unwrap();
        fig.get_string("app_name", None);
        fig.get_all();
        assert_eq!(unloaded(), 4);
    }

    #[cfg(feature = "sheets")]
    #[test]
    fn test_from_config_applies_request_timeout() {
        let config = FigConfig::new()
            .with_sheet_url(SHEET)
            .with_request_timeout(Duration::from_millis(750));
        let fig = Fig::from_config(config).unwrap();
        assert_eq!(
            fig.config().request_timeout(),
            Some(Duration::from_millis(750))
        );

        let zero = FigConfig::new()
            .with_sheet_url(SHEET)
            .with_request_timeout(Duration::ZERO);
        assert!(matches!(Fig::from_config(zero), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Fig::new(FigConfig::new().with_sheet_url(" "), StubTransport::default());
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}

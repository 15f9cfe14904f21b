//! Engine configuration.

use crate::error::{Error, Result};
use crate::serialization::SnapshotFormat;
use crate::source::{SheetUrl, Source};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where a [`Fig`](crate::Fig) loads from and how it exports.
///
/// Deserializable so it can live in an application's own settings file:
///
/// ```
/// use fig_kit::FigConfig;
///
/// let config: FigConfig = serde_json::from_str(r#"{
///     "sheet_url": "https://docs.google.com/spreadsheets/d/abc/edit?usp=sharing",
///     "fallbacks": [{ "file": "config/fallback.json" }],
///     "export_format": "json",
///     "request_timeout_ms": 10000
/// }"#).unwrap();
///
/// assert_eq!(config.fallbacks.len(), 1);
/// assert_eq!(config.request_timeout(), Some(std::time::Duration::from_secs(10)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FigConfig {
    /// Primary sheet. Required by [`Fig::load`](crate::Fig::load), optional when every
    /// load passes an explicit URL.
    #[serde(default)]
    pub sheet_url: Option<SheetUrl>,

    /// Sources tried in order when the primary fails.
    #[serde(default)]
    pub fallbacks: Vec<Source>,

    /// Encoding used by [`Fig::export_snapshot`](crate::Fig::export_snapshot).
    #[serde(default)]
    pub export_format: SnapshotFormat,

    /// Per-request timeout for the HTTP transport built by `Fig::from_config`.
    /// `None` keeps the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl FigConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary sheet URL.
    pub fn with_sheet_url(mut self, url: impl Into<String>) -> Self {
        self.sheet_url = Some(SheetUrl::new(url));
        self
    }

    /// Append a local fallback file to the chain.
    pub fn with_fallback_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallbacks.push(Source::File(path.into()));
        self
    }

    /// Append a fallback sheet to the chain.
    pub fn with_fallback_sheet(mut self, url: impl Into<String>) -> Self {
        self.fallbacks.push(Source::sheet(url));
        self
    }

    pub fn with_export_format(mut self, format: SnapshotFormat) -> Self {
        self.export_format = format;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(timeout.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// The configured primary as a [`Source`].
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` when no sheet URL was configured.
    pub fn primary(&self) -> Result<Source> {
        self.sheet_url.clone().map(Source::Sheet).ok_or_else(|| {
            Error::ConfigError(
                "Sheet URL not provided in configuration. Use FigConfig::with_sheet_url or Fig::load_from(url)"
                    .to_string(),
            )
        })
    }

    /// Check for configuration that can never load.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` for an empty sheet URL or fallback path, or a zero
    /// request timeout.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_ms == Some(0) {
            return Err(Error::ConfigError("request_timeout_ms must be positive".to_string()));
        }
        if let Some(url) = &self.sheet_url {
            if url.as_str().trim().is_empty() {
                return Err(Error::ConfigError("sheet_url is empty".to_string()));
            }
        }
        for source in &self.fallbacks {
            match source {
                Source::Sheet(url) if url.as_str().trim().is_empty() => {
                    return Err(Error::ConfigError("fallback sheet URL is empty".to_string()));
                }
                Source::File(path) if path.as_os_str().is_empty() => {
                    return Err(Error::ConfigError("fallback file path is empty".to_string()));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

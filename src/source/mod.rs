//! Configuration sources and the loader that chains them.
//!
//! A load first tries the primary source. Only when it fails are the fallbacks
//! consulted, strictly in order; the first one to succeed supplies the snapshot.
//!
//! ```text
//! primary ──ok──────────────────────────────► Snapshot
//!    │ err
//!    ▼
//! fallback[0] ──ok──────────────────────────► Snapshot
//!    │ err
//!    ▼
//! fallback[n] ──ok──────────────────────────► Snapshot
//!    │ err
//!    ▼
//! Error::FallbackExhausted { primary, fallbacks }
//! ```
//!
//! Sources are either a remote sheet, fetched through a [`SheetTransport`], or a
//! local snapshot file read by [`file::read_snapshot`].

use crate::error::{Error, Result};
use crate::snapshot::{Row, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;

pub mod file;
#[cfg(feature = "sheets")]
pub mod sheets;

#[cfg(feature = "sheets")]
pub use sheets::HttpSheetTransport;

/// Suffix of the "share" link copied from the sheet UI.
const SHARE_SUFFIX: &str = "edit?usp=sharing";

/// A normalized sheet URL.
///
/// A trailing `edit?usp=sharing` is stripped so that share links can be used as is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SheetUrl(String);

impl SheetUrl {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        match url.strip_suffix(SHARE_SUFFIX) {
            Some(base) => SheetUrl(base.to_string()),
            None => SheetUrl(url),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SheetUrl {
    fn from(url: String) -> Self {
        SheetUrl::new(url)
    }
}

impl From<&str> for SheetUrl {
    fn from(url: &str) -> Self {
        SheetUrl::new(url)
    }
}

impl From<SheetUrl> for String {
    fn from(url: SheetUrl) -> Self {
        url.0
    }
}

impl fmt::Display for SheetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A place configuration can be loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Remote sheet fetched through the transport.
    Sheet(SheetUrl),
    /// Local snapshot file (JSON or binary).
    File(PathBuf),
}

impl Source {
    pub fn sheet(url: impl Into<String>) -> Self {
        Source::Sheet(SheetUrl::new(url))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Sheet(url) => write!(f, "sheet {}", url),
            Source::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// Trait for fetching rows from a remote sheet.
///
/// Implementations own the wire format. They return rows in sheet order, or fail with
/// [`Error::SourceUnreachable`], [`Error::HttpStatus`], or [`Error::MissingField`] when a
/// row lacks its `key` cell.
///
/// The returned future must be `Send` so that background refreshes can run on the
/// tokio runtime.
pub trait SheetTransport: Send + Sync + 'static {
    /// Fetch every `(key, value)` row of the sheet at `url`.
    fn fetch_rows(&self, url: &SheetUrl) -> impl Future<Output = Result<Vec<Row>>> + Send;
}

/// Loads snapshots from a primary source and an ordered fallback chain.
pub struct SourceLoader<T: SheetTransport> {
    transport: T,
}

impl<T: SheetTransport> SourceLoader<T> {
    pub fn new(transport: T) -> Self {
        SourceLoader { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Load from `primary`, falling back to each of `fallbacks` in order.
    ///
    /// Returns the snapshot together with the source that produced it.
    ///
    /// # Errors
    ///
    /// Returns `Error::FallbackExhausted` when the primary and every fallback fail.
    pub async fn load(&self, primary: &Source, fallbacks: &[Source]) -> Result<(Snapshot, Source)> {
        let primary_error = match self.load_one(primary).await {
            Ok(snapshot) => return Ok((snapshot, primary.clone())),
            Err(e) => e,
        };
        warn!("Failed to load from {}: {}", primary, primary_error);

        let mut failures = Vec::new();
        for fallback in fallbacks {
            match self.load_one(fallback).await {
                Ok(snapshot) => {
                    info!("✓ Loaded {} values from fallback {}", snapshot.len(), fallback);
                    return Ok((snapshot, fallback.clone()));
                }
                Err(e) => {
                    warn!("Fallback {} failed: {}", fallback, e);
                    failures.push((fallback.to_string(), e));
                }
            }
        }

        Err(Error::FallbackExhausted {
            primary: Box::new(primary_error),
            fallbacks: failures,
        })
    }

    /// Load a single source without any fallback.
    pub async fn load_one(&self, source: &Source) -> Result<Snapshot> {
        match source {
            Source::Sheet(url) => {
                let rows = self
                    .transport
                    .fetch_rows(url)
                    .await
                    .map_err(Error::into_client_facing)?;
                debug!("Fetched {} rows from {}", rows.len(), url);
                Ok(Snapshot::from_rows(rows))
            }
            Source::File(path) => file::read_snapshot(path).await,
        }
    }
}

//! # fig-kit
//!
//! Remote configuration backed by a spreadsheet, with typed accessors, fallback sources
//! and non-blocking TTL refresh.
//!
//! ## Features
//!
//! - **Typed, total reads:** `get_string`, `get_int`, `get_bool`, ... never fail; missing or
//!   malformed values resolve to the caller's default
//! - **Fallback chain:** local files (or other sheets) tried in order when the sheet is down
//! - **TTL refresh:** stale call sites trigger one background reload, readers never wait
//! - **Export:** write the loaded snapshot to disk for use as a future fallback
//! - **Pluggable transport:** HTTP via `reqwest` (feature `sheets`), or your own
//!   [`SheetTransport`]
//!
//! ## Quick Start
//!
//! The sheet needs a header row with `key` and `value` columns:
//!
//! | key | value |
//! |-----|-------|
//! | app_name | My App |
//! | max_retries | 3 |
//! | new_checkout | TRUE |
//!
//! ```ignore
//! use fig_kit::{Fig, FigConfig};
//! use std::time::Duration;
//!
//! let fig = Fig::from_config(
//!     FigConfig::new()
//!         .with_sheet_url("https://docs.google.com/spreadsheets/d/your-sheet-id/edit?usp=sharing")
//!         .with_fallback_file("config/fallback.json"),
//! )?;
//!
//! // Blocks on I/O: the sheet, then the fallback file if the sheet fails
//! fig.load().await?;
//!
//! let retries = fig.get_int("max_retries", Some(3));
//! let new_checkout = fig.get_bool_with_ttl("new_checkout", Some(false), Duration::from_secs(60));
//!
//! // Keep a copy around for the next time the sheet is unreachable
//! fig.export_snapshot("config/fallback.json").await?;
//! ```
//!
//! ## Custom Transports
//!
//! ```ignore
//! use fig_kit::{Result, Row, SheetTransport, SheetUrl};
//!
//! struct StaticTransport;
//!
//! impl SheetTransport for StaticTransport {
//!     async fn fetch_rows(&self, _url: &SheetUrl) -> Result<Vec<Row>> {
//!         Ok(vec![Row::new("app_name", "Static")])
//!     }
//! }
//! ```

#[macro_use]
extern crate log;

pub mod clock;
pub mod coerce;
pub mod config;
pub mod error;
pub mod fig;
pub mod observability;
pub mod refresh;
pub mod serialization;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod value;

// Re-exports for convenience
pub use coerce::FromConfigValue;
pub use config::FigConfig;
pub use error::{Error, Result};
pub use fig::{Fig, FigBuilder};
pub use serialization::SnapshotFormat;
pub use snapshot::{Row, Snapshot};
#[cfg(feature = "sheets")]
pub use source::HttpSheetTransport;
pub use source::{SheetTransport, SheetUrl, Source};
pub use value::ConfigValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! HTTP transport for public spreadsheets.
//!
//! Reads a sheet through its visualization query endpoint
//! (`<sheet url>/gviz/tq?tqx=out:json`), which answers with a JSON table wrapped in a
//! JavaScript callback:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"status":"ok","table":{"cols":[..],"rows":[..]}});
//! ```
//!
//! The sheet must have a header row with `key` and `value` columns. When a column mixes
//! types, the endpoint returns `null` for cells of the minority type; a null `key` cell is
//! reported as [`Error::MissingField`].

use super::{SheetTransport, SheetUrl};
use crate::error::{Error, Result};
use crate::snapshot::Row;
use crate::value::ConfigValue;
use serde::Deserialize;
use std::time::Duration;

/// Default tab read from the sheet.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const KEY_COLUMN: &str = "key";
const VALUE_COLUMN: &str = "value";

/// Sheet transport built on `reqwest`.
///
/// # Example
///
/// ```no_run
/// use fig_kit::source::HttpSheetTransport;
/// use std::time::Duration;
///
/// # fn main() -> fig_kit::Result<()> {
/// let transport = HttpSheetTransport::builder()
///     .sheet_name("Config")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpSheetTransport {
    client: reqwest::Client,
    sheet_name: String,
}

impl HttpSheetTransport {
    /// Transport for `Sheet1` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HttpSheetTransportBuilder {
        HttpSheetTransportBuilder::default()
    }

    /// Query endpoint for a normalized sheet URL.
    fn query_url(&self, url: &SheetUrl) -> String {
        let base = url.as_str();
        let separator = if base.ends_with('/') { "" } else { "/" };
        format!("{}{}gviz/tq", base, separator)
    }
}

impl SheetTransport for HttpSheetTransport {
    async fn fetch_rows(&self, url: &SheetUrl) -> Result<Vec<Row>> {
        let endpoint = self.query_url(url);
        debug!("» Fetching sheet '{}' from {}", self.sheet_name, endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("tqx", "out:json"),
                ("headers", "1"),
                ("sheet", self.sheet_name.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::SourceUnreachable {
                source: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_query_response(&body)
    }
}

/// Builder for [`HttpSheetTransport`].
#[derive(Clone, Debug)]
pub struct HttpSheetTransportBuilder {
    sheet_name: String,
    timeout: Duration,
}

impl Default for HttpSheetTransportBuilder {
    fn default() -> Self {
        HttpSheetTransportBuilder {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpSheetTransportBuilder {
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the HTTP client cannot be built.
    pub fn build(self) -> Result<HttpSheetTransport> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpSheetTransport {
            client,
            sheet_name: self.sheet_name,
        })
    }
}

// ============================================================================
// Response parsing
// ============================================================================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    status: String,
    #[serde(default)]
    errors: Vec<QueryMessage>,
    table: Option<QueryTable>,
}

#[derive(Debug, Deserialize)]
struct QueryMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "detailedMessage")]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryTable {
    cols: Vec<QueryColumn>,
    #[serde(default)]
    rows: Vec<QueryRow>,
}

#[derive(Debug, Deserialize)]
struct QueryColumn {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    c: Vec<Option<QueryCell>>,
}

#[derive(Debug, Deserialize)]
struct QueryCell {
    #[serde(default)]
    v: serde_json::Value,
}

/// Parse a visualization query response body into rows.
///
/// # Errors
///
/// - `Error::DeserializationError`: body is not a query response, or lacks `key`/`value` columns
/// - `Error::SourceUnreachable`: the endpoint reported an error status
/// - `Error::MissingField`: a row has no `key` cell
pub fn parse_query_response(body: &str) -> Result<Vec<Row>> {
    let json = unwrap_callback(body).ok_or_else(|| {
        Error::DeserializationError("response is not a visualization query payload".to_string())
    })?;
    let response: QueryResponse = serde_json::from_str(json)?;

    if response.status == "error" {
        let reason = response
            .errors
            .iter()
            .filter_map(|m| m.detailed_message.as_ref().or(m.message.as_ref()))
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");
        return Err(Error::SourceUnreachable {
            source: "sheet query".to_string(),
            reason,
        });
    }

    let table = response
        .table
        .ok_or_else(|| Error::DeserializationError("query response has no table".to_string()))?;

    let key_index = column_index(&table, KEY_COLUMN)?;
    let value_index = column_index(&table, VALUE_COLUMN)?;

    table
        .rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let key = cell_value(&row, key_index)
                .as_text()
                .ok_or_else(|| Error::MissingField {
                    field: KEY_COLUMN.to_string(),
                    index,
                })?;
            Ok(Row::new(key, cell_value(&row, value_index)))
        })
        .collect()
}

/// Strip the `setResponse(...)` wrapper; plain JSON passes through.
fn unwrap_callback(body: &str) -> Option<&str> {
    let body = body.trim();
    if body.starts_with('{') {
        return Some(body);
    }
    let start = body.find('(')?;
    let end = body.rfind(')')?;
    (start < end).then(|| &body[start + 1..end])
}

fn column_index(table: &QueryTable, label: &str) -> Result<usize> {
    table
        .cols
        .iter()
        .position(|c| c.label.trim().eq_ignore_ascii_case(label))
        .ok_or_else(|| {
            Error::DeserializationError(format!("sheet has no '{}' column header", label))
        })
}

fn cell_value(row: &QueryRow, index: usize) -> ConfigValue {
    row.c
        .get(index)
        .and_then(Option::as_ref)
        .map(|cell| ConfigValue::from_json(cell.v.clone()))
        .unwrap_or(ConfigValue::Null)
}

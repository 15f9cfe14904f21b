//! Error types for configuration loading and export.
//!
//! Only the lifecycle operations (`load`, `load_from`, `export_snapshot`) surface these
//! errors. Typed accessors never fail; they degrade to the caller's default.

use std::fmt;

/// Result type for fig-kit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Guidance shown when a sheet column mixes value types.
pub(crate) const SCHEMA_CONFLICT_HINT: &str =
    "You can't use multiple data types. Use `=TO_TEXT()` to convert non-string values in your sheet";

/// Error types for configuration loading.
#[derive(Debug, Clone)]
pub enum Error {
    /// A source could not be reached (DNS, connection refused, TLS, timeout, missing file).
    ///
    /// **Recovery:** The loader advances to the next fallback. The same source is never
    /// retried automatically.
    SourceUnreachable {
        /// Human readable locator of the source that failed
        source: String,
        /// Underlying failure message
        reason: String,
    },

    /// The remote source answered with a non-2xx status.
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// A row returned by the transport is missing a required column value.
    ///
    /// Transports report this raw shape; the loader reinterprets a missing `key`
    /// as [`Error::SchemaConflict`].
    MissingField {
        /// Name of the missing column
        field: String,
        /// Zero-based row index
        index: usize,
    },

    /// The sheet mixed incompatible value types in one column.
    ///
    /// **Recovery:** Ask the sheet operator to force a uniform text type.
    SchemaConflict(String),

    /// The primary source and every configured fallback failed.
    ///
    /// The previously loaded snapshot (if any) is left untouched.
    FallbackExhausted {
        /// Why the primary source failed
        primary: Box<Error>,
        /// Each attempted fallback and why it failed, in chain order
        fallbacks: Vec<(String, Error)>,
    },

    /// Export requested before any successful load.
    ExportWithoutLoad,

    /// Invalid or missing configuration.
    ///
    /// **Recovery:** Fix configuration and retry.
    ConfigError(String),

    /// Snapshot could not be encoded.
    SerializationError(String),

    /// Snapshot bytes could not be decoded.
    DeserializationError(String),

    /// Binary snapshot with a bad magic header.
    InvalidSnapshot(String),

    /// Binary snapshot written by an incompatible schema version.
    VersionMismatch {
        /// Expected schema version (from compiled code)
        expected: u32,
        /// Found schema version (from the snapshot file)
        found: u32,
    },

    /// Local file system failure while reading or writing a snapshot file.
    Io(String),
}

impl Error {
    /// Whether this error, or the primary cause of an aggregate, is a schema conflict.
    pub fn is_schema_conflict(&self) -> bool {
        match self {
            Error::SchemaConflict(_) => true,
            Error::FallbackExhausted { primary, .. } => primary.is_schema_conflict(),
            _ => false,
        }
    }

    /// Reinterpret the transport-level "missing key" shape as a schema conflict.
    pub(crate) fn into_client_facing(self) -> Error {
        match self {
            Error::MissingField { ref field, .. } if field == "key" => {
                Error::SchemaConflict(SCHEMA_CONFLICT_HINT.to_string())
            }
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SourceUnreachable { source, reason } => {
                write!(f, "Source unreachable ({}): {}", source, reason)
            }
            Error::HttpStatus { url, status } => {
                write!(f, "HTTP {} returned by {}", status, url)
            }
            Error::MissingField { field, index } => {
                write!(f, "Required value '{}' missing at $[{}]", field, index)
            }
            Error::SchemaConflict(msg) => write!(f, "Schema conflict: {}", msg),
            Error::FallbackExhausted { primary, fallbacks } => {
                write!(f, "Failed to load from all sources. Primary error: {}", primary)?;
                for (source, error) in fallbacks {
                    write!(f, "; fallback {} error: {}", source, error)?;
                }
                Ok(())
            }
            Error::ExportWithoutLoad => {
                write!(f, "Configuration not loaded. Call load() first.")
            }
            Error::ConfigError(msg) => write!(f, "Config error: {}", msg),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Error::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            Error::InvalidSnapshot(msg) => write!(f, "Invalid snapshot: {}", msg),
            Error::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Io(e.to_string())
        } else if e.is_syntax() || e.is_eof() || e.is_data() {
            Error::DeserializationError(e.to_string())
        } else {
            Error::SerializationError(e.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

#[cfg(feature = "sheets")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let source = e
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "sheet".to_string());
        match e.status() {
            Some(status) => Error::HttpStatus {
                url: source,
                status: status.as_u16(),
            },
            None => Error::SourceUnreachable {
                source,
                reason: e.to_string(),
            },
        }
    }
}

//! Snapshot export formats.
//!
//! A snapshot exported by [`Fig::export_snapshot`](crate::Fig::export_snapshot) is meant
//! to be read back as a fallback source, so the export format and the fallback format
//! are the same. Two encodings are supported:
//!
//! - **JSON** (default): a flat object of key → value. Human editable and identical to
//!   hand-written fallback files:
//!
//!   ```json
//!   { "app_name": "Fallback App", "version_code": 123 }
//!   ```
//!
//! - **Binary**: a Postcard payload wrapped in a versioned envelope:
//!
//!   ```text
//!   ┌─────────────────┬─────────────────┬──────────────────────────┐
//!   │  MAGIC (4 bytes)│VERSION (varint) │POSTCARD PAYLOAD (N bytes)│
//!   └─────────────────┴─────────────────┴──────────────────────────┘
//!     "FIGS"              u32                postcard(Snapshot)
//!   ```
//!
//! [`decode_snapshot`] sniffs the magic header, so either encoding can be used as a
//! fallback file.
//!
//! # Example
//!
//! ```rust
//! use fig_kit::serialization::{decode_snapshot, encode_snapshot, SnapshotFormat};
//! use fig_kit::snapshot::{Row, Snapshot};
//!
//! # fn main() -> fig_kit::Result<()> {
//! let snapshot = Snapshot::from_rows(vec![Row::new("app_name", "Fig")]);
//!
//! let bytes = encode_snapshot(&snapshot, SnapshotFormat::Binary)?;
//! assert_eq!(&bytes[0..4], b"FIGS");
//! assert_eq!(decode_snapshot(&bytes)?, snapshot);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::snapshot::Snapshot;
use crate::value::ConfigValue;
use serde::{Deserialize, Serialize};

/// Magic header for binary snapshots: b"FIGS"
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"FIGS";

/// Current binary schema version.
///
/// Increment when the shape of [`Snapshot`] or [`ConfigValue`] changes.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Encoding used when exporting a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotFormat {
    /// Pretty-printed JSON object.
    #[default]
    Json,
    /// Postcard payload in a versioned envelope.
    Binary,
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotFormat::Json => write!(f, "json"),
            SnapshotFormat::Binary => write!(f, "binary"),
        }
    }
}

/// Versioned envelope for binary snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SnapshotEnvelope<T> {
    /// Magic header: must be b"FIGS"
    pub magic: [u8; 4],
    /// Schema version: must match CURRENT_SCHEMA_VERSION
    pub version: u32,
    pub payload: T,
}

impl<T> SnapshotEnvelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: CURRENT_SCHEMA_VERSION,
            payload,
        }
    }
}

/// Encode a snapshot.
///
/// # Errors
///
/// Returns `Error::SerializationError` if the snapshot holds a NaN or infinite
/// number and `format` is JSON, or if Postcard encoding fails.
pub fn encode_snapshot(snapshot: &Snapshot, format: SnapshotFormat) -> Result<Vec<u8>> {
    match format {
        SnapshotFormat::Json => encode_json(snapshot),
        SnapshotFormat::Binary => {
            let envelope = SnapshotEnvelope::new(snapshot);
            postcard::to_allocvec(&envelope).map_err(|e| {
                error!("Snapshot serialization failed: {}", e);
                Error::SerializationError(e.to_string())
            })
        }
    }
}

/// Decode a snapshot, detecting the encoding from the magic header.
///
/// # Errors
///
/// - `Error::VersionMismatch`: Binary snapshot from another schema version
/// - `Error::DeserializationError`: Corrupted payload, or JSON that is not an object
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    if bytes.starts_with(&SNAPSHOT_MAGIC) {
        decode_binary(bytes)
    } else {
        decode_json(bytes)
    }
}

fn encode_json(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let mut object = serde_json::Map::with_capacity(snapshot.len());
    for (key, value) in snapshot.iter() {
        let json = value.to_json().ok_or_else(|| {
            Error::SerializationError(format!(
                "value for '{}' is not representable in JSON: {}",
                key, value
            ))
        })?;
        object.insert(key.clone(), json);
    }
    Ok(serde_json::to_vec_pretty(&serde_json::Value::Object(object))?)
}

fn decode_json(bytes: &[u8]) -> Result<Snapshot> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;
    Ok(object
        .into_iter()
        .map(|(key, value)| (key, ConfigValue::from_json(value)))
        .collect())
}

fn decode_binary(bytes: &[u8]) -> Result<Snapshot> {
    let envelope: SnapshotEnvelope<Snapshot> = postcard::from_bytes(bytes).map_err(|e| {
        error!("Snapshot deserialization failed: {}", e);
        Error::DeserializationError(e.to_string())
    })?;

    if envelope.magic != SNAPSHOT_MAGIC {
        warn!(
            "Invalid snapshot: expected magic {:?}, got {:?}",
            SNAPSHOT_MAGIC, envelope.magic
        );
        return Err(Error::InvalidSnapshot(format!(
            "Invalid magic: expected {:?}, got {:?}",
            SNAPSHOT_MAGIC, envelope.magic
        )));
    }

    if envelope.version != CURRENT_SCHEMA_VERSION {
        warn!(
            "Snapshot version mismatch: expected {}, got {}",
            CURRENT_SCHEMA_VERSION, envelope.version
        );
        return Err(Error::VersionMismatch {
            expected: CURRENT_SCHEMA_VERSION,
            found: envelope.version,
        });
    }

    Ok(envelope.payload)
}

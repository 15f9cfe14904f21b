//! Local snapshot files used as fallbacks and export targets.

use crate::error::{Error, Result};
use crate::serialization::{decode_snapshot, encode_snapshot, SnapshotFormat};
use crate::snapshot::Snapshot;
use std::path::Path;

/// Read a snapshot file written by hand (JSON) or by an export (JSON or binary).
///
/// # Errors
///
/// - `Error::SourceUnreachable`: the file does not exist or cannot be read
/// - `Error::DeserializationError`: the contents do not parse; the message names the path
pub async fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        let reason = if e.kind() == std::io::ErrorKind::NotFound {
            format!("Local fallback file not found: {}", path.display())
        } else {
            e.to_string()
        };
        Error::SourceUnreachable {
            source: path.display().to_string(),
            reason,
        }
    })?;

    let snapshot = decode_snapshot(&bytes).map_err(|e| {
        Error::DeserializationError(format!(
            "Failed to parse local fallback file {}: {}",
            path.display(),
            e
        ))
    })?;

    info!(
        "✓ Loaded {} configuration values from local file: {}",
        snapshot.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Write a snapshot, creating parent directories as needed.
///
/// # Errors
///
/// Returns `Error::Io` if a directory or the file cannot be written, or
/// `Error::SerializationError` if the snapshot cannot be encoded in `format`.
pub async fn write_snapshot(path: &Path, snapshot: &Snapshot, format: SnapshotFormat) -> Result<()> {
    let bytes = encode_snapshot(snapshot, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    tokio::fs::write(path, bytes).await.map_err(|e| {
        Error::Io(format!(
            "Failed to export configuration to {}: {}",
            path.display(),
            e
        ))
    })?;

    info!(
        "✓ Exported {} configuration values to {} ({})",
        snapshot.len(),
        path.display(),
        format
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Row;
    use crate::value::ConfigValue;

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let err = read_snapshot(Path::new("/non/existent/path/config.json"))
            .await
            .unwrap_err();

        match err {
            Error::SourceUnreachable { reason, .. } => {
                assert!(reason.contains("/non/existent/path/config.json"));
            }
            other => panic!("Expected SourceUnreachable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let err = read_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, Error::DeserializationError(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/config.json");
        let snapshot = Snapshot::from_rows(vec![Row::new("count", 789i64)]);

        write_snapshot(&path, &snapshot, SnapshotFormat::Json)
            .await
            .unwrap();

        let read = read_snapshot(&path).await.unwrap();
        assert_eq!(read.get("count"), Some(&ConfigValue::Number(789.0)));
    }
}

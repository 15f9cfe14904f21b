//! Immutable configuration snapshots.

use crate::value::ConfigValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row returned by a sheet transport.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub key: String,
    pub value: ConfigValue,
}

impl Row {
    pub fn new(key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        Row {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An immutable copy of every loaded key/value pair.
///
/// Snapshots are never mutated once built; a reload produces a new one which replaces
/// the old wholesale in the [`CacheStore`](crate::store::CacheStore).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    entries: BTreeMap<String, ConfigValue>,
}

impl Snapshot {
    /// Build from rows in source order. Later rows win on duplicate keys.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let mut entries = BTreeMap::new();
        for row in rows {
            entries.insert(row.key, row.value);
        }
        Snapshot { entries }
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.entries.iter()
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &BTreeMap<String, ConfigValue> {
        &self.entries
    }
}

impl From<BTreeMap<String, ConfigValue>> for Snapshot {
    fn from(entries: BTreeMap<String, ConfigValue>) -> Self {
        Snapshot { entries }
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Snapshot::from_rows(iter.into_iter().map(|(k, v)| Row::new(k, v)))
    }
}

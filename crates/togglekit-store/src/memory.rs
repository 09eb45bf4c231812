// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory option store for tests and ephemeral hosts.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use togglekit_core::OptionStore;

/// A volatile [`OptionStore`] backed by a plain map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-seeded with key/value pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OptionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_and_get_round_trip() {
        let store = MemoryStore::new();
        assert!(store.set("feature_core_enabled", json!(true)));
        assert_eq!(store.get("feature_core_enabled"), Some(json!(true)));
    }

    #[test]
    fn missing_key_reads_as_none_and_default() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        assert!(!store.get_bool("missing", false));
        assert!(store.get_bool("missing", true));
    }

    #[test]
    fn from_pairs_seeds_entries() {
        let store = MemoryStore::from_pairs([("feature_core_enabled", json!(true))]);
        assert_eq!(store.len(), 1);
        assert!(store.get_bool("feature_core_enabled", false));
    }

    #[test]
    fn overwrite_replaces_value() {
        let store = MemoryStore::new();
        store.set("k", json!(1));
        store.set("k", json!(2));
        assert_eq!(store.get("k"), Some(json!(2)));
    }
}

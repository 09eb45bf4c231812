// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Option store wrapper that counts reads and writes per key.
//!
//! Used to verify the registry's memoization contract: `is_enabled` must
//! hit the store at most once per id between mutations.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use togglekit_core::OptionStore;
use togglekit_store::MemoryStore;

/// A [`MemoryStore`] that records how often each key is read and written.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    reads: Mutex<HashMap<String, usize>>,
    writes: Mutex<HashMap<String, usize>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a counting store pre-seeded with key/value pairs.
    ///
    /// Seeding does not count as writes.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            inner: MemoryStore::from_pairs(pairs),
            ..Self::default()
        }
    }

    /// How many times `key` has been read.
    pub fn reads_for(&self, key: &str) -> usize {
        self.reads
            .lock()
            .map(|m| m.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// How many times `key` has been written.
    pub fn writes_for(&self, key: &str) -> usize {
        self.writes
            .lock()
            .map(|m| m.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Total reads across all keys.
    pub fn total_reads(&self) -> usize {
        self.reads
            .lock()
            .map(|m| m.values().sum())
            .unwrap_or(0)
    }

    /// Reset all counters without touching stored values.
    pub fn reset_counters(&self) {
        if let Ok(mut reads) = self.reads.lock() {
            reads.clear();
        }
        if let Ok(mut writes) = self.writes.lock() {
            writes.clear();
        }
    }
}

impl OptionStore for CountingStore {
    fn get(&self, key: &str) -> Option<Value> {
        if let Ok(mut reads) = self.reads.lock() {
            *reads.entry(key.to_string()).or_insert(0) += 1;
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> bool {
        if let Ok(mut writes) = self.writes.lock() {
            *writes.entry(key.to_string()).or_insert(0) += 1;
        }
        self.inner.set(key, value)
    }
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Option store trait for durable key/value persistence.

use serde_json::Value;

use crate::types::truthy;

/// Durable key/value persistence for feature flags and settings.
///
/// The store is treated as a black box: it serializes its own writes and
/// reports success as a boolean. Values are structured JSON so flags and
/// per-feature settings objects share one interface.
pub trait OptionStore: Send + Sync {
    /// Read a value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value, returning whether the write was persisted.
    fn set(&self, key: &str, value: Value) -> bool;

    /// Read a boolean flag with loose coercion and a fallback default.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Null) | None => default,
            Some(value) => truthy(&value),
        }
    }

    /// Write a boolean flag.
    fn set_bool(&self, key: &str, value: bool) -> bool {
        self.set(key, Value::Bool(value))
    }
}

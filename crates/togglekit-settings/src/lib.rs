// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings facade for togglekit.
//!
//! Sits between a presentation layer and the registry: builds the
//! render-ready schema, sanitizes raw submissions, and applies bulk
//! actions with anti-forgery checks.

pub mod bulk;
pub mod sanitize;
pub mod schema;

use serde_json::Value;
use togglekit_core::{settings_key, FeatureId, OptionStore, SettingsMap};

pub use bulk::{handle_bulk_action, BulkAction, NonceVerifier, StaticNonce};
pub use sanitize::{apply, sanitize, SanitizeOutcome, ValidationError};
pub use schema::{build_schema, DependencyStatus, FeatureSection};

/// Read a feature's persisted settings object, if one exists and is an
/// object. Anything else stored under the key is treated as absent.
pub fn stored_settings(store: &dyn OptionStore, id: &FeatureId) -> Option<SettingsMap> {
    match store.get(&settings_key(id)) {
        Some(Value::Object(map)) => Some(map.into_iter().collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use togglekit_store::MemoryStore;

    #[test]
    fn stored_settings_requires_an_object() {
        let store = MemoryStore::new();
        let id = FeatureId::from("banner");
        assert!(stored_settings(&store, &id).is_none());

        store.set(&settings_key(&id), json!("not an object"));
        assert!(stored_settings(&store, &id).is_none());

        store.set(&settings_key(&id), json!({ "message": "hi" }));
        let settings = stored_settings(&store, &id).unwrap();
        assert_eq!(settings["message"], json!("hi"));
    }
}

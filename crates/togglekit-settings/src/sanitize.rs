// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sanitization of submitted settings input.
//!
//! Raw submissions arrive as one flat map of option keys to untyped
//! values. Sanitization never fails: recognized keys are coerced to
//! storable values, unrecognized keys are dropped silently, and only an
//! enable attempt with unmet dependencies records an error. The caller
//! decides what to do with the outcome.

use std::collections::BTreeMap;

use serde_json::Value;
use togglekit_core::{parse_enabled_key, settings_key, truthy, FeatureId, OptionStore};
use togglekit_registry::FeatureRegistry;
use tracing::debug;

/// A submitted key that could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

/// Result of sanitizing one submission.
#[derive(Debug, Default)]
pub struct SanitizeOutcome {
    /// Desired enabled state per feature, from submitted toggle keys.
    pub toggles: BTreeMap<FeatureId, bool>,
    /// Validated settings per feature, from submitted settings keys.
    pub settings: BTreeMap<FeatureId, togglekit_core::SettingsMap>,
    pub errors: Vec<ValidationError>,
}

impl SanitizeOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Sanitize a raw submission against the registered features.
///
/// Toggle keys (`feature_<id>_enabled`) are coerced through loose
/// truthiness, matching how checkbox submissions arrive; an attempt to
/// enable a feature whose dependencies are unmet is dropped with a
/// recorded error. Settings keys (`feature_<id>_settings`) are passed
/// through the owning feature's own validator. A bare setting id is
/// matched against every feature's schema and the owning validator's
/// value for that id is adopted. Keys matching nothing are dropped
/// silently.
pub fn sanitize(registry: &FeatureRegistry, raw: &BTreeMap<String, Value>) -> SanitizeOutcome {
    let mut outcome = SanitizeOutcome::default();

    for (key, value) in raw {
        if let Some(id) = parse_enabled_key(key) {
            if registry.get(&id).is_none() {
                debug!(key, "dropping toggle for unregistered feature");
                continue;
            }
            let desired = truthy(value);
            if desired && !registry.can_enable(&id) {
                outcome.errors.push(ValidationError {
                    key: key.clone(),
                    message: format!("\"{id}\" cannot be enabled: dependencies unmet"),
                });
            } else {
                outcome.toggles.insert(id, desired);
            }
            continue;
        }

        if let Some(feature) = registry
            .list()
            .iter()
            .find(|f| settings_key(f.id()) == *key)
        {
            let validated = feature.validate_settings(value.clone());
            debug!(id = %feature.id(), fields = validated.len(), "settings validated");
            outcome.settings.insert(feature.id().clone(), validated);
            continue;
        }

        // Bare setting id: the first feature whose schema declares the id
        // validates a single-entry submission and its value is adopted.
        match registry
            .list()
            .iter()
            .find(|f| f.settings().iter().any(|field| field.id == *key))
        {
            Some(feature) => {
                let single = Value::Object(
                    std::iter::once((key.clone(), value.clone())).collect(),
                );
                let validated = feature.validate_settings(single);
                if let Some(adopted) = validated.get(key) {
                    debug!(id = %feature.id(), key, "setting validated");
                    outcome
                        .settings
                        .entry(feature.id().clone())
                        .or_default()
                        .insert(key.clone(), adopted.clone());
                }
            }
            None => debug!(key, "dropping unrecognized option key"),
        }
    }

    outcome
}

/// Persist a sanitized submission.
///
/// Toggles go through the registry so refusal and cascade semantics hold;
/// the per-feature toggle results are returned. Validated settings are
/// written as structured objects under the feature's settings key.
pub fn apply(
    registry: &mut FeatureRegistry,
    outcome: &SanitizeOutcome,
) -> BTreeMap<FeatureId, bool> {
    let results = registry.bulk_update(&outcome.toggles);
    for (id, settings) in &outcome.settings {
        let value = Value::Object(settings.clone().into_iter().collect());
        registry.store().set(&settings_key(id), value);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use serde_json::json;
    use togglekit_core::{FieldKind, OptionStore, SettingField};
    use togglekit_registry::RegistryBuilder;
    use togglekit_store::MemoryStore;
    use togglekit_test_utils::StubFeature;

    fn registry() -> FeatureRegistry {
        RegistryBuilder::new()
            .store(Arc::new(MemoryStore::new()))
            .register(Arc::new(StubFeature::new("core")))
            .register(Arc::new(
                StubFeature::new("banner")
                    .depends_on("core")
                    .with_field(SettingField {
                        id: "message".into(),
                        label: "Message".into(),
                        description: None,
                        kind: FieldKind::Text {
                            default: "hi".into(),
                        },
                    })
                    .with_validator(|input| match input {
                        Value::Object(map) => map
                            .into_iter()
                            .filter(|(k, _)| k == "message")
                            .map(|(k, v)| (k, FieldKind::Text { default: "hi".into() }.coerce(&v)))
                            .collect(),
                        _ => Default::default(),
                    }),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn toggle_keys_use_loose_truthiness() {
        let registry = registry();
        let raw = BTreeMap::from([
            ("feature_core_enabled".to_string(), json!("1")),
            ("feature_banner_enabled".to_string(), json!("")),
        ]);

        let outcome = sanitize(&registry, &raw);
        assert!(outcome.is_clean());
        assert_eq!(outcome.toggles[&FeatureId::from("core")], true);
        assert_eq!(outcome.toggles[&FeatureId::from("banner")], false);
    }

    #[test]
    fn settings_keys_route_to_the_owning_validator() {
        let registry = registry();
        let raw = BTreeMap::from([(
            "feature_banner_settings".to_string(),
            json!({ "message": "maintenance", "stray": true }),
        )]);

        let outcome = sanitize(&registry, &raw);
        let banner = &outcome.settings[&FeatureId::from("banner")];
        assert_eq!(banner["message"], json!("maintenance"));
        assert!(!banner.contains_key("stray"));
    }

    #[test]
    fn bare_setting_id_routes_to_owning_validator() {
        let registry = registry();
        let raw = BTreeMap::from([("message".to_string(), json!("maintenance"))]);

        let outcome = sanitize(&registry, &raw);
        assert!(outcome.is_clean());
        let banner = &outcome.settings[&FeatureId::from("banner")];
        assert_eq!(banner["message"], json!("maintenance"));
    }

    #[test]
    fn bare_setting_id_is_coerced_by_the_schema() {
        let registry = registry();
        let raw = BTreeMap::from([("message".to_string(), json!(42))]);

        let outcome = sanitize(&registry, &raw);
        let banner = &outcome.settings[&FeatureId::from("banner")];
        assert_eq!(banner["message"], json!("42"));
    }

    #[test]
    fn bare_setting_id_merges_with_a_settings_object() {
        let registry = registry();
        let raw = BTreeMap::from([
            (
                "feature_banner_settings".to_string(),
                json!({ "message": "from object" }),
            ),
            ("message".to_string(), json!("from bare key")),
        ]);

        let outcome = sanitize(&registry, &raw);
        // BTreeMap order: the object key sorts before the bare id, so the
        // bare-key adoption lands last.
        let banner = &outcome.settings[&FeatureId::from("banner")];
        assert_eq!(banner["message"], json!("from bare key"));
    }

    #[test]
    fn unknown_keys_are_dropped_silently() {
        let registry = registry();
        let raw = BTreeMap::from([
            ("feature_ghost_enabled".to_string(), json!(true)),
            ("totally_unrelated".to_string(), json!(1)),
            ("feature_core_enabled".to_string(), json!(true)),
        ]);

        let outcome = sanitize(&registry, &raw);
        assert!(outcome.is_clean());
        assert_eq!(outcome.toggles.len(), 1);
        assert!(outcome.toggles.contains_key(&FeatureId::from("core")));
    }

    #[test]
    fn enabling_with_unmet_dependencies_is_an_error() {
        let mut registry = registry();
        // banner depends on core, which is disabled.
        let raw = BTreeMap::from([("feature_banner_enabled".to_string(), json!(true))]);
        let outcome = sanitize(&registry, &raw);

        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.contains("dependencies unmet"));
        assert!(outcome.toggles.is_empty());

        let results = apply(&mut registry, &outcome);
        assert!(results.is_empty());
        assert!(!registry.is_enabled(&FeatureId::from("banner")));
    }

    #[test]
    fn disabling_is_never_refused_by_sanitize() {
        let registry = registry();
        let raw = BTreeMap::from([("feature_banner_enabled".to_string(), json!(""))]);
        let outcome = sanitize(&registry, &raw);
        assert!(outcome.is_clean());
        assert_eq!(outcome.toggles[&FeatureId::from("banner")], false);
    }

    #[test]
    fn apply_persists_validated_settings() {
        let mut registry = registry();
        let raw = BTreeMap::from([(
            "feature_banner_settings".to_string(),
            json!({ "message": "back soon" }),
        )]);
        let outcome = sanitize(&registry, &raw);
        apply(&mut registry, &outcome);

        let stored = registry.store().get("feature_banner_settings").unwrap();
        assert_eq!(stored["message"], json!("back soon"));
    }
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render-ready description of the settings surface.
//!
//! A schema is a snapshot: one section per registered feature, in
//! discovery order, carrying everything a view needs to draw the toggle,
//! the dependency status lines, and the settings fields.

use serde::Serialize;
use togglekit_core::{enabled_key, FeatureId, SettingField, SettingsMap};
use togglekit_registry::FeatureRegistry;

/// Status line for one declared dependency of a feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyStatus {
    pub id: FeatureId,
    /// Display name when the dependency is registered, the raw id otherwise.
    pub name: String,
    pub enabled: bool,
    /// False when the id is not registered at all.
    pub registered: bool,
}

/// One feature's slice of the settings surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSection {
    pub feature: FeatureId,
    pub title: String,
    pub description: String,
    pub enabled: bool,
    /// Whether the toggle may be switched on right now.
    pub can_enable: bool,
    pub dependencies: Vec<DependencyStatus>,
    /// The option-store key the toggle submits under.
    pub toggle_key: String,
    pub fields: Vec<SettingField>,
    /// Current settings values, defaults filled in for missing keys.
    pub values: SettingsMap,
}

/// Build the settings schema for every registered feature, in
/// discovery order.
pub fn build_schema(registry: &FeatureRegistry) -> Vec<FeatureSection> {
    registry
        .list()
        .iter()
        .map(|feature| {
            let id = feature.id().clone();
            let dependencies = feature
                .dependencies()
                .iter()
                .map(|dep| match registry.get(dep) {
                    Some(target) => DependencyStatus {
                        id: dep.clone(),
                        name: target.name().to_string(),
                        enabled: registry.is_enabled(dep),
                        registered: true,
                    },
                    None => DependencyStatus {
                        id: dep.clone(),
                        name: dep.to_string(),
                        enabled: false,
                        registered: false,
                    },
                })
                .collect();

            let mut values = feature.settings_defaults();
            if let Some(stored) = crate::stored_settings(registry.store(), &id) {
                for (key, value) in stored {
                    if values.contains_key(&key) {
                        values.insert(key, value);
                    }
                }
            }

            FeatureSection {
                toggle_key: enabled_key(&id),
                title: feature.name().to_string(),
                description: feature.description().to_string(),
                enabled: registry.is_enabled(&id),
                can_enable: registry.can_enable(&id),
                dependencies,
                fields: feature.settings(),
                values,
                feature: id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use serde_json::json;
    use togglekit_core::{settings_key, FieldKind, OptionStore};
    use togglekit_registry::RegistryBuilder;
    use togglekit_store::MemoryStore;
    use togglekit_test_utils::StubFeature;

    fn text_field(id: &str, default: &str) -> SettingField {
        SettingField {
            id: id.into(),
            label: id.into(),
            description: None,
            kind: FieldKind::Text {
                default: default.into(),
            },
        }
    }

    #[test]
    fn sections_follow_discovery_order() {
        let registry = RegistryBuilder::new()
            .store(Arc::new(MemoryStore::new()))
            .register(Arc::new(StubFeature::new("zebra").named("Zebra")))
            .register(Arc::new(StubFeature::new("alpha").named("Alpha")))
            .build()
            .unwrap();

        let schema = build_schema(&registry);
        let titles: Vec<&str> = schema.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Zebra", "Alpha"]);
        assert_eq!(schema[0].toggle_key, "feature_zebra_enabled");
    }

    #[test]
    fn dependency_status_reflects_registry_state() {
        let mut registry = RegistryBuilder::new()
            .store(Arc::new(MemoryStore::new()))
            .register(Arc::new(StubFeature::new("core").named("Core")))
            .register(Arc::new(
                StubFeature::new("email").depends_on("core").depends_on("ghost"),
            ))
            .build()
            .unwrap();
        registry.enable(&FeatureId::from("core"));

        let schema = build_schema(&registry);
        let email = &schema[1];
        assert!(!email.can_enable, "ghost dependency is unmet");
        assert_eq!(email.dependencies.len(), 2);

        let core = &email.dependencies[0];
        assert_eq!(core.name, "Core");
        assert!(core.enabled && core.registered);

        let ghost = &email.dependencies[1];
        assert_eq!(ghost.name, "ghost");
        assert!(!ghost.enabled && !ghost.registered);
    }

    #[test]
    fn values_merge_stored_settings_over_defaults() {
        let store = Arc::new(MemoryStore::new());
        store.set(
            &settings_key(&FeatureId::from("banner")),
            json!({ "message": "custom", "stray": "dropped" }),
        );

        let registry = RegistryBuilder::new()
            .store(store)
            .register(Arc::new(
                StubFeature::new("banner")
                    .with_field(text_field("message", "hello"))
                    .with_field(text_field("footer", "bye")),
            ))
            .build()
            .unwrap();

        let schema = build_schema(&registry);
        assert_eq!(schema[0].values["message"], json!("custom"));
        assert_eq!(schema[0].values["footer"], json!("bye"));
        assert!(!schema[0].values.contains_key("stray"));
    }
}

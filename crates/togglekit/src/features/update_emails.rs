// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update email manager feature.
//!
//! Controls which automatic-update notification emails the host system
//! sends. Each category is an independent suppression checkbox; the
//! validator accepts exactly the known checkbox ids and coerces
//! everything to booleans, so stray submission keys never reach storage.

use serde_json::Value;
use togglekit_core::{
    truthy, Feature, FeatureContext, FeatureId, FieldKind, SettingField, SettingsMap,
    TogglekitError,
};
use tracing::info;

/// Suppression checkbox ids, one per email category.
const CHECKBOXES: &[(&str, &str)] = &[
    ("disable_core_success_emails", "Disable core update success emails"),
    ("disable_core_failure_emails", "Disable core update failure emails"),
    ("disable_core_critical_emails", "Disable core critical update emails"),
    ("disable_plugin_success_emails", "Disable plugin update success emails"),
    ("disable_plugin_failure_emails", "Disable plugin update failure emails"),
    ("disable_plugin_mixed_emails", "Disable plugin mixed-result emails"),
    ("disable_theme_success_emails", "Disable theme update success emails"),
    ("disable_theme_failure_emails", "Disable theme update failure emails"),
    ("disable_theme_mixed_emails", "Disable theme mixed-result emails"),
];

/// Feature module suppressing selected auto-update notification emails.
#[derive(Debug)]
pub struct UpdateEmailManager {
    id: FeatureId,
}

impl UpdateEmailManager {
    pub fn new() -> Self {
        Self {
            id: FeatureId::from("update_emails"),
        }
    }
}

impl Default for UpdateEmailManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Feature for UpdateEmailManager {
    fn id(&self) -> &FeatureId {
        &self.id
    }

    fn name(&self) -> &str {
        "Update Email Manager"
    }

    fn description(&self) -> &str {
        "Controls which automatic update notification emails are sent"
    }

    fn settings(&self) -> Vec<SettingField> {
        CHECKBOXES
            .iter()
            .map(|&(id, label)| SettingField {
                id: id.to_string(),
                label: label.to_string(),
                description: None,
                kind: FieldKind::Checkbox { default: false },
            })
            .collect()
    }

    /// Allowlist validation: only the known checkbox ids survive, each
    /// coerced to a boolean. Absent keys become unchecked.
    fn validate_settings(&self, input: Value) -> SettingsMap {
        let input = match input {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        CHECKBOXES
            .iter()
            .map(|&(id, _)| {
                let checked = input.get(id).map(truthy).unwrap_or(false);
                (id.to_string(), Value::Bool(checked))
            })
            .collect()
    }

    fn init(&self, _ctx: &FeatureContext<'_>) -> Result<(), TogglekitError> {
        info!(id = %self.id, "update email suppression active");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_covers_all_categories() {
        let feature = UpdateEmailManager::new();
        let fields = feature.settings();
        assert_eq!(fields.len(), 9);
        assert!(fields
            .iter()
            .all(|f| matches!(f.kind, FieldKind::Checkbox { default: false })));
    }

    #[test]
    fn validator_drops_unknown_keys() {
        let feature = UpdateEmailManager::new();
        let out = feature.validate_settings(json!({
            "disable_core_success_emails": "1",
            "not_a_real_checkbox": true,
        }));
        assert_eq!(out["disable_core_success_emails"], json!(true));
        assert!(!out.contains_key("not_a_real_checkbox"));
    }

    #[test]
    fn absent_keys_become_unchecked() {
        let feature = UpdateEmailManager::new();
        let out = feature.validate_settings(json!({}));
        assert_eq!(out.len(), 9);
        assert!(out.values().all(|v| v == &json!(false)));
    }

    #[test]
    fn validating_defaults_returns_them_unchanged() {
        let feature = UpdateEmailManager::new();
        let defaults = feature.settings_defaults();
        let as_value = Value::Object(defaults.clone().into_iter().collect());
        assert_eq!(feature.validate_settings(as_value), defaults);
    }

    #[test]
    fn non_object_input_yields_all_unchecked() {
        let feature = UpdateEmailManager::new();
        let out = feature.validate_settings(json!("garbage"));
        assert_eq!(out.len(), 9);
        assert!(out.values().all(|v| v == &json!(false)));
    }
}

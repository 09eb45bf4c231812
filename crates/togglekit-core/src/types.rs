// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the togglekit framework.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unique identifier for a feature module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub String);

impl FeatureId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Validated settings keyed by setting id.
pub type SettingsMap = BTreeMap<String, Value>;

const ENABLED_PREFIX: &str = "feature_";
const ENABLED_SUFFIX: &str = "_enabled";
const SETTINGS_SUFFIX: &str = "_settings";

/// Option-store key holding a feature's persisted enabled flag.
pub fn enabled_key(id: &FeatureId) -> String {
    format!("{ENABLED_PREFIX}{id}{ENABLED_SUFFIX}")
}

/// Option-store key holding a feature's structured settings value.
pub fn settings_key(id: &FeatureId) -> String {
    format!("{ENABLED_PREFIX}{id}{SETTINGS_SUFFIX}")
}

/// Extract the feature id from an enabled-flag key, if the key matches.
pub fn parse_enabled_key(key: &str) -> Option<FeatureId> {
    let inner = key
        .strip_prefix(ENABLED_PREFIX)?
        .strip_suffix(ENABLED_SUFFIX)?;
    if inner.is_empty() {
        return None;
    }
    Some(FeatureId(inner.to_string()))
}

/// Loose boolean coercion for submitted option values.
///
/// Unchecked checkboxes arrive as absent keys or empty strings; checked ones
/// as `true`, `1`, or `"1"`. Numbers are truthy when nonzero, strings when
/// non-empty and neither `"0"` nor `"false"`, arrays and objects when
/// non-empty.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && s != "false",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One selectable choice for a [`FieldKind::Select`] field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The kind of a settings field, with a strongly-typed payload per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    /// A boolean toggle.
    Checkbox {
        #[serde(default)]
        default: bool,
    },
    /// A single-line text input.
    Text {
        #[serde(default)]
        default: String,
    },
    /// A multi-line text input.
    Textarea {
        #[serde(default)]
        default: String,
    },
    /// A fixed list of choices.
    Select {
        options: Vec<SelectOption>,
        #[serde(default)]
        default: String,
    },
}

impl FieldKind {
    /// The field's default as a JSON value, for settings-map seeding.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Checkbox { default } => Value::Bool(*default),
            Self::Text { default } | Self::Textarea { default } => {
                Value::String(default.clone())
            }
            Self::Select { default, .. } => Value::String(default.clone()),
        }
    }

    /// Coerce a submitted value into this field's type.
    ///
    /// Checkbox input goes through [`truthy`]; text input is stringified;
    /// select input must match a declared option or falls back to the
    /// default. Malformed input never fails, it degrades to the default.
    pub fn coerce(&self, value: &Value) -> Value {
        match self {
            Self::Checkbox { .. } => Value::Bool(truthy(value)),
            Self::Text { default } | Self::Textarea { default } => match value {
                Value::String(s) => Value::String(s.clone()),
                Value::Number(n) => Value::String(n.to_string()),
                Value::Bool(b) => Value::String(b.to_string()),
                _ => Value::String(default.clone()),
            },
            Self::Select { options, default } => {
                let submitted = value.as_str().unwrap_or_default();
                if options.iter().any(|o| o.value == submitted) {
                    Value::String(submitted.to_string())
                } else {
                    Value::String(default.clone())
                }
            }
        }
    }
}

/// A single field in a feature's settings schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingField {
    /// Unique setting id within the feature's schema.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Optional help text shown below the field.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enabled_key_round_trip() {
        let id = FeatureId::from("email_manager");
        let key = enabled_key(&id);
        assert_eq!(key, "feature_email_manager_enabled");
        assert_eq!(parse_enabled_key(&key), Some(id));
    }

    #[test]
    fn parse_enabled_key_rejects_other_keys() {
        assert_eq!(parse_enabled_key("feature_email_settings"), None);
        assert_eq!(parse_enabled_key("unrelated"), None);
        assert_eq!(parse_enabled_key("feature__enabled"), None);
    }

    #[test]
    fn settings_key_embeds_id() {
        assert_eq!(
            settings_key(&FeatureId::from("core")),
            "feature_core_settings"
        );
    }

    #[test]
    fn truthy_coercion() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("1")));
        assert!(truthy(&json!("yes")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!("false")));
        assert!(!truthy(&Value::Null));
    }

    #[test]
    fn field_kind_tagged_serialization() {
        let field = SettingField {
            id: "digest".into(),
            label: "Digest mode".into(),
            description: None,
            kind: FieldKind::Checkbox { default: true },
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "checkbox");
        assert_eq!(json["default"], true);

        let back: SettingField = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn select_coerce_rejects_unknown_option() {
        let kind = FieldKind::Select {
            options: vec![
                SelectOption {
                    value: "daily".into(),
                    label: "Daily".into(),
                },
                SelectOption {
                    value: "weekly".into(),
                    label: "Weekly".into(),
                },
            ],
            default: "daily".into(),
        };
        assert_eq!(kind.coerce(&json!("weekly")), json!("weekly"));
        assert_eq!(kind.coerce(&json!("hourly")), json!("daily"));
        assert_eq!(kind.coerce(&json!(42)), json!("daily"));
    }

    #[test]
    fn checkbox_coerce_uses_truthiness() {
        let kind = FieldKind::Checkbox { default: false };
        assert_eq!(kind.coerce(&json!("1")), json!(true));
        assert_eq!(kind.coerce(&json!("")), json!(false));
    }
}

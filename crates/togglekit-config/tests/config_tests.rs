// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the togglekit configuration system.

use togglekit_config::diagnostic::{figment_to_config_errors, ConfigError};
use togglekit_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[app]
log_level = "debug"

[store]
path = "/var/lib/togglekit/options.json"

[features]
manifest_dir = "features.d"
bulk_token = "long-enough-token"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.store.path, "/var/lib/togglekit/options.json");
    assert_eq!(config.features.manifest_dir.as_deref(), Some("features.d"));
    assert_eq!(
        config.features.bulk_token.as_deref(),
        Some("long-enough-token")
    );
}

/// Unknown field in a section is rejected by deny_unknown_fields.
#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[features]
manifst_dir = "features.d"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("manifst_dir"),
        "error should mention the bad key, got: {err_str}"
    );
}

/// The diagnostic bridge turns an unknown field into a suggestion.
#[test]
fn unknown_field_gets_a_suggestion() {
    let toml = "[features]\nmanifst_dir = \"features.d\"\n";
    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let errors = figment_to_config_errors(err, &[("<inline>".to_string(), toml.to_string())]);

    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "manifest_dir"
    )));
}

/// Semantic validation runs after successful deserialization.
#[test]
fn load_and_validate_rejects_bad_log_level() {
    let errors = load_and_validate_str("[app]\nlog_level = \"loud\"\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
}

/// Wrong value types surface as InvalidType diagnostics.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = "[app]\nlog_level = 42\n";
    let err = load_config_from_str(toml).expect_err("should reject wrong type");
    let errors = figment_to_config_errors(err, &[]);
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. })));
}

/// Empty input is a fully defaulted, valid config.
#[test]
fn empty_input_validates() {
    let config = load_and_validate_str("").expect("defaults must validate");
    assert_eq!(config.app.log_level, "info");
}

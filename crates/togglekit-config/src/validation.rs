// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints serde attributes cannot express, such
//! as recognized log levels and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::TogglekitConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all failures rather than failing fast.
pub fn validate_config(config: &TogglekitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.store.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.path must not be empty".to_string(),
        });
    }

    if let Some(dir) = &config.features.manifest_dir {
        if dir.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "features.manifest_dir must not be empty when set".to_string(),
            });
        }
    }

    if let Some(token) = &config.features.bulk_token {
        if token.len() < 8 {
            errors.push(ConfigError::Validation {
                message: "features.bulk_token must be at least 8 characters".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

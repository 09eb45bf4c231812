// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so unrecognized keys
//! are rejected at startup with actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level togglekit configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section is optional and defaults sensibly.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TogglekitConfig {
    /// Application-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Option-store backend settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Feature discovery settings.
    #[serde(default)]
    pub features: FeatureSourceConfig,
}

/// Application-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Option-store backend settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path of the JSON option-store file.
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "togglekit-options.json".to_string()
}

/// Feature discovery settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureSourceConfig {
    /// Directory of TOML feature manifests to register alongside the
    /// built-in features. None disables manifest loading.
    #[serde(default)]
    pub manifest_dir: Option<String>,

    /// Anti-forgery token bulk actions must present. None disables the
    /// bulk-action endpoints.
    #[serde(default)]
    pub bulk_token: Option<String>,
}

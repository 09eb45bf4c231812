// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./togglekit.toml` >
//! `~/.config/togglekit/togglekit.toml` > `/etc/togglekit/togglekit.toml`,
//! with environment variable overrides via the `TOGGLEKIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TogglekitConfig;

/// Load configuration from the standard XDG hierarchy with env overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/togglekit/togglekit.toml` (system-wide)
/// 3. `~/.config/togglekit/togglekit.toml` (user XDG config)
/// 4. `./togglekit.toml` (local directory)
/// 5. `TOGGLEKIT_*` environment variables
pub fn load_config() -> Result<TogglekitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TogglekitConfig::default()))
        .merge(Toml::file("/etc/togglekit/togglekit.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("togglekit/togglekit.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("togglekit.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TogglekitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TogglekitConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<TogglekitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TogglekitConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names
/// themselves contain underscores: `TOGGLEKIT_FEATURES_MANIFEST_DIR` must
/// map to `features.manifest_dir`, not `features.manifest.dir`.
fn env_provider() -> Env {
    Env::prefixed("TOGGLEKIT_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("app_", "app.", 1)
            .replacen("store_", "store.", 1)
            .replacen("features_", "features.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_loader_merges_over_defaults() {
        let config = load_config_from_str("[app]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.app.log_level, "debug");
        assert_eq!(config.store.path, "togglekit-options.json");
    }

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.app.log_level, "info");
    }

    #[test]
    fn path_loader_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("togglekit.toml");
        std::fs::write(&path, "[store]\npath = \"/var/lib/togglekit/options.json\"\n").unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.store.path, "/var/lib/togglekit/options.json");
    }
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `togglekit apply` command implementation.
//!
//! Reads a JSON object of option keys (the same flat shape a settings
//! form submits), sanitizes it against the registered features, and
//! persists the outcome. Rejected keys are reported but do not block the
//! accepted ones.

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use serde_json::Value;
use togglekit_core::TogglekitError;
use togglekit_registry::FeatureRegistry;
use togglekit_settings::{apply, sanitize};

pub fn run(registry: &mut FeatureRegistry, file: &Path) -> Result<(), TogglekitError> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        TogglekitError::Config(format!("cannot read {}: {e}", file.display()))
    })?;
    let raw: BTreeMap<String, Value> = serde_json::from_str(&content).map_err(|e| {
        TogglekitError::Config(format!("{} is not a JSON object: {e}", file.display()))
    })?;

    let outcome = sanitize(registry, &raw);
    for error in &outcome.errors {
        eprintln!(
            "{} {}: {}",
            "rejected:".yellow().bold(),
            error.key,
            error.message
        );
    }

    let results = apply(registry, &outcome);
    for (id, changed) in &results {
        let desired = outcome.toggles.get(id).copied().unwrap_or_default();
        let line = match (changed, desired) {
            (true, true) => format!("enabled {id}"),
            (true, false) => format!("disabled {id}"),
            (false, true) => format!("refused to enable {id} (dependencies unmet)"),
            (false, false) => format!("could not disable {id}"),
        };
        if *changed {
            println!("{line}");
        } else {
            eprintln!("{} {line}", "warning:".yellow().bold());
        }
    }
    for id in outcome.settings.keys() {
        println!("settings saved for {id}");
    }

    Ok(())
}

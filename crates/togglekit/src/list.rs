// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `togglekit list` command implementation.

use std::io::IsTerminal;

use colored::Colorize;
use serde_json::json;
use togglekit_core::TogglekitError;
use togglekit_registry::FeatureRegistry;

/// Render all registered features with state and dependency status.
pub fn run(registry: &FeatureRegistry, as_json: bool) -> Result<(), TogglekitError> {
    if as_json {
        return run_json(registry);
    }

    let use_color = std::io::stdout().is_terminal();

    println!();
    println!("  features");
    println!("  {}", "-".repeat(60));

    for feature in registry.list() {
        let id = feature.id();
        let enabled = registry.is_enabled(id);
        let can_enable = registry.can_enable(id);

        let state = match (enabled, can_enable, use_color) {
            (true, _, true) => "on ".green().to_string(),
            (true, _, false) => "on ".to_string(),
            (false, true, true) => "off".normal().to_string(),
            (false, true, false) => "off".to_string(),
            (false, false, true) => "off".dimmed().to_string(),
            (false, false, false) => "off".to_string(),
        };

        let mut line = format!("    {state} {:<24} {}", id.as_str(), feature.name());
        if !feature.dependencies().is_empty() {
            let deps: Vec<&str> = feature.dependencies().iter().map(|d| d.as_str()).collect();
            line.push_str(&format!("  (needs: {})", deps.join(", ")));
        }
        if !enabled && !can_enable {
            let note = "dependencies unmet";
            if use_color {
                line.push_str(&format!("  [{}]", note.yellow()));
            } else {
                line.push_str(&format!("  [{note}]"));
            }
        }
        println!("{line}");
    }

    println!();
    Ok(())
}

fn run_json(registry: &FeatureRegistry) -> Result<(), TogglekitError> {
    let entries: Vec<_> = registry
        .list()
        .iter()
        .map(|feature| {
            json!({
                "id": feature.id(),
                "name": feature.name(),
                "description": feature.description(),
                "enabled": registry.is_enabled(feature.id()),
                "can_enable": registry.can_enable(feature.id()),
                "dependencies": feature.dependencies(),
                "external_dependencies": feature.external_dependencies(),
            })
        })
        .collect();

    let rendered = serde_json::to_string_pretty(&entries)
        .map_err(|e| TogglekitError::Internal(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

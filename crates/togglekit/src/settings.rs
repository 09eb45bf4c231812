// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `togglekit settings` command implementation.

use std::io::IsTerminal;

use colored::Colorize;
use togglekit_core::{FieldKind, TogglekitError};
use togglekit_registry::FeatureRegistry;
use togglekit_settings::build_schema;

/// Render the settings surface: one section per feature with toggle
/// state, dependency status, and fields with current values.
pub fn run(registry: &FeatureRegistry, as_json: bool) -> Result<(), TogglekitError> {
    let schema = build_schema(registry);

    if as_json {
        let rendered = serde_json::to_string_pretty(&schema)
            .map_err(|e| TogglekitError::Internal(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    let use_color = std::io::stdout().is_terminal();

    for section in &schema {
        println!();
        let title = if use_color {
            section.title.bold().to_string()
        } else {
            section.title.clone()
        };
        let state = match (section.enabled, section.can_enable) {
            (true, _) => "enabled",
            (false, true) => "disabled",
            (false, false) => "disabled (dependencies unmet)",
        };
        println!("  {title}  [{state}]");
        if !section.description.is_empty() {
            println!("  {}", section.description);
        }

        for dep in &section.dependencies {
            let marker = if dep.enabled { "+" } else { "-" };
            let mut line = format!("    {marker} needs {}", dep.name);
            if !dep.registered {
                line.push_str(" (not installed)");
            }
            println!("{line}");
        }

        for field in &section.fields {
            let value = section
                .values
                .get(&field.id)
                .cloned()
                .unwrap_or_else(|| field.kind.default_value());
            let rendered = match &field.kind {
                FieldKind::Checkbox { .. } => {
                    if value.as_bool().unwrap_or(false) {
                        "[x]".to_string()
                    } else {
                        "[ ]".to_string()
                    }
                }
                _ => format!("= {value}"),
            };
            println!("    {rendered} {} ({})", field.label, field.id);
        }
    }

    println!();
    Ok(())
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `togglekit enable` / `togglekit disable` command implementation.

use colored::Colorize;
use togglekit_core::{ExternalSystems, FeatureId, TogglekitError};
use togglekit_registry::FeatureRegistry;

/// Minimum Jaro-Winkler similarity to offer a "did you mean" hint for an
/// unknown feature id.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Enable or disable the given features, in argument order.
///
/// Each id is handled independently. Unknown ids and refused toggles are
/// reported but do not stop the remaining ids; any failure makes the
/// whole command exit nonzero.
pub fn run(
    registry: &mut FeatureRegistry,
    ids: &[String],
    enable: bool,
) -> Result<(), TogglekitError> {
    if ids.is_empty() {
        return Err(TogglekitError::Config(
            "no feature ids given".to_string(),
        ));
    }

    let mut failed = 0usize;
    let mut first_unknown: Option<FeatureId> = None;
    for raw in ids {
        let id = FeatureId::from(raw.as_str());
        if registry.get(&id).is_none() {
            failed += 1;
            if first_unknown.is_none() {
                first_unknown = Some(id.clone());
            }
            match suggest(registry, raw) {
                Some(hint) => eprintln!(
                    "{} unknown feature \"{raw}\", did you mean \"{hint}\"?",
                    "error:".red().bold()
                ),
                None => eprintln!("{} unknown feature \"{raw}\"", "error:".red().bold()),
            }
            continue;
        }

        let changed = if enable {
            registry.enable(&id)
        } else {
            registry.disable(&id)
        };

        if changed {
            let verb = if enable { "enabled" } else { "disabled" };
            println!("{} {raw}", verb.green());
        } else if enable {
            failed += 1;
            let deps = unmet_dependencies(registry, &id);
            if deps.is_empty() {
                eprintln!("{} could not enable \"{raw}\"", "error:".red().bold());
            } else {
                eprintln!(
                    "{} cannot enable \"{raw}\": requires {}",
                    "error:".red().bold(),
                    deps.join(", ")
                );
            }
        } else {
            failed += 1;
            eprintln!("{} could not disable \"{raw}\"", "error:".red().bold());
        }
    }

    if let Some(id) = first_unknown {
        return Err(TogglekitError::UnknownFeature { id });
    }
    if failed > 0 {
        return Err(TogglekitError::Config(format!(
            "{failed} of {} toggles failed",
            ids.len()
        )));
    }
    Ok(())
}

/// Dependencies of `id` that are not currently satisfied, as display ids.
fn unmet_dependencies(registry: &FeatureRegistry, id: &FeatureId) -> Vec<String> {
    let Some(feature) = registry.get(id) else {
        return Vec::new();
    };
    let mut unmet: Vec<String> = feature
        .dependencies()
        .iter()
        .filter(|dep| !registry.is_enabled(dep))
        .map(|dep| dep.to_string())
        .collect();
    unmet.extend(
        feature
            .external_dependencies()
            .iter()
            .filter(|ext| !registry.externals().is_active(ext))
            .map(|ext| format!("{ext} (external)")),
    );
    unmet
}

fn suggest(registry: &FeatureRegistry, unknown: &str) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best = None;
    for feature in registry.list() {
        let candidate = feature.id().as_str();
        let score = strsim::jaro_winkler(unknown, candidate);
        if score > best_score {
            best_score = score;
            best = Some(candidate.to_string());
        }
    }
    best
}

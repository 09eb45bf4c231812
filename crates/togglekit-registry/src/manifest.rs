// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML feature manifests.
//!
//! A manifest declares a feature without code: identity, dependencies,
//! and a settings schema. Manifest-backed features validate settings
//! against their declared schema field by field.
//!
//! ```toml
//! [feature]
//! id = "maintenance_banner"
//! name = "Maintenance banner"
//! description = "Shows a site-wide maintenance notice."
//! dependencies = ["core"]
//!
//! [[feature.settings]]
//! id = "message"
//! label = "Banner message"
//! type = "text"
//! default = "We will be right back."
//! ```

use std::path::Path;

use semver::Version;
use serde::Deserialize;
use serde_json::Value;
use togglekit_core::{
    Feature, FeatureContext, FeatureId, SettingField, SettingsMap, TogglekitError,
};
use tracing::{debug, info};

/// Parsed, validated contents of a feature manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureManifest {
    pub id: FeatureId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<FeatureId>,
    #[serde(default)]
    pub external_dependencies: Vec<String>,
    /// Minimum framework version this feature requires, if any.
    #[serde(default)]
    pub min_togglekit_version: Option<String>,
    #[serde(default)]
    pub settings: Vec<SettingField>,
}

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    feature: FeatureManifest,
}

fn valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Parse a feature manifest from TOML source.
///
/// Enforces a non-empty name, a lowercase `[a-z0-9_]` id, and that any
/// declared minimum framework version is satisfied by this build.
pub fn parse_feature_manifest(source: &str) -> Result<FeatureManifest, TogglekitError> {
    let doc: ManifestDoc = toml::from_str(source)
        .map_err(|e| TogglekitError::Config(format!("invalid feature manifest: {e}")))?;
    let manifest = doc.feature;

    if !valid_id(manifest.id.as_str()) {
        return Err(TogglekitError::Config(format!(
            "invalid feature id {:?}: expected lowercase letters, digits, and underscores",
            manifest.id.as_str()
        )));
    }
    if manifest.name.trim().is_empty() {
        return Err(TogglekitError::Config(format!(
            "feature {:?} has an empty name",
            manifest.id.as_str()
        )));
    }
    if let Some(required) = &manifest.min_togglekit_version {
        let required = Version::parse(required).map_err(|e| {
            TogglekitError::Config(format!(
                "feature {:?} declares an invalid min_togglekit_version: {e}",
                manifest.id.as_str()
            ))
        })?;
        let current = Version::parse(env!("CARGO_PKG_VERSION"))
            .map_err(|e| TogglekitError::Internal(format!("bad package version: {e}")))?;
        if current < required {
            return Err(TogglekitError::Config(format!(
                "feature {:?} requires togglekit {required}, this is {current}",
                manifest.id.as_str()
            )));
        }
    }

    Ok(manifest)
}

/// A feature backed entirely by a manifest, with no custom code.
#[derive(Debug, Clone)]
pub struct ManifestFeature {
    manifest: FeatureManifest,
}

impl ManifestFeature {
    pub fn new(manifest: FeatureManifest) -> Self {
        Self { manifest }
    }

    /// Parse and wrap in one step.
    pub fn from_toml(source: &str) -> Result<Self, TogglekitError> {
        parse_feature_manifest(source).map(Self::new)
    }

    pub fn manifest(&self) -> &FeatureManifest {
        &self.manifest
    }
}

impl Feature for ManifestFeature {
    fn id(&self) -> &FeatureId {
        &self.manifest.id
    }

    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn description(&self) -> &str {
        &self.manifest.description
    }

    fn dependencies(&self) -> &[FeatureId] {
        &self.manifest.dependencies
    }

    fn external_dependencies(&self) -> &[String] {
        &self.manifest.external_dependencies
    }

    fn settings(&self) -> Vec<SettingField> {
        self.manifest.settings.clone()
    }

    /// Schema-driven validation: unknown keys are dropped, known keys are
    /// coerced to their field type, missing keys fall back to defaults.
    fn validate_settings(&self, input: Value) -> SettingsMap {
        let input = match input {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        self.manifest
            .settings
            .iter()
            .map(|field| {
                let value = match input.get(&field.id) {
                    Some(raw) => field.kind.coerce(raw),
                    None => field.kind.default_value(),
                };
                (field.id.clone(), value)
            })
            .collect()
    }

    fn init(&self, _ctx: &FeatureContext<'_>) -> Result<(), TogglekitError> {
        info!(id = %self.manifest.id, "manifest feature active");
        Ok(())
    }
}

/// Load every `*.toml` manifest in a directory, sorted by file name.
///
/// Sorting keeps registration order stable across platforms whose
/// directory iteration order differs.
pub fn load_manifest_dir(dir: &Path) -> Result<Vec<ManifestFeature>, TogglekitError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        TogglekitError::Config(format!("cannot read manifest dir {}: {e}", dir.display()))
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut features = Vec::with_capacity(paths.len());
    for path in paths {
        let source = std::fs::read_to_string(&path).map_err(|e| {
            TogglekitError::Config(format!("cannot read manifest {}: {e}", path.display()))
        })?;
        let feature = ManifestFeature::from_toml(&source).map_err(|e| {
            TogglekitError::Config(format!("{}: {e}", path.display()))
        })?;
        debug!(id = %feature.id(), path = %path.display(), "manifest loaded");
        features.push(feature);
    }
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use togglekit_core::FieldKind;

    const BANNER: &str = r#"
        [feature]
        id = "maintenance_banner"
        name = "Maintenance banner"
        description = "Shows a site-wide maintenance notice."
        dependencies = ["core"]

        [[feature.settings]]
        id = "message"
        label = "Banner message"
        type = "text"
        default = "We will be right back."

        [[feature.settings]]
        id = "dismissible"
        label = "Dismissible"
        type = "checkbox"
        default = false
    "#;

    #[test]
    fn parses_a_full_manifest() {
        let manifest = parse_feature_manifest(BANNER).unwrap();
        assert_eq!(manifest.id.as_str(), "maintenance_banner");
        assert_eq!(manifest.dependencies, vec![FeatureId::from("core")]);
        assert_eq!(manifest.settings.len(), 2);
        assert!(matches!(manifest.settings[0].kind, FieldKind::Text { .. }));
    }

    #[test]
    fn rejects_bad_ids() {
        for bad in ["", "Has-Caps", "white space", "dash-ed"] {
            let source = format!("[feature]\nid = {bad:?}\nname = \"x\"\n");
            assert!(parse_feature_manifest(&source).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_empty_name() {
        let source = "[feature]\nid = \"ok\"\nname = \"  \"\n";
        assert!(parse_feature_manifest(source).is_err());
    }

    #[test]
    fn rejects_unsatisfied_min_version() {
        let source = "[feature]\nid = \"future\"\nname = \"Future\"\nmin_togglekit_version = \"99.0.0\"\n";
        let err = parse_feature_manifest(source).unwrap_err();
        assert!(err.to_string().contains("99.0.0"));
    }

    #[test]
    fn accepts_satisfied_min_version() {
        let source = "[feature]\nid = \"past\"\nname = \"Past\"\nmin_togglekit_version = \"0.1.0\"\n";
        assert!(parse_feature_manifest(source).is_ok());
    }

    #[test]
    fn validate_settings_is_schema_driven() {
        let feature = ManifestFeature::from_toml(BANNER).unwrap();

        let out = feature.validate_settings(json!({
            "message": 42,
            "dismissible": "yes",
            "unknown_key": "dropped",
        }));
        assert_eq!(out["message"], json!("42"));
        assert_eq!(out["dismissible"], json!(true));
        assert!(!out.contains_key("unknown_key"));

        let out = feature.validate_settings(json!({}));
        assert_eq!(out["message"], json!("We will be right back."));
        assert_eq!(out["dismissible"], json!(false));
    }

    #[test]
    fn load_manifest_dir_sorts_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("20-second.toml"),
            "[feature]\nid = \"second\"\nname = \"Second\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("10-first.toml"),
            "[feature]\nid = \"first\"\nname = \"First\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let features = load_manifest_dir(dir.path()).unwrap();
        let ids: Vec<&str> = features.iter().map(|f| f.id().as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn load_manifest_dir_fails_on_broken_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml at all [").unwrap();
        let err = load_manifest_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}

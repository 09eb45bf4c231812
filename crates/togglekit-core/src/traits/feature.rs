// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The base contract every feature module implements.

use serde_json::Value;

use crate::error::TogglekitError;
use crate::traits::external::ExternalSystems;
use crate::traits::store::OptionStore;
use crate::types::{enabled_key, FeatureId, SettingField, SettingsMap};

/// Dependencies handed to a feature's `init` hook.
#[derive(Clone, Copy)]
pub struct FeatureContext<'a> {
    pub store: &'a dyn OptionStore,
    pub externals: &'a dyn ExternalSystems,
}

impl std::fmt::Debug for FeatureContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureContext").finish_non_exhaustive()
    }
}

/// A self-contained, toggleable unit of functionality.
///
/// Features are constructed once at load time and live for the process
/// lifetime. They carry identity, metadata, a dependency list, a settings
/// schema, and an `init` hook that runs only when the feature is enabled
/// with all dependencies met.
///
/// `is_enabled` and `can_be_enabled` read the option store directly rather
/// than going through the registry, so a feature can answer questions about
/// itself before registration completes. The registry performs the same
/// checks on its side; the duplication is intentional.
pub trait Feature: Send + Sync {
    /// Unique feature id.
    fn id(&self) -> &FeatureId;

    /// Human-readable display name.
    fn name(&self) -> &str;

    /// One-line description for the admin surface.
    fn description(&self) -> &str {
        ""
    }

    /// Ids of other features this feature requires.
    fn dependencies(&self) -> &[FeatureId] {
        &[]
    }

    /// Identifiers of external systems this feature requires.
    fn external_dependencies(&self) -> &[String] {
        &[]
    }

    /// Whether this feature's persisted enabled flag is set.
    fn is_enabled(&self, store: &dyn OptionStore) -> bool {
        store.get_bool(&enabled_key(self.id()), false)
    }

    /// Whether every declared dependency is currently satisfied.
    ///
    /// External systems are checked first, then feature-level dependencies
    /// against their persisted flags. Dependency ids unknown to the store
    /// simply read as disabled.
    fn can_be_enabled(&self, store: &dyn OptionStore, externals: &dyn ExternalSystems) -> bool {
        self.external_dependencies()
            .iter()
            .all(|system| externals.is_active(system))
            && self
                .dependencies()
                .iter()
                .all(|dep| store.get_bool(&enabled_key(dep), false))
    }

    /// The feature's settings schema, in display order.
    fn settings(&self) -> Vec<SettingField> {
        Vec::new()
    }

    /// The schema's default values keyed by setting id.
    fn settings_defaults(&self) -> SettingsMap {
        self.settings()
            .iter()
            .map(|field| (field.id.clone(), field.kind.default_value()))
            .collect()
    }

    /// Sanitize a submitted settings value.
    ///
    /// The base implementation passes object input through unchanged and
    /// treats anything else as "no settings". Implementations overriding
    /// this must stay idempotent: validating already-valid defaults must
    /// return them unchanged.
    fn validate_settings(&self, input: Value) -> SettingsMap {
        match input {
            Value::Object(map) => map.into_iter().collect(),
            _ => SettingsMap::new(),
        }
    }

    /// Business-logic entry point.
    ///
    /// Invoked once per process at the post-registration checkpoint, and
    /// only when the feature is enabled and `can_be_enabled` holds.
    fn init(&self, ctx: &FeatureContext<'_>) -> Result<(), TogglekitError>;
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry construction: explicit registration, graph validation, and
//! the init checkpoint.

use std::collections::HashMap;
use std::sync::Arc;

use togglekit_core::{
    events, EventBus, EventPayload, ExternalSystems, Feature, FeatureContext, FeatureId,
    NoExternals, OptionStore, TogglekitError,
};
use tracing::{debug, info};

use crate::bus::NullBus;
use crate::registry::FeatureRegistry;

/// Assembles a [`FeatureRegistry`].
///
/// Features are registered explicitly and in order; the builder then
/// validates the dependency graph for cycles and runs `init` on every
/// feature that is enabled with its dependencies met. Init failures are
/// bootstrap failures and abort the build.
pub struct RegistryBuilder {
    store: Option<Arc<dyn OptionStore>>,
    externals: Arc<dyn ExternalSystems>,
    bus: Arc<dyn EventBus>,
    features: Vec<Arc<dyn Feature>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field(
                "features",
                &self.features.iter().map(|f| f.id().clone()).collect::<Vec<_>>(),
            )
            .field("has_store", &self.store.is_some())
            .finish_non_exhaustive()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            externals: Arc::new(NoExternals),
            bus: Arc::new(NullBus::new()),
            features: Vec::new(),
        }
    }

    /// The option store the registry persists through. Required.
    pub fn store(mut self, store: Arc<dyn OptionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// External-system probe. Defaults to [`NoExternals`].
    pub fn externals(mut self, externals: Arc<dyn ExternalSystems>) -> Self {
        self.externals = externals;
        self
    }

    /// Event bus for lifecycle notifications. Defaults to [`NullBus`].
    pub fn bus(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.bus = bus;
        self
    }

    /// Queue a feature for registration. Order is preserved.
    pub fn register(mut self, feature: Arc<dyn Feature>) -> Self {
        self.features.push(feature);
        self
    }

    /// Build the registry.
    ///
    /// Fails when no store was provided, when the feature-level dependency
    /// graph contains a cycle, or when an init hook of an active feature
    /// errors.
    pub fn build(self) -> Result<FeatureRegistry, TogglekitError> {
        let store = self.store.ok_or_else(|| {
            TogglekitError::Config("registry requires an option store".to_string())
        })?;

        let mut registry = FeatureRegistry::new(store, self.externals, self.bus);
        for feature in self.features {
            let id = feature.id().clone();
            registry.register(feature);
            let payload = EventPayload::new(id.clone());
            registry.bus().emit(events::FEATURE_REGISTERED, &payload);
            registry
                .bus()
                .emit(&events::scoped(events::FEATURE_REGISTERED, &id), &payload);
            debug!(%id, "feature registered");
        }

        detect_cycles(registry.list())?;

        // Init checkpoint: only features that are both enabled and
        // consistent get their hook; everything else stays dormant.
        let active: Vec<Arc<dyn Feature>> = registry
            .list()
            .iter()
            .filter(|f| {
                f.is_enabled(registry.store())
                    && f.can_be_enabled(registry.store(), registry.externals())
            })
            .cloned()
            .collect();
        for feature in active {
            let ctx = FeatureContext {
                store: registry.store(),
                externals: registry.externals(),
            };
            feature.init(&ctx)?;
            debug!(id = %feature.id(), "feature initialized");
        }

        info!(features = registry.len(), "registry built");
        Ok(registry)
    }
}

/// Reject cyclic feature-level dependency declarations.
///
/// Dependencies on unregistered ids are tolerated here; they merely keep
/// the dependent feature un-enableable.
fn detect_cycles(features: &[Arc<dyn Feature>]) -> Result<(), TogglekitError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit(
        id: &FeatureId,
        deps: &HashMap<&FeatureId, &[FeatureId]>,
        marks: &mut HashMap<FeatureId, Mark>,
        path: &mut Vec<FeatureId>,
    ) -> Result<(), TogglekitError> {
        match marks.get(id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|p| p == id).unwrap_or(0);
                let mut cycle: Vec<&str> = path[start..].iter().map(FeatureId::as_str).collect();
                cycle.push(id.as_str());
                return Err(TogglekitError::DependencyCycle {
                    path: cycle.join(" -> "),
                });
            }
            None => {}
        }
        marks.insert(id.clone(), Mark::Visiting);
        path.push(id.clone());
        if let Some(edges) = deps.get(id) {
            for dep in *edges {
                if deps.contains_key(dep) {
                    visit(dep, deps, marks, path)?;
                }
            }
        }
        path.pop();
        marks.insert(id.clone(), Mark::Done);
        Ok(())
    }

    let deps: HashMap<&FeatureId, &[FeatureId]> = features
        .iter()
        .map(|f| (f.id(), f.dependencies()))
        .collect();
    let mut marks = HashMap::new();
    let mut path = Vec::new();
    for feature in features {
        visit(feature.id(), &deps, &mut marks, &mut path)?;
    }
    Ok(())
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The feature registry: discovery order, enable/disable state, and
//! dependency consistency.
//!
//! The registry owns an insertion-ordered feature map and a lazy state
//! cache. Every mutation invalidates the touched cache entry before any
//! subsequent dependency check, so reads within one pass never observe a
//! stale flag. Disabling a feature cascades to its registered dependents.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use togglekit_core::{
    enabled_key, events, EventBus, EventPayload, ExternalSystems, Feature, FeatureId, OptionStore,
};
use tracing::{debug, info, warn};

/// User-facing notice produced by [`FeatureRegistry::check_dependencies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyWarning {
    /// The feature that was force-disabled.
    pub feature: FeatureId,
    /// Its display name, for rendering.
    pub name: String,
}

impl std::fmt::Display for DependencyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "feature \"{}\" has been disabled due to unmet dependencies",
            self.name
        )
    }
}

/// Tracks all registered features and resolves their enable/disable state.
///
/// Built once per request/process via
/// [`RegistryBuilder`](crate::RegistryBuilder); the state cache never
/// outlives the registry, so staleness cannot cross requests.
pub struct FeatureRegistry {
    features: Vec<Arc<dyn Feature>>,
    index: HashMap<FeatureId, usize>,
    state_cache: RefCell<HashMap<FeatureId, bool>>,
    store: Arc<dyn OptionStore>,
    externals: Arc<dyn ExternalSystems>,
    bus: Arc<dyn EventBus>,
}

impl std::fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureRegistry")
            .field("features", &self.index.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl FeatureRegistry {
    /// Create an empty registry over the given collaborators.
    ///
    /// Most callers should go through
    /// [`RegistryBuilder`](crate::RegistryBuilder), which also validates
    /// the dependency graph and runs the init checkpoint.
    pub fn new(
        store: Arc<dyn OptionStore>,
        externals: Arc<dyn ExternalSystems>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            features: Vec::new(),
            index: HashMap::new(),
            state_cache: RefCell::new(HashMap::new()),
            store,
            externals,
            bus,
        }
    }

    /// Register a feature, keyed by its id.
    ///
    /// Re-registering an id replaces the prior entry in place (the original
    /// discovery slot keeps its position) and resets that id's cached
    /// state. Treated as an idempotent reload; a warning is logged so
    /// genuine duplicate-id bugs stay visible.
    pub fn register(&mut self, feature: Arc<dyn Feature>) {
        let id = feature.id().clone();
        match self.index.get(&id) {
            Some(&slot) => {
                warn!(%id, "duplicate feature registration, replacing prior entry");
                self.features[slot] = feature;
            }
            None => {
                self.index.insert(id.clone(), self.features.len());
                self.features.push(feature);
            }
        }
        self.state_cache.borrow_mut().remove(&id);
    }

    /// Look up a feature by id.
    pub fn get(&self, id: &FeatureId) -> Option<&Arc<dyn Feature>> {
        self.index.get(id).map(|&slot| &self.features[slot])
    }

    /// All registered features in discovery order.
    pub fn list(&self) -> &[Arc<dyn Feature>] {
        &self.features
    }

    /// Number of registered features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Whether the feature is enabled, from cache or the store.
    ///
    /// Unknown ids are simply disabled. The persisted flag is read at most
    /// once per id between mutations (lazy memoization).
    pub fn is_enabled(&self, id: &FeatureId) -> bool {
        let Some(feature) = self.get(id) else {
            return false;
        };
        if let Some(&cached) = self.state_cache.borrow().get(id) {
            return cached;
        }
        let value = feature.is_enabled(self.store.as_ref());
        self.state_cache.borrow_mut().insert(id.clone(), value);
        value
    }

    /// Whether every dependency of the feature is currently satisfied.
    ///
    /// A single-level AND over the declared dependency lists; deep chains
    /// stay consistent because enabling requires this check and disabling
    /// cascades. Reads persisted flags directly, bypassing the cache.
    pub fn can_enable(&self, id: &FeatureId) -> bool {
        match self.get(id) {
            Some(feature) => {
                feature.can_be_enabled(self.store.as_ref(), self.externals.as_ref())
            }
            None => false,
        }
    }

    /// Enable a feature.
    ///
    /// Refused (no state change, `false`) when the id is unknown or a
    /// dependency is unmet. Otherwise fires pre-enable events, persists
    /// the flag, and on success invalidates the cache entry, fires
    /// post-enable events, and leaves a fast-read cache entry behind.
    /// Returns the persistence result.
    pub fn enable(&mut self, id: &FeatureId) -> bool {
        let Some(feature) = self.get(id).cloned() else {
            debug!(%id, "enable refused: unknown feature");
            return false;
        };
        if !feature.can_be_enabled(self.store.as_ref(), self.externals.as_ref()) {
            debug!(%id, "enable refused: dependencies unmet");
            return false;
        }

        let payload = EventPayload::new(id.clone());
        self.bus.emit(events::PRE_ENABLE, &payload);
        self.bus.emit(&events::scoped(events::PRE_ENABLE, id), &payload);

        let persisted = self.store.set_bool(&enabled_key(id), true);
        if persisted {
            self.state_cache.borrow_mut().remove(id);
            self.bus.emit(events::POST_ENABLE, &payload);
            self.bus.emit(&events::scoped(events::POST_ENABLE, id), &payload);
            // Fast-read entry: the next is_enabled skips the store.
            self.state_cache.borrow_mut().insert(id.clone(), true);
            info!(%id, "feature enabled");
        }
        persisted
    }

    /// Disable a feature and cascade to its registered dependents.
    ///
    /// Refused only for unknown ids. On successful persistence every
    /// registered feature listing this id as a dependency is disabled too,
    /// transitively. The traversal carries a visited set so a cyclic graph
    /// (rejected at build time, but defended here) cannot recurse forever.
    pub fn disable(&mut self, id: &FeatureId) -> bool {
        let mut visited = HashSet::new();
        self.disable_inner(id, &mut visited)
    }

    fn disable_inner(&mut self, id: &FeatureId, visited: &mut HashSet<FeatureId>) -> bool {
        if !self.index.contains_key(id) {
            debug!(%id, "disable refused: unknown feature");
            return false;
        }
        if !visited.insert(id.clone()) {
            return false;
        }

        let payload = EventPayload::new(id.clone());
        self.bus.emit(events::PRE_DISABLE, &payload);
        self.bus.emit(&events::scoped(events::PRE_DISABLE, id), &payload);

        let persisted = self.store.set_bool(&enabled_key(id), false);
        if persisted {
            self.state_cache.borrow_mut().remove(id);
            self.bus.emit(events::POST_DISABLE, &payload);
            self.bus.emit(&events::scoped(events::POST_DISABLE, id), &payload);
            info!(%id, "feature disabled");

            let dependents: Vec<FeatureId> = self
                .features
                .iter()
                .filter(|f| f.dependencies().contains(id))
                .map(|f| f.id().clone())
                .collect();
            for dependent in dependents {
                self.disable_inner(&dependent, visited);
            }
        }
        persisted
    }

    /// Force-disable every enabled feature whose dependencies are no
    /// longer met, returning a warning per feature.
    ///
    /// Intended to run once per admin entry point, before rendering; it is
    /// not called from `enable`/`disable` themselves.
    pub fn check_dependencies(&mut self) -> Vec<DependencyWarning> {
        let mut warnings = Vec::new();
        let ids: Vec<FeatureId> = self.features.iter().map(|f| f.id().clone()).collect();
        for id in ids {
            let Some(feature) = self.get(&id).cloned() else {
                continue;
            };
            if feature.is_enabled(self.store.as_ref())
                && !feature.can_be_enabled(self.store.as_ref(), self.externals.as_ref())
            {
                self.disable(&id);
                warn!(%id, "force-disabled: dependencies no longer met");
                warnings.push(DependencyWarning {
                    feature: id,
                    name: feature.name().to_string(),
                });
            }
        }
        warnings
    }

    /// Apply enable/disable per entry, independently.
    ///
    /// No atomicity across entries: one refusal does not affect the rest,
    /// and partial application is expected.
    pub fn bulk_update(&mut self, desired: &BTreeMap<FeatureId, bool>) -> BTreeMap<FeatureId, bool> {
        desired
            .iter()
            .map(|(id, &enabled)| {
                let result = if enabled {
                    self.enable(id)
                } else {
                    self.disable(id)
                };
                (id.clone(), result)
            })
            .collect()
    }

    /// Drop cached state for one id, or for everything.
    pub fn clear_state_cache(&self, id: Option<&FeatureId>) {
        let mut cache = self.state_cache.borrow_mut();
        match id {
            Some(id) => {
                cache.remove(id);
            }
            None => cache.clear(),
        }
    }

    /// The option store this registry persists through.
    pub fn store(&self) -> &dyn OptionStore {
        self.store.as_ref()
    }

    /// The external-system probe.
    pub fn externals(&self) -> &dyn ExternalSystems {
        self.externals.as_ref()
    }

    /// The event bus lifecycle notifications go to.
    pub fn bus(&self) -> &dyn EventBus {
        self.bus.as_ref()
    }
}

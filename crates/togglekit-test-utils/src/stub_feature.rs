// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configurable stub feature for registry and facade tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use togglekit_core::{
    Feature, FeatureContext, FeatureId, SettingField, SettingsMap, TogglekitError,
};

type Validator = Box<dyn Fn(Value) -> SettingsMap + Send + Sync>;

/// A [`Feature`] with builder-style configuration of metadata,
/// dependencies, settings schema, and validator behavior.
pub struct StubFeature {
    id: FeatureId,
    name: String,
    description: String,
    dependencies: Vec<FeatureId>,
    external_dependencies: Vec<String>,
    fields: Vec<SettingField>,
    validator: Option<Validator>,
    init_calls: Arc<AtomicUsize>,
    fail_init: bool,
}

impl StubFeature {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: FeatureId(id),
            description: String::new(),
            dependencies: Vec::new(),
            external_dependencies: Vec::new(),
            fields: Vec::new(),
            validator: None,
            init_calls: Arc::new(AtomicUsize::new(0)),
            fail_init: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(FeatureId(id.into()));
        self
    }

    pub fn requires_external(mut self, system: impl Into<String>) -> Self {
        self.external_dependencies.push(system.into());
        self
    }

    pub fn with_field(mut self, field: SettingField) -> Self {
        self.fields.push(field);
        self
    }

    /// Replace the default pass-through validator.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(Value) -> SettingsMap + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Make `init` fail, for bootstrap-error tests.
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Shared counter of `init` invocations.
    pub fn init_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.init_calls)
    }

    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

impl Feature for StubFeature {
    fn id(&self) -> &FeatureId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn dependencies(&self) -> &[FeatureId] {
        &self.dependencies
    }

    fn external_dependencies(&self) -> &[String] {
        &self.external_dependencies
    }

    fn settings(&self) -> Vec<SettingField> {
        self.fields.clone()
    }

    fn validate_settings(&self, input: Value) -> SettingsMap {
        match &self.validator {
            Some(validator) => validator(input),
            None => match input {
                Value::Object(map) => map.into_iter().collect(),
                _ => SettingsMap::new(),
            },
        }
    }

    fn init(&self, _ctx: &FeatureContext<'_>) -> Result<(), TogglekitError> {
        if self.fail_init {
            return Err(TogglekitError::Init {
                feature: self.id.clone(),
                source: Box::new(std::io::Error::other("stub init failure")),
            });
        }
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A probe reporting a fixed set of external systems as active.
#[derive(Debug, Default)]
pub struct StaticExternals {
    active: Vec<String>,
}

impl StaticExternals {
    pub fn new<I, S>(active: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: active.into_iter().map(Into::into).collect(),
        }
    }
}

impl togglekit_core::ExternalSystems for StaticExternals {
    fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|s| s == id)
    }
}

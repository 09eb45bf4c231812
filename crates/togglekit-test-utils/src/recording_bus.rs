// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event bus that records every emitted event for assertions.

use std::sync::Mutex;

use togglekit_core::{EventBus, EventHandler, EventPayload, FeatureId};

/// An [`EventBus`] capturing emitted events in order.
///
/// Registered handlers are still dispatched, so tests can combine
/// observation with real subscriber behavior.
#[derive(Default)]
pub struct RecordingBus {
    emitted: Mutex<Vec<(String, FeatureId)>>,
    handlers: Mutex<Vec<(String, EventHandler)>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(event name, feature id)` pairs in emission order.
    pub fn events(&self) -> Vec<(String, FeatureId)> {
        self.emitted.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Emitted event names only, in order.
    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }

    /// Whether the named event was emitted for the given feature.
    pub fn saw(&self, event: &str, feature: &FeatureId) -> bool {
        self.events()
            .iter()
            .any(|(name, id)| name == event && id == feature)
    }
}

impl std::fmt::Debug for RecordingBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingBus")
            .field("emitted", &self.events())
            .finish_non_exhaustive()
    }
}

impl EventBus for RecordingBus {
    fn on(&self, event: &str, handler: EventHandler) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push((event.to_string(), handler));
        }
    }

    fn emit(&self, event: &str, payload: &EventPayload) {
        if let Ok(mut emitted) = self.emitted.lock() {
            emitted.push((event.to_string(), payload.feature.clone()));
        }
        if let Ok(handlers) = self.handlers.lock() {
            for (name, handler) in handlers.iter() {
                if name == event {
                    handler(payload);
                }
            }
        }
    }
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process event bus implementations.

use std::collections::HashMap;
use std::sync::RwLock;

use togglekit_core::{EventBus, EventHandler, EventPayload};
use tracing::trace;

/// Synchronous in-process event bus.
///
/// Handlers run inline on the emitting thread, in subscription order.
/// Handlers must not subscribe from within dispatch; the handler table is
/// read-locked for the duration of `emit`.
#[derive(Default)]
pub struct SyncBus {
    handlers: RwLock<HashMap<String, Vec<EventHandler>>>,
}

impl SyncBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers subscribed to the named event.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers
            .read()
            .map(|map| map.get(event).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for SyncBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events: Vec<String> = self
            .handlers
            .read()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("SyncBus").field("events", &events).finish()
    }
}

impl EventBus for SyncBus {
    fn on(&self, event: &str, handler: EventHandler) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.entry(event.to_string()).or_default().push(handler);
        }
    }

    fn emit(&self, event: &str, payload: &EventPayload) {
        trace!(event, feature = %payload.feature, "emit");
        if let Ok(handlers) = self.handlers.read() {
            if let Some(subscribers) = handlers.get(event) {
                for handler in subscribers {
                    handler(payload);
                }
            }
        }
    }
}

/// A bus that drops everything. Useful when lifecycle notifications are
/// irrelevant, such as one-shot CLI invocations.
#[derive(Debug, Default)]
pub struct NullBus;

impl NullBus {
    pub fn new() -> Self {
        Self
    }
}

impl EventBus for NullBus {
    fn on(&self, _event: &str, _handler: EventHandler) {}

    fn emit(&self, _event: &str, _payload: &EventPayload) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use togglekit_core::FeatureId;

    #[test]
    fn handlers_run_in_subscription_order() {
        let bus = SyncBus::new();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.on(
                "feature.post_enable",
                Box::new(move |_| {
                    if let Ok(mut order) = order.lock() {
                        order.push(tag);
                    }
                }),
            );
        }

        bus.emit(
            "feature.post_enable",
            &EventPayload::new(FeatureId::from("core")),
        );
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn emit_only_reaches_matching_subscribers() {
        let bus = SyncBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        bus.on(
            "feature.post_enable.core",
            Box::new(move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            }),
        );

        bus.emit(
            "feature.post_enable.other",
            &EventPayload::new(FeatureId::from("other")),
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        bus.emit(
            "feature.post_enable.core",
            &EventPayload::new(FeatureId::from("core")),
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_count_reflects_subscriptions() {
        let bus = SyncBus::new();
        assert_eq!(bus.handler_count("x"), 0);
        bus.on("x", Box::new(|_| {}));
        bus.on("x", Box::new(|_| {}));
        assert_eq!(bus.handler_count("x"), 2);
    }

    #[test]
    fn null_bus_is_inert() {
        let bus = NullBus::new();
        bus.on("anything", Box::new(|_| panic!("must never run")));
        bus.emit("anything", &EventPayload::new(FeatureId::from("core")));
    }
}

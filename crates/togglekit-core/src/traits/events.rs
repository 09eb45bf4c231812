// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event bus trait for synchronous, in-process lifecycle notifications.

use crate::types::FeatureId;

/// Payload attached to every lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPayload {
    /// The feature the event is about.
    pub feature: FeatureId,
}

impl EventPayload {
    pub fn new(feature: FeatureId) -> Self {
        Self { feature }
    }
}

/// A registered event handler.
pub type EventHandler = Box<dyn Fn(&EventPayload) + Send + Sync>;

/// Synchronous, in-process event dispatch keyed by event name.
///
/// `emit` runs every handler for the name to completion before returning;
/// there is no queueing or background delivery. Handlers must not register
/// further handlers from inside a dispatch.
pub trait EventBus: Send + Sync {
    /// Register a handler for a named event.
    fn on(&self, event: &str, handler: EventHandler);

    /// Fire a named event, invoking all registered handlers in order.
    fn emit(&self, event: &str, payload: &EventPayload);
}

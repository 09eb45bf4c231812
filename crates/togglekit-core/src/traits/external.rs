// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External-system dependency probing.

/// Reports whether external systems (host plugins, companion services)
/// a feature depends on are currently active.
pub trait ExternalSystems: Send + Sync {
    /// Whether the named external system is active.
    fn is_active(&self, id: &str) -> bool;
}

/// Default probe for deployments without external integrations.
///
/// Reports every external system as inactive, so features declaring
/// external dependencies cannot be enabled until a real probe is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternals;

impl ExternalSystems for NoExternals {
    fn is_active(&self, _id: &str) -> bool {
        false
    }
}

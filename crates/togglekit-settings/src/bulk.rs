// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk enable/disable actions with request-forgery protection.

use std::collections::BTreeMap;

use togglekit_core::{FeatureId, TogglekitError};
use togglekit_registry::FeatureRegistry;
use tracing::{info, warn};

/// A recognized bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum BulkAction {
    Enable,
    Disable,
}

/// Verifies an anti-forgery token attached to a mutating request.
pub trait NonceVerifier: Send + Sync {
    fn verify(&self, token: &str) -> bool;
}

/// Verifier that accepts exactly one known token. Suitable for tests and
/// single-process deployments; multi-tenant hosts bring their own.
#[derive(Debug, Clone)]
pub struct StaticNonce {
    token: String,
}

impl StaticNonce {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl NonceVerifier for StaticNonce {
    fn verify(&self, token: &str) -> bool {
        token == self.token
    }
}

/// Apply a bulk action to the selected features.
///
/// The token is checked before anything else; a bad token aborts with
/// [`TogglekitError::InvalidNonce`] and no state change. An action string
/// that parses to no known action is a silent no-op, mirroring how form
/// endpoints ignore unknown action values. Per-feature results follow
/// [`FeatureRegistry::bulk_update`] semantics: independent, no rollback.
pub fn handle_bulk_action(
    registry: &mut FeatureRegistry,
    action: &str,
    selected: &[FeatureId],
    verifier: &dyn NonceVerifier,
    token: &str,
) -> Result<BTreeMap<FeatureId, bool>, TogglekitError> {
    if !verifier.verify(token) {
        warn!(action, "bulk action refused: invalid token");
        return Err(TogglekitError::InvalidNonce);
    }

    let Ok(action) = action.parse::<BulkAction>() else {
        warn!(action, "ignoring unknown bulk action");
        return Ok(BTreeMap::new());
    };

    let desired: BTreeMap<FeatureId, bool> = selected
        .iter()
        .map(|id| (id.clone(), action == BulkAction::Enable))
        .collect();
    let results = registry.bulk_update(&desired);
    info!(%action, features = selected.len(), "bulk action applied");
    Ok(results)
}

// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named lifecycle events emitted by the registry.
//!
//! Every state transition fires a generic event plus an id-qualified
//! variant (e.g. `feature.post_enable` and `feature.post_enable.email`),
//! so subscribers can watch either all features or one.

use crate::types::FeatureId;

/// Fired by the builder for each feature as it enters the registry.
pub const FEATURE_REGISTERED: &str = "feature.registered";

/// Fired before a feature's enabled flag is persisted.
pub const PRE_ENABLE: &str = "feature.pre_enable";

/// Fired after a feature's enabled flag was successfully persisted.
pub const POST_ENABLE: &str = "feature.post_enable";

/// Fired before a feature's disabled flag is persisted.
pub const PRE_DISABLE: &str = "feature.pre_disable";

/// Fired after a feature was successfully disabled (before its cascade).
pub const POST_DISABLE: &str = "feature.post_disable";

/// The id-qualified variant of a lifecycle event name.
pub fn scoped(event: &str, id: &FeatureId) -> String {
    format!("{event}.{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_appends_feature_id() {
        let id = FeatureId::from("email");
        assert_eq!(scoped(POST_ENABLE, &id), "feature.post_enable.email");
    }
}

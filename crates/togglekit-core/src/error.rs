// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the togglekit framework.

use thiserror::Error;

use crate::types::FeatureId;

/// The primary error type used across togglekit crates.
///
/// Steady-state failures (unknown ids, unmet dependencies, malformed
/// settings input) are reported as boolean results or validation messages,
/// never as errors. `TogglekitError` covers bootstrap failures only:
/// configuration problems, store access, cycle detection, and feature
/// initialization.
#[derive(Debug, Error)]
pub enum TogglekitError {
    /// Configuration errors (invalid TOML, missing required fields, bad manifests).
    #[error("configuration error: {0}")]
    Config(String),

    /// Option store errors (unreadable file, serialization failure).
    #[error("store error for key `{key}`: {message}")]
    Store { key: String, message: String },

    /// An operation referenced a feature id the registry does not know.
    #[error("unknown feature `{id}`")]
    UnknownFeature { id: FeatureId },

    /// The declared feature dependency graph contains a cycle.
    #[error("dependency cycle: {path}")]
    DependencyCycle { path: String },

    /// A feature's `init` hook failed during the post-registration checkpoint.
    #[error("feature `{feature}` failed to initialize: {source}")]
    Init {
        feature: FeatureId,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A bulk action was submitted with a missing or invalid anti-forgery token.
    #[error("invalid anti-forgery token")]
    InvalidNonce,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

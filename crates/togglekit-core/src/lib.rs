// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the togglekit feature-toggle framework.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the togglekit workspace. Feature modules
//! implement the [`Feature`] trait; hosts supply [`OptionStore`],
//! [`ExternalSystems`], and [`EventBus`] implementations.

pub mod error;
pub mod events;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TogglekitError;
pub use types::{
    enabled_key, parse_enabled_key, settings_key, truthy, FeatureId, FieldKind, SelectOption,
    SettingField, SettingsMap,
};

pub use traits::{
    EventBus, EventHandler, EventPayload, ExternalSystems, Feature, FeatureContext, NoExternals,
    OptionStore,
};

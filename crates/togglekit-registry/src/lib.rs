// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature registry and lifecycle engine for togglekit.
//!
//! This crate hosts the [`FeatureRegistry`] (state queries, enable and
//! cascade-disable, dependency checks), the [`RegistryBuilder`] that
//! assembles and validates it, in-process event buses, and TOML feature
//! manifests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use togglekit_registry::{ManifestFeature, RegistryBuilder};
//! use togglekit_store::MemoryStore;
//!
//! let core = ManifestFeature::from_toml(
//!     "[feature]\nid = \"core\"\nname = \"Core\"\n",
//! )?;
//! let mut registry = RegistryBuilder::new()
//!     .store(Arc::new(MemoryStore::new()))
//!     .register(Arc::new(core))
//!     .build()?;
//!
//! let id = togglekit_core::FeatureId::from("core");
//! assert!(registry.enable(&id));
//! assert!(registry.is_enabled(&id));
//! # Ok::<(), togglekit_core::TogglekitError>(())
//! ```

pub mod builder;
pub mod bus;
pub mod manifest;
pub mod registry;

pub use builder::RegistryBuilder;
pub use bus::{NullBus, SyncBus};
pub use manifest::{load_manifest_dir, parse_feature_manifest, FeatureManifest, ManifestFeature};
pub use registry::{DependencyWarning, FeatureRegistry};

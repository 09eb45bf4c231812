// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for togglekit integration tests.
//!
//! Provides deterministic, in-memory doubles for the framework's external
//! collaborators so registry and facade behavior can be asserted without
//! touching disk or real hosts.
//!
//! # Components
//!
//! - [`CountingStore`] - memory store recording per-key read/write counts
//! - [`RecordingBus`] - event bus capturing emissions in order
//! - [`StubFeature`] - builder-configurable feature with init tracking
//! - [`StaticExternals`] - external-system probe with a fixed active set

pub mod counting_store;
pub mod recording_bus;
pub mod stub_feature;

pub use counting_store::CountingStore;
pub use recording_bus::RecordingBus;
pub use stub_feature::{StaticExternals, StubFeature};

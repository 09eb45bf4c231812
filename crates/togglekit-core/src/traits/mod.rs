// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the registry and its collaborators.

pub mod events;
pub mod external;
pub mod feature;
pub mod store;

pub use events::{EventBus, EventHandler, EventPayload};
pub use external::{ExternalSystems, NoExternals};
pub use feature::{Feature, FeatureContext};
pub use store::OptionStore;

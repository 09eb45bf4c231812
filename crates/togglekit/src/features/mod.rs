// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in feature modules shipped with the binary.

pub mod update_emails;

use std::sync::Arc;

use togglekit_core::Feature;

/// All built-in features, in registration order.
pub fn builtin_features() -> Vec<Arc<dyn Feature>> {
    vec![Arc::new(update_emails::UpdateEmailManager::new())]
}

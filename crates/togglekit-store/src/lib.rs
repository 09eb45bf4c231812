// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Option store implementations for the togglekit framework.
//!
//! [`MemoryStore`] backs tests and ephemeral hosts; [`JsonFileStore`]
//! persists options as a flat JSON object on disk.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

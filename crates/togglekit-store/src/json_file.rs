// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed option store persisting a flat JSON object.
//!
//! The whole map is rewritten on every `set` via a temp-file rename, so a
//! crash mid-write never leaves a truncated store behind. Suitable for the
//! small option sets this framework manages; not a database.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use togglekit_core::{OptionStore, TogglekitError};
use tracing::{debug, error};

/// A durable [`OptionStore`] backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries.
    ///
    /// A missing file yields an empty store; a malformed file is a
    /// bootstrap error rather than silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TogglekitError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| TogglekitError::Store {
                    key: path.display().to_string(),
                    message: format!("malformed option file: {e}"),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(TogglekitError::Store {
                    key: path.display().to_string(),
                    message: format!("failed to read option file: {e}"),
                });
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "opened option store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> std::io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)
    }
}

impl OptionStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        entries.insert(key.to_string(), value);
        match self.persist(&entries) {
            Ok(()) => true,
            Err(e) => {
                error!(key, path = %self.path.display(), "failed to persist option: {e}");
                false
            }
        }
    }
}

// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;

use crate::types::card_id::CardId;
use crate::types::progress::Progress;

/// The single well-known record the learner's progress is stored under.
pub const STORE_FILE: &str = "progress.json";

/// Persists the `{card id -> flags}` map as one JSON document in the deck
/// directory.
///
/// The store is deliberately unfailing: absent or malformed data loads as a
/// fresh start, and write failures are logged and swallowed, so progress
/// keeps working in memory even when it cannot be saved. A store with no
/// backing path (tests, read-only decks) is a no-op.
pub struct ProgressStore {
    path: Option<PathBuf>,
}

impl ProgressStore {
    pub fn open(directory: &Path) -> Self {
        Self {
            path: Some(directory.join(STORE_FILE)),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Read the stored flags map. Absent or malformed data is an empty map,
    /// never an error.
    pub fn load(&self) -> HashMap<CardId, Progress> {
        let Some(path) = &self.path else {
            return HashMap::new();
        };
        if !path.exists() {
            return HashMap::new();
        }
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("could not read {STORE_FILE}: {e}");
                return HashMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("malformed {STORE_FILE}, starting fresh: {e}");
                HashMap::new()
            }
        }
    }

    /// Rewrite the full flags map. Failures are logged and swallowed; a
    /// later write supersedes an earlier one.
    pub fn save(&self, flags: &HashMap<CardId, Progress>) {
        let Some(path) = &self.path else {
            return;
        };
        let json = match serde_json::to_string_pretty(flags) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("could not serialize progress: {e}");
                return;
            }
        };
        if let Err(e) = write(path, json) {
            log::warn!("could not write {STORE_FILE}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_absent_file_loads_empty() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let store = ProgressStore::open(&dir);
        assert!(store.load().is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_file_loads_empty() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(STORE_FILE), "{ this is not json")?;
        let store = ProgressStore::open(&dir);
        assert!(store.load().is_empty());
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let store = ProgressStore::open(&dir);
        let mut flags = HashMap::new();
        flags.insert(
            CardId::new("clips/robin.mp3"),
            Progress {
                learned: true,
                starred: false,
            },
        );
        flags.insert(
            CardId::new("clips/wren.mp3"),
            Progress {
                learned: false,
                starred: true,
            },
        );
        store.save(&flags);
        let loaded = store.load();
        assert_eq!(loaded, flags);
        Ok(())
    }

    #[test]
    fn test_later_write_supersedes_earlier() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let store = ProgressStore::open(&dir);
        let mut flags = HashMap::new();
        flags.insert(CardId::new("clips/robin.mp3"), Progress::default());
        store.save(&flags);
        flags.insert(
            CardId::new("clips/robin.mp3"),
            Progress {
                learned: true,
                starred: true,
            },
        );
        store.save(&flags);
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[&CardId::new("clips/robin.mp3")].learned);
        Ok(())
    }

    #[test]
    fn test_disabled_store_is_a_no_op() {
        let store = ProgressStore::disabled();
        let mut flags = HashMap::new();
        flags.insert(CardId::new("clips/robin.mp3"), Progress::default());
        store.save(&flags);
        assert!(store.load().is_empty());
    }
}

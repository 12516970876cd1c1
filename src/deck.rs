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
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use std::time::Instant;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;

/// Ordered list of clip identifiers (collection-relative file paths).
pub const MANIFEST_FILE: &str = "clips.json";

/// Mapping from clip identifier to display metadata.
pub const MAPPING_FILE: &str = "species.json";

#[derive(Deserialize)]
struct SpeciesEntry {
    name: String,
    #[serde(default)]
    image: Option<String>,
}

/// Load the deck from the two data files.
///
/// Identifiers are deduplicated in first-seen order. An identifier with no
/// mapping entry is dropped (logged, not fatal): a card is never created
/// with placeholder metadata. Either file missing or of the wrong shape is
/// a fatal load error; no partial deck is ever returned.
pub fn load_deck(directory: &Path) -> Fallible<Vec<Card>> {
    log::debug!("Loading deck...");
    let start = Instant::now();

    let clips: Vec<String> = read_json(directory, MANIFEST_FILE)?;
    let species: HashMap<String, SpeciesEntry> = read_json(directory, MAPPING_FILE)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut cards: Vec<Card> = Vec::new();
    for clip in clips {
        if !seen.insert(clip.clone()) {
            log::warn!("duplicate clip identifier {clip:?} in {MANIFEST_FILE}, skipping");
            continue;
        }
        match species.get(&clip) {
            Some(entry) => {
                cards.push(Card::new(clip, entry.name.clone(), entry.image.clone()));
            }
            None => {
                log::warn!("clip {clip:?} has no entry in {MAPPING_FILE}, skipping");
            }
        }
    }

    let duration = start.elapsed().as_millis();
    log::debug!("Deck loaded in {duration}ms: {} cards.", cards.len());
    Ok(cards)
}

fn read_json<T: serde::de::DeserializeOwned>(directory: &Path, file: &str) -> Fallible<T> {
    let path = directory.join(file);
    if !path.exists() {
        return fail(format!("{file} not found in the deck directory."));
    }
    let content = read_to_string(&path)?;
    serde_json::from_str(&content)
        .map_err(|e| ErrorReport::new(format!("could not parse {file}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::fs::write;
    use std::path::PathBuf;

    use super::*;
    use crate::helper::create_tmp_directory;

    fn write_deck(dir: &PathBuf, manifest: &str, mapping: &str) {
        write(dir.join(MANIFEST_FILE), manifest).unwrap();
        write(dir.join(MAPPING_FILE), mapping).unwrap();
    }

    #[test]
    fn test_load_deck() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write_deck(
            &dir,
            r#"["clips/robin.mp3", "clips/wren.mp3"]"#,
            r#"{
                "clips/robin.mp3": {"name": "European Robin", "image": "images/robin.jpg"},
                "clips/wren.mp3": {"name": "Eurasian Wren"}
            }"#,
        );
        let cards = load_deck(&dir)?;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].display_name(), "European Robin");
        assert_eq!(cards[0].image(), Some("images/robin.jpg"));
        assert_eq!(cards[1].display_name(), "Eurasian Wren");
        assert_eq!(cards[1].image(), None);
        Ok(())
    }

    #[test]
    fn test_unmapped_clip_is_dropped() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write_deck(
            &dir,
            r#"["clips/robin.mp3", "clips/mystery.mp3"]"#,
            r#"{"clips/robin.mp3": {"name": "European Robin"}}"#,
        );
        let cards = load_deck(&dir)?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id().as_str(), "clips/robin.mp3");
        Ok(())
    }

    #[test]
    fn test_duplicate_clip_is_deduplicated() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write_deck(
            &dir,
            r#"["clips/robin.mp3", "clips/robin.mp3"]"#,
            r#"{"clips/robin.mp3": {"name": "European Robin"}}"#,
        );
        let cards = load_deck(&dir)?;
        assert_eq!(cards.len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_manifest_is_a_valid_empty_deck() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write_deck(&dir, "[]", "{}");
        let cards = load_deck(&dir)?;
        assert!(cards.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_manifest_fails() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(MAPPING_FILE), "{}").unwrap();
        assert!(load_deck(&dir).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_mapping_fails() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(MANIFEST_FILE), "[]").unwrap();
        assert!(load_deck(&dir).is_err());
        Ok(())
    }

    #[test]
    fn test_wrong_shape_fails() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write_deck(&dir, r#"{"not": "a list"}"#, "{}");
        let result = load_deck(&dir);
        assert!(result.is_err());
        let message = result.err().unwrap().to_string();
        assert!(message.contains(MANIFEST_FILE));
        Ok(())
    }
}

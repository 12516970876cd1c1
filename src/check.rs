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

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::deck::load_deck;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;

const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "ogg", "wav", "flac"];

/// Findings of a deck check: referenced files that are missing, and audio
/// files on disk that no card references.
#[derive(Default)]
pub struct CheckReport {
    pub missing: Vec<String>,
    pub orphans: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.orphans.is_empty()
    }
}

/// Check a deck directory: every card's clip and image must exist, and
/// every audio file under the directory should be referenced by some card.
pub fn check_deck(directory: &PathBuf) -> Fallible<CheckReport> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let directory = directory.canonicalize()?;
    let cards = load_deck(&directory)?;
    let mut report = CheckReport::default();
    collect_missing(&directory, &cards, &mut report);
    collect_orphans(&directory, &cards, &mut report)?;
    Ok(report)
}

pub fn print_report(report: &CheckReport) {
    for path in &report.missing {
        println!("missing: {path}");
    }
    for path in &report.orphans {
        println!("orphan: {path}");
    }
    if report.is_clean() {
        println!("ok");
    }
}

fn collect_missing(directory: &Path, cards: &[Card], report: &mut CheckReport) {
    for card in cards {
        if !directory.join(card.audio()).is_file() {
            report.missing.push(card.audio().to_string());
        }
        if let Some(image) = card.image() {
            if !directory.join(image).is_file() {
                report.missing.push(image.to_string());
            }
        }
    }
}

fn collect_orphans(directory: &Path, cards: &[Card], report: &mut CheckReport) -> Fallible<()> {
    let referenced: HashSet<&str> = cards.iter().map(|card| card.audio()).collect();
    for entry in WalkDir::new(directory) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_audio = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                AUDIO_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
            });
        if !is_audio {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(directory) {
            let relative = relative.to_string_lossy().to_string();
            if !referenced.contains(relative.as_str()) {
                report.orphans.push(relative);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::fs::create_dir;
    use std::fs::write;

    use super::*;
    use crate::deck::MANIFEST_FILE;
    use crate::deck::MAPPING_FILE;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_nonexistent_directory_is_an_error() {
        let directory = PathBuf::from("./derpherp");
        assert!(check_deck(&directory).is_err());
    }

    #[test]
    fn test_test_deck_is_clean() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let report = check_deck(&directory)?;
        assert!(report.is_clean());
        Ok(())
    }

    #[test]
    fn test_missing_and_orphaned_media_are_reported() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        write(
            directory.join(MANIFEST_FILE),
            r#"["clips/robin.mp3", "clips/wren.mp3"]"#,
        )?;
        write(
            directory.join(MAPPING_FILE),
            r#"{
                "clips/robin.mp3": {"name": "European Robin", "image": "images/robin.jpg"},
                "clips/wren.mp3": {"name": "Eurasian Wren"}
            }"#,
        )?;
        create_dir(directory.join("clips"))?;
        File::create(directory.join("clips/robin.mp3"))?;
        File::create(directory.join("clips/stray.mp3"))?;
        let report = check_deck(&directory)?;
        assert_eq!(
            report.missing,
            vec!["images/robin.jpg".to_string(), "clips/wren.mp3".to_string()]
        );
        assert_eq!(report.orphans, vec!["clips/stray.mp3".to_string()]);
        Ok(())
    }
}

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

use std::path::PathBuf;

use serde::Serialize;

use crate::deck::load_deck;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::ProgressStore;
use crate::types::card::Card;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    card_count: usize,
    learned_count: usize,
    starred_count: usize,
    unlearned_count: usize,
}

impl Stats {
    pub fn of_deck(cards: &[Card]) -> Self {
        let learned_count = cards.iter().filter(|card| card.learned()).count();
        let starred_count = cards.iter().filter(|card| card.starred()).count();
        Self {
            card_count: cards.len(),
            learned_count,
            starred_count,
            unlearned_count: cards.len() - learned_count,
        }
    }
}

pub fn print_deck_stats(directory: &PathBuf) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let mut cards = load_deck(directory)?;
    let saved = ProgressStore::open(directory).load();
    for card in &mut cards {
        if let Some(progress) = saved.get(card.id()) {
            card.apply_progress(*progress);
        }
    }
    let stats = Stats::of_deck(&cards);
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_deck() {
        let mut cards = vec![
            Card::new("clips/a.mp3", "A", None),
            Card::new("clips/b.mp3", "B", None),
            Card::new("clips/c.mp3", "C", None),
        ];
        cards[0].toggle_learned();
        cards[1].toggle_starred();
        let stats = Stats::of_deck(&cards);
        assert_eq!(stats.card_count, 3);
        assert_eq!(stats.learned_count, 1);
        assert_eq!(stats.starred_count, 1);
        assert_eq!(stats.unlearned_count, 2);
    }

    #[test]
    fn test_nonexistent_directory_is_an_error() {
        let directory = PathBuf::from("./derpherp");
        assert!(print_deck_stats(&directory).is_err());
    }
}

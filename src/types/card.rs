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

use crate::types::card_id::CardId;
use crate::types::progress::Progress;

/// One learnable item: an audio clip plus its identifying metadata and the
/// learner's progress flags.
#[derive(Clone, Debug)]
pub struct Card {
    /// The card's identifier, which is also its clip path.
    id: CardId,
    /// Collection-relative path to the audio clip.
    audio: String,
    /// Human-readable species name.
    display_name: String,
    /// Collection-relative path to an illustrative image, if there is one.
    /// Absence is valid.
    image: Option<String>,
    /// Whether the learner has marked this card as learned.
    learned: bool,
    /// Whether the learner has starred this card.
    starred: bool,
}

impl Card {
    pub fn new(
        audio: impl Into<String>,
        display_name: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        let audio = audio.into();
        Self {
            id: CardId::new(audio.clone()),
            audio,
            display_name: display_name.into(),
            image,
            learned: false,
            starred: false,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn audio(&self) -> &str {
        &self.audio
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn learned(&self) -> bool {
        self.learned
    }

    pub fn starred(&self) -> bool {
        self.starred
    }

    pub fn toggle_learned(&mut self) {
        self.learned = !self.learned;
    }

    pub fn toggle_starred(&mut self) {
        self.starred = !self.starred;
    }

    pub fn progress(&self) -> Progress {
        Progress {
            learned: self.learned,
            starred: self.starred,
        }
    }

    pub fn apply_progress(&mut self, progress: Progress) {
        self.learned = progress.learned;
        self.starred = progress.starred;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_the_clip_path() {
        let card = Card::new("clips/wren.mp3", "Eurasian Wren", None);
        assert_eq!(card.id().as_str(), "clips/wren.mp3");
        assert_eq!(card.audio(), "clips/wren.mp3");
        assert_eq!(card.image(), None);
    }

    #[test]
    fn test_toggle_learned_is_involution() {
        let mut card = Card::new("clips/wren.mp3", "Eurasian Wren", None);
        assert!(!card.learned());
        card.toggle_learned();
        assert!(card.learned());
        card.toggle_learned();
        assert!(!card.learned());
    }

    #[test]
    fn test_apply_progress() {
        let mut card = Card::new("clips/wren.mp3", "Eurasian Wren", None);
        card.apply_progress(Progress {
            learned: true,
            starred: true,
        });
        assert!(card.learned());
        assert!(card.starred());
    }
}

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

use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::search::rank_names;
use crate::store::ProgressStore;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::filter::Filter;
use crate::types::playback::PlaybackState;
use crate::types::progress::Progress;
use crate::types::view_mode::ViewMode;

pub enum Direction {
    Forward,
    Backward,
}

/// The deck session: owns the card collection, the active filter, the
/// navigation cursor, and the playback machine for the current card.
///
/// The visible view is a derived list of collection indices, recomputed
/// explicitly after every mutation. Per-position transient state (the flip
/// flag, playback) lives here, never on `Card`, and resets whenever the
/// current card changes.
pub struct Session {
    cards: Vec<Card>,
    filter: Filter,
    mode: ViewMode,
    query: String,
    view: Vec<usize>,
    cursor: usize,
    flipped: bool,
    playback: PlaybackState,
    autoplay: bool,
    store: ProgressStore,
}

impl Session {
    /// Build a session from the loaded deck, overlaying stored progress
    /// flags and randomizing the study order. An empty deck is a valid
    /// session that renders as the "no cards" state.
    pub fn new(
        mut cards: Vec<Card>,
        saved: HashMap<CardId, Progress>,
        store: ProgressStore,
        autoplay: bool,
        rng: &mut TinyRng,
    ) -> Self {
        for card in &mut cards {
            if let Some(progress) = saved.get(card.id()) {
                card.apply_progress(*progress);
            }
        }
        crate::rng::shuffle(&mut cards, rng);
        let mut session = Self {
            cards,
            filter: Filter::All,
            mode: ViewMode::Study,
            query: String::new(),
            view: Vec::new(),
            cursor: 0,
            flipped: false,
            playback: PlaybackState::Idle,
            autoplay,
            store,
        };
        session.reset_view();
        session
    }

    /// Zero cards is a first-class state, not an error.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn current(&self) -> Option<&Card> {
        self.view.get(self.cursor).map(|&i| &self.cards[i])
    }

    pub fn view_cards(&self) -> impl Iterator<Item = &Card> {
        self.view.iter().map(|&i| &self.cards[i])
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Apply a filter. The cursor and playback reset for the new first
    /// card even when the filter is unchanged.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.reset_view();
    }

    /// Move circularly through the view. A view of one card (or none) has
    /// nowhere to go, so nothing changes, not even transient state.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.view.len();
        if len <= 1 {
            return;
        }
        self.cursor = match direction {
            Direction::Forward => (self.cursor + 1) % len,
            Direction::Backward => (self.cursor + len - 1) % len,
        };
        self.enter_card();
    }

    /// Toggle between the audio face and the reveal face. Revealing pauses
    /// playback; flipping back never auto-resumes it.
    pub fn flip(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.flipped = !self.flipped;
        if self.flipped {
            self.playback = self.playback.revealed();
        }
    }

    pub fn toggle_learned(&mut self, id: &CardId) -> Fallible<()> {
        self.toggle(id, Card::toggle_learned)
    }

    pub fn toggle_starred(&mut self, id: &CardId) -> Fallible<()> {
        self.toggle(id, Card::toggle_starred)
    }

    /// Reorder the collection with an unbiased shuffle. The filter is
    /// preserved; the cursor returns to the top of the recomputed view.
    pub fn shuffle(&mut self, rng: &mut TinyRng) {
        if self.cards.len() <= 1 {
            return;
        }
        crate::rng::shuffle(&mut self.cards, rng);
        self.reset_view();
    }

    /// Switch between single-card study and the searchable catalog. The
    /// collection is untouched; transient flip/playback state resets.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.refresh_view();
        self.enter_card();
    }

    /// Set the catalog search query and rederive the view, best match
    /// first.
    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.reset_view();
    }

    /// The manual play/pause control.
    pub fn toggle_playback(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.playback = self.playback.toggled();
    }

    /// The auto-start attempt for the current card succeeded.
    pub fn audio_started(&mut self) {
        self.playback = self.playback.started();
    }

    /// The auto-start attempt was blocked. Expected under browser autoplay
    /// policies; degrades to the manual play control.
    pub fn audio_blocked(&mut self) {
        log::debug!("autoplay blocked, waiting for manual start");
        self.playback = self.playback.blocked();
    }

    /// The current clip played to its natural end.
    pub fn audio_ended(&mut self) {
        self.playback = self.playback.ended().normalized();
    }

    fn toggle(&mut self, id: &CardId, toggle: fn(&mut Card)) -> Fallible<()> {
        let Some(card) = self.cards.iter_mut().find(|card| card.id() == id) else {
            return fail(format!("no card with id {id} in the deck."));
        };
        toggle(card);
        self.persist();
        // The toggled card may have entered or left the active filter. If
        // the current card survived the recomputation it stays current;
        // otherwise the cursor returns to the top of the new view.
        if !self.refresh_view() {
            self.enter_card();
        }
        Ok(())
    }

    /// Fire-and-forget write of the full flags map. Failures are logged
    /// inside the store and never fail the toggle.
    fn persist(&self) {
        let flags: HashMap<CardId, Progress> = self
            .cards
            .iter()
            .map(|card| (card.id().clone(), card.progress()))
            .collect();
        self.store.save(&flags);
    }

    fn derive_view(&self) -> Vec<usize> {
        let kept: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| self.filter.keeps(card))
            .map(|(i, _)| i)
            .collect();
        match self.mode {
            ViewMode::Study => kept,
            ViewMode::Catalog => {
                let names: Vec<&str> = kept
                    .iter()
                    .map(|&i| self.cards[i].display_name())
                    .collect();
                rank_names(&names, &self.query)
                    .into_iter()
                    .map(|position| kept[position])
                    .collect()
            }
        }
    }

    /// Rederive the view and put the cursor back at the top.
    fn reset_view(&mut self) {
        self.view = self.derive_view();
        self.cursor = 0;
        self.enter_card();
    }

    /// Rederive the view, keeping the current card current when it is
    /// still visible. Returns false when it dropped out and the cursor was
    /// reset.
    fn refresh_view(&mut self) -> bool {
        let previous = self.view.get(self.cursor).copied();
        self.view = self.derive_view();
        match previous.and_then(|index| self.view.iter().position(|&i| i == index)) {
            Some(position) => {
                self.cursor = position;
                true
            }
            None => {
                self.cursor = 0;
                false
            }
        }
    }

    /// A new card became current: unflip, tear down the previous card's
    /// playback, and kick off the auto-start attempt in study mode.
    fn enter_card(&mut self) {
        self.flipped = false;
        self.playback = PlaybackState::Idle;
        if self.mode == ViewMode::Study && self.autoplay && !self.view.is_empty() {
            self.playback = self.playback.begin();
        }
    }
}

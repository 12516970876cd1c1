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

use std::fmt::Display;
use std::fmt::Formatter;

/// Audio playback status for the currently shown card. Exactly one card's
/// audio is ever active; changing the current card tears this down to
/// `Idle` before the next card's machine starts.
///
/// The machine is `Idle -> Loading -> Playing <-> Paused`, with natural
/// completion passing through `Ended` and settling back at `Idle` within the
/// same operation, so the play control returns to its initial appearance.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
}

impl PlaybackState {
    /// A new card became current and an auto-start attempt is underway.
    pub fn begin(self) -> Self {
        PlaybackState::Loading
    }

    /// The auto-start attempt succeeded.
    pub fn started(self) -> Self {
        match self {
            PlaybackState::Loading => PlaybackState::Playing,
            other => other,
        }
    }

    /// The auto-start attempt was blocked or failed. Not an error: the
    /// machine rests at `Paused`, where the manual play control takes over.
    pub fn blocked(self) -> Self {
        match self {
            PlaybackState::Loading => PlaybackState::Paused,
            other => other,
        }
    }

    /// The user hit the play/pause control.
    pub fn toggled(self) -> Self {
        match self {
            PlaybackState::Playing => PlaybackState::Paused,
            // A toggle mid-load cancels the pending auto-start attempt.
            PlaybackState::Loading => PlaybackState::Paused,
            PlaybackState::Idle | PlaybackState::Paused | PlaybackState::Ended => {
                PlaybackState::Playing
            }
        }
    }

    /// The clip played to its natural end.
    pub fn ended(self) -> Self {
        match self {
            PlaybackState::Playing => PlaybackState::Ended,
            other => other,
        }
    }

    /// `Ended` is transient; it settles back at `Idle`.
    pub fn normalized(self) -> Self {
        match self {
            PlaybackState::Ended => PlaybackState::Idle,
            other => other,
        }
    }

    /// Flipping to the reveal face pauses playback. Flipping back never
    /// auto-resumes.
    pub fn revealed(self) -> Self {
        match self {
            PlaybackState::Playing => PlaybackState::Paused,
            other => other,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

impl Display for PlaybackState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Loading => write!(f, "loading"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
            PlaybackState::Ended => write!(f, "ended"),
        }
    }
}

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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::session::Direction;
use crate::types::card_id::CardId;
use crate::types::filter::Filter;
use crate::types::view_mode::ViewMode;
use crate::web::state::ServerState;

/// The user intents, plus the playback outcome events posted by the
/// client-side script.
#[derive(Debug, Deserialize)]
enum Action {
    Flip,
    Next,
    Previous,
    Shuffle,
    TogglePlayback,
    ToggleLearned,
    ToggleStarred,
    SetFilter,
    SetMode,
    Search,
    Started,
    Blocked,
    Ended,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    card: Option<String>,
    filter: Option<Filter>,
    mode: Option<ViewMode>,
    query: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: ServerState, form: FormData) -> Fallible<()> {
    let mut session = state.mutable.lock().unwrap();
    match form.action {
        Action::Flip => session.flip(),
        Action::Next => session.advance(Direction::Forward),
        Action::Previous => session.advance(Direction::Backward),
        Action::Shuffle => session.shuffle(&mut TinyRng::from_clock()),
        Action::TogglePlayback => session.toggle_playback(),
        Action::ToggleLearned => {
            let id = required_card(form.card)?;
            session.toggle_learned(&id)?;
        }
        Action::ToggleStarred => {
            let id = required_card(form.card)?;
            session.toggle_starred(&id)?;
        }
        Action::SetFilter => {
            let Some(filter) = form.filter else {
                return fail("SetFilter without a filter.");
            };
            session.set_filter(filter);
        }
        Action::SetMode => {
            let Some(mode) = form.mode else {
                return fail("SetMode without a mode.");
            };
            session.set_mode(mode);
        }
        Action::Search => session.search(form.query.unwrap_or_default()),
        Action::Started => session.audio_started(),
        Action::Blocked => session.audio_blocked(),
        Action::Ended => session.audio_ended(),
    }
    Ok(())
}

fn required_card(card: Option<String>) -> Fallible<CardId> {
    match card {
        Some(card) => Ok(CardId::new(card)),
        None => fail("toggle without a card id."),
    }
}

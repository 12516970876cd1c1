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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;

use crate::session::Session;
use crate::types::card::Card;
use crate::types::filter::Filter;
use crate::types::playback::PlaybackState;
use crate::types::view_mode::ViewMode;
use crate::web::state::ServerState;
use crate::web::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let session = state.mutable.lock().unwrap();
    let body = html! {
        div.root {
            (header(&state, &session))
            @match session.mode() {
                ViewMode::Study => {
                    (study_view(&session))
                }
                ViewMode::Catalog => {
                    (catalog_view(&session))
                }
            }
            div.footer {
                (format!(
                    "{} cards · session started {}",
                    session.cards().len(),
                    state.session_started_at.format("%H:%M UTC")
                ))
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn header(state: &ServerState, session: &Session) -> Markup {
    let (mode_target, mode_label) = match session.mode() {
        ViewMode::Study => (ViewMode::Catalog, "Catalog"),
        ViewMode::Catalog => (ViewMode::Study, "Study"),
    };
    html! {
        div.header {
            h1 { (state.deck_name) }
            div.filters {
                @for filter in Filter::ALL {
                    form action="/" method="post" {
                        input type="hidden" name="action" value="SetFilter";
                        input type="hidden" name="filter" value=(filter);
                        @if filter == session.filter() {
                            button type="submit" class="active" { (filter.label()) }
                        } @else {
                            button type="submit" { (filter.label()) }
                        }
                    }
                }
            }
            div.actions {
                form action="/" method="post" {
                    input type="hidden" name="action" value="Shuffle";
                    button type="submit" { "Shuffle" }
                }
                form action="/" method="post" {
                    input type="hidden" name="action" value="SetMode";
                    input type="hidden" name="mode" value=(mode_target);
                    button type="submit" { (mode_label) }
                }
            }
        }
    }
}

fn study_view(session: &Session) -> Markup {
    if session.is_empty() {
        return empty_state("No cards", "This deck is empty.");
    }
    let Some(card) = session.current() else {
        return empty_state("No cards match this filter", "Pick another filter above.");
    };
    let progress = format!("{} / {}", session.cursor() + 1, session.view_len());
    html! {
        div.card {
            div.progress { (progress) }
            @if session.flipped() {
                (card_back(card))
            } @else {
                (card_front(card, session.playback()))
            }
            div.controls {
                form action="/" method="post" {
                    button type="submit" name="action" value="Previous" { "Previous" }
                    button type="submit" name="action" value="Flip" { "Flip" }
                    button type="submit" name="action" value="Next" { "Next" }
                }
                (flag_controls(card))
            }
        }
    }
}

fn card_front(card: &Card, playback: PlaybackState) -> Markup {
    let play_label = if playback.is_playing() { "Pause" } else { "Play" };
    html! {
        div.face.front {
            audio id="clip" src=(media_url("audio", card.audio())) preload="auto" data-state=(playback) {}
            form action="/" method="post" {
                button type="submit" name="action" value="TogglePlayback" class="play" {
                    (play_label)
                }
            }
            p.hint { "Listen, then flip to reveal the bird." }
        }
    }
}

fn card_back(card: &Card) -> Markup {
    html! {
        div.face.back {
            h2 { (card.display_name()) }
            @if let Some(image) = card.image() {
                img src=(media_url("image", image)) alt=(card.display_name());
            }
        }
    }
}

fn flag_controls(card: &Card) -> Markup {
    html! {
        div.flags {
            form action="/" method="post" {
                input type="hidden" name="action" value="ToggleStarred";
                input type="hidden" name="card" value=(card.id().as_str());
                @if card.starred() {
                    button type="submit" class="flag on" { "★ Starred" }
                } @else {
                    button type="submit" class="flag" { "☆ Star" }
                }
            }
            form action="/" method="post" {
                input type="hidden" name="action" value="ToggleLearned";
                input type="hidden" name="card" value=(card.id().as_str());
                @if card.learned() {
                    button type="submit" class="flag on" { "✓ Learned" }
                } @else {
                    button type="submit" class="flag" { "Mark learned" }
                }
            }
        }
    }
}

fn catalog_view(session: &Session) -> Markup {
    html! {
        div.catalog {
            form.search action="/" method="post" {
                input type="hidden" name="action" value="Search";
                input type="text" name="query" value=(session.query()) placeholder="Search by name" autofocus;
                button type="submit" { "Search" }
            }
            @if session.is_empty() {
                (empty_state("No cards", "This deck is empty."))
            } @else if session.view_len() == 0 {
                @if session.query().trim().is_empty() {
                    (empty_state("No cards match this filter", "Pick another filter above."))
                } @else {
                    (empty_state("No matches", "No bird name matches the search."))
                }
            } @else {
                ul.cards {
                    @for card in session.view_cards() {
                        li {
                            span.name { (card.display_name()) }
                            (flag_controls(card))
                        }
                    }
                }
            }
        }
    }
}

fn empty_state(title: &str, detail: &str) -> Markup {
    html! {
        div.empty {
            h2 { (title) }
            p { (detail) }
        }
    }
}

const PATH_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

fn media_url(kind: &str, path: &str) -> String {
    format!("/{kind}/{}", utf8_percent_encode(path, PATH_ENCODE))
}

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
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use chrono::Utc;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::config::Config;
use crate::deck::load_deck;
use crate::error::Fallible;
use crate::error::fail;
use crate::media::MediaLoader;
use crate::rng::TinyRng;
use crate::session::Session;
use crate::store::ProgressStore;
use crate::web::get::get_handler;
use crate::web::media::audio_handler;
use crate::web::media::image_handler;
use crate::web::post::post_handler;
use crate::web::state::ServerState;

pub async fn start_server(directory: PathBuf, port_override: Option<u16>) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let directory = directory.canonicalize()?;

    let config = Config::load(&directory)?;
    let port = port_override.unwrap_or_else(|| config.port());

    // Load failures abort here with a descriptive message; the session is
    // never started on a partial deck. An empty deck, on the other hand, is
    // a valid session that renders as the "no cards" state.
    let cards = load_deck(&directory)?;
    if cards.is_empty() {
        log::info!("deck has no cards");
    }

    let store = ProgressStore::open(&directory);
    let saved = store.load();
    let mut rng = TinyRng::from_clock();
    let session = Session::new(cards, saved, store, config.autoplay(), &mut rng);

    let deck_name = directory
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "birdcards".to_string());
    let session_started_at = Utc::now();
    log::debug!("Session started at {session_started_at}");

    let state = ServerState {
        deck_name,
        session_started_at,
        media: Arc::new(MediaLoader::new(directory)),
        mutable: Arc::new(Mutex::new(session)),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/audio/{*path}", get(audio_handler));
    let app = app.route("/image/{*path}", get(image_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("0.0.0.0:{port}");

    // Start a separate task to open the browser.
    let url = format!("http://{bind}/");
    let poll = bind.clone();
    tokio::spawn(async move {
        loop {
            if let Ok(stream) = TcpStream::connect(&poll).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        let _ = open::that(url);
    });

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

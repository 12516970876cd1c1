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

use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use tokio::fs::read;

use crate::media::content_type;
use crate::web::state::ServerState;

type MediaResponse = (StatusCode, [(HeaderName, &'static str); 1], Vec<u8>);

pub async fn audio_handler(
    State(state): State<ServerState>,
    Path(path): Path<String>,
) -> MediaResponse {
    serve_media(state, path).await
}

pub async fn image_handler(
    State(state): State<ServerState>,
    Path(path): Path<String>,
) -> MediaResponse {
    serve_media(state, path).await
}

/// Serve a deck-relative media file. Anything the loader rejects, and
/// anything unreadable, is a plain 404.
async fn serve_media(state: ServerState, path: String) -> MediaResponse {
    let full = match state.media.resolve(&path) {
        Ok(full) => full,
        Err(e) => {
            log::warn!("rejected media request {path:?}: {e:?}");
            return not_found();
        }
    };
    match read(&full).await {
        Ok(bytes) => (StatusCode::OK, [(CONTENT_TYPE, content_type(&full))], bytes),
        Err(e) => {
            log::warn!("could not read {full:?}: {e}");
            not_found()
        }
    }
}

fn not_found() -> MediaResponse {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain")],
        b"Not Found".to_vec(),
    )
}

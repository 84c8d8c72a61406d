//! Composition endpoints.

use crate::AppState;
use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use weblab_core::{compose, EditorSession, PartialBundle};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Compose a bundle into one HTML document (no preview guard).
pub async fn compose_document(Json(bundle): Json<PartialBundle>) -> Response {
    let bundle = bundle.normalize();
    let document = compose(&bundle.markup, &bundle.style, &bundle.script);
    ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], document).into_response()
}

/// Render the preview document.
///
/// Sources are restored the way the editor restores them: the `code` share
/// token, then the saved local record, then the default template. A token
/// that fails to decode renders an empty document.
pub async fn preview(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let session = EditorSession::restore(
        query.as_deref(),
        &state.db.local,
        Duration::from_millis(state.config.preview_debounce_ms),
    );
    (
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        session.preview().to_string(),
    )
        .into_response()
}

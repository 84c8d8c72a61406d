//! Share token endpoints.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use weblab_core::share::{decode, encode, share_url};
use weblab_core::{PartialBundle, SourceBundle};

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub token: String,
    /// Editor link for the bundle.
    pub url: String,
    /// Link rendering the bundle directly.
    pub preview_url: String,
}

/// Encode a bundle into a share token and links.
pub async fn create_share(
    State(state): State<AppState>,
    Json(bundle): Json<PartialBundle>,
) -> Json<ShareResponse> {
    let token = encode(&bundle.normalize());
    let origin = state.config.public_origin.as_str();
    Json(ShareResponse {
        url: share_url(origin, "/", &token),
        preview_url: share_url(origin, "/preview", &token),
        token: token.into_string(),
    })
}

/// Decode a share token.
///
/// # Errors
/// Returns 400 when the token is malformed.
pub async fn open_share(Path(token): Path<String>) -> Result<Json<SourceBundle>, HttpError> {
    Ok(Json(decode(&token)?.normalize()))
}

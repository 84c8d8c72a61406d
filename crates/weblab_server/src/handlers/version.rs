//! Version history endpoints.

use super::normalize::caller_account;
use super::visible_project;
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use weblab_core::models::version::CommitVersionRequest;
use weblab_core::models::VersionView;
use weblab_core::{SourceBundle, StoreError};

/// # Errors
/// Returns 404 when the project is not visible to the caller.
pub async fn list_versions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<VersionView>>, HttpError> {
    let caller = caller_account(&headers);
    visible_project(&state, &id, caller.as_ref())?;
    let versions = state.db.versions.list(&id)?;
    Ok(Json(versions.iter().map(VersionView::from).collect()))
}

/// Commit a snapshot. Omitted sources default to the project's current ones.
///
/// # Errors
/// Returns 404 when not visible, 403 without edit rights.
pub async fn commit_version(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<CommitVersionRequest>,
) -> Result<Json<VersionView>, HttpError> {
    let caller = caller_account(&headers);
    let (record, access) = visible_project(&state, &id, caller.as_ref())?;
    if !access.can_edit() {
        return Err(HttpError::forbidden("You cannot edit this project"));
    }
    let bundle = SourceBundle {
        markup: req.html.unwrap_or(record.bundle.markup),
        style: req.css.unwrap_or(record.bundle.style),
        script: req.js.unwrap_or(record.bundle.script),
    };
    let version = state.db.versions.commit(&id, bundle, &req.commit_message)?;
    Ok(Json(VersionView::from(&version)))
}

/// # Errors
/// Returns 404 when the project is not visible or the version is missing.
pub async fn get_version(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, number)): Path<(String, u32)>,
) -> Result<Json<VersionView>, HttpError> {
    let caller = caller_account(&headers);
    visible_project(&state, &id, caller.as_ref())?;
    let version = state
        .db
        .versions
        .get(&id, number)?
        .ok_or(StoreError::NotFound)?;
    Ok(Json(VersionView::from(&version)))
}

//! Collaborator endpoints. Grants control access only.

use super::normalize::caller_account;
use super::visible_project;
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use weblab_core::access::Access;
use weblab_core::models::collaborator::{AddCollaboratorRequest, UpdatePermissionRequest};
use weblab_core::models::{AccountRef, Collaborator};
use weblab_core::StoreError;

fn require_manage(access: Access) -> Result<(), HttpError> {
    if access.can_manage() {
        Ok(())
    } else {
        Err(HttpError::forbidden(
            "Only the owner or an admin can manage collaborators",
        ))
    }
}

fn parse_user(raw: &str) -> Result<AccountRef, HttpError> {
    AccountRef::parse(raw).ok_or_else(|| HttpError::bad_request("user_id is required"))
}

/// # Errors
/// Returns 404 when the project is not visible to the caller.
pub async fn list_collaborators(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<Collaborator>>, HttpError> {
    let caller = caller_account(&headers);
    visible_project(&state, &id, caller.as_ref())?;
    Ok(Json(state.db.collaborators.list(&id)?))
}

/// # Errors
/// Returns 403 without manage rights, 409 for an existing collaborator.
pub async fn add_collaborator(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<AddCollaboratorRequest>,
) -> Result<Json<Collaborator>, HttpError> {
    let caller = caller_account(&headers);
    let (_, access) = visible_project(&state, &id, caller.as_ref())?;
    require_manage(access)?;
    let user = parse_user(&req.user_id)?;
    let collaborator = state
        .db
        .collaborators
        .add(&id, &user, req.permission_level)?;
    Ok(Json(collaborator))
}

/// # Errors
/// Returns 403 without manage rights, 404 when the account is not a collaborator.
pub async fn update_collaborator(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, user_id)): Path<(String, String)>,
    Json(req): Json<UpdatePermissionRequest>,
) -> Result<Json<Collaborator>, HttpError> {
    let caller = caller_account(&headers);
    let (_, access) = visible_project(&state, &id, caller.as_ref())?;
    require_manage(access)?;
    let user = parse_user(&user_id)?;
    let collaborator = state
        .db
        .collaborators
        .set_permission(&id, &user, req.permission_level)?;
    Ok(Json(collaborator))
}

/// Revoke a grant. Collaborators may also remove themselves.
///
/// # Errors
/// Returns 403 without manage rights, 404 when the account is not a collaborator.
pub async fn remove_collaborator(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let caller = caller_account(&headers);
    let (_, access) = visible_project(&state, &id, caller.as_ref())?;
    let user = parse_user(&user_id)?;
    if caller.as_ref() != Some(&user) {
        require_manage(access)?;
    }
    if !state.db.collaborators.remove(&id, &user)? {
        return Err(StoreError::NotFound.into());
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

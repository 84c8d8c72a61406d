//! Project endpoints.

use super::normalize::{caller_account, clamp_list_limit};
use super::visible_project;
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use weblab_core::models::project::{CreateProjectRequest, ListQuery, UpdateProjectRequest};
use weblab_core::models::{ProjectFilter, ProjectRecord, ProjectView, Visibility};
use weblab_core::stats::{self, ProjectStats};
use weblab_core::{RemoteStore, SourceBundle};

/// Create a project owned by the caller (anonymous callers create public,
/// ownerless projects).
///
/// # Errors
/// Returns 400 on validation failure.
pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<ProjectView>, HttpError> {
    let owner = caller_account(&headers);
    let bundle = SourceBundle::new(
        req.html.unwrap_or_default(),
        req.css.unwrap_or_default(),
        req.js.unwrap_or_default(),
    );
    let visibility = Visibility::from_is_public(req.is_public.unwrap_or(true));
    let record = ProjectRecord::new(req.name, bundle, visibility, owner);
    let saved = state.db.save(record)?;
    tracing::info!(project_id = ?saved.id, "Created project");
    Ok(Json(ProjectView::from(&saved)))
}

/// Fetch a project the caller may view.
///
/// # Errors
/// Returns 404 when missing or not visible to the caller.
pub async fn get_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ProjectView>, HttpError> {
    let caller = caller_account(&headers);
    let (record, _) = visible_project(&state, &id, caller.as_ref())?;
    Ok(Json(ProjectView::from(&record)))
}

/// Update a project's name, sources, or visibility. Ownership never changes.
///
/// # Errors
/// Returns 404 when not visible, 403 without edit rights.
pub async fn update_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectView>, HttpError> {
    let caller = caller_account(&headers);
    let (mut record, access) = visible_project(&state, &id, caller.as_ref())?;
    if !access.can_edit() {
        return Err(HttpError::forbidden("You cannot edit this project"));
    }
    let changes_visibility = req
        .is_public
        .is_some_and(|is_public| is_public != record.visibility.is_public());
    if changes_visibility && !(access.is_owner() || access.can_manage()) {
        return Err(HttpError::forbidden(
            "Only the owner or an admin can change visibility",
        ));
    }
    req.apply_to(&mut record);
    let saved = state.db.save(record)?;
    Ok(Json(ProjectView::from(&saved)))
}

/// Delete a project with its history and collaborators.
///
/// # Errors
/// Returns 404 when not visible, 403 unless the caller owns the project.
pub async fn delete_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let caller = caller_account(&headers);
    let (_, access) = visible_project(&state, &id, caller.as_ref())?;
    if !access.can_delete() {
        return Err(HttpError::forbidden(
            "Only the project owner can delete this project",
        ));
    }
    state.db.delete(&id)?;
    tracing::info!(project_id = %id, "Deleted project");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// List projects visible to the caller, newest first.
///
/// # Errors
/// Returns an error when storage access fails.
pub async fn list_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProjectView>>, HttpError> {
    let filter = ProjectFilter {
        viewer: caller_account(&headers),
        owned_only: query.mine.unwrap_or(false),
        limit: Some(clamp_list_limit(query.limit)),
    };
    let records = state.db.list(&filter)?;
    Ok(Json(records.iter().map(ProjectView::from).collect()))
}

/// Dashboard counts for the caller.
///
/// # Errors
/// Returns an error when storage access fails.
pub async fn project_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProjectStats>, HttpError> {
    let caller = caller_account(&headers);
    Ok(Json(stats::collect(state.db.as_ref(), caller.as_ref())?))
}

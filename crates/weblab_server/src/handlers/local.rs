//! Local record endpoints.

use crate::{error::HttpError, AppState};
use axum::{extract::State, Json};
use weblab_core::store::LocalRecord;
use weblab_core::{LocalStore, StoreError};

/// Read the saved local record.
///
/// # Errors
/// Returns 404 when nothing has been saved yet.
pub async fn get_local(State(state): State<AppState>) -> Result<Json<LocalRecord>, HttpError> {
    let local = state.db.local.load()?.ok_or(StoreError::NotFound)?;
    Ok(Json(LocalRecord::new(&local.bundle, &local.settings)))
}

/// Overwrite the local record. Absent fields take their defaults.
///
/// # Errors
/// Returns an error when persistence fails.
pub async fn put_local(
    State(state): State<AppState>,
    Json(record): Json<LocalRecord>,
) -> Result<Json<LocalRecord>, HttpError> {
    let local = record.into_state();
    state.db.local.save(&local.bundle, &local.settings)?;
    Ok(Json(LocalRecord::new(&local.bundle, &local.settings)))
}

//! HTTP request handlers.

/// Collaborator endpoints.
pub mod collaborator;
/// Composition and preview endpoints.
pub mod compose;
/// Download endpoints.
pub mod export;
/// Local record endpoints.
pub mod local;
pub(crate) mod normalize;
/// Project endpoints.
pub mod project;
/// Share token endpoints.
pub mod share;
/// Template catalog endpoints.
pub mod templates;
/// Version history endpoints.
pub mod version;

use crate::{error::HttpError, AppState};
use weblab_core::access::{access_for, Access};
use weblab_core::models::{AccountRef, ProjectRecord};
use weblab_core::{RemoteStore, StoreError};

/// Load a project the caller may view.
///
/// Projects the caller may not view are reported as missing.
pub(crate) fn visible_project(
    state: &AppState,
    id: &str,
    caller: Option<&AccountRef>,
) -> Result<(ProjectRecord, Access), HttpError> {
    let record = state.db.get(id)?.ok_or(StoreError::NotFound)?;
    let access = access_for(&state.db, &record, caller)?;
    if !access.can_view() {
        return Err(StoreError::NotFound.into());
    }
    Ok((record, access))
}

//! Template catalog endpoints.

use crate::error::HttpError;
use axum::{extract::Path, Json};
use weblab_core::templates::{self, Template};
use weblab_core::StoreError;

pub async fn list_templates() -> Json<&'static [Template]> {
    Json(templates::all())
}

/// # Errors
/// Returns 404 for an unknown template id.
pub async fn get_template(Path(id): Path<String>) -> Result<Json<&'static Template>, HttpError> {
    templates::find(&id)
        .map(Json)
        .ok_or_else(|| StoreError::NotFound.into())
}

//! Download endpoints.

use crate::error::HttpError;
use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use weblab_core::export::{export_archive, export_single_file, ExportArtifact};
use weblab_core::PartialBundle;

#[derive(Debug, Deserialize, Default)]
pub struct ExportQuery {
    pub name: Option<String>,
}

fn attachment(artifact: ExportArtifact) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    (
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

/// Download the composed document as a single HTML file.
pub async fn export_html(
    Query(query): Query<ExportQuery>,
    Json(bundle): Json<PartialBundle>,
) -> Response {
    attachment(export_single_file(
        &bundle.normalize(),
        query.name.as_deref(),
    ))
}

/// Download the sources as a zip of `index.html`, `styles.css`, `script.js`.
///
/// # Errors
/// Returns 500 if the archive cannot be built.
pub async fn export_zip(
    Query(query): Query<ExportQuery>,
    Json(bundle): Json<PartialBundle>,
) -> Result<Response, HttpError> {
    let artifact = export_archive(&bundle.normalize(), query.name.as_deref())?;
    Ok(attachment(artifact))
}

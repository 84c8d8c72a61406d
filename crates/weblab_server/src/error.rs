//! HTTP error mapping for core failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use weblab_core::{DecodeError, ExportError, StoreError};

/// Any failure a handler can return.
#[derive(Debug)]
pub enum HttpError {
    Store(StoreError),
    Decode(DecodeError),
    Export(ExportError),
}

impl From<StoreError> for HttpError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DecodeError> for HttpError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<ExportError> for HttpError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl HttpError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Store(StoreError::Forbidden(message.into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Store(StoreError::BadRequest(message.into()))
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Store(StoreError::NotFound) => (StatusCode::NOT_FOUND, "Not found".to_string()),
            Self::Store(StoreError::BadRequest(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Store(StoreError::Forbidden(msg)) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::Store(StoreError::Conflict(msg)) => (StatusCode::CONFLICT, msg.clone()),
            Self::Store(err) => {
                tracing::error!("Storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Decode(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Export(err) => {
                tracing::error!("Export error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, so handlers can
 * return `Result<_, BackendError>` directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Post not found",
 *   "status": 404
 * }
 * ```
 *
 * Extractor rejections from Axum's `Json` and `Path` convert into
 * `BackendError` as well, so malformed input gets the same body.
 */
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self.message());
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::handler(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            // No record can have an id that does not parse
            PathRejection::FailedToDeserializePathParams(_) => BackendError::not_found("Not found"),
            other => BackendError::handler(other.status(), other.body_text()),
        }
    }
}

/**
 * Body and Path Extractors
 *
 * Thin wrappers around Axum's `Json` and `Path` whose rejections are
 * converted into [`BackendError`], so a malformed body or id gets the same
 * `{"error", "status"}` body as every other failure.
 *
 * - [`ApiJson`] - keeps Axum's status (400, 415 or 422)
 * - [`ApiPath`] - a path segment that does not parse (e.g. a non-numeric
 *   post id) is reported as 404, since no record can have that id
 */
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Typed path parameters
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/items/{id}",
                get(|ApiPath(id): ApiPath<i64>| async move { id.to_string() }),
            )
            .route(
                "/items",
                post(|ApiJson(payload): ApiJson<Payload>| async move { payload.name }),
            )
    }

    async fn error_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_numeric_path_parses() {
        let response = app()
            .oneshot(http::Request::get("/items/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_numeric_path_is_not_found_json() {
        let response = app()
            .oneshot(http::Request::get("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = error_body(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_json_error() {
        let request = http::Request::post("/items")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_body(response).await;
        assert_eq!(body["status"], 400);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_content_type_keeps_status() {
        let request = http::Request::post("/items")
            .body(Body::from(r#"{"name":"x"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(error_body(response).await["status"], 415);
    }
}

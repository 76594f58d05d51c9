//! JSON error responses for the HTTP API.
//!
//! [`ApiError`] turns store outcomes and request rejections into a status
//! code plus a `{"error": {"code", "message"}}` body. Callers branch on
//! `code`, never on `message`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::storage::StoreError;

/// An error response with a stable machine-readable code.
#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(code: &'static str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("invalid_request", StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("conflict", StatusCode::CONFLICT, message)
    }

    fn status(&self) -> StatusCode {
        self.status
    }

    fn code(&self) -> &'static str {
        self.code
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::not_found(err.to_string()),
            StoreError::Conflict { .. } => ApiError::conflict(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(
            status = %self.status(),
            code = self.code(),
            message = %self.message,
            "request rejected"
        );
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: &self.message,
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

/// `Json` extractor whose rejection is an [`ApiError`] with code
/// `invalid_request`, so malformed bodies get the same error shape as
/// every other failure.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_request(e.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn store_errors_map_to_status_codes() {
        let not_found = ApiError::from(StoreError::NotFound {
            id: "9".to_string(),
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.code(), "not_found");

        let conflict = ApiError::from(StoreError::Conflict {
            id: "1".to_string(),
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(conflict.code(), "conflict");
    }

    #[tokio::test]
    async fn into_response_writes_error_envelope() {
        let response = ApiError::invalid_request("bad body").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({"error": {"code": "invalid_request", "message": "bad body"}})
        );
    }

    #[tokio::test]
    async fn not_found_message_names_the_id() {
        let response = ApiError::from(StoreError::NotFound {
            id: "999".to_string(),
        })
        .into_response();

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
        assert!(json["error"]["message"].as_str().unwrap().contains("999"));
    }
}

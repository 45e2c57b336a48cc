//! Conversion of failures into envelope responses.
//!
//! Handlers return `ApiError`, which pairs the failing `AppError` with the
//! operation it interrupted. The operation decides the envelope message and
//! the error variant decides the status code.

use axum::{
    Json,
    body::Body,
    extract::{Request, rejection::QueryRejection},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::{Envelope, UserAction};
use crate::error::AppError;

/// Message used when a path id does not parse as an integer.
pub const INVALID_ID_MESSAGE: &str = "Invalid user ID.";

/// An `AppError` raised while performing `action`.
#[derive(Debug)]
pub struct ApiError {
    pub action: UserAction,
    pub error: AppError,
}

impl ApiError {
    pub fn new(action: UserAction, error: impl Into<AppError>) -> Self {
        Self {
            action,
            error: error.into(),
        }
    }

    /// Query string that could not be deserialized at all.
    pub fn from_query_rejection(action: UserAction, rejection: QueryRejection) -> Self {
        Self::new(
            action,
            AppError::BadRequest {
                message: rejection.body_text(),
            },
        )
    }

    pub fn status_code(&self) -> StatusCode {
        error_to_status_code(&self.error)
    }

    fn message(&self) -> &'static str {
        match self.error {
            AppError::InvalidId { .. } => INVALID_ID_MESSAGE,
            _ => self.action.failure_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.error.detail();

        if status.is_server_error() {
            tracing::error!(
                action = self.action.as_str(),
                error = %self.error,
                detail = %detail,
                "Request failed"
            );
        } else {
            tracing::debug!(action = self.action.as_str(), detail = %detail, "Rejected request");
        }

        (status, Json(Envelope::failure(self.message(), detail))).into_response()
    }
}

/// Maps an AppError variant to its HTTP status code.
///
/// - BadRequest, InvalidId → 400
/// - Database, ConnectionPool, Configuration, Internal → 500
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::BadRequest { .. } | AppError::InvalidId { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. }
        | AppError::ConnectionPool { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Rewrites error responses that are not JSON (unknown route, wrong method)
/// into failure envelopes.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, usize::MAX)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let detail = if original.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        original
    };
    let message = match status {
        StatusCode::NOT_FOUND => "The requested resource was not found.",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint.",
        s if s.is_server_error() => "An internal server error occurred.",
        _ => "Bad request.",
    };

    let body = match serde_json::to_vec(&Envelope::failure(message, detail)) {
        Ok(bytes) => bytes,
        Err(_) => return Response::from_parts(parts, Body::empty()),
    };
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(body))
}

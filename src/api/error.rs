use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ApiResponse;
use crate::error::ServiceError;

/// Boundary mapping of the closed error taxonomy to HTTP statuses. Client
/// errors keep their message; server faults are logged here and replaced by a
/// generic body so internal detail never leaks to the caller.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Authorization(msg) => (StatusCode::FORBIDDEN, msg),
            Self::Invariant(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(message);
        (status, Json(body)).into_response()
    }
}

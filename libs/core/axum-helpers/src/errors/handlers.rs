use axum::{http::StatusCode, response::IntoResponse, response::Response};

use crate::response::StatusResponse;

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    StatusResponse::<()>::error("The requested resource was not found", StatusCode::NOT_FOUND)
        .into_response()
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    StatusResponse::<()>::error(
        "The HTTP method is not allowed for this resource",
        StatusCode::METHOD_NOT_ALLOWED,
    )
    .into_response()
}

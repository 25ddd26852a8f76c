//! Uniform response envelope.
//!
//! Every handler built on these helpers answers with the same JSON shape,
//! successful or not:
//!
//! ```json
//! { "data": { ... }, "message": "Success", "status": 200, "success": true }
//! ```
//!
//! The HTTP status line always matches the `status` field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message used when a successful call has nothing more specific to say.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Response envelope `{data, message, status, success}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse<T> {
    /// Payload; `null` on failure
    pub data: Option<T>,
    /// Human-readable outcome
    pub message: String,
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// `true` for 2xx outcomes
    pub success: bool,
}

impl<T> StatusResponse<T> {
    /// 200 with the default message.
    pub fn ok(data: T) -> Self {
        Self::with_status(data, DEFAULT_SUCCESS_MESSAGE, StatusCode::OK)
    }

    /// 200 with a caller-supplied message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self::with_status(data, message, StatusCode::OK)
    }

    /// 201 with a caller-supplied message.
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(data, message, StatusCode::CREATED)
    }

    /// Successful envelope with an explicit status.
    pub fn with_status(data: T, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status: status.as_u16(),
            success: true,
        }
    }

    /// Failed envelope: no data, `success: false`.
    pub fn error(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: None,
            message: message.into(),
            status: status.as_u16(),
            success: false,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl<T: Serialize> IntoResponse for StatusResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_serializes_all_fields() {
        let envelope = StatusResponse::ok(json!({ "name": "Lamp" }));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "data": { "name": "Lamp" },
                "message": "Success",
                "status": 200,
                "success": true
            })
        );
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let envelope: StatusResponse<()> = StatusResponse::error("Product not found", StatusCode::NOT_FOUND);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["status"], 404);
        assert_eq!(value["success"], false);
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_into_response_uses_envelope_status() {
        let response = StatusResponse::created(1, "created").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = StatusResponse::ok_with_message(1, "updated").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = StatusResponse::<()>::error("boom", StatusCode::BAD_REQUEST).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_status_falls_back_to_500() {
        let envelope = StatusResponse::<()> {
            data: None,
            message: "odd".to_string(),
            status: 42,
            success: false,
        };
        assert_eq!(envelope.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

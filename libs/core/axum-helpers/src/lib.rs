//! # Axum Helpers
//!
//! Building blocks shared by the HTTP services in this workspace.
//!
//! - **[`response`]**: the `{data, message, status, success}` envelope
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (security headers)
//! - **[`errors`]**: fallback handlers for requests that match no route

pub mod errors;
pub mod http;
pub mod response;
pub mod server;

pub use response::{DEFAULT_SUCCESS_MESSAGE, StatusResponse};

pub use server::{
    HealthCheckFuture, HealthResponse, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

pub use http::security_headers;

//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Liveness and readiness routes, served at the root
pub fn health_routes(state: &AppState) -> Router {
    axum_helpers::health_router(state.config.app).merge(health::router(state.clone()))
}

//! Readiness endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};

use crate::db;
use crate::state::AppState;

/// `GET /ready`: pings MongoDB when it is the backend
async fn ready(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(ref mongo) = state.mongo {
        checks.push((
            "mongodb",
            Box::pin(async move {
                if db::ping(&mongo.client).await {
                    Ok(())
                } else {
                    Err("ping failed".to_string())
                }
            }),
        ));
    }

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}

//! Products API routes

use axum::Router;
use domain_products::{
    handlers, InMemoryProductRepository, MongoProductRepository, ProductController,
};

use crate::state::AppState;

/// Products router over the configured backend
pub fn router(state: &AppState) -> Router {
    match state.mongo {
        Some(ref mongo) => {
            handlers::router(ProductController::new(MongoProductRepository::new(&mongo.db)))
        }
        None => handlers::router(ProductController::new(InMemoryProductRepository::new())),
    }
}

/// Create the products indexes; a no-op for the in-memory backend
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    if let Some(ref mongo) = state.mongo {
        MongoProductRepository::new(&mongo.db).init_indexes().await?;
    }
    Ok(())
}

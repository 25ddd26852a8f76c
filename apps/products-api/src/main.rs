//! Products API - REST server

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod db;
mod openapi;
mod state;

use config::Config;
use state::{AppState, MongoState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(backend = %config.storage, "Starting {} v{}", config.app.name, config.app.version);

    let mongo = match config.mongodb {
        Some(ref mongo_config) => {
            let client = db::connect_with_retry(mongo_config, db::RetryConfig::default()).await?;
            let db = client.database(mongo_config.database());
            info!(
                "Successfully connected to MongoDB database: {}",
                mongo_config.database()
            );
            Some(MongoState { client, db })
        }
        None => None,
    };

    let state = AppState {
        config: config.clone(),
        mongo,
    };

    api::products::init_indexes(&state).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &state.config.server)?;
    let app = router.merge(api::health_routes(&state));

    let shutdown_client = state.mongo.as_ref().map(|mongo| mongo.client.clone());
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(client) = shutdown_client {
                info!("Shutting down: closing MongoDB connections");
                client.shutdown().await;
                info!("MongoDB connection closed");
            }
        },
    )
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}

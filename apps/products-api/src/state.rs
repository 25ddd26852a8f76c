//! Application state management

use mongodb::{Client, Database};

/// Connected MongoDB handles, shared by routes, readiness and shutdown
#[derive(Clone)]
pub struct MongoState {
    pub client: Client,
    pub db: Database,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// `None` for the in-memory backend
    pub mongo: Option<MongoState>,
}

//! MongoDB connection bootstrap

use core_config::mongodb::MongoConfig;
use mongodb::{bson::doc, options::ClientOptions, Client};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Startup retry policy
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    fn next_delay(&self, delay: u64) -> u64 {
        ((delay as f64 * self.backoff_multiplier) as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Retry `operation` with exponential backoff until it succeeds or the
/// retry budget is spent; the last error is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay_ms;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("Operation succeeded after {} retries", attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                attempt += 1;
                if attempt > config.max_retries {
                    warn!("Operation failed after {} attempts: {}", attempt, e);
                    return Err(e);
                }

                let current_delay = if config.use_jitter {
                    apply_jitter(delay)
                } else {
                    delay
                };
                warn!(
                    "Operation failed (attempt {}/{}): {}. Retrying in {}ms",
                    attempt, config.max_retries, e, current_delay
                );

                tokio::time::sleep(Duration::from_millis(current_delay)).await;
                delay = config.next_delay(delay);
            }
        }
    }
}

/// Between 50% and 100% of `delay`
fn apply_jitter(delay: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let random_factor =
        (RandomState::new().hash_one(std::time::SystemTime::now()) % 50) as f64 / 100.0 + 0.5;

    (delay as f64 * random_factor) as u64
}

fn client_options(mut options: ClientOptions, config: &MongoConfig) -> ClientOptions {
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.server_selection_timeout());
    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }
    options
}

/// Connect and verify the server answers a ping
pub async fn connect(config: &MongoConfig) -> Result<Client, ConnectError> {
    info!("Attempting to connect to MongoDB database {}", config.database());

    let options = client_options(ClientOptions::parse(config.url()).await?, config);
    let client = Client::with_options(options)?;

    if !ping(&client).await {
        return Err(ConnectError::ConnectionFailed(
            "MongoDB did not answer ping".to_string(),
        ));
    }

    info!("Successfully connected to MongoDB");
    Ok(client)
}

pub async fn connect_with_retry(
    config: &MongoConfig,
    retry_config: RetryConfig,
) -> Result<Client, ConnectError> {
    retry_with_backoff(|| connect(config), retry_config).await
}

/// Readiness probe for the MongoDB backend
pub async fn ping(client: &Client) -> bool {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .inspect_err(|e| warn!("MongoDB ping failed: {}", e))
        .is_ok()
}

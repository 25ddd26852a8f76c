//! Configuration for Products API

use core_config::{
    app_info, env_or_default, mongodb::MongoConfig, server::ServerConfig, AppInfo, ConfigError,
    FromEnv,
};
use std::str::FromStr;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Where products are stored
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    #[strum(to_string = "mongodb", serialize = "mongo")]
    MongoDb,
    Memory,
}

impl FromEnv for StorageBackend {
    /// `STORAGE_BACKEND`, defaulting to `mongodb`
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("STORAGE_BACKEND", "mongodb");
        StorageBackend::from_str(raw.trim()).map_err(|_| ConfigError::ParseError {
            key: "STORAGE_BACKEND".to_string(),
            details: format!("unknown backend '{raw}', expected 'mongodb' or 'memory'"),
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub storage: StorageBackend,
    /// Present only for the MongoDB backend
    pub mongodb: Option<MongoConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = app_info!();
        let storage = StorageBackend::from_env()?;
        let mongodb = match storage {
            StorageBackend::MongoDb => {
                let mongo = MongoConfig::from_env()?;
                Some(match mongo.app_name {
                    Some(_) => mongo,
                    None => mongo.with_app_name(app.name),
                })
            }
            StorageBackend::Memory => None,
        };

        Ok(Self {
            app,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            storage,
            mongodb,
        })
    }
}

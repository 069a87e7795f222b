use std::{env, fmt::Display, str::FromStr};

use anyhow::{Result, anyhow};
use tracing::{info, warn};

pub const MEMORY_URL: &str = "memory://";

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_name: String,
    pub cors_origins: CorsOrigins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl Config {
    pub fn load() -> Result<Self> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded variables from .env");
        }

        Ok(Self {
            port: try_load("RUST_PORT", "8001")?,
            database_url: try_load("REDIS_URL", "redis://127.0.0.1:6379")?,
            db_name: try_load("DB_NAME", "quickcommerce")?,
            cors_origins: parse_origins(&try_load::<String>("CORS_ORIGINS", "*")?),
        })
    }

    /// In-process store on an ephemeral namespace, for tests and demos.
    pub fn in_memory() -> Self {
        Self {
            port: 0,
            database_url: MEMORY_URL.to_string(),
            db_name: "test".to_string(),
            cors_origins: CorsOrigins::Any,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Environment misconfigured: {key}={raw}")
    })
}

pub fn parse_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}

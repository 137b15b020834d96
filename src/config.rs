// src/config.rs
use std::net::IpAddr;

use http::HeaderValue;
use thiserror::Error;

/// Fixed credentials of the local development database.
pub const LOCAL_DB_HOST: &str = "localhost";
pub const LOCAL_DB_PORT: u16 = 5432;
pub const LOCAL_DB_USER: &str = "postgres";
pub const LOCAL_DB_PASSWORD: &str = "postgres1";
pub const LOCAL_DB_NAME: &str = "ecommerce_1";

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    Gateway(GatewayConfig),
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub target: DatabaseTarget,
    pub max_connections: u32,
}

/// Which database the pool talks to. Chosen once from `DEPLOY_MODE`.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseTarget {
    /// Fixed local credentials, no TLS.
    Local,
    /// Connection string from the environment; TLS is required but the
    /// server certificate is not verified.
    Cloud { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CorsConfig {
    Any,
    Origins(Vec<HeaderValue>),
}

/// Where the client data layer sends its requests.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientConfig {
    Api { base_url: String },
    Gateway(GatewayConfig),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or(&lookup, "PORT", 3000u16)?;

        let storage = match lookup("STORAGE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StorageConfig::Postgres(DatabaseConfig::from_lookup(&lookup)?),
            "gateway" => StorageConfig::Gateway(GatewayConfig::from_lookup(&lookup)?),
            "memory" => StorageConfig::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let cors = match lookup("CORS_ALLOWED_ORIGINS") {
            None => CorsConfig::Any,
            Some(raw) if raw.trim() == "*" => CorsConfig::Any,
            Some(raw) => CorsConfig::Origins(
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(|origin| {
                        origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                            name: "CORS_ALLOWED_ORIGINS",
                            value: origin.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(Self {
            server: ServerConfig { host, port },
            storage,
            cors,
        })
    }
}

impl DatabaseConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = match lookup("DEPLOY_MODE").as_deref().unwrap_or("local") {
            "local" => DatabaseTarget::Local,
            "cloud" => DatabaseTarget::Cloud {
                url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    name: "DEPLOY_MODE",
                    value: other.to_string(),
                })
            }
        };
        let max_connections = parse_or(lookup, "DB_MAX_CONNECTIONS", 5u32)?;

        Ok(Self { target, max_connections })
    }
}

impl GatewayConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            base_url: lookup("GATEWAY_URL").ok_or(ConfigError::Missing("GATEWAY_URL"))?,
            api_key: lookup("GATEWAY_API_KEY").ok_or(ConfigError::Missing("GATEWAY_API_KEY"))?,
        })
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("CATALOG_CLIENT_BACKEND").as_deref().unwrap_or("api") {
            "api" => Ok(ClientConfig::Api {
                base_url: lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            }),
            "gateway" => Ok(ClientConfig::Gateway(GatewayConfig::from_lookup(&lookup)?)),
            other => Err(ConfigError::Invalid {
                name: "CATALOG_CLIENT_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

//! Service configuration from environment variables (a `.env` file is honored by the server).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_APP_NAME: &str = "etudiantService";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Which storage collaborator backs the resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: "STORE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Required when `store` is Postgres.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    /// Prefix of the alert headers (`X-{app_name}-alert`).
    pub app_name: String,
    pub max_connections: u32,
    pub store: StoreKind,
    pub body_limit_bytes: usize,
}

impl ServiceConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL");
        let store = match get("STORE") {
            Some(s) => s.parse()?,
            None => StoreKind::Postgres,
        };
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        let bind_addr = parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR.parse().ok())?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), Some(DEFAULT_MAX_CONNECTIONS))?;
        let body_limit_bytes = parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), Some(DEFAULT_BODY_LIMIT_BYTES))?;

        Ok(ServiceConfig {
            database_url,
            bind_addr,
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.into()),
            max_connections,
            store,
            body_limit_bytes,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue { key, value }),
        None => default.ok_or(ConfigError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let c = config(&[("DATABASE_URL", "postgres://localhost/etudiants")]).unwrap();
        assert_eq!(c.store, StoreKind::Postgres);
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(c.app_name, DEFAULT_APP_NAME);
        assert_eq!(c.max_connections, 5);
        assert_eq!(c.body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn postgres_store_requires_database_url() {
        assert!(matches!(config(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
        assert!(matches!(config(&[("DATABASE_URL", "  ")]), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn memory_store_needs_no_database() {
        let c = config(&[("STORE", "Memory"), ("APP_NAME", "ms3"), ("BIND_ADDR", "127.0.0.1:9000")]).unwrap();
        assert_eq!(c.store, StoreKind::Memory);
        assert_eq!(c.app_name, "ms3");
        assert_eq!(c.bind_addr.port(), 9000);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = config(&[("STORE", "memory"), ("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", .. }));
        let err = config(&[("STORE", "redis")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for STORE: redis");
    }
}

use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Application configuration, built once in `main` and passed into
/// components through shared state. Components never read the process
/// environment themselves.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let connection_string =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        Ok(Self {
            environment,
            port: parse_or("PORT", 3000),
            database: DatabaseConfig {
                connection_string,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
                connect_timeout_secs: parse_or("DATABASE_CONNECT_TIMEOUT", 30),
            },
            catalog: CatalogConfig {
                default_limit: parse_or("CATALOG_DEFAULT_LIMIT", 50),
                max_limit: parse_or("CATALOG_MAX_LIMIT", 500),
            },
            auth: AuthConfig {
                session_ttl_hours: parse_or("SESSION_TTL_HOURS", 24 * 7),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    env::var(var).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_an_error() {
        // Serialize env mutation with the other test below.
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("DATABASE_URL");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::MissingVar("DATABASE_URL"))
        ));
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("DATABASE_URL", "postgres://localhost/storefront");
        std::env::remove_var("CATALOG_DEFAULT_LIMIT");
        std::env::remove_var("SESSION_TTL_HOURS");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.catalog.default_limit, 50);
        assert_eq!(config.auth.session_ttl_hours, 24 * 7);
        assert_eq!(config.database.max_connections, 10);

        std::env::remove_var("DATABASE_URL");
    }

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
}

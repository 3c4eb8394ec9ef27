//! Configuración de variables de entorno

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::services::RouteEngineConfig;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Sin URL se usa el store en memoria
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub cors_origins: Vec<String>,
    pub reserve_on_generate: bool,
    pub seed_demo_data: bool,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: None,
            database_max_connections: 10,
            cors_origins: Vec::new(),
            reserve_on_generate: false,
            seed_demo_data: true,
            log_level: tracing::Level::INFO,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        _ => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno; valores mal formados fallan
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let log_level = match env::var("LOG_LEVEL") {
            Ok(raw) if !raw.trim().is_empty() => tracing::Level::from_str(raw.trim())
                .map_err(|_| anyhow::anyhow!("LOG_LEVEL must be a valid level, got '{}'", raw))?,
            _ => defaults.log_level,
        };

        let mut config = Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            database_url: env::var("DATABASE_URL").ok().filter(|u| !u.trim().is_empty()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            reserve_on_generate: parse_var("RESERVE_ON_GENERATE", defaults.reserve_on_generate)?,
            seed_demo_data: false,
            log_level,
            environment,
        };
        // Por defecto solo se siembran datos en desarrollo
        config.seed_demo_data = parse_var("SEED_DEMO_DATA", config.is_development())?;

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn engine(&self) -> RouteEngineConfig {
        RouteEngineConfig {
            reserve_on_generate: self.reserve_on_generate,
        }
    }
}

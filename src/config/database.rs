//! Configuración de base de datos
//!
//! Este módulo maneja la configuración del pool de PostgreSQL con SQLx.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Tamaño del pool desde `DB_MAX_CONNECTIONS` / `DB_MIN_CONNECTIONS`
    pub fn from_env(url: impl Into<String>) -> Result<Self> {
        let mut config = Self::new(url);

        if let Ok(raw) = env::var("DB_MAX_CONNECTIONS") {
            config.max_connections = raw
                .trim()
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a valid number, got '{}'", raw))?;
        }
        if let Ok(raw) = env::var("DB_MIN_CONNECTIONS") {
            config.min_connections = raw
                .trim()
                .parse()
                .with_context(|| format!("DB_MIN_CONNECTIONS must be a valid number, got '{}'", raw))?;
        }
        if config.min_connections > config.max_connections {
            anyhow::bail!(
                "DB_MIN_CONNECTIONS ({}) cannot exceed DB_MAX_CONNECTIONS ({})",
                config.min_connections,
                config.max_connections
            );
        }

        Ok(config)
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::environment::parse_or_default;
use crate::utils::errors::AppError;

/// Valor de `DATABASE_URL` que selecciona el almacenamiento en memoria
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    /// Leer la configuración desde `DATABASE_URL` y variables opcionales del pool
    pub fn from_env() -> Result<Self, AppError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::Internal("DATABASE_URL must be set in environment variables".to_string()))?;

        let max_connections = parse_or_default("DATABASE_MAX_CONNECTIONS", 20)?;

        Ok(Self {
            url,
            max_connections,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        })
    }

    /// La URL pide el almacenamiento en memoria en vez de PostgreSQL
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DATABASE_URL
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_rejects_malformed_pool_size() {
        std::env::set_var("DATABASE_URL", MEMORY_DATABASE_URL);
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "many");

        let result = DatabaseConfig::from_env();
        std::env::remove_var("DATABASE_MAX_CONNECTIONS");

        assert!(matches!(result, Err(AppError::Internal(msg)) if msg.contains("DATABASE_MAX_CONNECTIONS")));
    }
}

//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

use crate::utils::errors::AppError;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    /// Base para construir URLs absolutas de fotos de perfil
    pub asset_base_url: String,
    /// Foto asignada a los usuarios nuevos
    pub default_photo: String,
    pub notification_queue_size: usize,
    pub run_migrations: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "development-secret".to_string(),
            jwt_expiration: 86_400,
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
            asset_base_url: "http://localhost:3000".to_string(),
            default_photo: "/storage/documents/default.jpg".to_string(),
            notification_queue_size: 1024,
            run_migrations: true,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde el entorno (y `.env` si existe)
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or_default("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration: parse_or_default("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            asset_base_url: env::var("ASSET_BASE_URL").unwrap_or(defaults.asset_base_url),
            default_photo: env::var("DEFAULT_PHOTO").unwrap_or(defaults.default_photo),
            notification_queue_size: parse_or_default(
                "NOTIFICATION_QUEUE_SIZE",
                defaults.notification_queue_size,
            )?,
            run_migrations: parse_or_default("RUN_MIGRATIONS", defaults.run_migrations)?,
        };

        if config.is_production() && config.jwt_secret == "development-secret" {
            return Err(AppError::Internal(
                "JWT_SECRET must be set in production".to_string(),
            ));
        }

        Ok(config)
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Variable opcional: ausente usa el valor por defecto, mal formada es un error
pub(crate) fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_development() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_or_default_uses_default_when_missing() {
        let value: u16 = parse_or_default("CARPOOL_TEST_UNSET_VARIABLE", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_or_default_rejects_malformed_value() {
        env::set_var("CARPOOL_TEST_MALFORMED_PORT", "eighty");
        let result: Result<u16, AppError> = parse_or_default("CARPOOL_TEST_MALFORMED_PORT", 8080);
        assert!(matches!(result, Err(AppError::Internal(msg)) if msg.contains("CARPOOL_TEST_MALFORMED_PORT")));
    }
}

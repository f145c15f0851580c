//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del sistema y su conversión
//! al sobre JSON de la API (`response_text` + `response_code`).
//! La causa real nunca se devuelve al cliente: se registra en el log.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Campo requerido ausente o mal formado, o referencia que no resuelve
    #[error("Validation error: {0}")]
    Validation(String),

    /// La entidad referenciada por id no existe
    #[error("Not found: {0}")]
    NotFound(String),

    /// Falló la operación del almacenamiento subyacente
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Error ya registrado y reducido al mensaje fijo de la operación
    #[error("{0}")]
    Unprocessable(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        AppError::Persistence(error.to_string())
    }
}

/// Cuerpo JSON ausente, mal formado o con campos inválidos
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Sobre de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    response_text: String,
    response_code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, response_text) = match self {
            AppError::Unauthorized(msg) => {
                warn!("🔒 Acceso no autorizado: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthenticated.".to_string())
            }

            AppError::Jwt(msg) => {
                warn!("🔒 Error JWT: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthenticated.".to_string())
            }

            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),

            AppError::Internal(msg) => {
                error!("❌ Error interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }

            other => {
                warn!("⚠️ Solicitud no procesable: {}", other);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "The request could not be processed.".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            response_text,
            response_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Reduce cualquier fallo de una operación al mensaje fijo de esa operación.
///
/// Cubre también los rechazos de los extractores de axum, de modo que un
/// cuerpo o un id mal formados devuelven el mismo sobre JSON.
/// Los errores de autenticación pasan intactos para conservar el 401.
pub trait CannedError<T> {
    fn or_canned(self, message: &str) -> AppResult<T>;
}

impl<T, E> CannedError<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn or_canned(self, message: &str) -> AppResult<T> {
        self.map_err(|err| match Into::<AppError>::into(err) {
            err @ (AppError::Unauthorized(_) | AppError::Jwt(_)) => err,
            other => {
                warn!("⚠️ {} Causa: {}", message, other);
                AppError::Unprocessable(message.to_string())
            }
        })
    }
}

/// Función helper para crear errores de validación
pub fn validation_error(field: &str, message: &str) -> AppError {
    AppError::Validation(format!("{}: {}", field, message))
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para errores del almacenamiento
pub fn persistence_error(action: &str, error: impl std::fmt::Display) -> AppError {
    AppError::Persistence(format!("Error {}: {}", action, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_error_hides_cause() {
        let result: AppResult<()> = Err(AppError::Persistence("duplicate key".to_string()));
        let err = result.or_canned("New Driver Route store error.").unwrap_err();

        match err {
            AppError::Unprocessable(msg) => assert_eq!(msg, "New Driver Route store error."),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_canned_error_keeps_unauthorized() {
        let result: AppResult<()> = Err(AppError::Unauthorized("missing token".to_string()));
        let err = result.or_canned("Driver Route retrieve error.").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_canned_error_covers_json_rejection() {
        #[derive(Debug, serde::Deserialize)]
        struct Body {
            #[allow(dead_code)]
            pick_up_id: i64,
        }

        let result = Json::<Body>::from_bytes(br#"{"drop_off_id": 3}"#);
        let err = result.or_canned("New Passenger Booking store error.").unwrap_err();
        match err {
            AppError::Unprocessable(msg) => assert_eq!(msg, "New Passenger Booking store error."),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        let response = AppError::Unprocessable("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = AppError::Jwt("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = not_found_error("Driver Route", 9).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

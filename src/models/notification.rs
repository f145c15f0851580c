//! Modelo de Notification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Notification - mapea a la tabla notifications
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub link: String,
    pub data: Json<serde_json::Value>,
    pub viewed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar una notificación
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub user_id: i64,
    pub message: String,
    pub link: String,
    pub data: serde_json::Value,
    pub viewed: bool,
}

//! Modelo de DriverRoute
//!
//! Un viaje publicado por un conductor: fecha, hora, capacidad y estado.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// DriverRoute - mapea a la tabla driver_routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverRoute {
    pub id: i64,
    pub driver_user_id: i64,
    pub ride_date: NaiveDate,
    pub ride_time: NaiveTime,
    pub seat_capacity: i32,
    pub route_status_id: i64,
    pub sequence: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Datos para insertar una ruta
#[derive(Debug, Clone)]
pub struct NewDriverRoute {
    pub driver_user_id: i64,
    pub ride_date: NaiveDate,
    pub ride_time: NaiveTime,
    pub seat_capacity: i32,
    pub route_status_id: i64,
    pub sequence: i32,
}

//! Modelo de UserCar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// UserCar - mapea a la tabla user_cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserCar {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_model: String,
    pub vehicle_color: String,
    pub license_plate: String,
    pub seat_capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campos del vehículo (alta y actualización)
#[derive(Debug, Clone)]
pub struct UserCarFields {
    pub vehicle_model: String,
    pub vehicle_color: String,
    pub license_plate: String,
    pub seat_capacity: i32,
}

//! Modelo de PassengerBooking
//!
//! Reserva de un pasajero sobre una ruta entre dos puntos.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// PassengerBooking - mapea a la tabla passenger_bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PassengerBooking {
    pub id: i64,
    pub passenger_user_id: i64,
    pub driver_route_id: i64,
    pub pick_up_id: i64,
    pub drop_off_id: i64,
    pub booking_status_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Datos para insertar una reserva
#[derive(Debug, Clone)]
pub struct NewPassengerBooking {
    pub passenger_user_id: i64,
    pub driver_route_id: i64,
    pub pick_up_id: i64,
    pub drop_off_id: i64,
    pub booking_status_id: i64,
}

/// Reserva unida con su ruta (listados del pasajero)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingWithRoute {
    pub booking_id: i64,
    pub passenger_user_id: i64,
    pub driver_route_id: i64,
    pub pick_up_id: i64,
    pub drop_off_id: i64,
    pub booking_status_id: i64,
    pub driver_user_id: i64,
    pub ride_date: NaiveDate,
    pub ride_time: NaiveTime,
    pub seat_capacity: i32,
    pub route_status_id: i64,
    pub sequence: i32,
}

use serde::{Deserialize, Serialize};

use crate::dto::driver_route_dto::DriverRouteView;
use crate::models::passenger_booking::{BookingWithRoute, PassengerBooking};
use crate::utils::validation::{deserialize_id, deserialize_optional_id};

/// Request para reservar un asiento
#[derive(Debug, Deserialize)]
pub struct CreatePassengerBookingRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub driver_route_id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub pick_up_id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub drop_off_id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub booking_status_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePassengerBookingRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub booking_status_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingSearchQuery {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub driver_route_id: Option<i64>,
}

/// `booking_status_id = 0` devuelve todas las reservas de la ruta
#[derive(Debug, Deserialize)]
pub struct DriverBookingsRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub booking_status_id: i64,
}

/// Fila del listado del pasajero (reserva + ruta)
#[derive(Debug, Clone, Serialize)]
pub struct PassengerBookingView {
    #[serde(flatten)]
    pub booking: BookingWithRoute,
    pub booking_status: String,
    pub seat_approved: i64,
    pub seat_available: i64,
    pub ride_date_formatted: String,
    pub ride_time_formatted: String,
    pub pick_up_description: Option<String>,
    pub drop_off_description: Option<String>,
}

/// Fila del listado del conductor (reservas de una ruta)
#[derive(Debug, Clone, Serialize)]
pub struct DriverBookingView {
    #[serde(flatten)]
    pub booking: PassengerBooking,
    pub booking_status_name: String,
    pub passenger_user_name: String,
    pub passenger_user_photo: String,
    pub vaccinated: bool,
    pub pick_up_description: Option<String>,
    pub drop_off_description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassengerBookingDetail {
    #[serde(flatten)]
    pub booking: PassengerBooking,
    pub booking_status: String,
    pub driver_route: DriverRouteView,
    pub pick_up_description: Option<String>,
    pub drop_off_description: Option<String>,
}

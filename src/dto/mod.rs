//! DTOs de la API
//!
//! Requests de entrada (validados con `validator`) y vistas de salida.

pub mod api_response;
pub mod auth_dto;
pub mod car_dto;
pub mod driver_route_dto;
pub mod location_point_dto;
pub mod notification_dto;
pub mod passenger_booking_dto;
pub mod reference_dto;
pub mod user_dto;

pub use api_response::ApiResponse;

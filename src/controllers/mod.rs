//! Controladores
//!
//! Lógica de cada recurso. Los handlers de `routes` los construyen por
//! request a partir del `AppState` y traducen el resultado al sobre JSON.

pub mod car_controller;
pub mod driver_route_controller;
pub mod location_point_controller;
pub mod notification_controller;
pub mod passenger_booking_controller;
pub mod reference_controller;
pub mod user_controller;

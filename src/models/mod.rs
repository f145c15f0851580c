//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! (ver `migrations/`).

pub mod driver_route;
pub mod location_point;
pub mod notification;
pub mod passenger_booking;
pub mod reference;
pub mod user;
pub mod user_car;

//! Services module
//!
//! Lógica compartida por varios controladores: catálogo de estados,
//! presentación de listados y envío de notificaciones.

pub mod notification_service;
pub mod presentation;
pub mod status_catalog;

pub use notification_service::{NotificationMessage, NotificationSink};
pub use presentation::Presenter;
pub use status_catalog::{BookingState, RouteState, StatusCatalog};

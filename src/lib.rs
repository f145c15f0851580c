//! Backend de carpooling corporativo
//!
//! Los conductores publican rutas con puntos ordenados, los pasajeros
//! reservan plaza y cada reserva notifica a ambas partes.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer};
use crate::models::reference::ReferenceKind;
use crate::routes::{
    auth_routes::create_auth_router,
    car_routes::create_car_router,
    driver_route_routes::create_driver_route_router,
    health_routes::create_health_router,
    location_point_routes::create_location_point_router,
    notification_routes::create_notification_router,
    passenger_booking_routes::create_passenger_booking_router,
    reference_routes::create_reference_router,
    user_routes::{create_current_user_router, create_user_router},
};
use crate::state::AppState;

/// Construye el router completo de la API
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .merge(create_health_router())
        .merge(create_auth_router())
        .nest("/job-titles", create_reference_router(ReferenceKind::JobTitle))
        .nest("/departments", create_reference_router(ReferenceKind::Department));

    let authenticated = Router::new()
        .nest("/user", create_current_user_router())
        .nest("/users", create_user_router())
        .nest("/route-statuses", create_reference_router(ReferenceKind::RouteStatus))
        .nest("/booking-statuses", create_reference_router(ReferenceKind::BookingStatus))
        .nest("/driver-routes", create_driver_route_router())
        .nest("/location-points", create_location_point_router())
        .nest("/passenger-bookings", create_passenger_booking_router())
        .nest("/notifications", create_notification_router())
        .nest("/cars", create_car_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

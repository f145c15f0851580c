//! Routers HTTP
//!
//! Cada recurso expone su `create_*_router`; `crate::create_router` los
//! monta y separa los públicos de los que exigen token.
//!
//! Los handlers reciben los extractores envueltos en `Result` para que un
//! rechazo de axum pase por `or_canned` como cualquier otro fallo.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    Json,
};

pub mod auth_routes;
pub mod car_routes;
pub mod driver_route_routes;
pub mod health_routes;
pub mod location_point_routes;
pub mod notification_routes;
pub mod passenger_booking_routes;
pub mod reference_routes;
pub mod user_routes;

/// Cuerpo JSON de la petición
pub type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Id numérico de la ruta (`/:id`)
pub type IdPath = Result<Path<i64>, PathRejection>;

pub type QueryParams<T> = Result<Query<T>, QueryRejection>;

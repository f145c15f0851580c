//! Middleware del sistema
//!
//! Autenticación JWT y CORS.

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, CallerIdentity};
pub use cors::cors_layer;

//! Capa de acceso a datos
//!
//! Un trait por entidad con su implementación PostgreSQL, más un
//! almacenamiento en memoria que implementa todos los traits.

pub mod driver_route_repository;
pub mod filters;
pub mod location_point_repository;
pub mod memory;
pub mod notification_repository;
pub mod passenger_booking_repository;
pub mod reference_repository;
pub mod user_car_repository;
pub mod user_repository;

use sqlx::PgPool;
use std::sync::Arc;

pub use driver_route_repository::{DriverRouteRepository, PgDriverRouteRepository};
pub use location_point_repository::{LocationPointRepository, PgLocationPointRepository};
pub use memory::MemoryStore;
pub use notification_repository::{NotificationRepository, PgNotificationRepository};
pub use passenger_booking_repository::{PassengerBookingRepository, PgPassengerBookingRepository};
pub use reference_repository::{PgReferenceRepository, ReferenceRepository};
pub use user_car_repository::{PgUserCarRepository, UserCarRepository};
pub use user_repository::{PgUserRepository, UserRepository};

/// Conjunto de repositorios compartido por los controladores
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub references: Arc<dyn ReferenceRepository>,
    pub routes: Arc<dyn DriverRouteRepository>,
    pub points: Arc<dyn LocationPointRepository>,
    pub bookings: Arc<dyn PassengerBookingRepository>,
    pub cars: Arc<dyn UserCarRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            references: Arc::new(PgReferenceRepository::new(pool.clone())),
            routes: Arc::new(PgDriverRouteRepository::new(pool.clone())),
            points: Arc::new(PgLocationPointRepository::new(pool.clone())),
            bookings: Arc::new(PgPassengerBookingRepository::new(pool.clone())),
            cars: Arc::new(PgUserCarRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());

        Self {
            users: store.clone(),
            references: store.clone(),
            routes: store.clone(),
            points: store.clone(),
            bookings: store.clone(),
            cars: store.clone(),
            notifications: store,
        }
    }
}

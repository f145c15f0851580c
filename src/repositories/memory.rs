//! Almacenamiento en memoria
//!
//! Implementa todos los repositorios sobre tablas protegidas por un
//! `RwLock`. Se usa en los tests y al arrancar con `DATABASE_URL=memory`.
//! Las semillas coinciden con las de `migrations/`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::driver_route::{DriverRoute, NewDriverRoute};
use crate::models::location_point::{LocationPoint, NewLocationPoint};
use crate::models::notification::{NewNotification, Notification};
use crate::models::passenger_booking::{BookingWithRoute, NewPassengerBooking, PassengerBooking};
use crate::models::reference::{ReferenceEntry, ReferenceKind};
use crate::models::user::{NewUser, User, UserProfileUpdate};
use crate::models::user_car::{UserCar, UserCarFields};
use crate::repositories::driver_route_repository::DriverRouteRepository;
use crate::repositories::filters::{PassengerBookingQuery, RouteQuery, SortDirection};
use crate::repositories::location_point_repository::LocationPointRepository;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::passenger_booking_repository::PassengerBookingRepository;
use crate::repositories::reference_repository::ReferenceRepository;
use crate::repositories::user_car_repository::UserCarRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{persistence_error, AppError};

fn seed_labels(kind: ReferenceKind) -> &'static [&'static str] {
    match kind {
        ReferenceKind::RouteStatus => &["Open", "Closed", "Cancelled", "Full", "Completed"],
        ReferenceKind::BookingStatus => &["Requested", "Approved", "Rejected", "Cancelled"],
        ReferenceKind::Department => &["Engineering", "Operations", "Human Resources", "Finance"],
        ReferenceKind::JobTitle => &["Software Engineer", "Team Lead", "Analyst", "Associate"],
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    references: HashMap<ReferenceKind, Vec<ReferenceEntry>>,
    routes: Vec<DriverRoute>,
    points: Vec<LocationPoint>,
    bookings: Vec<PassengerBooking>,
    cars: Vec<UserCar>,
    notifications: Vec<Notification>,
    sequences: HashMap<&'static str, i64>,
}

impl Tables {
    /// Equivalente a BIGSERIAL: ids crecientes por tabla
    fn next_id(&mut self, table: &'static str) -> i64 {
        let counter = self.sequences.entry(table).or_insert(0);
        *counter += 1;
        *counter
    }

    fn seeded() -> Self {
        let mut tables = Tables::default();
        let now = Utc::now();

        for kind in ReferenceKind::ALL {
            let entries = seed_labels(kind)
                .iter()
                .map(|label| ReferenceEntry {
                    id: tables.next_id(kind.table()),
                    label: label.to_string(),
                    created_at: now,
                    updated_at: now,
                })
                .collect();
            tables.references.insert(kind, entries);
        }

        tables
    }

    fn live_route(&self, id: i64) -> Option<&DriverRoute> {
        self.routes.iter().find(|r| r.id == id && r.deleted_at.is_none())
    }
}

/// Repositorios en memoria (un único estado compartido por todos los traits)
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::seeded()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(persistence_error("creating user", "duplicate email"));
        }

        let now = Utc::now();
        let created = User {
            id: tables.next_id("users"),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            mobile_number: user.mobile_number,
            about: user.about,
            photo: user.photo,
            license_number: user.license_number,
            employee_id: user.employee_id,
            department_id: user.department_id,
            job_title_id: user.job_title_id,
            vaccinated: user.vaccinated,
            vaccination_details: user.vaccination_details,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id && u.deleted_at.is_none()).cloned())
    }

    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.deleted_at.is_none())
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().filter(|u| u.deleted_at.is_none()).cloned().collect())
    }

    async fn update_profile(&self, id: i64, update: UserProfileUpdate) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) else {
            return Ok(None);
        };

        user.about = update.about;
        user.vaccinated = update.vaccinated;
        user.vaccination_details = update.vaccination_details;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) {
            Some(user) => {
                user.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ReferenceRepository for MemoryStore {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.references.get(&kind).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, kind: ReferenceKind, id: i64) -> Result<Option<ReferenceEntry>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .references
            .get(&kind)
            .and_then(|entries| entries.iter().find(|e| e.id == id))
            .cloned())
    }

    async fn create(&self, kind: ReferenceKind, label: String) -> Result<ReferenceEntry, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let entry = ReferenceEntry {
            id: tables.next_id(kind.table()),
            label,
            created_at: now,
            updated_at: now,
        };
        tables.references.entry(kind).or_default().push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, kind: ReferenceKind, id: i64, label: String) -> Result<Option<ReferenceEntry>, AppError> {
        let mut tables = self.tables.write().await;
        let entry = tables
            .references
            .get_mut(&kind)
            .and_then(|entries| entries.iter_mut().find(|e| e.id == id));

        Ok(entry.map(|e| {
            e.label = label;
            e.updated_at = Utc::now();
            e.clone()
        }))
    }

    async fn delete(&self, kind: ReferenceKind, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let Some(entries) = tables.references.get_mut(&kind) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() < before)
    }
}

#[async_trait]
impl DriverRouteRepository for MemoryStore {
    async fn create(&self, route: NewDriverRoute) -> Result<DriverRoute, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = DriverRoute {
            id: tables.next_id("driver_routes"),
            driver_user_id: route.driver_user_id,
            ride_date: route.ride_date,
            ride_time: route.ride_time,
            seat_capacity: route.seat_capacity,
            route_status_id: route.route_status_id,
            sequence: route.sequence,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.routes.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<DriverRoute>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.live_route(id).cloned())
    }

    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<DriverRoute>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.routes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<DriverRoute>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.routes.iter().filter(|r| r.deleted_at.is_none()).cloned().collect())
    }

    async fn query(&self, query: &RouteQuery) -> Result<Vec<DriverRoute>, AppError> {
        let tables = self.tables.read().await;
        let mut routes: Vec<DriverRoute> =
            tables.routes.iter().filter(|r| query.matches(r)).cloned().collect();

        routes.sort_by(|a, b| {
            let by_date = match query.sort {
                SortDirection::Asc => a.ride_date.cmp(&b.ride_date),
                SortDirection::Desc => b.ride_date.cmp(&a.ride_date),
            };
            by_date.then(a.ride_time.cmp(&b.ride_time)).then(a.id.cmp(&b.id))
        });

        Ok(routes)
    }

    async fn update_status(&self, id: i64, route_status_id: i64) -> Result<Option<DriverRoute>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.routes.iter_mut().find(|r| r.id == id && r.deleted_at.is_none()) else {
            return Ok(None);
        };

        existing.route_status_id = route_status_id;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.routes.iter_mut().find(|r| r.id == id && r.deleted_at.is_none()) {
            Some(route) => {
                route.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl LocationPointRepository for MemoryStore {
    async fn create(&self, point: NewLocationPoint) -> Result<LocationPoint, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = LocationPoint {
            id: tables.next_id("location_points"),
            driver_route_id: point.driver_route_id,
            description: point.description,
            points: point.points,
            lat: point.lat,
            long: point.long,
            point_type: point.point_type.to_string(),
            route_order: point.route_order,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.points.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LocationPoint>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.points.iter().find(|p| p.id == id && p.deleted_at.is_none()).cloned())
    }

    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<LocationPoint>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.points.iter().find(|p| p.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<LocationPoint>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.points.iter().filter(|p| p.deleted_at.is_none()).cloned().collect())
    }

    async fn list_for_route(&self, driver_route_id: i64) -> Result<Vec<LocationPoint>, AppError> {
        let tables = self.tables.read().await;
        let mut points: Vec<LocationPoint> = tables
            .points
            .iter()
            .filter(|p| p.driver_route_id == driver_route_id && p.deleted_at.is_none())
            .cloned()
            .collect();
        points.sort_by_key(|p| (p.route_order, p.id));
        Ok(points)
    }

    async fn update(&self, id: i64, point: NewLocationPoint) -> Result<Option<LocationPoint>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.points.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) else {
            return Ok(None);
        };

        existing.driver_route_id = point.driver_route_id;
        existing.description = point.description;
        existing.points = point.points;
        existing.lat = point.lat;
        existing.long = point.long;
        existing.point_type = point.point_type.to_string();
        existing.route_order = point.route_order;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.points.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) {
            Some(point) => {
                point.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl PassengerBookingRepository for MemoryStore {
    async fn create(&self, booking: NewPassengerBooking) -> Result<PassengerBooking, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = PassengerBooking {
            id: tables.next_id("passenger_bookings"),
            passenger_user_id: booking.passenger_user_id,
            driver_route_id: booking.driver_route_id,
            pick_up_id: booking.pick_up_id,
            drop_off_id: booking.drop_off_id,
            booking_status_id: booking.booking_status_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.bookings.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PassengerBooking>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.bookings.iter().find(|b| b.id == id && b.deleted_at.is_none()).cloned())
    }

    async fn list_all(&self) -> Result<Vec<PassengerBooking>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.bookings.iter().filter(|b| b.deleted_at.is_none()).cloned().collect())
    }

    async fn query_for_passenger(&self, query: &PassengerBookingQuery) -> Result<Vec<BookingWithRoute>, AppError> {
        let tables = self.tables.read().await;

        let mut rows: Vec<BookingWithRoute> = tables
            .bookings
            .iter()
            .filter(|b| b.deleted_at.is_none())
            .filter_map(|b| {
                let route = tables.live_route(b.driver_route_id)?;
                Some(BookingWithRoute {
                    booking_id: b.id,
                    passenger_user_id: b.passenger_user_id,
                    driver_route_id: b.driver_route_id,
                    pick_up_id: b.pick_up_id,
                    drop_off_id: b.drop_off_id,
                    booking_status_id: b.booking_status_id,
                    driver_user_id: route.driver_user_id,
                    ride_date: route.ride_date,
                    ride_time: route.ride_time,
                    seat_capacity: route.seat_capacity,
                    route_status_id: route.route_status_id,
                    sequence: route.sequence,
                })
            })
            .filter(|row| query.matches(row))
            .collect();

        rows.sort_by(|a, b| {
            let by_date = match query.sort {
                SortDirection::Asc => a.ride_date.cmp(&b.ride_date),
                SortDirection::Desc => b.ride_date.cmp(&a.ride_date),
            };
            by_date.then(a.ride_time.cmp(&b.ride_time)).then(a.booking_id.cmp(&b.booking_id))
        });

        Ok(rows)
    }

    async fn list_for_route(&self, driver_route_id: i64, booking_status_id: Option<i64>) -> Result<Vec<PassengerBooking>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.driver_route_id == driver_route_id && b.deleted_at.is_none())
            .filter(|b| booking_status_id.map_or(true, |status| b.booking_status_id == status))
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, driver_route_id: i64, booking_status_id: i64) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        let count = tables
            .bookings
            .iter()
            .filter(|b| {
                b.driver_route_id == driver_route_id
                    && b.booking_status_id == booking_status_id
                    && b.deleted_at.is_none()
            })
            .count();
        Ok(count as i64)
    }

    async fn update_status(&self, id: i64, booking_status_id: i64) -> Result<Option<PassengerBooking>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.bookings.iter_mut().find(|b| b.id == id && b.deleted_at.is_none()) else {
            return Ok(None);
        };

        existing.booking_status_id = booking_status_id;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.bookings.iter_mut().find(|b| b.id == id && b.deleted_at.is_none()) {
            Some(booking) => {
                booking.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserCarRepository for MemoryStore {
    async fn create(&self, user_id: i64, fields: UserCarFields) -> Result<UserCar, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let car = UserCar {
            id: tables.next_id("user_cars"),
            user_id,
            vehicle_model: fields.vehicle_model,
            vehicle_color: fields.vehicle_color,
            license_plate: fields.license_plate,
            seat_capacity: fields.seat_capacity,
            created_at: now,
            updated_at: now,
        };
        tables.cars.push(car.clone());
        Ok(car)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserCar>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.cars.iter().find(|c| c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserCar>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.cars.clone())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserCar>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.cars.iter().filter(|c| c.user_id == user_id).cloned().collect())
    }

    async fn update(&self, id: i64, fields: UserCarFields) -> Result<Option<UserCar>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(car) = tables.cars.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        car.vehicle_model = fields.vehicle_model;
        car.vehicle_color = fields.vehicle_color;
        car.license_plate = fields.license_plate;
        car.seat_capacity = fields.seat_capacity;
        car.updated_at = Utc::now();
        Ok(Some(car.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.cars.len();
        tables.cars.retain(|c| c.id != id);
        Ok(tables.cars.len() < before)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, notification: NewNotification) -> Result<Notification, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = Notification {
            id: tables.next_id("notifications"),
            user_id: notification.user_id,
            message: notification.message,
            link: notification.link,
            data: Json(notification.data),
            viewed: notification.viewed,
            created_at: now,
            updated_at: now,
        };
        tables.notifications.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Notification>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.clone())
    }

    async fn list_for_user(&self, user_id: i64, unread_only: bool) -> Result<Vec<Notification>, AppError> {
        let tables = self.tables.read().await;
        let mut notifications: Vec<Notification> = tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.viewed))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notifications)
    }

    async fn mark_viewed(&self, id: i64, viewed: bool) -> Result<Option<Notification>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(notification) = tables.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };

        notification.viewed = viewed;
        notification.updated_at = Utc::now();
        Ok(Some(notification.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.notifications.len();
        tables.notifications.retain(|n| n.id != id);
        Ok(tables.notifications.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::filters::{Bound, IdScope};
    use chrono::{NaiveDate, NaiveTime};

    fn new_route(driver: i64, day: u32, hour: u32, status: i64) -> NewDriverRoute {
        NewDriverRoute {
            driver_user_id: driver,
            ride_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            ride_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            seat_capacity: 4,
            route_status_id: status,
            sequence: 1,
        }
    }

    #[tokio::test]
    async fn test_seeded_reference_tables() {
        let store = MemoryStore::new();

        let statuses = ReferenceRepository::list(&store, ReferenceKind::RouteStatus).await.unwrap();
        let labels: Vec<&str> = statuses.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Open", "Closed", "Cancelled", "Full", "Completed"]);
        assert_eq!(statuses[0].id, 1);

        let created = ReferenceRepository::create(&store, ReferenceKind::RouteStatus, "Paused".to_string())
            .await
            .unwrap();
        assert_eq!(created.id, 6);
    }

    #[tokio::test]
    async fn test_deleted_route_still_found_for_history() {
        let store = MemoryStore::new();
        let route = DriverRouteRepository::create(&store, new_route(1, 10, 8, 1)).await.unwrap();
        DriverRouteRepository::soft_delete(&store, route.id).await.unwrap();

        assert!(DriverRouteRepository::find_by_id(&store, route.id).await.unwrap().is_none());
        let found = DriverRouteRepository::find_by_id_with_deleted(&store, route.id)
            .await
            .unwrap()
            .unwrap();
        assert!(found.deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_route_query_orders_and_skips_deleted() {
        let store = MemoryStore::new();
        let late = DriverRouteRepository::create(&store, new_route(1, 12, 9, 1)).await.unwrap();
        let early = DriverRouteRepository::create(&store, new_route(1, 10, 8, 1)).await.unwrap();
        let gone = DriverRouteRepository::create(&store, new_route(1, 11, 8, 1)).await.unwrap();
        DriverRouteRepository::soft_delete(&store, gone.id).await.unwrap();

        let asc = DriverRouteRepository::query(&store, &RouteQuery::default()).await.unwrap();
        assert_eq!(asc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![early.id, late.id]);

        let desc = DriverRouteRepository::query(
            &store,
            &RouteQuery {
                sort: SortDirection::Desc,
                ..RouteQuery::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(desc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![late.id, early.id]);
    }

    #[tokio::test]
    async fn test_booking_join_filters_by_route_status() {
        let store = MemoryStore::new();
        let open = DriverRouteRepository::create(&store, new_route(1, 10, 8, 1)).await.unwrap();
        let closed = DriverRouteRepository::create(&store, new_route(1, 11, 8, 2)).await.unwrap();

        for route_id in [open.id, closed.id] {
            PassengerBookingRepository::create(
                &store,
                NewPassengerBooking {
                    passenger_user_id: 2,
                    driver_route_id: route_id,
                    pick_up_id: 1,
                    drop_off_id: 2,
                    booking_status_id: 1,
                },
            )
            .await
            .unwrap();
        }

        let query = PassengerBookingQuery {
            route_statuses: IdScope::NoneOf(vec![2, 3, 5]),
            ride_date: Bound::AtLeast(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ..PassengerBookingQuery::for_passenger(2)
        };
        let rows = store.query_for_passenger(&query).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].driver_route_id, open.id);
        assert_eq!(store.count_by_status(open.id, 1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        let user = NewUser {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Diaz".to_string(),
            mobile_number: "555".to_string(),
            about: None,
            photo: None,
            license_number: None,
            employee_id: "E1".to_string(),
            department_id: None,
            job_title_id: None,
            vaccinated: false,
            vaccination_details: None,
        };

        UserRepository::create(&store, user.clone()).await.unwrap();
        let mut shouting = user;
        shouting.email = "ANA@example.com".to_string();
        assert!(matches!(
            UserRepository::create(&store, shouting).await,
            Err(AppError::Persistence(_))
        ));
    }
}

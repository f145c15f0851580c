//! Controlador del libro de reservas
//!
//! Toda referencia de una reserva (pasajero, ruta, puntos, estado y
//! conductor) se resuelve antes de persistir; si alguna falta no se escribe
//! nada. Crear una reserva avisa al conductor y al pasajero.

use tracing::{debug, info};

use crate::controllers::driver_route_controller::require_route;
use crate::dto::driver_route_dto::RideFilter;
use crate::dto::passenger_booking_dto::{
    CreatePassengerBookingRequest, DriverBookingView, PassengerBookingDetail, PassengerBookingView,
};
use crate::middleware::CallerIdentity;
use crate::models::location_point::LocationPoint;
use crate::models::passenger_booking::{NewPassengerBooking, PassengerBooking};
use crate::models::reference::{ReferenceEntry, ReferenceKind};
use crate::repositories::filters::{Bound, IdScope, PassengerBookingQuery, SortDirection};
use crate::services::notification_service::NotificationMessage;
use crate::services::status_catalog::RouteState;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};

/// Estados de ruta que ocultan una reserva del listado del pasajero
pub const HIDDEN_FROM_PASSENGER: [RouteState; 3] =
    [RouteState::Closed, RouteState::Cancelled, RouteState::Completed];

pub struct PassengerBookingController {
    state: AppState,
}

impl PassengerBookingController {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    pub async fn index(&self) -> AppResult<Vec<PassengerBooking>> {
        self.state.repos.bookings.list_all().await
    }

    pub async fn show(&self, id: i64) -> AppResult<Option<PassengerBookingDetail>> {
        match self.state.repos.bookings.find_by_id(id).await? {
            Some(booking) => Ok(Some(self.state.presenter().booking_detail(booking).await?)),
            None => Ok(None),
        }
    }

    async fn booking_status(&self, id: i64) -> AppResult<ReferenceEntry> {
        self.state
            .repos
            .references
            .find_by_id(ReferenceKind::BookingStatus, id)
            .await?
            .ok_or_else(|| validation_error("booking_status_id", "booking status does not exist"))
    }

    async fn route_point(&self, id: i64, driver_route_id: i64, field: &str) -> AppResult<LocationPoint> {
        let point = self
            .state
            .repos
            .points
            .find_by_id(id)
            .await?
            .ok_or_else(|| validation_error(field, "location point does not exist"))?;

        if point.driver_route_id != driver_route_id {
            return Err(validation_error(field, "location point belongs to another route"));
        }
        Ok(point)
    }

    pub async fn store(
        &self,
        caller: CallerIdentity,
        request: CreatePassengerBookingRequest,
    ) -> AppResult<PassengerBooking> {
        let result = self.create_booking(caller, request).await;

        let outcome = if result.is_ok() { "created" } else { "rejected" };
        self.state.metrics.bookings_total.with_label_values(&[outcome]).inc();

        result
    }

    async fn create_booking(
        &self,
        caller: CallerIdentity,
        request: CreatePassengerBookingRequest,
    ) -> AppResult<PassengerBooking> {
        let repos = &self.state.repos;

        let passenger = repos
            .users
            .find_by_id(caller.user_id)
            .await?
            .ok_or_else(|| validation_error("passenger_user_id", "user does not exist"))?;
        let route = require_route(&self.state, request.driver_route_id, "driver_route_id").await?;
        self.route_point(request.pick_up_id, route.id, "pick_up_id").await?;
        let drop_off = self.route_point(request.drop_off_id, route.id, "drop_off_id").await?;
        let status = self.booking_status(request.booking_status_id).await?;
        repos
            .users
            .find_by_id(route.driver_user_id)
            .await?
            .ok_or_else(|| validation_error("driver_user_id", "route driver does not exist"))?;

        let booking = repos
            .bookings
            .create(NewPassengerBooking {
                passenger_user_id: passenger.id,
                driver_route_id: route.id,
                pick_up_id: request.pick_up_id,
                drop_off_id: drop_off.id,
                booking_status_id: status.id,
            })
            .await?;

        info!(
            "🎫 Reserva {} creada: pasajero {} en ruta {} ({})",
            booking.id, passenger.id, route.id, status.label
        );

        let passenger_photo = self.state.presenter().photo_url(passenger.photo.as_deref());

        self.state.notifications.emit(NotificationMessage::driver_request(
            &route,
            &booking,
            &passenger.full_name(),
            &passenger_photo,
            Some(&drop_off),
        ));
        self.state
            .notifications
            .emit(NotificationMessage::passenger_request(&booking));

        Ok(booking)
    }

    /// Sobrescribe el estado y avisa al pasajero
    pub async fn update_status(&self, id: i64, booking_status_id: i64) -> AppResult<PassengerBooking> {
        let status = self.booking_status(booking_status_id).await?;

        let booking = self
            .state
            .repos
            .bookings
            .update_status(id, status.id)
            .await?
            .ok_or_else(|| not_found_error("Passenger Booking", id))?;

        info!("🔄 Reserva {} pasa a estado '{}'", booking.id, status.label);
        self.state
            .notifications
            .emit(NotificationMessage::booking_status_changed(&booking, &status.label));

        Ok(booking)
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.state.repos.bookings.soft_delete(id).await? {
            return Err(not_found_error("Passenger Booking", id));
        }
        info!("🗑️ Reserva {} eliminada", id);
        Ok(())
    }

    /// Reservas activas del pasajero: fecha mínima y hora exacta
    pub async fn for_passenger(
        &self,
        caller: CallerIdentity,
        filter: RideFilter,
    ) -> AppResult<Vec<PassengerBookingView>> {
        let query = PassengerBookingQuery {
            ride_date: Bound::at_least(filter.date),
            ride_time: Bound::exactly(filter.time),
            route_statuses: IdScope::NoneOf(self.state.catalog.route_ids(&HIDDEN_FROM_PASSENGER)),
            sort: filter.sort,
            ..PassengerBookingQuery::for_passenger(caller.user_id)
        };

        let rows = self.state.repos.bookings.query_for_passenger(&query).await?;
        self.state.presenter().passenger_booking_views(rows).await
    }

    /// Reservas del pasajero (opcionalmente de una ruta), las más recientes primero
    pub async fn search_for_passenger(
        &self,
        caller: CallerIdentity,
        driver_route_id: Option<i64>,
    ) -> AppResult<Vec<PassengerBookingView>> {
        let query = PassengerBookingQuery {
            driver_route_id,
            route_statuses: IdScope::excluding(self.state.catalog.route_id(RouteState::Cancelled)),
            sort: SortDirection::Desc,
            ..PassengerBookingQuery::for_passenger(caller.user_id)
        };

        let rows = self.state.repos.bookings.query_for_passenger(&query).await?;
        self.state.presenter().passenger_booking_views(rows).await
    }

    /// Reservas de una ruta; `booking_status_id = 0` las devuelve todas
    pub async fn for_driver_route(
        &self,
        driver_route_id: i64,
        booking_status_id: i64,
    ) -> AppResult<Vec<DriverBookingView>> {
        let route = require_route(&self.state, driver_route_id, "driver_route_id").await?;

        let status_filter = match booking_status_id {
            0 => None,
            id => Some(self.booking_status(id).await?.id),
        };

        let bookings = self
            .state
            .repos
            .bookings
            .list_for_route(route.id, status_filter)
            .await?;

        if bookings.is_empty() {
            debug!("📭 Ruta {} sin reservas para el filtro {:?}", route.id, status_filter);
        }

        self.state.presenter().driver_booking_views(bookings).await
    }
}

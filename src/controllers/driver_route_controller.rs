//! Controlador de rutas de conductor
//!
//! Alta y cambio de estado de rutas, y los tres listados filtrados por
//! estado: próximas y pasadas del conductor, y búsqueda de rutas ajenas.

use tracing::info;
use validator::Validate;

use crate::dto::driver_route_dto::{
    CreateDriverRouteRequest, DriverRouteDetail, DriverRouteView, RideFilter,
};
use crate::middleware::CallerIdentity;
use crate::models::driver_route::{DriverRoute, NewDriverRoute};
use crate::models::reference::ReferenceKind;
use crate::repositories::filters::{Bound, IdScope, RouteQuery};
use crate::services::presentation::RouteViewOptions;
use crate::services::status_catalog::RouteState;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::validate_time;

/// Estados incluidos en las rutas próximas del conductor
pub const UPCOMING_STATES: [RouteState; 2] = [RouteState::Open, RouteState::Full];
/// Estados incluidos en el historial del conductor
pub const PAST_STATES: [RouteState; 2] = [RouteState::Closed, RouteState::Completed];

pub struct DriverRouteController {
    state: AppState,
}

impl DriverRouteController {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    pub async fn index(&self) -> AppResult<Vec<DriverRoute>> {
        self.state.repos.routes.list_all().await
    }

    pub async fn show(&self, id: i64) -> AppResult<Option<DriverRoute>> {
        self.state.repos.routes.find_by_id(id).await
    }

    /// Publica una ruta con `sequence = 1` y el estado indicado
    pub async fn store(
        &self,
        caller: CallerIdentity,
        request: CreateDriverRouteRequest,
    ) -> AppResult<DriverRoute> {
        request.validate()?;

        let ride_time = validate_time(&request.ride_time)
            .map_err(|_| validation_error("ride_time", "expected HH:MM"))?;

        let driver = self
            .state
            .repos
            .users
            .find_by_id(caller.user_id)
            .await?
            .ok_or_else(|| validation_error("driver_user_id", "user does not exist"))?;

        let status = self
            .state
            .repos
            .references
            .find_by_id(ReferenceKind::RouteStatus, request.route_status_id)
            .await?
            .ok_or_else(|| validation_error("route_status_id", "route status does not exist"))?;

        let route = self
            .state
            .repos
            .routes
            .create(NewDriverRoute {
                driver_user_id: driver.id,
                ride_date: request.ride_date,
                ride_time,
                seat_capacity: request.seat_capacity,
                route_status_id: status.id,
                sequence: 1,
            })
            .await?;

        self.state.metrics.routes_created_total.inc();
        info!("🚗 Ruta {} publicada por el usuario {} ({})", route.id, driver.id, status.label);

        Ok(route)
    }

    /// Solo sobrescribe el estado
    pub async fn update_status(&self, id: i64, route_status_id: i64) -> AppResult<DriverRoute> {
        let status = self
            .state
            .repos
            .references
            .find_by_id(ReferenceKind::RouteStatus, route_status_id)
            .await?
            .ok_or_else(|| not_found_error("Route Status", route_status_id))?;

        let route = self
            .state
            .repos
            .routes
            .update_status(id, status.id)
            .await?
            .ok_or_else(|| not_found_error("Driver Route", id))?;

        info!("🔄 Ruta {} pasa a estado '{}'", route.id, status.label);
        Ok(route)
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.state.repos.routes.soft_delete(id).await? {
            return Err(not_found_error("Driver Route", id));
        }
        info!("🗑️ Ruta {} eliminada", id);
        Ok(())
    }

    async fn listing(&self, query: RouteQuery) -> AppResult<Vec<DriverRouteView>> {
        let routes = self.state.repos.routes.query(&query).await?;
        self.state
            .presenter()
            .route_views(routes, RouteViewOptions::with_location_points())
            .await
    }

    fn driver_query(&self, caller: CallerIdentity, filter: RideFilter, states: &[RouteState]) -> RouteQuery {
        RouteQuery {
            driver: IdScope::only(caller.user_id),
            ride_date: Bound::exactly(filter.date),
            ride_time: Bound::exactly(filter.time),
            statuses: IdScope::OneOf(self.state.catalog.route_ids(states)),
            sort: filter.sort,
        }
    }

    /// Rutas abiertas o completas del conductor (fecha y hora exactas)
    pub async fn upcoming_for_driver(
        &self,
        caller: CallerIdentity,
        filter: RideFilter,
    ) -> AppResult<Vec<DriverRouteView>> {
        self.listing(self.driver_query(caller, filter, &UPCOMING_STATES)).await
    }

    /// Rutas cerradas o terminadas del conductor
    pub async fn past_for_driver(
        &self,
        caller: CallerIdentity,
        filter: RideFilter,
    ) -> AppResult<Vec<DriverRouteView>> {
        self.listing(self.driver_query(caller, filter, &PAST_STATES)).await
    }

    /// Rutas abiertas de otros conductores desde la fecha y hora dadas
    pub async fn search_available(
        &self,
        caller: CallerIdentity,
        filter: RideFilter,
    ) -> AppResult<Vec<DriverRouteView>> {
        let query = RouteQuery {
            driver: IdScope::excluding(caller.user_id),
            ride_date: Bound::at_least(filter.date),
            ride_time: Bound::at_least(filter.time),
            statuses: IdScope::only(self.state.catalog.route_id(RouteState::Open)),
            sort: filter.sort,
        };
        self.listing(query).await
    }

    pub async fn detail(&self, id: i64) -> AppResult<Option<DriverRouteDetail>> {
        match self.state.repos.routes.find_by_id(id).await? {
            Some(route) => Ok(Some(self.state.presenter().route_detail(route).await?)),
            None => Ok(None),
        }
    }
}

/// Comprueba que la ruta existe; los errores de referencia son de validación
pub(crate) async fn require_route(state: &AppState, id: i64, field: &str) -> AppResult<DriverRoute> {
    state
        .repos
        .routes
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Validation(format!("{}: driver route {} does not exist", field, id)))
}

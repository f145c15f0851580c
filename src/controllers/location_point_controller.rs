use tracing::info;
use validator::Validate;

use crate::controllers::driver_route_controller::require_route;
use crate::dto::location_point_dto::{CreateLocationPointRequest, UpdateLocationPointRequest};
use crate::models::location_point::{LocationPoint, NewLocationPoint, PointType};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct LocationPointController {
    state: AppState,
}

impl LocationPointController {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    pub async fn index(&self) -> AppResult<Vec<LocationPoint>> {
        self.state.repos.points.list_all().await
    }

    pub async fn show(&self, id: i64) -> AppResult<Option<LocationPoint>> {
        self.state.repos.points.find_by_id(id).await
    }

    pub async fn store(&self, request: CreateLocationPointRequest) -> AppResult<LocationPoint> {
        request.validate()?;
        let route = require_route(&self.state, request.driver_route_id, "driver_route_id").await?;

        let point = self
            .state
            .repos
            .points
            .create(NewLocationPoint {
                driver_route_id: route.id,
                description: request.description,
                points: request.points,
                lat: request.lat,
                long: request.long,
                point_type: request.point_type,
                route_order: request.route_order,
            })
            .await?;

        info!(
            "📍 Punto {} ({}) añadido a la ruta {} en la posición {}",
            point.id, point.point_type, route.id, point.route_order
        );
        Ok(point)
    }

    /// Solo cambia la descripción
    pub async fn update_description(
        &self,
        id: i64,
        request: UpdateLocationPointRequest,
    ) -> AppResult<LocationPoint> {
        request.validate()?;

        let existing = self
            .state
            .repos
            .points
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Location Point", id))?;

        let point_type = existing
            .point_type
            .parse::<PointType>()
            .map_err(AppError::Internal)?;

        self.state
            .repos
            .points
            .update(
                id,
                NewLocationPoint {
                    driver_route_id: existing.driver_route_id,
                    description: request.description,
                    points: existing.points,
                    lat: existing.lat,
                    long: existing.long,
                    point_type,
                    route_order: existing.route_order,
                },
            )
            .await?
            .ok_or_else(|| not_found_error("Location Point", id))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.state.repos.points.soft_delete(id).await? {
            return Err(not_found_error("Location Point", id));
        }
        Ok(())
    }
}

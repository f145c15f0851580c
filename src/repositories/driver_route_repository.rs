use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::driver_route::{DriverRoute, NewDriverRoute};
use crate::repositories::filters::RouteQuery;
use crate::utils::errors::{persistence_error, AppError};

/// Rutas publicadas por los conductores
#[async_trait]
pub trait DriverRouteRepository: Send + Sync {
    async fn create(&self, route: NewDriverRoute) -> Result<DriverRoute, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<DriverRoute>, AppError>;
    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<DriverRoute>, AppError>;
    async fn list_all(&self) -> Result<Vec<DriverRoute>, AppError>;
    /// Ordena por fecha en la dirección pedida, luego hora e id ascendentes
    async fn query(&self, query: &RouteQuery) -> Result<Vec<DriverRoute>, AppError>;
    async fn update_status(&self, id: i64, route_status_id: i64) -> Result<Option<DriverRoute>, AppError>;
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgDriverRouteRepository {
    pool: PgPool,
}

impl PgDriverRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRouteRepository for PgDriverRouteRepository {
    async fn create(&self, route: NewDriverRoute) -> Result<DriverRoute, AppError> {
        sqlx::query_as::<_, DriverRoute>(
            r#"
            INSERT INTO driver_routes (
                driver_user_id, ride_date, ride_time, seat_capacity,
                route_status_id, sequence, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(route.driver_user_id)
        .bind(route.ride_date)
        .bind(route.ride_time)
        .bind(route.seat_capacity)
        .bind(route.route_status_id)
        .bind(route.sequence)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("creating driver route", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<DriverRoute>, AppError> {
        sqlx::query_as::<_, DriverRoute>(
            "SELECT * FROM driver_routes WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("finding driver route", e))
    }

    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<DriverRoute>, AppError> {
        sqlx::query_as::<_, DriverRoute>("SELECT * FROM driver_routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("finding driver route", e))
    }

    async fn list_all(&self) -> Result<Vec<DriverRoute>, AppError> {
        sqlx::query_as::<_, DriverRoute>(
            "SELECT * FROM driver_routes WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("listing driver routes", e))
    }

    async fn query(&self, query: &RouteQuery) -> Result<Vec<DriverRoute>, AppError> {
        let sql = format!(
            r#"
            SELECT * FROM driver_routes
            WHERE deleted_at IS NULL
              AND ($1::bigint[] IS NULL OR driver_user_id = ANY($1))
              AND ($2::bigint[] IS NULL OR NOT (driver_user_id = ANY($2)))
              AND ($3::date IS NULL OR ride_date = $3)
              AND ($4::date IS NULL OR ride_date >= $4)
              AND ($5::time IS NULL OR ride_time = $5)
              AND ($6::time IS NULL OR ride_time >= $6)
              AND ($7::bigint[] IS NULL OR route_status_id = ANY($7))
              AND ($8::bigint[] IS NULL OR NOT (route_status_id = ANY($8)))
            ORDER BY ride_date {}, ride_time ASC, id ASC
            "#,
            query.sort.as_sql()
        );

        sqlx::query_as::<_, DriverRoute>(&sql)
            .bind(query.driver.included())
            .bind(query.driver.excluded())
            .bind(query.ride_date.exact_value())
            .bind(query.ride_date.min_value())
            .bind(query.ride_time.exact_value())
            .bind(query.ride_time.min_value())
            .bind(query.statuses.included())
            .bind(query.statuses.excluded())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("querying driver routes", e))
    }

    async fn update_status(&self, id: i64, route_status_id: i64) -> Result<Option<DriverRoute>, AppError> {
        sqlx::query_as::<_, DriverRoute>(
            r#"
            UPDATE driver_routes SET route_status_id = $2, updated_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(route_status_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("updating driver route status", e))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE driver_routes SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("deleting driver route", e))?;

        Ok(result.rows_affected() > 0)
    }
}

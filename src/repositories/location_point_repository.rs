use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::location_point::{LocationPoint, NewLocationPoint};
use crate::utils::errors::{persistence_error, AppError};

#[async_trait]
pub trait LocationPointRepository: Send + Sync {
    async fn create(&self, point: NewLocationPoint) -> Result<LocationPoint, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<LocationPoint>, AppError>;
    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<LocationPoint>, AppError>;
    async fn list_all(&self) -> Result<Vec<LocationPoint>, AppError>;
    /// Puntos de la ruta en orden de recorrido
    async fn list_for_route(&self, driver_route_id: i64) -> Result<Vec<LocationPoint>, AppError>;
    async fn update(&self, id: i64, point: NewLocationPoint) -> Result<Option<LocationPoint>, AppError>;
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgLocationPointRepository {
    pool: PgPool,
}

impl PgLocationPointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationPointRepository for PgLocationPointRepository {
    async fn create(&self, point: NewLocationPoint) -> Result<LocationPoint, AppError> {
        sqlx::query_as::<_, LocationPoint>(
            r#"
            INSERT INTO location_points (
                driver_route_id, description, points, lat, long, point_type,
                route_order, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(point.driver_route_id)
        .bind(point.description)
        .bind(point.points)
        .bind(point.lat)
        .bind(point.long)
        .bind(point.point_type.as_str())
        .bind(point.route_order)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("creating location point", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LocationPoint>, AppError> {
        sqlx::query_as::<_, LocationPoint>(
            "SELECT * FROM location_points WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("finding location point", e))
    }

    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<LocationPoint>, AppError> {
        sqlx::query_as::<_, LocationPoint>("SELECT * FROM location_points WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("finding location point", e))
    }

    async fn list_all(&self) -> Result<Vec<LocationPoint>, AppError> {
        sqlx::query_as::<_, LocationPoint>(
            "SELECT * FROM location_points WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("listing location points", e))
    }

    async fn list_for_route(&self, driver_route_id: i64) -> Result<Vec<LocationPoint>, AppError> {
        sqlx::query_as::<_, LocationPoint>(
            r#"
            SELECT * FROM location_points
            WHERE driver_route_id = $1 AND deleted_at IS NULL
            ORDER BY route_order ASC, id ASC
            "#,
        )
        .bind(driver_route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("listing route location points", e))
    }

    async fn update(&self, id: i64, point: NewLocationPoint) -> Result<Option<LocationPoint>, AppError> {
        sqlx::query_as::<_, LocationPoint>(
            r#"
            UPDATE location_points
            SET driver_route_id = $2, description = $3, points = $4, lat = $5, long = $6,
                point_type = $7, route_order = $8, updated_at = $9
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(point.driver_route_id)
        .bind(point.description)
        .bind(point.points)
        .bind(point.lat)
        .bind(point.long)
        .bind(point.point_type.as_str())
        .bind(point.route_order)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("updating location point", e))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE location_points SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("deleting location point", e))?;

        Ok(result.rows_affected() > 0)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::user_car::{UserCar, UserCarFields};
use crate::utils::errors::{persistence_error, AppError};

#[async_trait]
pub trait UserCarRepository: Send + Sync {
    async fn create(&self, user_id: i64, fields: UserCarFields) -> Result<UserCar, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<UserCar>, AppError>;
    async fn list_all(&self) -> Result<Vec<UserCar>, AppError>;
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserCar>, AppError>;
    async fn update(&self, id: i64, fields: UserCarFields) -> Result<Option<UserCar>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgUserCarRepository {
    pool: PgPool,
}

impl PgUserCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserCarRepository for PgUserCarRepository {
    async fn create(&self, user_id: i64, fields: UserCarFields) -> Result<UserCar, AppError> {
        sqlx::query_as::<_, UserCar>(
            r#"
            INSERT INTO user_cars (
                user_id, vehicle_model, vehicle_color, license_plate, seat_capacity,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(fields.vehicle_model)
        .bind(fields.vehicle_color)
        .bind(fields.license_plate)
        .bind(fields.seat_capacity)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("creating user car", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserCar>, AppError> {
        sqlx::query_as::<_, UserCar>("SELECT * FROM user_cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("finding user car", e))
    }

    async fn list_all(&self) -> Result<Vec<UserCar>, AppError> {
        sqlx::query_as::<_, UserCar>("SELECT * FROM user_cars ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("listing user cars", e))
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserCar>, AppError> {
        sqlx::query_as::<_, UserCar>("SELECT * FROM user_cars WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("listing cars for user", e))
    }

    async fn update(&self, id: i64, fields: UserCarFields) -> Result<Option<UserCar>, AppError> {
        sqlx::query_as::<_, UserCar>(
            r#"
            UPDATE user_cars
            SET vehicle_model = $2, vehicle_color = $3, license_plate = $4,
                seat_capacity = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.vehicle_model)
        .bind(fields.vehicle_color)
        .bind(fields.license_plate)
        .bind(fields.seat_capacity)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("updating user car", e))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("deleting user car", e))?;

        Ok(result.rows_affected() > 0)
    }
}

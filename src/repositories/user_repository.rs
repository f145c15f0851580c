use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{NewUser, User, UserProfileUpdate};
use crate::utils::errors::{persistence_error, AppError};

/// Directorio de usuarios
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    /// Incluye usuarios borrados: el historial de reservas sigue mostrándolos
    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update_profile(&self, id: i64, update: UserProfileUpdate) -> Result<Option<User>, AppError>;
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let now = Utc::now();

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                username, email, password_hash, first_name, last_name, mobile_number,
                about, photo, license_number, employee_id, department_id, job_title_id,
                vaccinated, vaccination_details, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
            RETURNING *
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.mobile_number)
        .bind(user.about)
        .bind(user.photo)
        .bind(user.license_number)
        .bind(user.employee_id)
        .bind(user.department_id)
        .bind(user.job_title_id)
        .bind(user.vaccinated)
        .bind(user.vaccination_details)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("creating user", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("finding user", e))
    }

    async fn find_by_id_with_deleted(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("finding user", e))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("finding user by email", e))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        // La restricción UNIQUE incluye usuarios borrados
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| persistence_error("checking email", e))?;

        Ok(result.0)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE deleted_at IS NULL ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("listing users", e))
    }

    async fn update_profile(&self, id: i64, update: UserProfileUpdate) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET about = $2, vaccinated = $3, vaccination_details = $4, updated_at = $5
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.about)
        .bind(update.vaccinated)
        .bind(update.vaccination_details)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("updating user", e))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("deleting user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::notification::{NewNotification, Notification};
use crate::utils::errors::{persistence_error, AppError};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: NewNotification) -> Result<Notification, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, AppError>;
    async fn list_all(&self) -> Result<Vec<Notification>, AppError>;
    /// Más recientes primero
    async fn list_for_user(&self, user_id: i64, unread_only: bool) -> Result<Vec<Notification>, AppError>;
    async fn mark_viewed(&self, id: i64, viewed: bool) -> Result<Option<Notification>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, notification: NewNotification) -> Result<Notification, AppError> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, message, link, data, viewed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(notification.user_id)
        .bind(notification.message)
        .bind(notification.link)
        .bind(Json(notification.data))
        .bind(notification.viewed)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("creating notification", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, AppError> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("finding notification", e))
    }

    async fn list_all(&self) -> Result<Vec<Notification>, AppError> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("listing notifications", e))
    }

    async fn list_for_user(&self, user_id: i64, unread_only: bool) -> Result<Vec<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1 AND (NOT $2 OR viewed = FALSE)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("listing user notifications", e))
    }

    async fn mark_viewed(&self, id: i64, viewed: bool) -> Result<Option<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET viewed = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(viewed)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("updating notification", e))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("deleting notification", e))?;

        Ok(result.rows_affected() > 0)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::reference::{ReferenceEntry, ReferenceKind};
use crate::utils::errors::{persistence_error, AppError};

/// Tablas de referencia (estados, departamentos, puestos)
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, AppError>;
    async fn find_by_id(&self, kind: ReferenceKind, id: i64) -> Result<Option<ReferenceEntry>, AppError>;
    async fn create(&self, kind: ReferenceKind, label: String) -> Result<ReferenceEntry, AppError>;
    async fn update(&self, kind: ReferenceKind, id: i64, label: String) -> Result<Option<ReferenceEntry>, AppError>;
    async fn delete(&self, kind: ReferenceKind, id: i64) -> Result<bool, AppError>;
}

pub struct PgReferenceRepository {
    pool: PgPool,
}

impl PgReferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Tabla y columna salen de un enum cerrado, nunca de la entrada del usuario
fn select_columns(kind: ReferenceKind) -> String {
    format!("id, {} AS label, created_at, updated_at", kind.label_column())
}

#[async_trait]
impl ReferenceRepository for PgReferenceRepository {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, AppError> {
        let query = format!("SELECT {} FROM {} ORDER BY id", select_columns(kind), kind.table());

        sqlx::query_as::<_, ReferenceEntry>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error(&format!("listing {}", kind.table()), e))
    }

    async fn find_by_id(&self, kind: ReferenceKind, id: i64) -> Result<Option<ReferenceEntry>, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", select_columns(kind), kind.table());

        sqlx::query_as::<_, ReferenceEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error(&format!("finding {}", kind.table()), e))
    }

    async fn create(&self, kind: ReferenceKind, label: String) -> Result<ReferenceEntry, AppError> {
        let query = format!(
            "INSERT INTO {} ({}, created_at, updated_at) VALUES ($1, $2, $2) RETURNING {}",
            kind.table(),
            kind.label_column(),
            select_columns(kind)
        );

        sqlx::query_as::<_, ReferenceEntry>(&query)
            .bind(label)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence_error(&format!("creating {}", kind.table()), e))
    }

    async fn update(&self, kind: ReferenceKind, id: i64, label: String) -> Result<Option<ReferenceEntry>, AppError> {
        let query = format!(
            "UPDATE {} SET {} = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            kind.table(),
            kind.label_column(),
            select_columns(kind)
        );

        sqlx::query_as::<_, ReferenceEntry>(&query)
            .bind(id)
            .bind(label)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error(&format!("updating {}", kind.table()), e))
    }

    async fn delete(&self, kind: ReferenceKind, id: i64) -> Result<bool, AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());

        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error(&format!("deleting {}", kind.table()), e))?;

        Ok(result.rows_affected() > 0)
    }
}

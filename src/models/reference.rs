//! Datos de referencia
//!
//! Tablas de búsqueda administradas por el admin: estados de ruta, estados de
//! reserva, departamentos y puestos. Todas son pares `id → etiqueta`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tipo de tabla de referencia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    RouteStatus,
    BookingStatus,
    Department,
    JobTitle,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::RouteStatus,
        ReferenceKind::BookingStatus,
        ReferenceKind::Department,
        ReferenceKind::JobTitle,
    ];

    /// Nombre de la tabla en PostgreSQL
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::RouteStatus => "route_statuses",
            ReferenceKind::BookingStatus => "booking_statuses",
            ReferenceKind::Department => "departments",
            ReferenceKind::JobTitle => "job_titles",
        }
    }

    /// Columna que contiene la etiqueta
    pub fn label_column(&self) -> &'static str {
        match self {
            ReferenceKind::RouteStatus => "route_status",
            ReferenceKind::BookingStatus => "booking_status",
            ReferenceKind::Department => "department_name",
            ReferenceKind::JobTitle => "job_title",
        }
    }

    /// Clave del payload en las respuestas JSON
    pub fn payload_key(&self) -> &'static str {
        self.table()
    }

    /// Nombre legible para los mensajes de la API
    pub fn display_name(&self) -> &'static str {
        match self {
            ReferenceKind::RouteStatus => "Route Status",
            ReferenceKind::BookingStatus => "Booking Status",
            ReferenceKind::Department => "Department",
            ReferenceKind::JobTitle => "Job Title",
        }
    }

    pub fn display_plural(&self) -> &'static str {
        match self {
            ReferenceKind::RouteStatus => "Route Statuses",
            ReferenceKind::BookingStatus => "Booking Statuses",
            ReferenceKind::Department => "Departments",
            ReferenceKind::JobTitle => "Job Titles",
        }
    }
}

/// Fila de una tabla de referencia
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReferenceEntry {
    pub id: i64,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

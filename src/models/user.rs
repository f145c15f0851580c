//! Modelo de User
//!
//! Empleados registrados: perfil, vacunación y referencias opcionales a
//! departamento y puesto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User - mapea a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub about: Option<String>,
    pub photo: Option<String>,
    pub license_number: Option<String>,
    pub employee_id: String,
    pub department_id: Option<i64>,
    pub job_title_id: Option<i64>,
    pub vaccinated: bool,
    pub vaccination_details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Datos para insertar un usuario (la contraseña ya viene hasheada)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub about: Option<String>,
    pub photo: Option<String>,
    pub license_number: Option<String>,
    pub employee_id: String,
    pub department_id: Option<i64>,
    pub job_title_id: Option<i64>,
    pub vaccinated: bool,
    pub vaccination_details: Option<String>,
}

/// Campos mutables del perfil
#[derive(Debug, Clone)]
pub struct UserProfileUpdate {
    pub about: Option<String>,
    pub vaccinated: bool,
    pub vaccination_details: Option<String>,
}

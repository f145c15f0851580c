//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos de los parámetros de la API.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::utils::errors::{validation_error, AppError};

/// Valor centinela que significa "sin filtro" en los parámetros de consulta
pub const NO_FILTER: &str = "0";

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a hora. Acepta `HH:MM` y `HH:MM:SS`.
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            let mut error = ValidationError::new("time");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"HH:MM[:SS]".to_string());
            error
        })
}

/// Interpretar un filtro de fecha: `"0"` significa cualquier fecha
pub fn parse_date_filter(value: &str) -> Result<Option<NaiveDate>, AppError> {
    if value.trim() == NO_FILTER {
        return Ok(None);
    }
    validate_date(value)
        .map(Some)
        .map_err(|_| validation_error("ride_date", "expected YYYY-MM-DD or \"0\""))
}

/// Interpretar un filtro de hora: `"0"` significa cualquier hora
pub fn parse_time_filter(value: &str) -> Result<Option<NaiveTime>, AppError> {
    if value.trim() == NO_FILTER {
        return Ok(None);
    }
    validate_time(value)
        .map(Some)
        .map_err(|_| validation_error("ride_time", "expected HH:MM or \"0\""))
}

/// Validar formato de coordenadas GPS (WGS84)
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Los clientes envían ids como número o como string numérico
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Deserializador para ids que llegan como `1` o `"1"`
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{}'", s))),
    }
}

/// Igual que [`deserialize_id`] pero para campos opcionales
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{}'", s))),
    }
}

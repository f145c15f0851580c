//! Modelo de LocationPoint
//!
//! Puntos ordenados de una ruta (origen, recogida, destino).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Tipo de punto dentro de la ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Origin,
    Pickup,
    Destination,
}

impl PointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Origin => "origin",
            PointType::Pickup => "pickup",
            PointType::Destination => "destination",
        }
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "origin" => Ok(PointType::Origin),
            "pickup" => Ok(PointType::Pickup),
            "destination" => Ok(PointType::Destination),
            other => Err(format!("unknown location point type '{}'", other)),
        }
    }
}

/// LocationPoint - mapea a la tabla location_points
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationPoint {
    pub id: i64,
    pub driver_route_id: i64,
    pub description: String,
    pub points: i32,
    pub lat: f64,
    pub long: f64,
    #[serde(rename = "type")]
    pub point_type: String,
    pub route_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Datos para insertar un punto
#[derive(Debug, Clone)]
pub struct NewLocationPoint {
    pub driver_route_id: i64,
    pub description: String,
    pub points: i32,
    pub lat: f64,
    pub long: f64,
    pub point_type: PointType,
    pub route_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_type_parsing() {
        assert_eq!("Origin".parse::<PointType>().unwrap(), PointType::Origin);
        assert_eq!(" pickup ".parse::<PointType>().unwrap(), PointType::Pickup);
        assert_eq!("destination".parse::<PointType>().unwrap(), PointType::Destination);
        assert!("stopover".parse::<PointType>().is_err());
    }
}

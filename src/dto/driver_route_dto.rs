use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::driver_route::DriverRoute;
use crate::models::location_point::LocationPoint;
use crate::repositories::filters::SortDirection;
use crate::utils::errors::AppResult;
use crate::utils::validation::{deserialize_id, parse_date_filter, parse_time_filter, NO_FILTER};

/// Request para publicar una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRouteRequest {
    pub ride_date: NaiveDate,
    /// `HH:MM` o `HH:MM:SS`
    #[validate(length(min = 1))]
    pub ride_time: String,
    #[validate(range(min = 1, max = 99))]
    pub seat_capacity: i32,
    #[serde(deserialize_with = "deserialize_id")]
    pub route_status_id: i64,
}

/// Solo el estado es mutable
#[derive(Debug, Deserialize)]
pub struct UpdateDriverRouteRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub route_status_id: i64,
}

fn no_filter() -> String {
    NO_FILTER.to_string()
}

fn ascending() -> String {
    "asc".to_string()
}

/// Filtros de fecha/hora de los listados (`"0"` = sin filtro)
#[derive(Debug, Clone, Deserialize)]
pub struct RideFilterQuery {
    #[serde(default = "no_filter")]
    pub ride_date: String,
    #[serde(default = "no_filter")]
    pub ride_time: String,
    #[serde(default = "ascending")]
    pub sort: String,
}

impl Default for RideFilterQuery {
    fn default() -> Self {
        Self {
            ride_date: no_filter(),
            ride_time: no_filter(),
            sort: ascending(),
        }
    }
}

/// Filtros ya interpretados (`None` = sin filtro)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RideFilter {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub sort: SortDirection,
}

impl RideFilterQuery {
    pub fn parse(&self) -> AppResult<RideFilter> {
        Ok(RideFilter {
            date: parse_date_filter(&self.ride_date)?,
            time: parse_time_filter(&self.ride_time)?,
            sort: self.sort.parse()?,
        })
    }
}

/// Ruta enriquecida para los listados
#[derive(Debug, Clone, Serialize)]
pub struct DriverRouteView {
    #[serde(flatten)]
    pub route: DriverRoute,
    pub route_status: String,
    pub seat_approved: i64,
    pub seat_available: i64,
    pub ride_date_formatted: String,
    pub ride_time_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_points: Option<Vec<LocationPoint>>,
}

/// Ruta con el perfil del conductor y sus puntos
#[derive(Debug, Clone, Serialize)]
pub struct DriverRouteDetail {
    #[serde(flatten)]
    pub route: DriverRoute,
    pub driver_name: String,
    pub driver_photo: String,
    pub driver_job_title: Option<String>,
    pub driver_department: Option<String>,
    pub driver_vaccinated: bool,
    pub route_status_name: String,
    pub ride_date_formatted: String,
    pub ride_time_formatted: String,
    pub seat_approved: i64,
    pub seat_available: i64,
    pub location_points: Vec<LocationPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ride_filter_defaults_to_no_filter() {
        let query: RideFilterQuery = serde_json::from_str("{}").unwrap();
        let filter = query.parse().unwrap();

        assert_eq!(filter.date, None);
        assert_eq!(filter.time, None);
        assert_eq!(filter.sort, SortDirection::Asc);
    }

    #[test]
    fn test_ride_filter_parses_values() {
        let query = RideFilterQuery {
            ride_date: "2024-01-10".to_string(),
            ride_time: "08:00".to_string(),
            sort: "desc".to_string(),
        };
        let filter = query.parse().unwrap();

        assert_eq!(filter.date, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(filter.time, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(filter.sort, SortDirection::Desc);

        let bad = RideFilterQuery {
            sort: "up".to_string(),
            ..RideFilterQuery::default()
        };
        assert!(bad.parse().is_err());
    }
}

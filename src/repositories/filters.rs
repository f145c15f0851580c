//! Filtros de consulta de rutas y reservas
//!
//! Cada filtro sabe evaluarse en memoria (`matches`) y traducirse a los
//! parámetros opcionales de las consultas SQL, de modo que ambos
//! almacenamientos comparten la misma semántica.

use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

use crate::models::driver_route::DriverRoute;
use crate::models::passenger_booking::BookingWithRoute;
use crate::utils::errors::{validation_error, AppError};

/// Cota sobre un valor ordenable: ninguna, igualdad exacta o mínimo inclusivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound<T> {
    Any,
    Exactly(T),
    AtLeast(T),
}

impl<T> Default for Bound<T> {
    fn default() -> Self {
        Bound::Any
    }
}

impl<T: PartialOrd + Copy> Bound<T> {
    /// `None` (centinela "0") se convierte en `Any`
    pub fn exactly(value: Option<T>) -> Self {
        value.map_or(Bound::Any, Bound::Exactly)
    }

    pub fn at_least(value: Option<T>) -> Self {
        value.map_or(Bound::Any, Bound::AtLeast)
    }

    pub fn matches(&self, value: T) -> bool {
        match self {
            Bound::Any => true,
            Bound::Exactly(expected) => value == *expected,
            Bound::AtLeast(min) => value >= *min,
        }
    }

    pub fn exact_value(&self) -> Option<T> {
        match self {
            Bound::Exactly(v) => Some(*v),
            _ => None,
        }
    }

    pub fn min_value(&self) -> Option<T> {
        match self {
            Bound::AtLeast(v) => Some(*v),
            _ => None,
        }
    }
}

/// Restricción sobre ids (conductor, estado)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdScope {
    #[default]
    Any,
    OneOf(Vec<i64>),
    NoneOf(Vec<i64>),
}

impl IdScope {
    pub fn only(id: i64) -> Self {
        IdScope::OneOf(vec![id])
    }

    pub fn excluding(id: i64) -> Self {
        IdScope::NoneOf(vec![id])
    }

    pub fn matches(&self, id: i64) -> bool {
        match self {
            IdScope::Any => true,
            IdScope::OneOf(ids) => ids.contains(&id),
            IdScope::NoneOf(ids) => !ids.contains(&id),
        }
    }

    pub fn included(&self) -> Option<Vec<i64>> {
        match self {
            IdScope::OneOf(ids) => Some(ids.clone()),
            _ => None,
        }
    }

    pub fn excluded(&self) -> Option<Vec<i64>> {
        match self {
            IdScope::NoneOf(ids) => Some(ids.clone()),
            _ => None,
        }
    }
}

/// Dirección de ordenación por fecha del viaje
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Fragmento SQL; el enum es cerrado así que es seguro interpolarlo
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(validation_error("sort", "expected 'asc' or 'desc'")),
        }
    }
}

/// Consulta sobre driver_routes
#[derive(Debug, Clone, Default)]
pub struct RouteQuery {
    pub driver: IdScope,
    pub ride_date: Bound<NaiveDate>,
    pub ride_time: Bound<NaiveTime>,
    pub statuses: IdScope,
    pub sort: SortDirection,
}

impl RouteQuery {
    pub fn matches(&self, route: &DriverRoute) -> bool {
        route.deleted_at.is_none()
            && self.driver.matches(route.driver_user_id)
            && self.ride_date.matches(route.ride_date)
            && self.ride_time.matches(route.ride_time)
            && self.statuses.matches(route.route_status_id)
    }
}

/// Consulta sobre las reservas de un pasajero unidas con su ruta
#[derive(Debug, Clone)]
pub struct PassengerBookingQuery {
    pub passenger_user_id: i64,
    pub driver_route_id: Option<i64>,
    pub ride_date: Bound<NaiveDate>,
    pub ride_time: Bound<NaiveTime>,
    pub route_statuses: IdScope,
    pub sort: SortDirection,
}

impl PassengerBookingQuery {
    pub fn for_passenger(passenger_user_id: i64) -> Self {
        Self {
            passenger_user_id,
            driver_route_id: None,
            ride_date: Bound::Any,
            ride_time: Bound::Any,
            route_statuses: IdScope::Any,
            sort: SortDirection::Asc,
        }
    }

    pub fn matches(&self, row: &BookingWithRoute) -> bool {
        row.passenger_user_id == self.passenger_user_id
            && self.driver_route_id.map_or(true, |id| row.driver_route_id == id)
            && self.ride_date.matches(row.ride_date)
            && self.ride_time.matches(row.ride_time)
            && self.route_statuses.matches(row.route_status_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn route(driver: i64, date: (i32, u32, u32), time: (u32, u32), status: i64) -> DriverRoute {
        DriverRoute {
            id: 1,
            driver_user_id: driver,
            ride_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            ride_time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            seat_capacity: 4,
            route_status_id: status,
            sequence: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_bounds() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();

        assert!(Bound::exactly(None).matches(day));
        assert!(Bound::exactly(Some(day)).matches(day));
        assert!(!Bound::exactly(Some(day)).matches(next));
        assert!(Bound::at_least(Some(day)).matches(next));
        assert!(!Bound::at_least(Some(next)).matches(day));
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!(matches!("sideways".parse::<SortDirection>(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_route_query_scopes() {
        let query = RouteQuery {
            driver: IdScope::excluding(7),
            ride_time: Bound::AtLeast(NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
            statuses: IdScope::only(1),
            ..RouteQuery::default()
        };

        assert!(query.matches(&route(3, (2024, 1, 10), (8, 0), 1)));
        assert!(!query.matches(&route(7, (2024, 1, 10), (8, 0), 1)));
        assert!(!query.matches(&route(3, (2024, 1, 10), (7, 59), 1)));
        assert!(!query.matches(&route(3, (2024, 1, 10), (9, 0), 2)));

        let mut deleted = route(3, (2024, 1, 10), (8, 0), 1);
        deleted.deleted_at = Some(Utc::now());
        assert!(!query.matches(&deleted));
    }
}

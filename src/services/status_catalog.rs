//! Catálogo de estados
//!
//! Las tablas `route_statuses` y `booking_statuses` son datos del admin. Al
//! arrancar se resuelven por etiqueta los estados que la lógica necesita, de
//! modo que ningún id numérico queda fijado en el código.

use tracing::info;

use crate::models::reference::{ReferenceEntry, ReferenceKind};
use crate::repositories::ReferenceRepository;
use crate::utils::errors::AppError;

/// Estados de una ruta que la lógica distingue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    Open,
    Closed,
    Cancelled,
    Full,
    Completed,
}

impl RouteState {
    pub const ALL: [RouteState; 5] = [
        RouteState::Open,
        RouteState::Closed,
        RouteState::Cancelled,
        RouteState::Full,
        RouteState::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RouteState::Open => "Open",
            RouteState::Closed => "Closed",
            RouteState::Cancelled => "Cancelled",
            RouteState::Full => "Full",
            RouteState::Completed => "Completed",
        }
    }
}

/// Estados de una reserva que la lógica distingue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    Requested,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingState {
    pub const ALL: [BookingState; 4] = [
        BookingState::Requested,
        BookingState::Approved,
        BookingState::Rejected,
        BookingState::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookingState::Requested => "Requested",
            BookingState::Approved => "Approved",
            BookingState::Rejected => "Rejected",
            BookingState::Cancelled => "Cancelled",
        }
    }
}

/// Ids resueltos de cada estado (instantánea tomada al arrancar)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCatalog {
    route: [i64; 5],
    booking: [i64; 4],
}

fn resolve(entries: &[ReferenceEntry], kind: ReferenceKind, label: &str) -> Result<i64, AppError> {
    entries
        .iter()
        .find(|entry| entry.label.trim().eq_ignore_ascii_case(label))
        .map(|entry| entry.id)
        .ok_or_else(|| {
            AppError::Internal(format!("{} '{}' is missing from {}", kind.display_name(), label, kind.table()))
        })
}

impl StatusCatalog {
    pub fn from_entries(
        route_statuses: &[ReferenceEntry],
        booking_statuses: &[ReferenceEntry],
    ) -> Result<Self, AppError> {
        let mut route = [0; 5];
        for (slot, state) in route.iter_mut().zip(RouteState::ALL) {
            *slot = resolve(route_statuses, ReferenceKind::RouteStatus, state.label())?;
        }

        let mut booking = [0; 4];
        for (slot, state) in booking.iter_mut().zip(BookingState::ALL) {
            *slot = resolve(booking_statuses, ReferenceKind::BookingStatus, state.label())?;
        }

        Ok(Self { route, booking })
    }

    pub async fn load(references: &dyn ReferenceRepository) -> Result<Self, AppError> {
        let route_statuses = references.list(ReferenceKind::RouteStatus).await?;
        let booking_statuses = references.list(ReferenceKind::BookingStatus).await?;

        let catalog = Self::from_entries(&route_statuses, &booking_statuses)?;
        info!(
            "📚 Catálogo de estados cargado (ruta abierta = {}, reserva aprobada = {})",
            catalog.route_id(RouteState::Open),
            catalog.booking_id(BookingState::Approved)
        );
        Ok(catalog)
    }

    pub fn route_id(&self, state: RouteState) -> i64 {
        self.route[state as usize]
    }

    pub fn route_ids(&self, states: &[RouteState]) -> Vec<i64> {
        states.iter().map(|state| self.route_id(*state)).collect()
    }

    pub fn booking_id(&self, state: BookingState) -> i64 {
        self.booking[state as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entries(labels: &[(i64, &str)]) -> Vec<ReferenceEntry> {
        labels
            .iter()
            .map(|(id, label)| ReferenceEntry {
                id: *id,
                label: label.to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_resolves_by_label_not_position() {
        let routes = entries(&[(10, "completed"), (11, "Open"), (12, "Full"), (13, "Closed"), (14, "Cancelled")]);
        let bookings = entries(&[(7, "Approved"), (8, "Requested"), (9, "Cancelled"), (20, "Rejected")]);

        let catalog = StatusCatalog::from_entries(&routes, &bookings).unwrap();

        assert_eq!(catalog.route_id(RouteState::Open), 11);
        assert_eq!(catalog.route_id(RouteState::Completed), 10);
        assert_eq!(catalog.booking_id(BookingState::Approved), 7);
        assert_eq!(
            catalog.route_ids(&[RouteState::Closed, RouteState::Cancelled]),
            vec![13, 14]
        );
    }

    #[test]
    fn test_missing_label_is_an_error() {
        let routes = entries(&[(1, "Open")]);
        let bookings = entries(&[(1, "Approved")]);

        assert!(matches!(
            StatusCatalog::from_entries(&routes, &bookings),
            Err(AppError::Internal(_))
        ));
    }
}

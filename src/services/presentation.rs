//! Capa de presentación
//!
//! Enriquecimiento de solo lectura compartido por todos los listados:
//! etiqueta de estado, asientos aprobados y disponibles, fecha y hora
//! legibles, descripciones de los puntos y URLs de fotos. Cada listado
//! elige qué adjunta mediante [`RouteViewOptions`].
//!
//! Las búsquedas de usuarios, rutas y puntos incluyen filas borradas
//! para que el historial de reservas siga legible.

use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

use crate::config::EnvironmentConfig;
use crate::dto::driver_route_dto::{DriverRouteDetail, DriverRouteView};
use crate::dto::passenger_booking_dto::{DriverBookingView, PassengerBookingDetail, PassengerBookingView};
use crate::dto::user_dto::UserProfileResponse;
use crate::models::driver_route::DriverRoute;
use crate::models::passenger_booking::{BookingWithRoute, PassengerBooking};
use crate::models::reference::ReferenceKind;
use crate::models::user::User;
use crate::repositories::Repositories;
use crate::services::status_catalog::{BookingState, StatusCatalog};
use crate::utils::errors::{not_found_error, AppResult};

/// `"Jan 10, 2024"`
pub fn format_ride_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// `"8:00 AM"`
pub fn format_ride_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// URL pública de un fichero almacenado. Las URLs absolutas pasan intactas.
pub fn asset_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Qué adjunta cada listado de rutas
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteViewOptions {
    pub with_location_points: bool,
}

impl RouteViewOptions {
    pub fn with_location_points() -> Self {
        Self {
            with_location_points: true,
        }
    }
}

type Labels = HashMap<i64, String>;

pub struct Presenter<'a> {
    repos: &'a Repositories,
    catalog: &'a StatusCatalog,
    config: &'a EnvironmentConfig,
}

impl<'a> Presenter<'a> {
    pub fn new(repos: &'a Repositories, catalog: &'a StatusCatalog, config: &'a EnvironmentConfig) -> Self {
        Self { repos, catalog, config }
    }

    /// Etiquetas de una tabla de referencia, cargadas una vez por listado
    async fn labels(&self, kind: ReferenceKind) -> AppResult<Labels> {
        let entries = self.repos.references.list(kind).await?;
        Ok(entries.into_iter().map(|entry| (entry.id, entry.label)).collect())
    }

    fn label(labels: &Labels, id: i64) -> String {
        labels.get(&id).cloned().unwrap_or_default()
    }

    pub fn photo_url(&self, photo: Option<&str>) -> String {
        let path = photo
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(self.config.default_photo.as_str());
        asset_url(&self.config.asset_base_url, path)
    }

    /// Reservas de la ruta en estado aprobado
    pub async fn approved_seats(&self, driver_route_id: i64) -> AppResult<i64> {
        self.repos
            .bookings
            .count_by_status(driver_route_id, self.catalog.booking_id(BookingState::Approved))
            .await
    }

    async fn point_description(&self, id: i64) -> AppResult<Option<String>> {
        Ok(self.repos.points.find_by_id_with_deleted(id).await?.map(|p| p.description))
    }

    async fn route_view(
        &self,
        route: DriverRoute,
        route_labels: &Labels,
        options: RouteViewOptions,
    ) -> AppResult<DriverRouteView> {
        let seat_approved = self.approved_seats(route.id).await?;
        let location_points = if options.with_location_points {
            Some(self.repos.points.list_for_route(route.id).await?)
        } else {
            None
        };

        Ok(DriverRouteView {
            route_status: Self::label(route_labels, route.route_status_id),
            seat_approved,
            seat_available: (i64::from(route.seat_capacity) - seat_approved).max(0),
            ride_date_formatted: format_ride_date(route.ride_date),
            ride_time_formatted: format_ride_time(route.ride_time),
            location_points,
            route,
        })
    }

    pub async fn route_views(
        &self,
        routes: Vec<DriverRoute>,
        options: RouteViewOptions,
    ) -> AppResult<Vec<DriverRouteView>> {
        let route_labels = self.labels(ReferenceKind::RouteStatus).await?;

        let mut views = Vec::with_capacity(routes.len());
        for route in routes {
            views.push(self.route_view(route, &route_labels, options).await?);
        }
        Ok(views)
    }

    /// Ruta con el perfil del conductor (pantalla de detalle)
    pub async fn route_detail(&self, route: DriverRoute) -> AppResult<DriverRouteDetail> {
        let driver = self
            .repos
            .users
            .find_by_id_with_deleted(route.driver_user_id)
            .await?
            .ok_or_else(|| not_found_error("User", route.driver_user_id))?;

        let route_labels = self.labels(ReferenceKind::RouteStatus).await?;
        let job_title = self.reference_label(ReferenceKind::JobTitle, driver.job_title_id).await?;
        let department = self.reference_label(ReferenceKind::Department, driver.department_id).await?;
        let seat_approved = self.approved_seats(route.id).await?;
        let location_points = self.repos.points.list_for_route(route.id).await?;

        Ok(DriverRouteDetail {
            driver_name: driver.full_name(),
            driver_photo: self.photo_url(driver.photo.as_deref()),
            driver_job_title: job_title,
            driver_department: department,
            driver_vaccinated: driver.vaccinated,
            route_status_name: Self::label(&route_labels, route.route_status_id),
            ride_date_formatted: format_ride_date(route.ride_date),
            ride_time_formatted: format_ride_time(route.ride_time),
            seat_approved,
            seat_available: (i64::from(route.seat_capacity) - seat_approved).max(0),
            location_points,
            route,
        })
    }

    async fn reference_label(&self, kind: ReferenceKind, id: Option<i64>) -> AppResult<Option<String>> {
        match id {
            Some(id) => Ok(self.repos.references.find_by_id(kind, id).await?.map(|e| e.label)),
            None => Ok(None),
        }
    }

    pub async fn passenger_booking_views(
        &self,
        rows: Vec<BookingWithRoute>,
    ) -> AppResult<Vec<PassengerBookingView>> {
        let booking_labels = self.labels(ReferenceKind::BookingStatus).await?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let seat_approved = self.approved_seats(row.driver_route_id).await?;
            views.push(PassengerBookingView {
                booking_status: Self::label(&booking_labels, row.booking_status_id),
                seat_approved,
                seat_available: (i64::from(row.seat_capacity) - seat_approved).max(0),
                ride_date_formatted: format_ride_date(row.ride_date),
                ride_time_formatted: format_ride_time(row.ride_time),
                pick_up_description: self.point_description(row.pick_up_id).await?,
                drop_off_description: self.point_description(row.drop_off_id).await?,
                booking: row,
            });
        }
        Ok(views)
    }

    pub async fn driver_booking_views(
        &self,
        bookings: Vec<PassengerBooking>,
    ) -> AppResult<Vec<DriverBookingView>> {
        let booking_labels = self.labels(ReferenceKind::BookingStatus).await?;

        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let passenger = self
                .repos
                .users
                .find_by_id_with_deleted(booking.passenger_user_id)
                .await?
                .ok_or_else(|| not_found_error("User", booking.passenger_user_id))?;

            views.push(DriverBookingView {
                booking_status_name: Self::label(&booking_labels, booking.booking_status_id),
                passenger_user_name: passenger.full_name(),
                passenger_user_photo: self.photo_url(passenger.photo.as_deref()),
                vaccinated: passenger.vaccinated,
                pick_up_description: self.point_description(booking.pick_up_id).await?,
                drop_off_description: self.point_description(booking.drop_off_id).await?,
                booking,
            });
        }
        Ok(views)
    }

    pub async fn booking_detail(&self, booking: PassengerBooking) -> AppResult<PassengerBookingDetail> {
        let route = self
            .repos
            .routes
            .find_by_id_with_deleted(booking.driver_route_id)
            .await?
            .ok_or_else(|| not_found_error("Driver Route", booking.driver_route_id))?;

        let booking_labels = self.labels(ReferenceKind::BookingStatus).await?;
        let route_labels = self.labels(ReferenceKind::RouteStatus).await?;

        Ok(PassengerBookingDetail {
            booking_status: Self::label(&booking_labels, booking.booking_status_id),
            driver_route: self.route_view(route, &route_labels, RouteViewOptions::default()).await?,
            pick_up_description: self.point_description(booking.pick_up_id).await?,
            drop_off_description: self.point_description(booking.drop_off_id).await?,
            booking,
        })
    }

    pub async fn user_profile(&self, user: User) -> AppResult<UserProfileResponse> {
        Ok(UserProfileResponse {
            full_name: user.full_name(),
            department_name: self.reference_label(ReferenceKind::Department, user.department_id).await?,
            job_title_name: self.reference_label(ReferenceKind::JobTitle, user.job_title_id).await?,
            user_photo: self.photo_url(user.photo.as_deref()),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ride_formatting() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(format_ride_date(date), "Jan 10, 2024");
        assert_eq!(format_ride_date(NaiveDate::from_ymd_opt(2023, 12, 5).unwrap()), "Dec 05, 2023");

        assert_eq!(format_ride_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap()), "8:00 AM");
        assert_eq!(format_ride_time(NaiveTime::from_hms_opt(12, 5, 0).unwrap()), "12:05 PM");
        assert_eq!(format_ride_time(NaiveTime::from_hms_opt(0, 30, 0).unwrap()), "12:30 AM");
        assert_eq!(format_ride_time(NaiveTime::from_hms_opt(23, 45, 0).unwrap()), "11:45 PM");
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(
            asset_url("http://localhost:3000/", "/storage/documents/default.jpg"),
            "http://localhost:3000/storage/documents/default.jpg"
        );
        assert_eq!(asset_url("http://cdn", "https://img/x.png"), "https://img/x.png");
    }

    #[tokio::test]
    async fn test_photo_url_falls_back_to_default() {
        let repos = Repositories::in_memory();
        let catalog = StatusCatalog::load(repos.references.as_ref()).await.unwrap();
        let config = EnvironmentConfig::default();
        let presenter = Presenter::new(&repos, &catalog, &config);

        assert_eq!(
            presenter.photo_url(None),
            "http://localhost:3000/storage/documents/default.jpg"
        );
        assert_eq!(
            presenter.photo_url(Some("storage/documents/ana.png")),
            "http://localhost:3000/storage/documents/ana.png"
        );
    }
}

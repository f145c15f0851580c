use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::passenger_booking::{BookingWithRoute, NewPassengerBooking, PassengerBooking};
use crate::repositories::filters::PassengerBookingQuery;
use crate::utils::errors::{persistence_error, AppError};

/// Libro de reservas de pasajeros
#[async_trait]
pub trait PassengerBookingRepository: Send + Sync {
    async fn create(&self, booking: NewPassengerBooking) -> Result<PassengerBooking, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<PassengerBooking>, AppError>;
    async fn list_all(&self) -> Result<Vec<PassengerBooking>, AppError>;
    /// Reservas del pasajero unidas con su ruta (ninguna de las dos borrada)
    async fn query_for_passenger(&self, query: &PassengerBookingQuery) -> Result<Vec<BookingWithRoute>, AppError>;
    async fn list_for_route(&self, driver_route_id: i64, booking_status_id: Option<i64>) -> Result<Vec<PassengerBooking>, AppError>;
    async fn count_by_status(&self, driver_route_id: i64, booking_status_id: i64) -> Result<i64, AppError>;
    async fn update_status(&self, id: i64, booking_status_id: i64) -> Result<Option<PassengerBooking>, AppError>;
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct PgPassengerBookingRepository {
    pool: PgPool,
}

impl PgPassengerBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PassengerBookingRepository for PgPassengerBookingRepository {
    async fn create(&self, booking: NewPassengerBooking) -> Result<PassengerBooking, AppError> {
        sqlx::query_as::<_, PassengerBooking>(
            r#"
            INSERT INTO passenger_bookings (
                passenger_user_id, driver_route_id, pick_up_id, drop_off_id,
                booking_status_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(booking.passenger_user_id)
        .bind(booking.driver_route_id)
        .bind(booking.pick_up_id)
        .bind(booking.drop_off_id)
        .bind(booking.booking_status_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("creating passenger booking", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PassengerBooking>, AppError> {
        sqlx::query_as::<_, PassengerBooking>(
            "SELECT * FROM passenger_bookings WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("finding passenger booking", e))
    }

    async fn list_all(&self) -> Result<Vec<PassengerBooking>, AppError> {
        sqlx::query_as::<_, PassengerBooking>(
            "SELECT * FROM passenger_bookings WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("listing passenger bookings", e))
    }

    async fn query_for_passenger(&self, query: &PassengerBookingQuery) -> Result<Vec<BookingWithRoute>, AppError> {
        let sql = format!(
            r#"
            SELECT
                pb.id AS booking_id, pb.passenger_user_id, pb.driver_route_id,
                pb.pick_up_id, pb.drop_off_id, pb.booking_status_id,
                dr.driver_user_id, dr.ride_date, dr.ride_time, dr.seat_capacity,
                dr.route_status_id, dr.sequence
            FROM passenger_bookings pb
            JOIN driver_routes dr ON dr.id = pb.driver_route_id
            WHERE pb.deleted_at IS NULL
              AND dr.deleted_at IS NULL
              AND pb.passenger_user_id = $1
              AND ($2::bigint IS NULL OR pb.driver_route_id = $2)
              AND ($3::date IS NULL OR dr.ride_date = $3)
              AND ($4::date IS NULL OR dr.ride_date >= $4)
              AND ($5::time IS NULL OR dr.ride_time = $5)
              AND ($6::time IS NULL OR dr.ride_time >= $6)
              AND ($7::bigint[] IS NULL OR dr.route_status_id = ANY($7))
              AND ($8::bigint[] IS NULL OR NOT (dr.route_status_id = ANY($8)))
            ORDER BY dr.ride_date {}, dr.ride_time ASC, pb.id ASC
            "#,
            query.sort.as_sql()
        );

        sqlx::query_as::<_, BookingWithRoute>(&sql)
            .bind(query.passenger_user_id)
            .bind(query.driver_route_id)
            .bind(query.ride_date.exact_value())
            .bind(query.ride_date.min_value())
            .bind(query.ride_time.exact_value())
            .bind(query.ride_time.min_value())
            .bind(query.route_statuses.included())
            .bind(query.route_statuses.excluded())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("querying passenger bookings", e))
    }

    async fn list_for_route(&self, driver_route_id: i64, booking_status_id: Option<i64>) -> Result<Vec<PassengerBooking>, AppError> {
        sqlx::query_as::<_, PassengerBooking>(
            r#"
            SELECT * FROM passenger_bookings
            WHERE driver_route_id = $1
              AND deleted_at IS NULL
              AND ($2::bigint IS NULL OR booking_status_id = $2)
            ORDER BY id
            "#,
        )
        .bind(driver_route_id)
        .bind(booking_status_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("listing route bookings", e))
    }

    async fn count_by_status(&self, driver_route_id: i64, booking_status_id: i64) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM passenger_bookings
            WHERE driver_route_id = $1 AND booking_status_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(driver_route_id)
        .bind(booking_status_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("counting route bookings", e))?;

        Ok(result.0)
    }

    async fn update_status(&self, id: i64, booking_status_id: i64) -> Result<Option<PassengerBooking>, AppError> {
        sqlx::query_as::<_, PassengerBooking>(
            r#"
            UPDATE passenger_bookings SET booking_status_id = $2, updated_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(booking_status_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("updating passenger booking status", e))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE passenger_bookings SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("deleting passenger booking", e))?;

        Ok(result.rows_affected() > 0)
    }
}

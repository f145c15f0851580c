use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};

use super::{IdPath, JsonBody, QueryParams};

use crate::controllers::passenger_booking_controller::PassengerBookingController;
use crate::dto::api_response::ApiResponse;
use crate::dto::driver_route_dto::RideFilterQuery;
use crate::dto::passenger_booking_dto::{
    BookingSearchQuery, CreatePassengerBookingRequest, DriverBookingView, DriverBookingsRequest,
    PassengerBookingDetail, PassengerBookingView, UpdatePassengerBookingRequest,
};
use crate::middleware::CallerIdentity;
use crate::models::passenger_booking::PassengerBooking;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

const RETRIEVED: &str = "Passenger Bookings retrieved successfully.";
const RETRIEVE_ERROR: &str = "Passenger Bookings retrieve error.";
const STORE_ERROR: &str = "New Passenger Booking store error.";
const SHOW_ERROR: &str = "Passenger Booking retrieve error.";
const UPDATE_ERROR: &str = "Passenger Booking update error.";
const DELETE_ERROR: &str = "Passenger Booking delete error.";

/// Rutas de `/passenger-bookings`
pub fn create_passenger_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(store_booking))
        .route("/user", get(user_bookings))
        .route("/search", get(search_bookings))
        .route("/driver/:id", post(driver_bookings))
        .route("/:id", get(show_booking).put(update_booking).delete(delete_booking))
}

async fn list_bookings(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PassengerBooking>>> {
    let bookings = PassengerBookingController::new(&state)
        .index()
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("passenger_bookings", bookings, RETRIEVED))
}

async fn store_booking(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    body: JsonBody<CreatePassengerBookingRequest>,
) -> AppResult<ApiResponse<PassengerBooking>> {
    let Json(request) = body.or_canned(STORE_ERROR)?;
    let booking = PassengerBookingController::new(&state)
        .store(caller, request)
        .await
        .or_canned(STORE_ERROR)?;
    Ok(ApiResponse::ok(
        "passenger_bookings",
        booking,
        "New Passenger Booking stored successfully.",
    ))
}

async fn show_booking(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<PassengerBookingDetail>> {
    let Path(id) = path.or_canned(SHOW_ERROR)?;
    let booking = PassengerBookingController::new(&state)
        .show(id)
        .await
        .or_canned(SHOW_ERROR)?;
    Ok(ApiResponse::maybe(
        "passenger_booking",
        booking,
        "Passenger Booking retrieved successfully.",
    ))
}

async fn update_booking(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody<UpdatePassengerBookingRequest>,
) -> AppResult<ApiResponse<PassengerBooking>> {
    let Path(id) = path.or_canned(UPDATE_ERROR)?;
    let Json(request) = body.or_canned(UPDATE_ERROR)?;
    let booking = PassengerBookingController::new(&state)
        .update_status(id, request.booking_status_id)
        .await
        .or_canned(UPDATE_ERROR)?;
    Ok(ApiResponse::ok(
        "passenger_bookings",
        booking,
        "Passenger Booking updated successfully.",
    ))
}

async fn delete_booking(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<()>> {
    let Path(id) = path.or_canned(DELETE_ERROR)?;
    PassengerBookingController::new(&state)
        .destroy(id)
        .await
        .or_canned(DELETE_ERROR)?;
    Ok(ApiResponse::message("Passenger Booking deleted successfully."))
}

async fn user_bookings(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    query: QueryParams<RideFilterQuery>,
) -> AppResult<ApiResponse<Vec<PassengerBookingView>>> {
    let Query(query) = query.or_canned(RETRIEVE_ERROR)?;
    let filter = query.parse().or_canned(RETRIEVE_ERROR)?;
    let bookings = PassengerBookingController::new(&state)
        .for_passenger(caller, filter)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("passenger_bookings", bookings, RETRIEVED))
}

async fn search_bookings(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    query: QueryParams<BookingSearchQuery>,
) -> AppResult<ApiResponse<Vec<PassengerBookingView>>> {
    let Query(query) = query.or_canned(RETRIEVE_ERROR)?;
    let bookings = PassengerBookingController::new(&state)
        .search_for_passenger(caller, query.driver_route_id)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("passenger_bookings", bookings, RETRIEVED))
}

async fn driver_bookings(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody<DriverBookingsRequest>,
) -> AppResult<ApiResponse<Vec<DriverBookingView>>> {
    let Path(driver_route_id) = path.or_canned(RETRIEVE_ERROR)?;
    let Json(request) = body.or_canned(RETRIEVE_ERROR)?;
    let bookings = PassengerBookingController::new(&state)
        .for_driver_route(driver_route_id, request.booking_status_id)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("passenger_bookings", bookings, RETRIEVED))
}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::{IdPath, JsonBody};

use crate::controllers::location_point_controller::LocationPointController;
use crate::dto::api_response::ApiResponse;
use crate::dto::location_point_dto::{CreateLocationPointRequest, UpdateLocationPointRequest};
use crate::models::location_point::LocationPoint;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

/// Rutas de `/location-points`
pub fn create_location_point_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_points).post(store_point))
        .route("/:id", get(show_point).put(update_point).delete(delete_point))
}

async fn list_points(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<LocationPoint>>> {
    let points = LocationPointController::new(&state)
        .index()
        .await
        .or_canned("Location Point retrieve error.")?;
    Ok(ApiResponse::ok("location_points", points, "Location Points retrieved successfully."))
}

async fn store_point(
    State(state): State<AppState>,
    body: JsonBody<CreateLocationPointRequest>,
) -> AppResult<ApiResponse<LocationPoint>> {
    let Json(request) = body.or_canned("New Location Point store error.")?;
    let point = LocationPointController::new(&state)
        .store(request)
        .await
        .or_canned("New Location Point store error.")?;
    Ok(ApiResponse::ok("location_points", point, "New Location Point stored successfully."))
}

async fn show_point(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<LocationPoint>> {
    let Path(id) = path.or_canned("Location Point retrieve error.")?;
    let point = LocationPointController::new(&state)
        .show(id)
        .await
        .or_canned("Location Point retrieve error.")?;
    Ok(ApiResponse::maybe("location_points", point, "Location Point retrieved successfully."))
}

async fn update_point(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody<UpdateLocationPointRequest>,
) -> AppResult<ApiResponse<LocationPoint>> {
    let Path(id) = path.or_canned("Location Point update error.")?;
    let Json(request) = body.or_canned("Location Point update error.")?;
    let point = LocationPointController::new(&state)
        .update_description(id, request)
        .await
        .or_canned("Location Point update error.")?;
    Ok(ApiResponse::ok("location_points", point, "Location Point updated successfully."))
}

async fn delete_point(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<()>> {
    let Path(id) = path.or_canned("Location Point delete error.")?;
    LocationPointController::new(&state)
        .destroy(id)
        .await
        .or_canned("Location Point delete error.")?;
    Ok(ApiResponse::message("Location Point deleted successfully."))
}

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};

use super::{IdPath, JsonBody};

use crate::controllers::car_controller::CarController;
use crate::dto::api_response::ApiResponse;
use crate::dto::car_dto::{CreateCarRequest, UpdateCarRequest};
use crate::middleware::CallerIdentity;
use crate::models::user_car::UserCar;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

/// Rutas de `/cars`
pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(store_car))
        .route("/user", get(user_cars))
        .route("/:id", get(show_car).put(update_car).delete(delete_car))
}

async fn list_cars(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UserCar>>> {
    let cars = CarController::new(&state).index().await.or_canned("Car retrieve error.")?;
    Ok(ApiResponse::ok("cars", cars, "Cars retrieved successfully."))
}

async fn store_car(
    State(state): State<AppState>,
    body: JsonBody<CreateCarRequest>,
) -> AppResult<ApiResponse<UserCar>> {
    let Json(request) = body.or_canned("New Car store error.")?;
    let car = CarController::new(&state)
        .store(request)
        .await
        .or_canned("New Car store error.")?;
    Ok(ApiResponse::ok("cars", car, "New Car stored successfully."))
}

async fn show_car(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<UserCar>> {
    let Path(id) = path.or_canned("Car retrieve error.")?;
    let car = CarController::new(&state).show(id).await.or_canned("Car retrieve error.")?;
    Ok(ApiResponse::maybe("cars", car, "Car retrieved successfully."))
}

async fn update_car(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody<UpdateCarRequest>,
) -> AppResult<ApiResponse<UserCar>> {
    let Path(id) = path.or_canned("Car update error.")?;
    let Json(request) = body.or_canned("Car update error.")?;
    let car = CarController::new(&state)
        .update(id, request)
        .await
        .or_canned("Car update error.")?;
    Ok(ApiResponse::ok("cars", car, "Car updated successfully."))
}

async fn delete_car(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<()>> {
    let Path(id) = path.or_canned("Car delete error.")?;
    CarController::new(&state).destroy(id).await.or_canned("Car delete error.")?;
    Ok(ApiResponse::message("Car deleted successfully."))
}

async fn user_cars(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> AppResult<ApiResponse<Vec<UserCar>>> {
    let cars = CarController::new(&state)
        .for_user(caller)
        .await
        .or_canned("Car retrieve error.")?;
    Ok(ApiResponse::ok("cars", cars, "Cars retrieved successfully."))
}

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};

use super::{IdPath, JsonBody, QueryParams};

use crate::controllers::driver_route_controller::DriverRouteController;
use crate::dto::api_response::ApiResponse;
use crate::dto::driver_route_dto::{
    CreateDriverRouteRequest, DriverRouteDetail, DriverRouteView, RideFilterQuery,
    UpdateDriverRouteRequest,
};
use crate::middleware::CallerIdentity;
use crate::models::driver_route::DriverRoute;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

const RETRIEVED: &str = "Driver Routes retrieved successfully.";
const RETRIEVE_ERROR: &str = "Driver Route retrieve error.";
const STORE_ERROR: &str = "New Driver Route store error.";
const UPDATE_ERROR: &str = "Driver Route update error.";
const DELETE_ERROR: &str = "Driver Route delete error.";
const DETAIL_ERROR: &str = "Driver Route - Location Points retrieve error.";

/// Rutas de `/driver-routes`
pub fn create_driver_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(store_route))
        .route("/user", get(user_routes))
        .route("/user/past", get(user_routes_past))
        .route("/search", get(search_routes))
        .route("/:id", get(show_route).put(update_route).delete(delete_route))
        .route("/:id/location-points", get(route_location_points))
}

async fn list_routes(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<DriverRoute>>> {
    let routes = DriverRouteController::new(&state).index().await.or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("driver_routes", routes, RETRIEVED))
}

async fn store_route(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    body: JsonBody<CreateDriverRouteRequest>,
) -> AppResult<ApiResponse<DriverRoute>> {
    let Json(request) = body.or_canned(STORE_ERROR)?;
    let route = DriverRouteController::new(&state)
        .store(caller, request)
        .await
        .or_canned(STORE_ERROR)?;
    Ok(ApiResponse::ok("driver_routes", route, "New Driver Route stored successfully."))
}

async fn show_route(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<DriverRoute>> {
    let Path(id) = path.or_canned(RETRIEVE_ERROR)?;
    let route = DriverRouteController::new(&state).show(id).await.or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::maybe("driver_routes", route, "Driver Route retrieved successfully."))
}

async fn update_route(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody<UpdateDriverRouteRequest>,
) -> AppResult<ApiResponse<DriverRoute>> {
    let Path(id) = path.or_canned(UPDATE_ERROR)?;
    let Json(request) = body.or_canned(UPDATE_ERROR)?;
    let route = DriverRouteController::new(&state)
        .update_status(id, request.route_status_id)
        .await
        .or_canned(UPDATE_ERROR)?;
    Ok(ApiResponse::ok("driver_routes", route, "Driver Route updated successfully."))
}

async fn delete_route(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<()>> {
    let Path(id) = path.or_canned(DELETE_ERROR)?;
    DriverRouteController::new(&state)
        .destroy(id)
        .await
        .or_canned(DELETE_ERROR)?;
    Ok(ApiResponse::message("Driver Route deleted successfully."))
}

async fn user_routes(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    query: QueryParams<RideFilterQuery>,
) -> AppResult<ApiResponse<Vec<DriverRouteView>>> {
    let Query(query) = query.or_canned(RETRIEVE_ERROR)?;
    let filter = query.parse().or_canned(RETRIEVE_ERROR)?;
    let routes = DriverRouteController::new(&state)
        .upcoming_for_driver(caller, filter)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("driver_routes", routes, RETRIEVED))
}

async fn user_routes_past(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    query: QueryParams<RideFilterQuery>,
) -> AppResult<ApiResponse<Vec<DriverRouteView>>> {
    let Query(query) = query.or_canned(RETRIEVE_ERROR)?;
    let filter = query.parse().or_canned(RETRIEVE_ERROR)?;
    let routes = DriverRouteController::new(&state)
        .past_for_driver(caller, filter)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("driver_routes", routes, RETRIEVED))
}

async fn search_routes(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    query: QueryParams<RideFilterQuery>,
) -> AppResult<ApiResponse<Vec<DriverRouteView>>> {
    let Query(query) = query.or_canned(RETRIEVE_ERROR)?;
    let filter = query.parse().or_canned(RETRIEVE_ERROR)?;
    let routes = DriverRouteController::new(&state)
        .search_available(caller, filter)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("driver_routes", routes, RETRIEVED))
}

async fn route_location_points(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<DriverRouteDetail>> {
    let Path(id) = path.or_canned(DETAIL_ERROR)?;
    let detail = DriverRouteController::new(&state)
        .detail(id)
        .await
        .or_canned(DETAIL_ERROR)?;
    Ok(ApiResponse::maybe(
        "driver_route",
        detail,
        "Driver Route - Location Points retrieved successfully.",
    ))
}

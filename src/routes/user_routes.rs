use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};

use super::{IdPath, JsonBody};

use crate::controllers::user_controller::UserController;
use crate::dto::api_response::ApiResponse;
use crate::dto::user_dto::{RegisterUserRequest, UpdateUserRequest, UserProfileResponse};
use crate::middleware::CallerIdentity;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

/// `/user` del usuario autenticado
pub fn create_current_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_user))
        .route("/profile", get(user_profile))
}

/// CRUD de `/users`
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(store_user))
        .route("/:id", get(show_user).put(update_user).delete(delete_user))
}

async fn current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> AppResult<ApiResponse<User>> {
    let user = UserController::new(&state)
        .current(caller)
        .await
        .or_canned("User retrieve error.")?;
    Ok(ApiResponse::ok("users", user, "User retrieved successfully."))
}

async fn user_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> AppResult<ApiResponse<UserProfileResponse>> {
    let profile = UserController::new(&state)
        .profile(caller)
        .await
        .or_canned("User retrieve error.")?;
    Ok(ApiResponse::ok("users", profile, "User retrieved successfully."))
}

async fn list_users(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<User>>> {
    let users = UserController::new(&state).index().await.or_canned("User retrieve error.")?;
    Ok(ApiResponse::ok("users", users, "Users retrieved successfully."))
}

async fn store_user(
    State(state): State<AppState>,
    body: JsonBody<RegisterUserRequest>,
) -> AppResult<ApiResponse<User>> {
    let Json(request) = body.or_canned("New User store error.")?;
    let user = UserController::new(&state)
        .register(request)
        .await
        .or_canned("New User store error.")?;
    Ok(ApiResponse::ok("users", user, "New User stored successfully."))
}

async fn show_user(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<User>> {
    let Path(id) = path.or_canned("User retrieve error.")?;
    let user = UserController::new(&state).show(id).await.or_canned("User retrieve error.")?;
    Ok(ApiResponse::maybe("users", user, "User retrieved successfully."))
}

async fn update_user(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody<UpdateUserRequest>,
) -> AppResult<ApiResponse<User>> {
    let Path(id) = path.or_canned("User update error.")?;
    let Json(request) = body.or_canned("User update error.")?;
    let user = UserController::new(&state)
        .update(id, request)
        .await
        .or_canned("User update error.")?;
    Ok(ApiResponse::ok("users", user, "User updated successfully."))
}

async fn delete_user(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<()>> {
    let Path(id) = path.or_canned("User delete error.")?;
    UserController::new(&state).destroy(id).await.or_canned("User delete error.")?;
    Ok(ApiResponse::message("User deleted successfully."))
}

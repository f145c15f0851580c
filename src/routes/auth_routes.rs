use axum::{
    extract::State,
    routing::post,
    Json, Router,
};

use super::JsonBody;

use crate::controllers::user_controller::UserController;
use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::user_dto::RegisterUserRequest;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

/// Rutas públicas de registro y login
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    body: JsonBody<RegisterUserRequest>,
) -> AppResult<ApiResponse<User>> {
    let Json(request) = body.or_canned("New User store error.")?;
    let user = UserController::new(&state)
        .register(request)
        .await
        .or_canned("New User store error.")?;
    Ok(ApiResponse::ok("users", user, "New User registered successfully."))
}

async fn login(
    State(state): State<AppState>,
    body: JsonBody<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let Json(request) = body.or_canned("User log in error.")?;
    // Credenciales inválidas mantienen el 401
    let login = UserController::new(&state).login(request).await.or_canned("User log in error.")?;
    Ok(ApiResponse::ok("token", login, "User logged in successfully."))
}

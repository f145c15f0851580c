use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};

use super::{IdPath, JsonBody};

use crate::controllers::notification_controller::NotificationController;
use crate::dto::api_response::ApiResponse;
use crate::dto::notification_dto::{CreateNotificationRequest, UpdateNotificationRequest};
use crate::middleware::CallerIdentity;
use crate::models::notification::Notification;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

const RETRIEVED: &str = "Notifications retrieved successfully.";
const RETRIEVE_ERROR: &str = "Notification retrieve error.";

/// Rutas de `/notifications`
pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications).post(store_notification))
        .route("/user", get(user_notifications))
        .route("/user/unread", get(user_unread_notifications))
        .route(
            "/:id",
            get(show_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
}

async fn list_notifications(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Notification>>> {
    let notifications = NotificationController::new(&state)
        .index()
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("notifications", notifications, RETRIEVED))
}

async fn store_notification(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    body: JsonBody<CreateNotificationRequest>,
) -> AppResult<ApiResponse<Notification>> {
    let Json(request) = body.or_canned("New Notification store error.")?;
    let notification = NotificationController::new(&state)
        .store(caller, request)
        .await
        .or_canned("New Notification store error.")?;
    Ok(ApiResponse::ok(
        "notifications",
        notification,
        "New Notification stored successfully.",
    ))
}

async fn show_notification(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<Notification>> {
    let Path(id) = path.or_canned(RETRIEVE_ERROR)?;
    let notification = NotificationController::new(&state)
        .show(id)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::maybe(
        "notifications",
        notification,
        "Notification retrieved successfully.",
    ))
}

async fn update_notification(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody<UpdateNotificationRequest>,
) -> AppResult<ApiResponse<Notification>> {
    let Path(id) = path.or_canned("Notification update error.")?;
    let Json(request) = body.or_canned("Notification update error.")?;
    let notification = NotificationController::new(&state)
        .update(id, request.viewed)
        .await
        .or_canned("Notification update error.")?;
    Ok(ApiResponse::ok(
        "notifications",
        notification,
        "Notification updated successfully.",
    ))
}

async fn delete_notification(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<ApiResponse<()>> {
    let Path(id) = path.or_canned("Notification delete error.")?;
    NotificationController::new(&state)
        .destroy(id)
        .await
        .or_canned("Notification delete error.")?;
    Ok(ApiResponse::message("Notification deleted successfully."))
}

async fn user_notifications(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> AppResult<ApiResponse<Vec<Notification>>> {
    let notifications = NotificationController::new(&state)
        .for_user(caller, false)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("notifications", notifications, RETRIEVED))
}

async fn user_unread_notifications(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> AppResult<ApiResponse<Vec<Notification>>> {
    let notifications = NotificationController::new(&state)
        .for_user(caller, true)
        .await
        .or_canned(RETRIEVE_ERROR)?;
    Ok(ApiResponse::ok("notifications", notifications, RETRIEVED))
}

//! Rutas genéricas de las tablas de referencia
//!
//! `/route-statuses`, `/booking-statuses`, `/departments` y `/job-titles`
//! comparten handlers; el tipo de tabla se captura al montar el router.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::{IdPath, JsonBody};
use crate::controllers::reference_controller::ReferenceController;
use crate::dto::api_response::ApiResponse;
use crate::dto::reference_dto::{ReferenceRequest, ReferenceView};
use crate::models::reference::ReferenceKind;
use crate::state::AppState;
use crate::utils::errors::{AppResult, CannedError};

pub fn create_reference_router(kind: ReferenceKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(move |State(state): State<AppState>| list_references(state, kind)).post(
                move |State(state): State<AppState>, body: JsonBody<ReferenceRequest>| {
                    store_reference(state, kind, body)
                },
            ),
        )
        .route(
            "/:id",
            get(move |State(state): State<AppState>, path: IdPath| show_reference(state, kind, path))
                .put(
                    move |State(state): State<AppState>, path: IdPath, body: JsonBody<ReferenceRequest>| {
                        update_reference(state, kind, path, body)
                    },
                )
                .delete(move |State(state): State<AppState>, path: IdPath| {
                    delete_reference(state, kind, path)
                }),
        )
}

fn retrieve_error(kind: ReferenceKind) -> String {
    format!("{} retrieve error.", kind.display_name())
}

async fn list_references(state: AppState, kind: ReferenceKind) -> AppResult<ApiResponse<Vec<ReferenceView>>> {
    let entries = ReferenceController::new(&state, kind)
        .index()
        .await
        .or_canned(&retrieve_error(kind))?;
    Ok(ApiResponse::ok(
        kind.payload_key(),
        entries,
        format!("{} retrieved successfully.", kind.display_plural()),
    ))
}

async fn store_reference(
    state: AppState,
    kind: ReferenceKind,
    body: JsonBody<ReferenceRequest>,
) -> AppResult<ApiResponse<ReferenceView>> {
    let error = format!("New {} store error.", kind.display_name());
    let Json(request) = body.or_canned(&error)?;
    let entry = ReferenceController::new(&state, kind)
        .store(request)
        .await
        .or_canned(&error)?;
    Ok(ApiResponse::ok(
        kind.payload_key(),
        entry,
        format!("New {} stored successfully.", kind.display_name()),
    ))
}

async fn show_reference(state: AppState, kind: ReferenceKind, path: IdPath) -> AppResult<ApiResponse<ReferenceView>> {
    let error = retrieve_error(kind);
    let Path(id) = path.or_canned(&error)?;
    let entry = ReferenceController::new(&state, kind)
        .show(id)
        .await
        .or_canned(&error)?;
    Ok(ApiResponse::maybe(
        kind.payload_key(),
        entry,
        format!("{} retrieved successfully.", kind.display_name()),
    ))
}

async fn update_reference(
    state: AppState,
    kind: ReferenceKind,
    path: IdPath,
    body: JsonBody<ReferenceRequest>,
) -> AppResult<ApiResponse<ReferenceView>> {
    let error = format!("{} update error.", kind.display_name());
    let Path(id) = path.or_canned(&error)?;
    let Json(request) = body.or_canned(&error)?;
    let entry = ReferenceController::new(&state, kind)
        .update(id, request)
        .await
        .or_canned(&error)?;
    Ok(ApiResponse::ok(
        kind.payload_key(),
        entry,
        format!("{} updated successfully.", kind.display_name()),
    ))
}

async fn delete_reference(state: AppState, kind: ReferenceKind, path: IdPath) -> AppResult<ApiResponse<()>> {
    let error = format!("{} delete error.", kind.display_name());
    let Path(id) = path.or_canned(&error)?;
    ReferenceController::new(&state, kind)
        .destroy(id)
        .await
        .or_canned(&error)?;
    Ok(ApiResponse::message(format!("{} deleted successfully.", kind.display_name())))
}

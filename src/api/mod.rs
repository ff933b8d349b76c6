use axum::Json;
use axum::extract::Path;
use axum::routing::{patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Row, Status};
use crate::services::{RowView, SyncStats, ViewState};
use crate::state::AppState;

#[derive(Deserialize)]
struct SetStatusRequest {
    status: Status,
}

#[derive(Serialize)]
struct DiscardResponse {
    reverted: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/subjects/{id}/select", post(select_subject))
        .route("/rows", get(list_rows))
        .route("/rows/{id}", patch(set_status))
        .route("/changes", get(list_changes))
        .route("/sync", post(sync_now))
        .route("/discard", post(discard_changes))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn select_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewState>, AppError> {
    let view = state.controller.select_subject(&id).await?;
    Ok(Json(view))
}

async fn list_rows(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.controller.state().await)
}

async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<RowView>, AppError> {
    let row = state.controller.set_status(&id, req.status).await?;
    Ok(Json(row))
}

async fn list_changes(State(state): State<AppState>) -> Json<Vec<Row>> {
    Json(state.controller.changes().await)
}

async fn sync_now(State(state): State<AppState>) -> Result<Json<SyncStats>, AppError> {
    let stats = state.controller.sync().await?;
    Ok(Json(stats))
}

async fn discard_changes(State(state): State<AppState>) -> Json<DiscardResponse> {
    let reverted = state.controller.discard().await;
    Json(DiscardResponse { reverted })
}

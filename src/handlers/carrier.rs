//! `/carriers` handlers.

use crate::domain::CarrierRequest;
use crate::error::AppError;
use crate::handlers::{parse_id};
use crate::response::{success_created, success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.carriers.get_all().await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CarrierRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.carriers.create(body).await?;
    Ok(success_created(row))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.carriers.get(id).await?;
    Ok(success_one(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<CarrierRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.carriers.update(id, body).await?;
    Ok(success_one(row))
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.carriers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

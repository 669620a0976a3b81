//! `/employees` handlers, including the inbound order report.

use crate::domain::EmployeeRequest;
use crate::error::AppError;
use crate::handlers::{parse_id, report_response, ReportQuery};
use crate::response::{success_created, success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.employees.get_all().await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.employees.create(body).await?;
    Ok(success_created(row))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.employees.get(id).await?;
    Ok(success_one(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.employees.update(id, body).await?;
    Ok(success_one(row))
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn report_inbound_orders(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query.id()?;
    let rows = state.employees.report_inbound_orders(id).await?;
    Ok(report_response(rows, id))
}

//! Scheduled deactivation endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::scheduled_deactivation::{ScheduledDeactivation, ScheduledDeactivationPayload};
use crate::models::PaginatedResponse;
use crate::repositories::scheduled_deactivation::{
    ScheduledDeactivationRepository, ScheduledDeactivationRepositoryTrait,
};
use crate::state::AppState;
use crate::validation::ValidateError;

use super::requests::RequestListQuery;
use super::{parse_tagged, DecisionBody};

pub async fn create_deactivation(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ScheduledDeactivation>), AppError> {
    let payload: ScheduledDeactivationPayload = parse_tagged(body)?;
    let deactivation = state
        .lifecycle
        .create_deactivation(&state.pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(deactivation)))
}

pub async fn validate_deactivation(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let payload: ScheduledDeactivationPayload = match parse_tagged(body) {
        Ok(payload) => payload,
        Err(AppError::Validation(errors)) => {
            return Ok(Json(json!({ "ok": false, "errors": errors })))
        }
        Err(other) => return Err(other),
    };
    match state.lifecycle.validator().validate_deactivation(&payload) {
        Ok(value) => Ok(Json(json!({ "ok": true, "value": value }))),
        Err(ValidateError::Invalid(errors)) => Ok(Json(json!({ "ok": false, "errors": errors }))),
        Err(ValidateError::Collaborator(err)) => Err(AppError::InternalServerError(err)),
    }
}

pub async fn get_deactivation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScheduledDeactivation>, AppError> {
    let deactivation = ScheduledDeactivationRepository::new()
        .find_by_id(&state.pool, &id)
        .await?;
    Ok(Json(deactivation))
}

pub async fn list_deactivations(
    State(state): State<AppState>,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<PaginatedResponse<ScheduledDeactivation>>, AppError> {
    let page = query.page();
    let repo = ScheduledDeactivationRepository::new();
    let data = repo
        .list(&state.pool, query.status, page.limit(), page.offset())
        .await?;
    let total = repo.count(&state.pool, query.status).await?;
    Ok(Json(PaginatedResponse::new(
        data,
        total,
        page.limit(),
        page.offset(),
    )))
}

pub async fn edit_deactivation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<ScheduledDeactivation>, AppError> {
    let payload: ScheduledDeactivationPayload = parse_tagged(body)?;
    let deactivation = state
        .lifecycle
        .edit_deactivation(&state.pool, &id, &payload)
        .await?;
    Ok(Json(deactivation))
}

pub async fn submit_deactivation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScheduledDeactivation>, AppError> {
    let deactivation = state.lifecycle.submit_deactivation(&state.pool, &id).await?;
    Ok(Json(deactivation))
}

pub async fn accept_deactivation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DecisionBody>>,
) -> Result<Json<ScheduledDeactivation>, AppError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let deactivation = state
        .lifecycle
        .accept_deactivation(&state.pool, &id, comment)
        .await?;
    Ok(Json(deactivation))
}

pub async fn decline_deactivation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DecisionBody>>,
) -> Result<Json<ScheduledDeactivation>, AppError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let deactivation = state
        .lifecycle
        .decline_deactivation(&state.pool, &id, comment)
        .await?;
    Ok(Json(deactivation))
}

/// Canceling a planned offboarding always requires an explanation, so the
/// body is not optional here.
pub async fn cancel_deactivation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DecisionBody>>,
) -> Result<Json<ScheduledDeactivation>, AppError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let deactivation = state
        .lifecycle
        .cancel_deactivation(&state.pool, &id, comment)
        .await?;
    Ok(Json(deactivation))
}

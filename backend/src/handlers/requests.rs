//! Employee request endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::error::AppError;
use crate::models::employee_request::{ContactPatch, EmployeeRequest, EmployeeRequestPayload};
use crate::models::request::RequestStatus;
use crate::models::{PaginatedResponse, PaginationQuery};
use crate::repositories::employee_request::{
    EmployeeRequestRepository, EmployeeRequestRepositoryTrait,
};
use crate::state::AppState;
use crate::utils::naming::{corporate_email, login_from_name};
use crate::validation::{ValidateError, ValidationContext};

use super::{parse_tagged, DecisionBody};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl RequestListQuery {
    pub(crate) fn page(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            limit: self.limit.unwrap_or(defaults.limit),
            offset: self.offset.unwrap_or(defaults.offset),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuggestionQuery {
    pub surname: String,
    pub first_name: String,
    pub middle_name: Option<String>,
}

/// Proposes a login (and the mailbox it would map to) from a person's
/// name, for form pre-fill. The caller may still submit any login that
/// passes validation.
pub async fn suggest_login(
    State(state): State<AppState>,
    Query(query): Query<LoginSuggestionQuery>,
) -> Json<Value> {
    let login = login_from_name(
        &query.surname,
        &query.first_name,
        query.middle_name.as_deref(),
    );
    let email = corporate_email(&login, &state.config.corporate_email_domain);
    Json(json!({ "login": login, "corporateEmail": email }))
}

pub async fn create_request(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<EmployeeRequest>), AppError> {
    let payload: EmployeeRequestPayload = parse_tagged(body)?;
    let request = state.lifecycle.create_request(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Dry-run validation: always responds 200, with either the normalized
/// record or the full list of field errors. An unknown `type` tag counts
/// as a field error like any other.
pub async fn validate_request(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let payload: EmployeeRequestPayload = match parse_tagged(body) {
        Ok(payload) => payload,
        Err(AppError::Validation(errors)) => {
            return Ok(Json(json!({ "ok": false, "errors": errors })))
        }
        Err(other) => return Err(other),
    };
    let ctx = ValidationContext::default();
    match state
        .lifecycle
        .validator()
        .validate_employee(&payload, &ctx)
        .await
    {
        Ok(value) => Ok(Json(json!({ "ok": true, "value": value }))),
        Err(ValidateError::Invalid(errors)) => Ok(Json(json!({ "ok": false, "errors": errors }))),
        Err(ValidateError::Collaborator(err)) => Err(AppError::InternalServerError(err)),
    }
}

pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeRequest>, AppError> {
    let request = EmployeeRequestRepository::new()
        .find_by_id(&state.pool, &id)
        .await?;
    Ok(Json(request))
}

pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<PaginatedResponse<EmployeeRequest>>, AppError> {
    let page = query.page();
    let repo = EmployeeRequestRepository::new();
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

/// Full edit while the request is in flight; once it settles only the
/// contact fields remain editable and the body is a narrow patch.
pub async fn edit_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<EmployeeRequest>, AppError> {
    let current = EmployeeRequestRepository::new()
        .find_by_id(&state.pool, &id)
        .await?;
    let request = if current.status.is_terminal() {
        let patch: ContactPatch = serde_json::from_value(body)
            .map_err(|err| AppError::BadRequest(format!("Invalid contact patch: {err}")))?;
        state.lifecycle.edit_contacts(&state.pool, &id, &patch).await?
    } else {
        let payload: EmployeeRequestPayload = parse_tagged(body)?;
        state.lifecycle.edit_request(&state.pool, &id, &payload).await?
    };
    Ok(Json(request))
}

pub async fn submit_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeRequest>, AppError> {
    let request = state.lifecycle.submit_draft(&state.pool, &id).await?;
    Ok(Json(request))
}

pub async fn accept_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DecisionBody>>,
) -> Result<Json<EmployeeRequest>, AppError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let request = state.lifecycle.accept(&state.pool, &id, comment).await?;
    Ok(Json(request))
}

pub async fn decline_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DecisionBody>>,
) -> Result<Json<EmployeeRequest>, AppError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let request = state.lifecycle.decline(&state.pool, &id, comment).await?;
    Ok(Json(request))
}

pub async fn cancel_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DecisionBody>>,
) -> Result<Json<EmployeeRequest>, AppError> {
    let comment = body.and_then(|Json(b)| b.comment);
    let request = state
        .lifecycle
        .cancel_request(&state.pool, &id, comment)
        .await?;
    Ok(Json(request))
}

pub async fn complete_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeRequest>, AppError> {
    let request = state.lifecycle.complete(&state.pool, &id).await?;
    Ok(Json(request))
}

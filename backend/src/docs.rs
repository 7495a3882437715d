#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use utoipa::OpenApi;

use crate::handlers::requests::{LoginSuggestionQuery, RequestListQuery};
use crate::handlers::DecisionBody;
use crate::models::request::{RequestKind, RequestStatus};
use crate::models::PaginationQuery;
use crate::validation::FieldError;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_request_doc,
        validate_request_doc,
        suggest_login_doc,
        list_requests_doc,
        get_request_doc,
        edit_request_doc,
        submit_request_doc,
        accept_request_doc,
        decline_request_doc,
        cancel_request_doc,
        complete_request_doc,
        create_deactivation_doc,
        validate_deactivation_doc,
        list_deactivations_doc,
        get_deactivation_doc,
        edit_deactivation_doc,
        submit_deactivation_doc,
        accept_deactivation_doc,
        decline_deactivation_doc,
        cancel_deactivation_doc
    ),
    components(schemas(RequestStatus, RequestKind, FieldError, DecisionBody, PaginationQuery)),
    tags(
        (name = "Requests", description = "Employee lifecycle requests"),
        (name = "Deactivations", description = "Scheduled user deactivations")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Request created", body = serde_json::Value),
        (status = 400, description = "Validation failed")
    ),
    tag = "Requests"
)]
fn create_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests/validate",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Validation outcome: ok with the normalized value, or the full list of field errors", body = serde_json::Value)
    ),
    tag = "Requests"
)]
fn validate_request_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/login-suggestion",
    params(LoginSuggestionQuery),
    responses(
        (status = 200, description = "Proposed login and corporate mailbox", body = serde_json::Value)
    ),
    tag = "Requests"
)]
fn suggest_login_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests",
    params(RequestListQuery),
    responses((status = 200, description = "Paginated request list", body = serde_json::Value)),
    tag = "Requests"
)]
fn list_requests_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, body = serde_json::Value),
        (status = 404, description = "Unknown request")
    ),
    tag = "Requests"
)]
fn get_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    params(("id" = String, Path, description = "Request id")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Full payload while in flight, contact patch once settled", body = serde_json::Value),
        (status = 400, description = "Validation failed or type change attempted")
    ),
    tag = "Requests"
)]
fn edit_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/submit",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, body = serde_json::Value),
        (status = 409, description = "Request is not a draft")
    ),
    tag = "Requests"
)]
fn submit_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/accept",
    params(("id" = String, Path, description = "Request id")),
    request_body = DecisionBody,
    responses(
        (status = 200, body = serde_json::Value),
        (status = 409, description = "Status does not allow the action")
    ),
    tag = "Requests"
)]
fn accept_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/decline",
    params(("id" = String, Path, description = "Request id")),
    request_body = DecisionBody,
    responses(
        (status = 200, body = serde_json::Value),
        (status = 409, description = "Status does not allow the action")
    ),
    tag = "Requests"
)]
fn decline_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/cancel",
    params(("id" = String, Path, description = "Request id")),
    request_body = DecisionBody,
    responses(
        (status = 200, body = serde_json::Value),
        (status = 409, description = "Status does not allow the action")
    ),
    tag = "Requests"
)]
fn cancel_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/complete",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, body = serde_json::Value),
        (status = 400, description = "Not a decree request"),
        (status = 409, description = "Status does not allow the action")
    ),
    tag = "Requests"
)]
fn complete_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/deactivations",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Scheduled deactivation created", body = serde_json::Value),
        (status = 400, description = "Validation failed")
    ),
    tag = "Deactivations"
)]
fn create_deactivation_doc() {}

#[utoipa::path(
    post,
    path = "/api/deactivations/validate",
    request_body = serde_json::Value,
    responses((status = 200, description = "Validation outcome", body = serde_json::Value)),
    tag = "Deactivations"
)]
fn validate_deactivation_doc() {}

#[utoipa::path(
    get,
    path = "/api/deactivations",
    params(RequestListQuery),
    responses((status = 200, description = "Paginated list", body = serde_json::Value)),
    tag = "Deactivations"
)]
fn list_deactivations_doc() {}

#[utoipa::path(
    get,
    path = "/api/deactivations/{id}",
    params(("id" = String, Path, description = "Deactivation id")),
    responses(
        (status = 200, body = serde_json::Value),
        (status = 404, description = "Unknown deactivation")
    ),
    tag = "Deactivations"
)]
fn get_deactivation_doc() {}

#[utoipa::path(
    put,
    path = "/api/deactivations/{id}",
    params(("id" = String, Path, description = "Deactivation id")),
    request_body = serde_json::Value,
    responses(
        (status = 200, body = serde_json::Value),
        (status = 400, description = "Validation failed or type change attempted")
    ),
    tag = "Deactivations"
)]
fn edit_deactivation_doc() {}

#[utoipa::path(
    post,
    path = "/api/deactivations/{id}/submit",
    params(("id" = String, Path, description = "Deactivation id")),
    responses(
        (status = 200, body = serde_json::Value),
        (status = 409, description = "Not a draft")
    ),
    tag = "Deactivations"
)]
fn submit_deactivation_doc() {}

#[utoipa::path(
    post,
    path = "/api/deactivations/{id}/accept",
    params(("id" = String, Path, description = "Deactivation id")),
    request_body = DecisionBody,
    responses(
        (status = 200, body = serde_json::Value),
        (status = 409, description = "Status does not allow the action")
    ),
    tag = "Deactivations"
)]
fn accept_deactivation_doc() {}

#[utoipa::path(
    post,
    path = "/api/deactivations/{id}/decline",
    params(("id" = String, Path, description = "Deactivation id")),
    request_body = DecisionBody,
    responses(
        (status = 200, body = serde_json::Value),
        (status = 409, description = "Status does not allow the action")
    ),
    tag = "Deactivations"
)]
fn decline_deactivation_doc() {}

#[utoipa::path(
    post,
    path = "/api/deactivations/{id}/cancel",
    params(("id" = String, Path, description = "Deactivation id")),
    request_body = DecisionBody,
    responses(
        (status = 200, body = serde_json::Value),
        (status = 400, description = "Cancel comment missing or too short"),
        (status = 409, description = "Status does not allow the action")
    ),
    tag = "Deactivations"
)]
fn cancel_deactivation_doc() {}

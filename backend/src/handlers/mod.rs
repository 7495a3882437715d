pub mod deactivations;
pub mod requests;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::validation::FieldError;

/// Optional free-text comment accompanying an accept, decline or cancel
/// decision.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct DecisionBody {
    pub comment: Option<String>,
}

/// Deserializes a kind-tagged payload from raw JSON. A missing or unknown
/// `type` tag fails closed as a single field error at path `type`, so it
/// reaches callers in the same shape as every other validation failure;
/// any other malformation is a plain bad request.
pub(crate) fn parse_tagged<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    let tag_is_suspect = !matches!(body.get("type"), Some(Value::String(_)));
    match serde_json::from_value(body) {
        Ok(payload) => Ok(payload),
        Err(err) if tag_is_suspect || err.to_string().starts_with("unknown variant") => Err(
            AppError::Validation(vec![FieldError::new("type", "Unknown request type")]),
        ),
        Err(err) => Err(AppError::BadRequest(format!(
            "Invalid request payload: {err}"
        ))),
    }
}

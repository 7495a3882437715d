//! Request validation framework.
//!
//! Validation never throws in the common path: synchronous rules run in
//! schema-declaration order and collect every violation as a
//! `{path, message}` pair so a form can display all problems at once. The
//! asynchronous login-uniqueness rule runs against an injected
//! [`LoginDirectory`] collaborator.

pub mod rules;
pub mod schema;
mod validate;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::request::RequestStatus;

pub use validate::RequestValidator;
pub use validator::Validate;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Path of the offending field, e.g. `workEmail` or
    /// `supplementalPositions[0].percentage`.
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn required(path: impl Into<String>) -> Self {
        Self::new(path, "Field is required")
    }

    /// Converts a rule violation into a field error, preferring the rule's
    /// fixed message over its code.
    pub fn from_rule(path: impl Into<String>, err: validator::ValidationError) -> Self {
        let message = err
            .message
            .map(|m| m.into_owned())
            .unwrap_or_else(|| err.code.into_owned());
        Self::new(path, message)
    }
}

/// Validation outcome for the failure paths. Field errors are recoverable
/// data; collaborator failures propagate unmodified.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("validation failed")]
    Invalid(Vec<FieldError>),
    #[error("collaborator failure: {0}")]
    Collaborator(#[from] anyhow::Error),
}

/// Per-call context for the validator.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Login stored on the request being edited. The uniqueness check is
    /// skipped when the candidate login is unchanged, so a record never
    /// collides with itself.
    pub original_login: Option<String>,
    /// Status the record will hold after the operation. When absent it is
    /// taken from the payload, defaulting to Draft.
    pub target_status: Option<RequestStatus>,
}

impl ValidationContext {
    pub fn for_edit(original_login: impl Into<String>, status: RequestStatus) -> Self {
        Self {
            original_login: Some(original_login.into()),
            target_status: Some(status),
        }
    }
}

/// Login-uniqueness collaborator injected into the validator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginDirectory: Send + Sync {
    async fn is_login_unique(&self, login: &str) -> anyhow::Result<bool>;
}

//! Shared request enums used by both request families.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Workflow status shared by employee requests and scheduled deactivations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Draft,
    Created,
    Approved,
    Denied,
    Canceled,
    Completed,
}

impl RequestStatus {
    pub fn db_value(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "draft",
            RequestStatus::Created => "created",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
            RequestStatus::Canceled => "canceled",
            RequestStatus::Completed => "completed",
        }
    }

    /// Terminal statuses accept no further transitions, only the narrow
    /// contact-info edit.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Approved
                | RequestStatus::Denied
                | RequestStatus::Canceled
                | RequestStatus::Completed
        )
    }
}

/// Discriminant tying a request record to its schema variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RequestKind {
    InternalEmployee,
    ExternalEmployee,
    ExternalFromMainOrgEmployee,
    Existing,
    ToDecree,
    FromDecree,
    TransferInside,
    TransferInternToStaff,
    CreateSupplementalPosition,
    Retirement,
    Transfer,
}

impl RequestKind {
    /// The serde `type` tag, also stored in the `kind` column.
    pub fn tag(&self) -> &'static str {
        match self {
            RequestKind::InternalEmployee => "internalEmployee",
            RequestKind::ExternalEmployee => "externalEmployee",
            RequestKind::ExternalFromMainOrgEmployee => "externalFromMainOrgEmployee",
            RequestKind::Existing => "existing",
            RequestKind::ToDecree => "toDecree",
            RequestKind::FromDecree => "fromDecree",
            RequestKind::TransferInside => "transferInside",
            RequestKind::TransferInternToStaff => "transferInternToStaff",
            RequestKind::CreateSupplementalPosition => "createSupplementalPosition",
            RequestKind::Retirement => "retirement",
            RequestKind::Transfer => "transfer",
        }
    }

    /// Decree requests complete once the employee record is updated.
    pub fn is_decree(&self) -> bool {
        matches!(self, RequestKind::ToDecree | RequestKind::FromDecree)
    }

    /// Scheduled-deactivation family (retirement or transfer of an
    /// existing user).
    pub fn is_deactivation(&self) -> bool {
        matches!(self, RequestKind::Retirement | RequestKind::Transfer)
    }
}

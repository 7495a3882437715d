//! Scheduled deactivations: planned retirement or transfer of an existing
//! user.
//!
//! The transfer-only "new organization" fields exist only on the transfer
//! variant, so a retirement can never carry half of them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::request::{RequestKind, RequestStatus};

/// Fields common to both deactivation variants, optional in raw form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeactivationBasePayload {
    pub status: Option<RequestStatus>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub deactivate_date: Option<NaiveDate>,
    pub devices: Vec<String>,
    pub testing_devices: Vec<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPayload {
    #[serde(flatten)]
    pub base: DeactivationBasePayload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDeactivationPayload {
    #[serde(flatten)]
    pub base: DeactivationBasePayload,
    pub new_organization_unit_id: Option<String>,
    pub new_organization_role: Option<String>,
    pub new_team_lead: Option<String>,
    pub organizational_group: Option<String>,
}

/// Raw scheduled-deactivation payload, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScheduledDeactivationPayload {
    Retirement(RetirementPayload),
    Transfer(TransferDeactivationPayload),
}

impl ScheduledDeactivationPayload {
    pub fn kind(&self) -> RequestKind {
        match self {
            ScheduledDeactivationPayload::Retirement(_) => RequestKind::Retirement,
            ScheduledDeactivationPayload::Transfer(_) => RequestKind::Transfer,
        }
    }

    pub fn base(&self) -> &DeactivationBasePayload {
        match self {
            ScheduledDeactivationPayload::Retirement(p) => &p.base,
            ScheduledDeactivationPayload::Transfer(p) => &p.base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScheduledDeactivationDetails {
    Retirement {},
    Transfer {
        new_organization_unit_id: String,
        new_organization_role: Option<String>,
        new_team_lead: String,
        organizational_group: Option<String>,
    },
}

impl ScheduledDeactivationDetails {
    pub fn kind(&self) -> RequestKind {
        match self {
            ScheduledDeactivationDetails::Retirement {} => RequestKind::Retirement,
            ScheduledDeactivationDetails::Transfer { .. } => RequestKind::Transfer,
        }
    }
}

/// Normalized scheduled-deactivation fields as produced by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledDeactivationData {
    pub user_id: String,
    pub email: String,
    pub phone: String,
    pub deactivate_date: NaiveDate,
    pub devices: Vec<String>,
    pub testing_devices: Vec<String>,
    pub comment: Option<String>,
    pub details: ScheduledDeactivationDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledDeactivation {
    pub id: String,
    pub status: RequestStatus,
    #[sqlx(json)]
    #[serde(flatten)]
    pub data: ScheduledDeactivationData,
    pub decision_comment: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub denied_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduledDeactivation {
    pub fn new(data: ScheduledDeactivationData, status: RequestStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            status,
            data,
            decision_comment: None,
            approved_at: None,
            denied_at: None,
            canceled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.data.details.kind()
    }

    pub fn submit(&mut self) {
        self.status = RequestStatus::Created;
        self.updated_at = Utc::now();
    }

    pub fn approve(&mut self, comment: Option<String>) {
        self.status = RequestStatus::Approved;
        self.approved_at = Some(Utc::now());
        self.decision_comment = comment;
        self.updated_at = Utc::now();
    }

    pub fn deny(&mut self, comment: Option<String>) {
        self.status = RequestStatus::Denied;
        self.denied_at = Some(Utc::now());
        self.decision_comment = comment;
        self.updated_at = Utc::now();
    }

    pub fn cancel(&mut self, comment: Option<String>) {
        self.status = RequestStatus::Canceled;
        self.canceled_at = Some(Utc::now());
        self.decision_comment = comment;
        self.updated_at = Utc::now();
    }

    pub fn replace_data(&mut self, data: ScheduledDeactivationData) {
        self.data = data;
        self.updated_at = Utc::now();
    }
}

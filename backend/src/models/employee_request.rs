//! Employee lifecycle request records.
//!
//! Each request carries a `type` discriminant selecting one of the
//! onboarding/transfer/decree variants. The raw form payload keeps every
//! field optional so drafts can be saved incomplete; the validator turns a
//! payload into the normalized [`EmployeeRequestData`] stored with the
//! record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::request::{RequestKind, RequestStatus};

/// Secondary position held alongside the main one. At most one entry may be
/// flagged `main`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplementalPosition {
    pub organization_unit_id: String,
    /// Workload share stored as an integer, fraction x100.
    pub percentage: i32,
    pub unit_id: Option<String>,
    #[serde(default)]
    pub main: bool,
}

/// Raw supplemental-position entry as edited in the form (fractional
/// percentage).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplementalPositionPayload {
    pub organization_unit_id: Option<String>,
    pub percentage: Option<f64>,
    pub unit_id: Option<String>,
    pub main: bool,
}

/// Fields common to every employee-request variant, all optional so that
/// incomplete drafts can round-trip through the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeBasePayload {
    pub status: Option<RequestStatus>,
    pub surname: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub work_email: Option<String>,
    pub personal_email: Option<String>,
    pub phone: Option<String>,
    pub organization_unit_id: Option<String>,
    pub group_id: Option<String>,
    pub supervisor_id: Option<String>,
    pub unit_id: Option<String>,
    /// Workload share edited as a 0.01-1.00 fraction.
    pub percentage: Option<f64>,
    pub supplemental_positions: Vec<SupplementalPositionPayload>,
    pub attach_ids: Vec<String>,
    pub date: Option<NaiveDate>,
    pub equipment: Option<String>,
    pub work_mode: Option<String>,
    pub comment: Option<String>,
}

fn default_creation_cause() -> String {
    "start".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalEmployeePayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
    pub os_preference: Option<String>,
    pub title: Option<String>,
    #[serde(default = "default_creation_cause")]
    pub creation_cause: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEmployeePayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
    pub os_preference: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub access_to_internal_systems: bool,
    #[serde(default = "default_creation_cause")]
    pub creation_cause: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFromMainOrgEmployeePayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
    pub os_preference: Option<String>,
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub create_external_account: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingEmployeePayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDecreePayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
    #[serde(default)]
    pub disable_account: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromDecreePayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInsidePayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
    pub transfer_to_organization_unit_id: Option<String>,
    pub transfer_to_supervisor_id: Option<String>,
    pub transfer_to_group_id: Option<String>,
    pub transfer_to_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInternToStaffPayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
    pub internship_organization_id: Option<String>,
    pub internship_organization_group: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplementalPositionPayload {
    #[serde(flatten)]
    pub base: EmployeeBasePayload,
}

/// Raw form payload, discriminated by the `type` tag. An unknown tag fails
/// deserialization and is reported as a single top-level error instead of
/// validating against the wrong schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EmployeeRequestPayload {
    InternalEmployee(InternalEmployeePayload),
    ExternalEmployee(ExternalEmployeePayload),
    ExternalFromMainOrgEmployee(ExternalFromMainOrgEmployeePayload),
    Existing(ExistingEmployeePayload),
    ToDecree(ToDecreePayload),
    FromDecree(FromDecreePayload),
    TransferInside(TransferInsidePayload),
    TransferInternToStaff(TransferInternToStaffPayload),
    CreateSupplementalPosition(CreateSupplementalPositionPayload),
}

impl EmployeeRequestPayload {
    pub fn kind(&self) -> RequestKind {
        match self {
            EmployeeRequestPayload::InternalEmployee(_) => RequestKind::InternalEmployee,
            EmployeeRequestPayload::ExternalEmployee(_) => RequestKind::ExternalEmployee,
            EmployeeRequestPayload::ExternalFromMainOrgEmployee(_) => {
                RequestKind::ExternalFromMainOrgEmployee
            }
            EmployeeRequestPayload::Existing(_) => RequestKind::Existing,
            EmployeeRequestPayload::ToDecree(_) => RequestKind::ToDecree,
            EmployeeRequestPayload::FromDecree(_) => RequestKind::FromDecree,
            EmployeeRequestPayload::TransferInside(_) => RequestKind::TransferInside,
            EmployeeRequestPayload::TransferInternToStaff(_) => RequestKind::TransferInternToStaff,
            EmployeeRequestPayload::CreateSupplementalPosition(_) => {
                RequestKind::CreateSupplementalPosition
            }
        }
    }

    pub fn base(&self) -> &EmployeeBasePayload {
        match self {
            EmployeeRequestPayload::InternalEmployee(p) => &p.base,
            EmployeeRequestPayload::ExternalEmployee(p) => &p.base,
            EmployeeRequestPayload::ExternalFromMainOrgEmployee(p) => &p.base,
            EmployeeRequestPayload::Existing(p) => &p.base,
            EmployeeRequestPayload::ToDecree(p) => &p.base,
            EmployeeRequestPayload::FromDecree(p) => &p.base,
            EmployeeRequestPayload::TransferInside(p) => &p.base,
            EmployeeRequestPayload::TransferInternToStaff(p) => &p.base,
            EmployeeRequestPayload::CreateSupplementalPosition(p) => &p.base,
        }
    }
}

/// Variant-specific extension fields in normalized form. Decree variants
/// carry no OS preference by design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EmployeeRequestDetails {
    InternalEmployee {
        os_preference: String,
        title: Option<String>,
        creation_cause: String,
    },
    ExternalEmployee {
        os_preference: String,
        title: Option<String>,
        access_to_internal_systems: bool,
        creation_cause: String,
    },
    ExternalFromMainOrgEmployee {
        os_preference: String,
        title: Option<String>,
        create_external_account: bool,
    },
    Existing {
        title: Option<String>,
    },
    ToDecree {
        disable_account: bool,
    },
    FromDecree {},
    TransferInside {
        transfer_to_organization_unit_id: String,
        transfer_to_supervisor_id: Option<String>,
        transfer_to_group_id: Option<String>,
        transfer_to_title: Option<String>,
    },
    TransferInternToStaff {
        internship_organization_id: String,
        internship_organization_group: Option<String>,
    },
    CreateSupplementalPosition {},
}

impl EmployeeRequestDetails {
    pub fn kind(&self) -> RequestKind {
        match self {
            EmployeeRequestDetails::InternalEmployee { .. } => RequestKind::InternalEmployee,
            EmployeeRequestDetails::ExternalEmployee { .. } => RequestKind::ExternalEmployee,
            EmployeeRequestDetails::ExternalFromMainOrgEmployee { .. } => {
                RequestKind::ExternalFromMainOrgEmployee
            }
            EmployeeRequestDetails::Existing { .. } => RequestKind::Existing,
            EmployeeRequestDetails::ToDecree { .. } => RequestKind::ToDecree,
            EmployeeRequestDetails::FromDecree {} => RequestKind::FromDecree,
            EmployeeRequestDetails::TransferInside { .. } => RequestKind::TransferInside,
            EmployeeRequestDetails::TransferInternToStaff { .. } => {
                RequestKind::TransferInternToStaff
            }
            EmployeeRequestDetails::CreateSupplementalPosition {} => {
                RequestKind::CreateSupplementalPosition
            }
        }
    }
}

/// Normalized request fields as produced by the validator. Phone numbers
/// are stored in their normalized form and the workload percentage as the
/// integer representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequestData {
    pub surname: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub login: String,
    pub email: String,
    pub work_email: Option<String>,
    pub personal_email: Option<String>,
    /// Derived from the login; regenerated whenever the login changes.
    pub corporate_email: String,
    pub phone: Option<String>,
    pub organization_unit_id: String,
    pub group_id: Option<String>,
    pub supervisor_id: String,
    pub unit_id: Option<String>,
    /// Workload share, fraction x100.
    pub percentage: i32,
    pub supplemental_positions: Vec<SupplementalPosition>,
    pub attach_ids: Vec<String>,
    pub date: NaiveDate,
    pub equipment: Option<String>,
    pub work_mode: Option<String>,
    pub comment: Option<String>,
    pub details: EmployeeRequestDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub id: String,
    pub status: RequestStatus,
    #[sqlx(json)]
    #[serde(flatten)]
    pub data: EmployeeRequestData,
    pub decision_comment: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub denied_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeRequest {
    pub fn new(data: EmployeeRequestData, status: RequestStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            status,
            data,
            decision_comment: None,
            approved_at: None,
            denied_at: None,
            canceled_at: None,
            completed_at: None,
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

    pub fn complete(&mut self) {
        self.status = RequestStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    pub fn replace_data(&mut self, data: EmployeeRequestData) {
        self.data = data;
        self.updated_at = Utc::now();
    }
}

/// Narrow patch accepted on requests in a terminal status. Unknown fields
/// are rejected so a full edit cannot masquerade as a contact update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ContactPatch {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_discriminant_selects_variant() {
        let payload: EmployeeRequestPayload = serde_json::from_value(json!({
            "type": "internalEmployee",
            "surname": "Ivanov",
            "firstName": "Ivan",
            "osPreference": "Linux"
        }))
        .expect("known tag deserializes");
        assert_eq!(payload.kind(), RequestKind::InternalEmployee);
        assert_eq!(payload.base().surname.as_deref(), Some("Ivanov"));
    }

    #[test]
    fn payload_unknown_discriminant_fails_closed() {
        let result = serde_json::from_value::<EmployeeRequestPayload>(json!({
            "type": "contractor",
            "surname": "Ivanov"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn payload_defaults_apply() {
        let payload: EmployeeRequestPayload = serde_json::from_value(json!({
            "type": "externalFromMainOrgEmployee"
        }))
        .unwrap();
        match payload {
            EmployeeRequestPayload::ExternalFromMainOrgEmployee(p) => {
                assert!(p.create_external_account);
            }
            other => panic!("unexpected variant: {:?}", other.kind().tag()),
        }

        let payload: EmployeeRequestPayload = serde_json::from_value(json!({
            "type": "internalEmployee"
        }))
        .unwrap();
        match payload {
            EmployeeRequestPayload::InternalEmployee(p) => {
                assert_eq!(p.creation_cause, "start");
            }
            other => panic!("unexpected variant: {:?}", other.kind().tag()),
        }
    }

    #[test]
    fn record_serializes_with_flattened_data_and_type_tag() {
        let data = EmployeeRequestData {
            surname: "Ivanov".into(),
            first_name: "Ivan".into(),
            middle_name: None,
            login: "ivanovi".into(),
            email: "ivan@x.com".into(),
            work_email: None,
            personal_email: None,
            corporate_email: "ivanovi@staffpoint.team".into(),
            phone: Some("+79261234567".into()),
            organization_unit_id: "org1".into(),
            group_id: None,
            supervisor_id: "u1".into(),
            unit_id: None,
            percentage: 100,
            supplemental_positions: vec![],
            attach_ids: vec![],
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            equipment: None,
            work_mode: None,
            comment: None,
            details: EmployeeRequestDetails::InternalEmployee {
                os_preference: "Linux".into(),
                title: Some("Engineer".into()),
                creation_cause: "start".into(),
            },
        };
        let request = EmployeeRequest::new(data, RequestStatus::Draft);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["status"], "draft");
        assert_eq!(value["login"], "ivanovi");
        assert_eq!(value["details"]["type"], "internalEmployee");

        let back: EmployeeRequest = serde_json::from_value(value).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn contact_patch_rejects_unknown_fields() {
        let result = serde_json::from_value::<ContactPatch>(json!({
            "email": "new@x.com",
            "login": "hijack"
        }));
        assert!(result.is_err());
    }
}

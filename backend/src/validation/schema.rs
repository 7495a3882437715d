//! Declarative per-kind request schemas.
//!
//! Every employee-creation variant extends the common base field set and
//! adds only its differentiating fields, so a variant can narrow but never
//! contradict the base. Defaults that are not plain serde defaults
//! (`creationCause = "start"`, `createExternalAccount = true`) live on the
//! payload types; the percentage default is applied by the validator.
//!
//! The kind discriminant is parsed fail-closed before any lookup happens,
//! so an unknown kind can never reach this registry.

use crate::models::request::RequestKind;

/// Fields required for every employee-request variant, in declaration
/// order. Phone, work/personal emails and the status-gated fields are
/// intentionally absent.
pub const BASE_REQUIRED: &[&str] = &[
    "surname",
    "firstName",
    "login",
    "email",
    "organizationUnitId",
    "supervisorId",
    "date",
];

/// Fields required for both scheduled-deactivation variants.
pub const DEACTIVATION_REQUIRED: &[&str] = &["userId", "email", "phone", "deactivateDate"];

/// Workload percentage default used when instantiating a new request.
pub const DEFAULT_PERCENTAGE: f64 = 1.0;

/// Static description of one request kind.
#[derive(Debug, Clone, Copy)]
pub struct RequestSchema {
    pub kind: RequestKind,
    /// Variant fields required beyond the shared base, in declaration
    /// order.
    pub extra_required: &'static [&'static str],
    /// At least one of work/personal email must be present.
    pub requires_external_email: bool,
    /// An NDA attachment reference must accompany the request.
    pub requires_nda_attachment: bool,
    /// At least one supplemental position entry must be present.
    pub requires_supplemental_position: bool,
}

const fn base_schema(kind: RequestKind) -> RequestSchema {
    RequestSchema {
        kind,
        extra_required: &[],
        requires_external_email: false,
        requires_nda_attachment: false,
        requires_supplemental_position: false,
    }
}

static INTERNAL_EMPLOYEE: RequestSchema = RequestSchema {
    extra_required: &["osPreference"],
    ..base_schema(RequestKind::InternalEmployee)
};

static EXTERNAL_EMPLOYEE: RequestSchema = RequestSchema {
    extra_required: &["osPreference"],
    requires_external_email: true,
    requires_nda_attachment: true,
    ..base_schema(RequestKind::ExternalEmployee)
};

static EXTERNAL_FROM_MAIN_ORG_EMPLOYEE: RequestSchema = RequestSchema {
    extra_required: &["osPreference"],
    requires_external_email: true,
    ..base_schema(RequestKind::ExternalFromMainOrgEmployee)
};

static EXISTING: RequestSchema = base_schema(RequestKind::Existing);

// Decree variants deliberately omit the OS preference.
static TO_DECREE: RequestSchema = base_schema(RequestKind::ToDecree);
static FROM_DECREE: RequestSchema = base_schema(RequestKind::FromDecree);

static TRANSFER_INSIDE: RequestSchema = RequestSchema {
    extra_required: &["transferToOrganizationUnitId"],
    ..base_schema(RequestKind::TransferInside)
};

static TRANSFER_INTERN_TO_STAFF: RequestSchema = RequestSchema {
    extra_required: &["internshipOrganizationId"],
    ..base_schema(RequestKind::TransferInternToStaff)
};

static CREATE_SUPPLEMENTAL_POSITION: RequestSchema = RequestSchema {
    requires_supplemental_position: true,
    ..base_schema(RequestKind::CreateSupplementalPosition)
};

static RETIREMENT: RequestSchema = base_schema(RequestKind::Retirement);

static TRANSFER: RequestSchema = RequestSchema {
    extra_required: &["newOrganizationUnitId", "newTeamLead"],
    ..base_schema(RequestKind::Transfer)
};

/// Returns the schema for a request kind.
pub fn schema(kind: RequestKind) -> &'static RequestSchema {
    match kind {
        RequestKind::InternalEmployee => &INTERNAL_EMPLOYEE,
        RequestKind::ExternalEmployee => &EXTERNAL_EMPLOYEE,
        RequestKind::ExternalFromMainOrgEmployee => &EXTERNAL_FROM_MAIN_ORG_EMPLOYEE,
        RequestKind::Existing => &EXISTING,
        RequestKind::ToDecree => &TO_DECREE,
        RequestKind::FromDecree => &FROM_DECREE,
        RequestKind::TransferInside => &TRANSFER_INSIDE,
        RequestKind::TransferInternToStaff => &TRANSFER_INTERN_TO_STAFF,
        RequestKind::CreateSupplementalPosition => &CREATE_SUPPLEMENTAL_POSITION,
        RequestKind::Retirement => &RETIREMENT,
        RequestKind::Transfer => &TRANSFER,
    }
}

//! Validation orchestrator: turns raw payloads into normalized records or
//! an ordered list of field errors.

use std::sync::Arc;

use crate::config::Config;
use crate::models::employee_request::{
    EmployeeBasePayload, EmployeeRequestData, EmployeeRequestDetails, EmployeeRequestPayload,
    SupplementalPosition,
};
use crate::models::request::RequestStatus;
use crate::models::scheduled_deactivation::{
    ScheduledDeactivationData, ScheduledDeactivationDetails, ScheduledDeactivationPayload,
};
use crate::utils::naming::corporate_email;
use crate::utils::percentage::percentage_to_storage;

use super::schema::{self, DEFAULT_PERCENTAGE};
use super::{rules, FieldError, LoginDirectory, ValidateError, ValidationContext};

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn clone_trimmed(value: &Option<String>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

pub struct RequestValidator {
    directory: Arc<dyn LoginDirectory>,
    corporate_email_domain: String,
    phone_country_code: String,
}

impl RequestValidator {
    pub fn new(directory: Arc<dyn LoginDirectory>, config: &Config) -> Self {
        Self {
            directory,
            corporate_email_domain: config.corporate_email_domain.clone(),
            phone_country_code: config.phone_country_code.clone(),
        }
    }

    pub fn phone_country_code(&self) -> &str {
        &self.phone_country_code
    }

    /// Re-checks that a login is still unclaimed. Logins are claimed at
    /// submission, not while drafting, so a draft saved earlier may find
    /// its login taken by a competing request by the time it is submitted.
    pub async fn ensure_login_unique(&self, login: &str) -> Result<(), ValidateError> {
        if !self.directory.is_login_unique(login).await? {
            return Err(ValidateError::Invalid(vec![FieldError::new(
                "login",
                "Login is already taken",
            )]));
        }
        Ok(())
    }

    /// Validates an employee-request payload. Synchronous rules run first,
    /// in schema-declaration order, collecting every violation; the
    /// login-uniqueness check runs last and is skipped when the candidate
    /// login matches `ctx.original_login`.
    pub async fn validate_employee(
        &self,
        payload: &EmployeeRequestPayload,
        ctx: &ValidationContext,
    ) -> Result<EmployeeRequestData, ValidateError> {
        let base = payload.base();
        let sch = schema::schema(payload.kind());
        let target_status = ctx
            .target_status
            .or(base.status)
            .unwrap_or(RequestStatus::Draft);

        let mut errors: Vec<FieldError> = Vec::new();

        for &path in schema::BASE_REQUIRED {
            if base_field(base, path).is_none() {
                errors.push(FieldError::required(path));
            }
        }
        for &path in sch.extra_required {
            if extra_field(payload, path).is_none() {
                errors.push(FieldError::required(path));
            }
        }

        if let Some(login) = non_blank(&base.login) {
            if let Err(err) = rules::validate_login(login) {
                errors.push(FieldError::from_rule("login", err));
            }
        }

        for (path, value) in [
            ("email", &base.email),
            ("workEmail", &base.work_email),
            ("personalEmail", &base.personal_email),
        ] {
            if let Some(email) = non_blank(value) {
                if let Err(err) = rules::validate_email_format(email) {
                    errors.push(FieldError::from_rule(path, err));
                }
            }
        }

        let mut phone = None;
        if let Some(raw) = non_blank(&base.phone) {
            match rules::normalize_phone(raw, &self.phone_country_code) {
                Ok(normalized) => phone = Some(normalized),
                Err(err) => errors.push(FieldError::from_rule("phone", err)),
            }
        }

        let fraction = base.percentage.unwrap_or(DEFAULT_PERCENTAGE);
        if let Err(err) = rules::validate_percentage(fraction) {
            errors.push(FieldError::from_rule("percentage", err));
        }

        let supplemental_positions = self.check_supplemental_positions(base, sch, &mut errors);

        if sch.requires_external_email
            && non_blank(&base.work_email).is_none()
            && non_blank(&base.personal_email).is_none()
        {
            // reported on both fields for symmetric display
            let message = "At least one of work or personal email is required";
            errors.push(FieldError::new("workEmail", message));
            errors.push(FieldError::new("personalEmail", message));
        }

        if sch.requires_nda_attachment && base.attach_ids.is_empty() {
            errors.push(FieldError::new(
                "attachIds",
                "An NDA attachment is required",
            ));
        }

        if target_status != RequestStatus::Draft {
            if non_blank(&base.equipment).is_none() {
                errors.push(FieldError::required("equipment"));
            }
            if non_blank(&base.work_mode).is_none() {
                errors.push(FieldError::required("workMode"));
            }
        }

        if let Some(login) = non_blank(&base.login) {
            let unchanged = ctx.original_login.as_deref() == Some(login);
            if !unchanged && !self.directory.is_login_unique(login).await? {
                errors.push(FieldError::new("login", "Login is already taken"));
            }
        }

        if !errors.is_empty() {
            return Err(ValidateError::Invalid(errors));
        }

        // All required fields were verified above; the fallbacks below are
        // unreachable.
        let login = clone_trimmed(&base.login).unwrap_or_default();
        Ok(EmployeeRequestData {
            surname: clone_trimmed(&base.surname).unwrap_or_default(),
            first_name: clone_trimmed(&base.first_name).unwrap_or_default(),
            middle_name: clone_trimmed(&base.middle_name),
            corporate_email: corporate_email(&login, &self.corporate_email_domain),
            login,
            email: clone_trimmed(&base.email).unwrap_or_default(),
            work_email: clone_trimmed(&base.work_email),
            personal_email: clone_trimmed(&base.personal_email),
            phone,
            organization_unit_id: clone_trimmed(&base.organization_unit_id).unwrap_or_default(),
            group_id: clone_trimmed(&base.group_id),
            supervisor_id: clone_trimmed(&base.supervisor_id).unwrap_or_default(),
            unit_id: clone_trimmed(&base.unit_id),
            percentage: percentage_to_storage(fraction),
            supplemental_positions,
            attach_ids: base.attach_ids.clone(),
            date: base.date.unwrap_or_default(),
            equipment: clone_trimmed(&base.equipment),
            work_mode: clone_trimmed(&base.work_mode),
            comment: clone_trimmed(&base.comment),
            details: normalize_details(payload),
        })
    }

    /// Validates a scheduled-deactivation payload. The variant shape
    /// already guarantees that transfer-only fields travel together; this
    /// checks presence and formats.
    pub fn validate_deactivation(
        &self,
        payload: &ScheduledDeactivationPayload,
    ) -> Result<ScheduledDeactivationData, ValidateError> {
        let base = payload.base();
        let sch = schema::schema(payload.kind());

        let mut errors: Vec<FieldError> = Vec::new();

        for &path in schema::DEACTIVATION_REQUIRED {
            let missing = match path {
                "userId" => non_blank(&base.user_id).is_none(),
                "email" => non_blank(&base.email).is_none(),
                "phone" => non_blank(&base.phone).is_none(),
                "deactivateDate" => base.deactivate_date.is_none(),
                other => unreachable!("unknown deactivation base field: {other}"),
            };
            if missing {
                errors.push(FieldError::required(path));
            }
        }

        if let ScheduledDeactivationPayload::Transfer(p) = payload {
            for &path in sch.extra_required {
                let missing = match path {
                    "newOrganizationUnitId" => non_blank(&p.new_organization_unit_id).is_none(),
                    "newTeamLead" => non_blank(&p.new_team_lead).is_none(),
                    other => unreachable!("unknown transfer field: {other}"),
                };
                if missing {
                    errors.push(FieldError::required(path));
                }
            }
        }

        if let Some(email) = non_blank(&base.email) {
            if let Err(err) = rules::validate_email_format(email) {
                errors.push(FieldError::from_rule("email", err));
            }
        }

        let mut phone = None;
        if let Some(raw) = non_blank(&base.phone) {
            match rules::normalize_phone(raw, &self.phone_country_code) {
                Ok(normalized) => phone = Some(normalized),
                Err(err) => errors.push(FieldError::from_rule("phone", err)),
            }
        }

        if !errors.is_empty() {
            return Err(ValidateError::Invalid(errors));
        }

        let details = match payload {
            ScheduledDeactivationPayload::Retirement(_) => {
                ScheduledDeactivationDetails::Retirement {}
            }
            ScheduledDeactivationPayload::Transfer(p) => ScheduledDeactivationDetails::Transfer {
                new_organization_unit_id: clone_trimmed(&p.new_organization_unit_id)
                    .unwrap_or_default(),
                new_organization_role: clone_trimmed(&p.new_organization_role),
                new_team_lead: clone_trimmed(&p.new_team_lead).unwrap_or_default(),
                organizational_group: clone_trimmed(&p.organizational_group),
            },
        };

        Ok(ScheduledDeactivationData {
            user_id: clone_trimmed(&base.user_id).unwrap_or_default(),
            email: clone_trimmed(&base.email).unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            deactivate_date: base.deactivate_date.unwrap_or_default(),
            devices: base.devices.clone(),
            testing_devices: base.testing_devices.clone(),
            comment: clone_trimmed(&base.comment),
            details,
        })
    }

    fn check_supplemental_positions(
        &self,
        base: &EmployeeBasePayload,
        sch: &schema::RequestSchema,
        errors: &mut Vec<FieldError>,
    ) -> Vec<SupplementalPosition> {
        if sch.requires_supplemental_position && base.supplemental_positions.is_empty() {
            errors.push(FieldError::new(
                "supplementalPositions",
                "At least one supplemental position is required",
            ));
        }

        let mut normalized = Vec::with_capacity(base.supplemental_positions.len());
        for (index, position) in base.supplemental_positions.iter().enumerate() {
            let org_path = format!("supplementalPositions[{index}].organizationUnitId");
            if non_blank(&position.organization_unit_id).is_none() {
                errors.push(FieldError::required(org_path));
            }

            let fraction = position.percentage.unwrap_or(DEFAULT_PERCENTAGE);
            if let Err(err) = rules::validate_percentage(fraction) {
                errors.push(FieldError::from_rule(
                    format!("supplementalPositions[{index}].percentage"),
                    err,
                ));
            }

            normalized.push(SupplementalPosition {
                organization_unit_id: clone_trimmed(&position.organization_unit_id)
                    .unwrap_or_default(),
                percentage: percentage_to_storage(fraction),
                unit_id: clone_trimmed(&position.unit_id),
                main: position.main,
            });
        }

        if base.supplemental_positions.iter().filter(|p| p.main).count() > 1 {
            errors.push(FieldError::new(
                "supplementalPositions",
                "Only one supplemental position may be flagged as main",
            ));
        }

        normalized
    }
}

/// Looks up a base payload field by its schema path. Unknown paths are a
/// programmer error in the schema registry.
fn base_field<'a>(base: &'a EmployeeBasePayload, path: &str) -> Option<&'a str> {
    match path {
        "surname" => non_blank(&base.surname),
        "firstName" => non_blank(&base.first_name),
        "login" => non_blank(&base.login),
        "email" => non_blank(&base.email),
        "phone" => non_blank(&base.phone),
        "organizationUnitId" => non_blank(&base.organization_unit_id),
        "supervisorId" => non_blank(&base.supervisor_id),
        "date" => base.date.as_ref().map(|_| ""),
        other => unreachable!("unknown base field in schema: {other}"),
    }
}

/// Looks up a variant field by its schema path.
fn extra_field<'a>(payload: &'a EmployeeRequestPayload, path: &str) -> Option<&'a str> {
    match (payload, path) {
        (EmployeeRequestPayload::InternalEmployee(p), "osPreference") => {
            non_blank(&p.os_preference)
        }
        (EmployeeRequestPayload::ExternalEmployee(p), "osPreference") => {
            non_blank(&p.os_preference)
        }
        (EmployeeRequestPayload::ExternalFromMainOrgEmployee(p), "osPreference") => {
            non_blank(&p.os_preference)
        }
        (EmployeeRequestPayload::TransferInside(p), "transferToOrganizationUnitId") => {
            non_blank(&p.transfer_to_organization_unit_id)
        }
        (EmployeeRequestPayload::TransferInternToStaff(p), "internshipOrganizationId") => {
            non_blank(&p.internship_organization_id)
        }
        (payload, other) => unreachable!(
            "schema field {other} is not defined for kind {}",
            payload.kind().tag()
        ),
    }
}

/// Builds the normalized variant details. Only called once presence checks
/// have passed, so the empty-string fallbacks are unreachable.
fn normalize_details(payload: &EmployeeRequestPayload) -> EmployeeRequestDetails {
    match payload {
        EmployeeRequestPayload::InternalEmployee(p) => EmployeeRequestDetails::InternalEmployee {
            os_preference: clone_trimmed(&p.os_preference).unwrap_or_default(),
            title: clone_trimmed(&p.title),
            creation_cause: p.creation_cause.clone(),
        },
        EmployeeRequestPayload::ExternalEmployee(p) => EmployeeRequestDetails::ExternalEmployee {
            os_preference: clone_trimmed(&p.os_preference).unwrap_or_default(),
            title: clone_trimmed(&p.title),
            access_to_internal_systems: p.access_to_internal_systems,
            creation_cause: p.creation_cause.clone(),
        },
        EmployeeRequestPayload::ExternalFromMainOrgEmployee(p) => {
            EmployeeRequestDetails::ExternalFromMainOrgEmployee {
                os_preference: clone_trimmed(&p.os_preference).unwrap_or_default(),
                title: clone_trimmed(&p.title),
                create_external_account: p.create_external_account,
            }
        }
        EmployeeRequestPayload::Existing(p) => EmployeeRequestDetails::Existing {
            title: clone_trimmed(&p.title),
        },
        EmployeeRequestPayload::ToDecree(p) => EmployeeRequestDetails::ToDecree {
            disable_account: p.disable_account,
        },
        EmployeeRequestPayload::FromDecree(_) => EmployeeRequestDetails::FromDecree {},
        EmployeeRequestPayload::TransferInside(p) => EmployeeRequestDetails::TransferInside {
            transfer_to_organization_unit_id: clone_trimmed(&p.transfer_to_organization_unit_id)
                .unwrap_or_default(),
            transfer_to_supervisor_id: clone_trimmed(&p.transfer_to_supervisor_id),
            transfer_to_group_id: clone_trimmed(&p.transfer_to_group_id),
            transfer_to_title: clone_trimmed(&p.transfer_to_title),
        },
        EmployeeRequestPayload::TransferInternToStaff(p) => {
            EmployeeRequestDetails::TransferInternToStaff {
                internship_organization_id: clone_trimmed(&p.internship_organization_id)
                    .unwrap_or_default(),
                internship_organization_group: clone_trimmed(&p.internship_organization_group),
            }
        }
        EmployeeRequestPayload::CreateSupplementalPosition(_) => {
            EmployeeRequestDetails::CreateSupplementalPosition {}
        }
    }
}

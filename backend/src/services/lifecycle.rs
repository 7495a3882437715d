//! Status lifecycle for both request families.
//!
//! The transition table is a pure function so every guard is unit-testable
//! without a database; the service wraps it with load, re-validate,
//! persist, publish.

use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

use crate::error::AppError;
use crate::models::employee_request::{ContactPatch, EmployeeRequest, EmployeeRequestPayload};
use crate::models::request::{RequestKind, RequestStatus};
use crate::models::scheduled_deactivation::{ScheduledDeactivation, ScheduledDeactivationPayload};
use crate::repositories::employee_request::EmployeeRequestRepositoryTrait;
use crate::repositories::scheduled_deactivation::ScheduledDeactivationRepositoryTrait;
use crate::validation::{rules, FieldError, RequestValidator, ValidateError, ValidationContext};

use super::events::{EventBus, RequestChanged};

/// Everything a caller can ask the lifecycle to do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    SubmitDraft,
    Accept,
    Decline,
    Cancel,
    Complete,
    Edit,
    EditContacts,
}

impl RequestAction {
    pub fn tag(&self) -> &'static str {
        match self {
            RequestAction::SubmitDraft => "submit_draft",
            RequestAction::Accept => "accept",
            RequestAction::Decline => "decline",
            RequestAction::Cancel => "cancel",
            RequestAction::Complete => "complete",
            RequestAction::Edit => "edit",
            RequestAction::EditContacts => "edit_contacts",
        }
    }
}

/// An action attempted on a request whose status does not permit it.
#[derive(Debug, Clone, Copy, Error)]
#[error("action '{}' is not allowed while the request is '{}'", .action.tag(), .status.db_value())]
pub struct TransitionError {
    status: RequestStatus,
    action: RequestAction,
}

impl TransitionError {
    pub fn not_allowed(status: RequestStatus, action: RequestAction) -> Self {
        Self { status, action }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn action(&self) -> RequestAction {
        self.action
    }
}

/// The transition table. Edits keep the current status; everything else
/// moves the request forward exactly one step.
pub fn next_status(
    status: RequestStatus,
    action: RequestAction,
) -> Result<RequestStatus, TransitionError> {
    use RequestAction as A;
    use RequestStatus as S;

    let next = match (status, action) {
        (S::Draft, A::SubmitDraft) => S::Created,
        (S::Created, A::Accept) => S::Approved,
        (S::Created, A::Decline) => S::Denied,
        (S::Draft | S::Created, A::Cancel) => S::Canceled,
        (S::Created, A::Complete) => S::Completed,
        (S::Draft | S::Created, A::Edit) => status,
        (s, A::EditContacts) if s.is_terminal() => status,
        _ => return Err(TransitionError::not_allowed(status, action)),
    };
    Ok(next)
}

/// Fields a draft may leave empty but a submitted request may not.
fn submission_errors(request: &EmployeeRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.data.equipment.as_deref().map_or(true, |v| v.trim().is_empty()) {
        errors.push(FieldError::required("equipment"));
    }
    if request.data.work_mode.as_deref().map_or(true, |v| v.trim().is_empty()) {
        errors.push(FieldError::required("workMode"));
    }
    errors
}

pub struct RequestLifecycle {
    requests: Arc<dyn EmployeeRequestRepositoryTrait>,
    deactivations: Arc<dyn ScheduledDeactivationRepositoryTrait>,
    validator: RequestValidator,
    events: EventBus,
}

impl RequestLifecycle {
    pub fn new(
        requests: Arc<dyn EmployeeRequestRepositoryTrait>,
        deactivations: Arc<dyn ScheduledDeactivationRepositoryTrait>,
        validator: RequestValidator,
        events: EventBus,
    ) -> Self {
        Self {
            requests,
            deactivations,
            validator,
            events,
        }
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }

    fn notify(&self, id: &str, kind: RequestKind, status: RequestStatus) {
        self.events.publish(RequestChanged {
            id: id.to_string(),
            kind,
            status,
        });
    }

    pub async fn create_request(
        &self,
        db: &PgPool,
        payload: &EmployeeRequestPayload,
    ) -> Result<EmployeeRequest, AppError> {
        let status = payload.base().status.unwrap_or_default();
        if !matches!(status, RequestStatus::Draft | RequestStatus::Created) {
            return Err(AppError::BadRequest(
                "A new request must start as draft or created".to_string(),
            ));
        }
        let ctx = ValidationContext {
            original_login: None,
            target_status: Some(status),
        };
        let data = self.validator.validate_employee(payload, &ctx).await?;
        let request = EmployeeRequest::new(data, status);
        let request = self.requests.create(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    /// Submission re-checks what drafting left open: the status-gated
    /// fields, and that the login was not claimed by a competing request
    /// while the draft sat unsubmitted.
    pub async fn submit_draft(&self, db: &PgPool, id: &str) -> Result<EmployeeRequest, AppError> {
        let mut request = self.requests.find_by_id(db, id).await?;
        next_status(request.status, RequestAction::SubmitDraft)?;
        let mut errors = submission_errors(&request);
        match self.validator.ensure_login_unique(&request.data.login).await {
            Ok(()) => {}
            Err(ValidateError::Invalid(more)) => errors.extend(more),
            Err(err @ ValidateError::Collaborator(_)) => return Err(err.into()),
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        request.submit();
        let request = self.requests.update(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    pub async fn accept(
        &self,
        db: &PgPool,
        id: &str,
        comment: Option<String>,
    ) -> Result<EmployeeRequest, AppError> {
        let mut request = self.requests.find_by_id(db, id).await?;
        next_status(request.status, RequestAction::Accept)?;
        request.approve(comment);
        let request = self.requests.update(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    pub async fn decline(
        &self,
        db: &PgPool,
        id: &str,
        comment: Option<String>,
    ) -> Result<EmployeeRequest, AppError> {
        let mut request = self.requests.find_by_id(db, id).await?;
        next_status(request.status, RequestAction::Decline)?;
        request.deny(comment);
        let request = self.requests.update(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    pub async fn cancel_request(
        &self,
        db: &PgPool,
        id: &str,
        comment: Option<String>,
    ) -> Result<EmployeeRequest, AppError> {
        let mut request = self.requests.find_by_id(db, id).await?;
        next_status(request.status, RequestAction::Cancel)?;
        request.cancel(comment);
        let request = self.requests.update(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    /// Marks a decree request as carried out. Only decree kinds have a
    /// completion step.
    pub async fn complete(&self, db: &PgPool, id: &str) -> Result<EmployeeRequest, AppError> {
        let mut request = self.requests.find_by_id(db, id).await?;
        if !request.kind().is_decree() {
            return Err(AppError::BadRequest(
                "Only decree requests can be completed".to_string(),
            ));
        }
        next_status(request.status, RequestAction::Complete)?;
        request.complete();
        let request = self.requests.update(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    /// Full edit, allowed while the request is still in flight. The kind is
    /// immutable; a request never changes schema after creation.
    pub async fn edit_request(
        &self,
        db: &PgPool,
        id: &str,
        payload: &EmployeeRequestPayload,
    ) -> Result<EmployeeRequest, AppError> {
        let mut request = self.requests.find_by_id(db, id).await?;
        next_status(request.status, RequestAction::Edit)?;
        if payload.kind() != request.kind() {
            return Err(AppError::BadRequest(
                "Request type cannot be changed".to_string(),
            ));
        }
        let ctx = ValidationContext::for_edit(request.data.login.clone(), request.status);
        let data = self.validator.validate_employee(payload, &ctx).await?;
        request.replace_data(data);
        let request = self.requests.update(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    /// The narrow contact-info edit allowed on settled requests.
    pub async fn edit_contacts(
        &self,
        db: &PgPool,
        id: &str,
        patch: &ContactPatch,
    ) -> Result<EmployeeRequest, AppError> {
        let mut request = self.requests.find_by_id(db, id).await?;
        next_status(request.status, RequestAction::EditContacts)?;
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "No contact fields to update".to_string(),
            ));
        }

        let mut errors = Vec::new();
        let mut data = request.data.clone();
        if let Some(email) = patch.email.as_deref().map(str::trim) {
            if let Err(err) = rules::validate_email_format(email) {
                errors.push(FieldError::from_rule("email", err));
            } else {
                data.email = email.to_string();
            }
        }
        if let Some(raw) = patch.phone.as_deref().map(str::trim) {
            match rules::normalize_phone(raw, self.validator.phone_country_code()) {
                Ok(normalized) => data.phone = Some(normalized),
                Err(err) => errors.push(FieldError::from_rule("phone", err)),
            }
        }
        if let Some(date) = patch.date {
            data.date = date;
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        request.replace_data(data);
        let request = self.requests.update(db, &request).await?;
        self.notify(&request.id, request.kind(), request.status);
        Ok(request)
    }

    pub async fn create_deactivation(
        &self,
        db: &PgPool,
        payload: &ScheduledDeactivationPayload,
    ) -> Result<ScheduledDeactivation, AppError> {
        let status = payload.base().status.unwrap_or_default();
        if !matches!(status, RequestStatus::Draft | RequestStatus::Created) {
            return Err(AppError::BadRequest(
                "A new request must start as draft or created".to_string(),
            ));
        }
        let data = self.validator.validate_deactivation(payload)?;
        let deactivation = ScheduledDeactivation::new(data, status);
        let deactivation = self.deactivations.create(db, &deactivation).await?;
        self.notify(&deactivation.id, deactivation.kind(), deactivation.status);
        Ok(deactivation)
    }

    pub async fn submit_deactivation(
        &self,
        db: &PgPool,
        id: &str,
    ) -> Result<ScheduledDeactivation, AppError> {
        let mut deactivation = self.deactivations.find_by_id(db, id).await?;
        next_status(deactivation.status, RequestAction::SubmitDraft)?;
        deactivation.submit();
        let deactivation = self.deactivations.update(db, &deactivation).await?;
        self.notify(&deactivation.id, deactivation.kind(), deactivation.status);
        Ok(deactivation)
    }

    pub async fn accept_deactivation(
        &self,
        db: &PgPool,
        id: &str,
        comment: Option<String>,
    ) -> Result<ScheduledDeactivation, AppError> {
        let mut deactivation = self.deactivations.find_by_id(db, id).await?;
        next_status(deactivation.status, RequestAction::Accept)?;
        deactivation.approve(comment);
        let deactivation = self.deactivations.update(db, &deactivation).await?;
        self.notify(&deactivation.id, deactivation.kind(), deactivation.status);
        Ok(deactivation)
    }

    pub async fn decline_deactivation(
        &self,
        db: &PgPool,
        id: &str,
        comment: Option<String>,
    ) -> Result<ScheduledDeactivation, AppError> {
        let mut deactivation = self.deactivations.find_by_id(db, id).await?;
        next_status(deactivation.status, RequestAction::Decline)?;
        deactivation.deny(comment);
        let deactivation = self.deactivations.update(db, &deactivation).await?;
        self.notify(&deactivation.id, deactivation.kind(), deactivation.status);
        Ok(deactivation)
    }

    /// Canceling a scheduled deactivation requires an explanation; a
    /// user's planned offboarding is not dropped silently.
    pub async fn cancel_deactivation(
        &self,
        db: &PgPool,
        id: &str,
        comment: Option<String>,
    ) -> Result<ScheduledDeactivation, AppError> {
        let mut deactivation = self.deactivations.find_by_id(db, id).await?;
        next_status(deactivation.status, RequestAction::Cancel)?;
        let comment = comment.unwrap_or_default();
        if let Err(err) = rules::validate_cancel_comment(&comment) {
            return Err(AppError::Validation(vec![FieldError::from_rule(
                "comment", err,
            )]));
        }
        deactivation.cancel(Some(comment));
        let deactivation = self.deactivations.update(db, &deactivation).await?;
        self.notify(&deactivation.id, deactivation.kind(), deactivation.status);
        Ok(deactivation)
    }

    pub async fn edit_deactivation(
        &self,
        db: &PgPool,
        id: &str,
        payload: &ScheduledDeactivationPayload,
    ) -> Result<ScheduledDeactivation, AppError> {
        let mut deactivation = self.deactivations.find_by_id(db, id).await?;
        next_status(deactivation.status, RequestAction::Edit)?;
        if payload.kind() != deactivation.kind() {
            return Err(AppError::BadRequest(
                "Request type cannot be changed".to_string(),
            ));
        }
        let data = self.validator.validate_deactivation(payload)?;
        deactivation.replace_data(data);
        let deactivation = self.deactivations.update(db, &deactivation).await?;
        self.notify(&deactivation.id, deactivation.kind(), deactivation.status);
        Ok(deactivation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::config::Config;
    use crate::models::employee_request::{EmployeeRequestData, EmployeeRequestDetails};
    use crate::models::scheduled_deactivation::{
        ScheduledDeactivationData, ScheduledDeactivationDetails,
    };
    use crate::repositories::employee_request::MockEmployeeRequestRepositoryTrait;
    use crate::repositories::scheduled_deactivation::MockScheduledDeactivationRepositoryTrait;
    use crate::validation::MockLoginDirectory;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            corporate_email_domain: "staffpoint.team".to_string(),
            phone_country_code: "7".to_string(),
        }
    }

    fn lazy_pool() -> PgPool {
        PgPool::connect_lazy("postgres://postgres@localhost/staffpoint_test").expect("lazy pool")
    }

    fn sample_data() -> EmployeeRequestData {
        EmployeeRequestData {
            surname: "Ivanov".to_string(),
            first_name: "Ivan".to_string(),
            middle_name: None,
            login: "ivanovi".to_string(),
            email: "ivan@example.com".to_string(),
            work_email: None,
            personal_email: None,
            corporate_email: "ivanovi@staffpoint.team".to_string(),
            phone: None,
            organization_unit_id: "unit-1".to_string(),
            group_id: None,
            supervisor_id: "sup-1".to_string(),
            unit_id: None,
            percentage: 100,
            supplemental_positions: vec![],
            attach_ids: vec![],
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            equipment: None,
            work_mode: None,
            comment: None,
            details: EmployeeRequestDetails::InternalEmployee {
                os_preference: "internal".to_string(),
                title: None,
                creation_cause: "start".to_string(),
            },
        }
    }

    fn decree_data() -> EmployeeRequestData {
        EmployeeRequestData {
            details: EmployeeRequestDetails::ToDecree {
                disable_account: true,
            },
            ..sample_data()
        }
    }

    fn deactivation_data() -> ScheduledDeactivationData {
        ScheduledDeactivationData {
            user_id: "user-1".to_string(),
            email: "ivan@example.com".to_string(),
            phone: "+79991234567".to_string(),
            deactivate_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            devices: vec![],
            testing_devices: vec![],
            comment: None,
            details: ScheduledDeactivationDetails::Retirement {},
        }
    }

    fn lifecycle_with(
        requests: MockEmployeeRequestRepositoryTrait,
        deactivations: MockScheduledDeactivationRepositoryTrait,
        directory: MockLoginDirectory,
    ) -> RequestLifecycle {
        let validator = RequestValidator::new(Arc::new(directory), &test_config());
        RequestLifecycle::new(
            Arc::new(requests),
            Arc::new(deactivations),
            validator,
            EventBus::default(),
        )
    }

    fn lifecycle(
        requests: MockEmployeeRequestRepositoryTrait,
        deactivations: MockScheduledDeactivationRepositoryTrait,
    ) -> RequestLifecycle {
        lifecycle_with(requests, deactivations, MockLoginDirectory::new())
    }

    fn unique_directory(unique: bool) -> MockLoginDirectory {
        let mut directory = MockLoginDirectory::new();
        directory
            .expect_is_login_unique()
            .returning(move |_| Ok(unique));
        directory
    }

    #[test]
    fn transition_table_covers_the_workflow() {
        use RequestAction as A;
        use RequestStatus as S;

        assert_eq!(next_status(S::Draft, A::SubmitDraft).unwrap(), S::Created);
        assert_eq!(next_status(S::Created, A::Accept).unwrap(), S::Approved);
        assert_eq!(next_status(S::Created, A::Decline).unwrap(), S::Denied);
        assert_eq!(next_status(S::Draft, A::Cancel).unwrap(), S::Canceled);
        assert_eq!(next_status(S::Created, A::Cancel).unwrap(), S::Canceled);
        assert_eq!(next_status(S::Created, A::Complete).unwrap(), S::Completed);
        assert_eq!(next_status(S::Draft, A::Edit).unwrap(), S::Draft);
        assert_eq!(next_status(S::Created, A::Edit).unwrap(), S::Created);
        assert_eq!(
            next_status(S::Approved, A::EditContacts).unwrap(),
            S::Approved
        );

        let err = next_status(S::Approved, A::Accept).unwrap_err();
        assert_eq!(err.status(), S::Approved);
        assert_eq!(err.action(), A::Accept);

        assert!(next_status(S::Created, A::SubmitDraft).is_err());
        assert!(next_status(S::Canceled, A::Cancel).is_err());
        assert!(next_status(S::Draft, A::Complete).is_err());
        assert!(next_status(S::Draft, A::EditContacts).is_err());
        assert!(next_status(S::Completed, A::Edit).is_err());
    }

    #[tokio::test]
    async fn accept_on_an_already_approved_request_conflicts() {
        let mut request = EmployeeRequest::new(sample_data(), RequestStatus::Created);
        request.approve(None);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests.expect_update().times(0);

        let service = lifecycle(requests, MockScheduledDeactivationRepositoryTrait::new());
        let err = service.accept(&lazy_pool(), &id, None).await.unwrap_err();
        match err {
            AppError::IllegalTransition(e) => {
                assert_eq!(e.status(), RequestStatus::Approved);
                assert_eq!(e.action(), RequestAction::Accept);
            }
            other => panic!("expected illegal transition, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn submit_draft_requires_equipment_and_work_mode() {
        let request = EmployeeRequest::new(sample_data(), RequestStatus::Draft);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests.expect_update().times(0);

        let service = lifecycle_with(
            requests,
            MockScheduledDeactivationRepositoryTrait::new(),
            unique_directory(true),
        );
        let err = service.submit_draft(&lazy_pool(), &id).await.unwrap_err();
        match err {
            AppError::Validation(errors) => {
                let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
                assert_eq!(paths, vec!["equipment", "workMode"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn submit_draft_rejects_a_login_claimed_since_drafting() {
        let mut data = sample_data();
        data.equipment = Some("laptop".to_string());
        data.work_mode = Some("office".to_string());
        let request = EmployeeRequest::new(data, RequestStatus::Draft);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests.expect_update().times(0);

        // The login was free while drafting; a competing request has
        // claimed it in the meantime.
        let service = lifecycle_with(
            requests,
            MockScheduledDeactivationRepositoryTrait::new(),
            unique_directory(false),
        );
        let err = service.submit_draft(&lazy_pool(), &id).await.unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "login");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn submit_draft_moves_a_ready_draft_to_created() {
        let mut data = sample_data();
        data.equipment = Some("laptop".to_string());
        data.work_mode = Some("office".to_string());
        let request = EmployeeRequest::new(data, RequestStatus::Draft);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests
            .expect_update()
            .times(1)
            .returning(|_, item| Ok(item.clone()));

        let service = lifecycle_with(
            requests,
            MockScheduledDeactivationRepositoryTrait::new(),
            unique_directory(true),
        );
        let mut rx = service.events.subscribe();
        let updated = service.submit_draft(&lazy_pool(), &id).await.unwrap();
        assert_eq!(updated.status, RequestStatus::Created);

        let event = rx.try_recv().expect("change event");
        assert_eq!(event.id, id);
        assert_eq!(event.status, RequestStatus::Created);
    }

    #[tokio::test]
    async fn complete_is_reserved_for_decree_requests() {
        let request = EmployeeRequest::new(sample_data(), RequestStatus::Created);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests.expect_update().times(0);

        let service = lifecycle(requests, MockScheduledDeactivationRepositoryTrait::new());
        let err = service.complete(&lazy_pool(), &id).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn complete_finishes_a_created_decree_request() {
        let request = EmployeeRequest::new(decree_data(), RequestStatus::Created);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests
            .expect_update()
            .times(1)
            .returning(|_, item| Ok(item.clone()));

        let service = lifecycle(requests, MockScheduledDeactivationRepositoryTrait::new());
        let updated = service.complete(&lazy_pool(), &id).await.unwrap();
        assert_eq!(updated.status, RequestStatus::Completed);
        assert!(updated.completed_at.is_some());
    }

    #[tokio::test]
    async fn edit_rejects_a_kind_change() {
        let request = EmployeeRequest::new(sample_data(), RequestStatus::Draft);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests.expect_update().times(0);

        let payload: EmployeeRequestPayload =
            serde_json::from_value(serde_json::json!({ "type": "existing" })).unwrap();

        let service = lifecycle(requests, MockScheduledDeactivationRepositoryTrait::new());
        let err = service
            .edit_request(&lazy_pool(), &id, &payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn contact_edit_on_an_approved_request_normalizes_the_phone() {
        let mut request = EmployeeRequest::new(sample_data(), RequestStatus::Created);
        request.approve(None);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests
            .expect_update()
            .times(1)
            .returning(|_, item| Ok(item.clone()));

        let patch = ContactPatch {
            email: None,
            phone: Some("8 (999) 123-45-67".to_string()),
            date: None,
        };

        let service = lifecycle(requests, MockScheduledDeactivationRepositoryTrait::new());
        let updated = service
            .edit_contacts(&lazy_pool(), &id, &patch)
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Approved);
        assert_eq!(updated.data.phone.as_deref(), Some("+79991234567"));
    }

    #[tokio::test]
    async fn contact_edit_is_rejected_while_in_flight() {
        let request = EmployeeRequest::new(sample_data(), RequestStatus::Created);
        let id = request.id.clone();

        let mut requests = MockEmployeeRequestRepositoryTrait::new();
        let found = request.clone();
        requests
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        requests.expect_update().times(0);

        let patch = ContactPatch {
            email: Some("new@example.com".to_string()),
            phone: None,
            date: None,
        };

        let service = lifecycle(requests, MockScheduledDeactivationRepositoryTrait::new());
        let err = service
            .edit_contacts(&lazy_pool(), &id, &patch)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IllegalTransition(_)));
    }

    #[tokio::test]
    async fn canceling_a_deactivation_needs_a_reasoned_comment() {
        let deactivation =
            ScheduledDeactivation::new(deactivation_data(), RequestStatus::Created);
        let id = deactivation.id.clone();

        let mut deactivations = MockScheduledDeactivationRepositoryTrait::new();
        let found = deactivation.clone();
        deactivations
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        deactivations.expect_update().times(0);

        let service = lifecycle(MockEmployeeRequestRepositoryTrait::new(), deactivations);
        let err = service
            .cancel_deactivation(&lazy_pool(), &id, Some("no".to_string()))
            .await
            .unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors[0].path, "comment"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn canceling_a_deactivation_with_a_comment_succeeds() {
        let deactivation =
            ScheduledDeactivation::new(deactivation_data(), RequestStatus::Created);
        let id = deactivation.id.clone();

        let mut deactivations = MockScheduledDeactivationRepositoryTrait::new();
        let found = deactivation.clone();
        deactivations
            .expect_find_by_id()
            .returning(move |_, _| Ok(found.clone()));
        deactivations
            .expect_update()
            .times(1)
            .returning(|_, item| Ok(item.clone()));

        let service = lifecycle(MockEmployeeRequestRepositoryTrait::new(), deactivations);
        let updated = service
            .cancel_deactivation(&lazy_pool(), &id, Some("employee stays on".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Canceled);
        assert_eq!(updated.decision_comment.as_deref(), Some("employee stays on"));
    }
}

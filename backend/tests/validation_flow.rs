use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use staffpoint_backend::config::Config;
use staffpoint_backend::models::employee_request::EmployeeRequestPayload;
use staffpoint_backend::models::request::RequestStatus;
use staffpoint_backend::validation::{
    LoginDirectory, RequestValidator, ValidateError, ValidationContext,
};

/// In-memory login directory; counts lookups so tests can assert the
/// unchanged-login exemption.
struct StubDirectory {
    taken: Vec<&'static str>,
    lookups: AtomicUsize,
}

impl StubDirectory {
    fn new(taken: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            taken,
            lookups: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl LoginDirectory for StubDirectory {
    async fn is_login_unique(&self, login: &str) -> anyhow::Result<bool> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(!self.taken.contains(&login))
    }
}

fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/staffpoint_test".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        corporate_email_domain: "staffpoint.team".to_string(),
        phone_country_code: "7".to_string(),
    }
}

fn internal_payload() -> EmployeeRequestPayload {
    serde_json::from_value(json!({
        "type": "internalEmployee",
        "surname": "Ivanov",
        "firstName": "Ivan",
        "email": "ivan@example.com",
        "login": "ivanovi",
        "organizationUnitId": "org-1",
        "supervisorId": "user-1",
        "percentage": 1.0,
        "date": "2024-07-01",
        "osPreference": "Linux",
        "title": "Engineer"
    }))
    .expect("payload deserializes")
}

fn error_paths(err: ValidateError) -> Vec<String> {
    match err {
        ValidateError::Invalid(errors) => errors.into_iter().map(|e| e.path).collect(),
        ValidateError::Collaborator(err) => panic!("unexpected collaborator error: {err}"),
    }
}

#[tokio::test]
async fn draft_validation_normalizes_the_record() {
    let validator = RequestValidator::new(StubDirectory::new(vec![]), &test_config());
    let data = validator
        .validate_employee(&internal_payload(), &ValidationContext::default())
        .await
        .expect("valid draft");

    assert_eq!(data.login, "ivanovi");
    assert_eq!(data.corporate_email, "ivanovi@staffpoint.team");
    assert_eq!(data.percentage, 100);
}

#[tokio::test]
async fn created_target_additionally_requires_equipment_and_work_mode() {
    let validator = RequestValidator::new(StubDirectory::new(vec![]), &test_config());
    let ctx = ValidationContext {
        original_login: None,
        target_status: Some(RequestStatus::Created),
    };
    let err = validator
        .validate_employee(&internal_payload(), &ctx)
        .await
        .expect_err("missing status-gated fields");
    assert_eq!(error_paths(err), vec!["equipment", "workMode"]);
}

#[tokio::test]
async fn all_violations_are_reported_in_schema_order() {
    let payload: EmployeeRequestPayload = serde_json::from_value(json!({
        "type": "internalEmployee",
        "firstName": "Ivan",
        "email": "ivan@example.com",
        "login": "Иванов",
        "organizationUnitId": "org-1",
        "supervisorId": "user-1",
        "date": "2024-07-01",
        "osPreference": "Linux"
    }))
    .expect("payload deserializes");

    let validator = RequestValidator::new(StubDirectory::new(vec![]), &test_config());
    let err = validator
        .validate_employee(&payload, &ValidationContext::default())
        .await
        .expect_err("two violations");
    // Missing surname first (base order), then the login format rule.
    assert_eq!(error_paths(err), vec!["surname", "login"]);
}

#[tokio::test]
async fn unchanged_login_skips_the_uniqueness_lookup() {
    let directory = StubDirectory::new(vec!["ivanovi"]);
    let validator = RequestValidator::new(directory.clone(), &test_config());

    let ctx = ValidationContext::for_edit("ivanovi", RequestStatus::Draft);
    validator
        .validate_employee(&internal_payload(), &ctx)
        .await
        .expect("unchanged login does not collide with itself");
    assert_eq!(directory.lookups.load(Ordering::SeqCst), 0);

    let err = validator
        .validate_employee(&internal_payload(), &ValidationContext::default())
        .await
        .expect_err("taken login rejected on create");
    assert_eq!(error_paths(err), vec!["login"]);
    assert_eq!(directory.lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_type_tag_fails_closed() {
    let result: Result<EmployeeRequestPayload, _> = serde_json::from_value(json!({
        "type": "definitelyNotARequestKind",
        "surname": "Ivanov"
    }));
    assert!(result.is_err());
}

//! Employee request repository trait for dependency injection and testing.
//!
//! Use `MockEmployeeRequestRepositoryTrait` in tests to mock the behavior.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::employee_request::EmployeeRequest;
use crate::models::request::RequestStatus;

const COLUMNS: &str = "id, status, data, decision_comment, approved_at, denied_at, \
     canceled_at, completed_at, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRequestRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, db: &PgPool, id: &str) -> Result<EmployeeRequest, AppError>;

    async fn list(
        &self,
        db: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EmployeeRequest>, AppError>;

    async fn count(&self, db: &PgPool, status: Option<RequestStatus>) -> Result<i64, AppError>;

    async fn create(&self, db: &PgPool, item: &EmployeeRequest)
        -> Result<EmployeeRequest, AppError>;

    async fn update(&self, db: &PgPool, item: &EmployeeRequest)
        -> Result<EmployeeRequest, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmployeeRequestRepository;

impl EmployeeRequestRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmployeeRequestRepositoryTrait for EmployeeRequestRepository {
    async fn find_by_id(&self, db: &PgPool, id: &str) -> Result<EmployeeRequest, AppError> {
        let query = format!("SELECT {} FROM employee_requests WHERE id = $1", COLUMNS);
        let request = sqlx::query_as::<_, EmployeeRequest>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;
        Ok(request)
    }

    async fn list(
        &self,
        db: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EmployeeRequest>, AppError> {
        let rows = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM employee_requests WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    COLUMNS
                );
                sqlx::query_as::<_, EmployeeRequest>(&query)
                    .bind(status.db_value())
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(db)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {} FROM employee_requests ORDER BY created_at DESC \
                     LIMIT $1 OFFSET $2",
                    COLUMNS
                );
                sqlx::query_as::<_, EmployeeRequest>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(db)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn count(&self, db: &PgPool, status: Option<RequestStatus>) -> Result<i64, AppError> {
        let total = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM employee_requests WHERE status = $1",
                )
                .bind(status.db_value())
                .fetch_one(db)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee_requests")
                    .fetch_one(db)
                    .await?
            }
        };
        Ok(total)
    }

    async fn create(
        &self,
        db: &PgPool,
        item: &EmployeeRequest,
    ) -> Result<EmployeeRequest, AppError> {
        sqlx::query(
            "INSERT INTO employee_requests \
             (id, kind, status, data, decision_comment, approved_at, denied_at, \
              canceled_at, completed_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&item.id)
        .bind(item.kind().tag())
        .bind(item.status.db_value())
        .bind(Json(&item.data))
        .bind(&item.decision_comment)
        .bind(item.approved_at)
        .bind(item.denied_at)
        .bind(item.canceled_at)
        .bind(item.completed_at)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(db)
        .await?;
        Ok(item.clone())
    }

    async fn update(
        &self,
        db: &PgPool,
        item: &EmployeeRequest,
    ) -> Result<EmployeeRequest, AppError> {
        let result = sqlx::query(
            "UPDATE employee_requests SET status = $1, data = $2, decision_comment = $3, \
             approved_at = $4, denied_at = $5, canceled_at = $6, completed_at = $7, \
             updated_at = $8 WHERE id = $9",
        )
        .bind(item.status.db_value())
        .bind(Json(&item.data))
        .bind(&item.decision_comment)
        .bind(item.approved_at)
        .bind(item.denied_at)
        .bind(item.canceled_at)
        .bind(item.completed_at)
        .bind(item.updated_at)
        .bind(&item.id)
        .execute(db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Request not found".to_string()));
        }
        Ok(item.clone())
    }
}

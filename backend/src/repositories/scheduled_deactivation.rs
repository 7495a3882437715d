use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::request::RequestStatus;
use crate::models::scheduled_deactivation::ScheduledDeactivation;

const COLUMNS: &str = "id, status, data, decision_comment, approved_at, denied_at, \
     canceled_at, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduledDeactivationRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, db: &PgPool, id: &str) -> Result<ScheduledDeactivation, AppError>;

    async fn list(
        &self,
        db: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScheduledDeactivation>, AppError>;

    async fn count(&self, db: &PgPool, status: Option<RequestStatus>) -> Result<i64, AppError>;

    async fn create(
        &self,
        db: &PgPool,
        item: &ScheduledDeactivation,
    ) -> Result<ScheduledDeactivation, AppError>;

    async fn update(
        &self,
        db: &PgPool,
        item: &ScheduledDeactivation,
    ) -> Result<ScheduledDeactivation, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduledDeactivationRepository;

impl ScheduledDeactivationRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScheduledDeactivationRepositoryTrait for ScheduledDeactivationRepository {
    async fn find_by_id(&self, db: &PgPool, id: &str) -> Result<ScheduledDeactivation, AppError> {
        let query = format!(
            "SELECT {} FROM scheduled_deactivations WHERE id = $1",
            COLUMNS
        );
        let deactivation = sqlx::query_as::<_, ScheduledDeactivation>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Scheduled deactivation not found".to_string()))?;
        Ok(deactivation)
    }

    async fn list(
        &self,
        db: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScheduledDeactivation>, AppError> {
        let rows = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM scheduled_deactivations WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    COLUMNS
                );
                sqlx::query_as::<_, ScheduledDeactivation>(&query)
                    .bind(status.db_value())
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(db)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {} FROM scheduled_deactivations ORDER BY created_at DESC \
                     LIMIT $1 OFFSET $2",
                    COLUMNS
                );
                sqlx::query_as::<_, ScheduledDeactivation>(&query)
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
                    "SELECT COUNT(*) FROM scheduled_deactivations WHERE status = $1",
                )
                .bind(status.db_value())
                .fetch_one(db)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM scheduled_deactivations")
                    .fetch_one(db)
                    .await?
            }
        };
        Ok(total)
    }

    async fn create(
        &self,
        db: &PgPool,
        item: &ScheduledDeactivation,
    ) -> Result<ScheduledDeactivation, AppError> {
        sqlx::query(
            "INSERT INTO scheduled_deactivations \
             (id, kind, status, data, decision_comment, approved_at, denied_at, \
              canceled_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&item.id)
        .bind(item.kind().tag())
        .bind(item.status.db_value())
        .bind(Json(&item.data))
        .bind(&item.decision_comment)
        .bind(item.approved_at)
        .bind(item.denied_at)
        .bind(item.canceled_at)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(db)
        .await?;
        Ok(item.clone())
    }

    async fn update(
        &self,
        db: &PgPool,
        item: &ScheduledDeactivation,
    ) -> Result<ScheduledDeactivation, AppError> {
        let result = sqlx::query(
            "UPDATE scheduled_deactivations SET status = $1, data = $2, \
             decision_comment = $3, approved_at = $4, denied_at = $5, canceled_at = $6, \
             updated_at = $7 WHERE id = $8",
        )
        .bind(item.status.db_value())
        .bind(Json(&item.data))
        .bind(&item.decision_comment)
        .bind(item.approved_at)
        .bind(item.denied_at)
        .bind(item.canceled_at)
        .bind(item.updated_at)
        .bind(&item.id)
        .execute(db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Scheduled deactivation not found".to_string(),
            ));
        }
        Ok(item.clone())
    }
}

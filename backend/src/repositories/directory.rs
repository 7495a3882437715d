//! Login uniqueness lookups backed by Postgres.

use async_trait::async_trait;

use crate::db::connection::DbPool;
use crate::validation::LoginDirectory;

/// Checks proposed logins against every login already claimed by an
/// employee request. Drafts do not claim a login; the claim happens at
/// submission, which re-runs this check.
#[derive(Debug, Clone)]
pub struct PgLoginDirectory {
    pool: DbPool,
}

impl PgLoginDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoginDirectory for PgLoginDirectory {
    async fn is_login_unique(&self, login: &str) -> anyhow::Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS( \
                 SELECT 1 FROM employee_requests \
                 WHERE data->>'login' = $1 \
                   AND status NOT IN ('draft', 'canceled', 'denied'))",
        )
        .bind(login)
        .fetch_one(&self.pool)
        .await?;
        Ok(!taken)
    }
}

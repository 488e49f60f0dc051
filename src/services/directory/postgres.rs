use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::user_repo;
use crate::services::directory::client::{
    DirectoryError, DirectoryResult, UserDirectory, UserRecord,
};

/// Postgres-backed user directory, a thin adapter over `user_repo`.
#[derive(Clone, Debug)]
pub struct PgUserDirectory {
    db: PgPool,
}

impl PgUserDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find(&self, subject: &str) -> DirectoryResult<Option<UserRecord>> {
        let row = user_repo::get(&self.db, subject)
            .await
            .map_err(|e| DirectoryError::Backend(e.to_string()))?;

        Ok(row.map(|r| UserRecord {
            subject: r.user_id,
            office_id: r.office_id.0,
        }))
    }
}

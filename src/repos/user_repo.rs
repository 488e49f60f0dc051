/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - authorizer からは read-only (subject キーの単発 SELECT のみ)
 * - DB エラーは RepoError に変換しやすい形で返す
 */
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;
use crate::services::auth::scope::OfficeId;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub user_id: String,
    // JSONB column; the accepted shapes are pinned down by `OfficeId`.
    #[sqlx(rename = "officeId")]
    pub office_id: Json<OfficeId>,
}

pub async fn get(db: &PgPool, user_id: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "officeId"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

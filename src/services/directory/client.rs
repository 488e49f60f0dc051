//! User-directory interface used by the request authorizer.
use async_trait::async_trait;
use thiserror::Error;

use crate::services::auth::scope::OfficeId;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory backend error: {0}")]
    Backend(String),
}

/// A user record as the authorizer sees it (read-only projection).
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub subject: String,
    pub office_id: OfficeId,
}

/// A minimal user-directory interface.
///
/// One lookup keyed by subject. `Ok(None)` means "no such user" and is a
/// denial decision, not an error; `Err` means the backend could not answer.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn find(&self, subject: &str) -> DirectoryResult<Option<UserRecord>>;
}

/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - authorizer はプロセス起動時に一度だけ組み立てる
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::RequestAuthorizer;

#[derive(Clone)]
pub struct AppState {
    pub authorizer: Arc<RequestAuthorizer>,
}

impl AppState {
    pub fn new(authorizer: Arc<RequestAuthorizer>) -> Self {
        Self { authorizer }
    }
}

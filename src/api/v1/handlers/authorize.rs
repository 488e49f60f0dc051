/*
 * Responsibility
 * - POST /authorize handler
 * - DTO validation → RequestAuthorizer 呼び出し → decision をそのまま返す
 * - token 拒否は 401 / collaborator 障害は 500 (AppError 側のポリシー)
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::dto::authorize::AuthorizeRequest,
    error::AppError,
    services::auth::{AuthorizationDecision, AuthorizationRequest},
    state::AppState,
};

pub async fn authorize(
    State(state): State<AppState>,
    Json(req): Json<AuthorizeRequest>,
) -> Result<Json<AuthorizationDecision>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let decision = state
        .authorizer
        .authorize(&AuthorizationRequest::new(req.token()))
        .await?;

    Ok(Json(decision))
}

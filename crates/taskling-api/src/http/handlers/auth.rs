//! Token issuance handlers.

use axum::Json;
use axum::extract::State;

use taskling_types::account::{ApiKeyOut, LoginRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentAccount;
use crate::state::AppState;

/// POST /api/token - Exchange username/password for the account's API key.
///
/// The only unauthenticated endpoint. Issues the key lazily on first
/// login; repeated logins return the same token until it is regenerated.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiKeyOut>, AppError> {
    let api_key = state.auth_service.login(&body.username, &body.password).await?;
    Ok(Json(ApiKeyOut { api_key }))
}

/// POST /api/me/regenerate-key - Replace the caller's API key.
///
/// The previous token stops authenticating immediately.
pub async fn regenerate_key(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<ApiKeyOut>, AppError> {
    let api_key = state.auth_service.regenerate_key(&account).await?;
    Ok(Json(ApiKeyOut { api_key }))
}

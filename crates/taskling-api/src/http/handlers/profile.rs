//! Profile handlers.

use axum::Json;
use axum::extract::State;

use taskling_types::account::{ProfileOut, ProfileUpdate};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentAccount;
use crate::state::AppState;

/// GET /api/me - The caller's identity fields plus current API key.
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<ProfileOut>, AppError> {
    let profile = state.account_service.get_profile(&account).await?;
    Ok(Json(profile))
}

/// PUT /api/me - Partial update of email / first name / last name.
///
/// Fields absent from the body keep their stored values.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<ProfileOut>, AppError> {
    let profile = state.account_service.update_profile(account, body).await?;
    Ok(Json(profile))
}

//! API key authentication extractor.
//!
//! The `Authorization` header carries the raw opaque token -- no Bearer or
//! Basic scheme. Extracting `CurrentAccount` resolves the token against
//! the stored API keys and hands the owning account to the handler, so
//! ownership context is always an explicit parameter rather than ambient
//! request state.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use taskling_types::account::Account;

use crate::http::error::AppError;
use crate::state::AppState;

/// The account resolved from the request's API key.
pub struct CurrentAccount(pub Account);

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let account = state.auth_service.resolve(&token).await?;
        Ok(CurrentAccount(account))
    }
}

/// Pull the raw token out of the `Authorization` header.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header encoding".to_string()))?;

    let token = value.trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized("Empty API key".to_string()));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/todos");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_raw_token_is_taken_verbatim() {
        let parts = parts_with_auth(Some("3f1c2a9e-raw-token"));
        assert_eq!(extract_token(&parts).unwrap(), "3f1c2a9e-raw-token");
    }

    #[test]
    fn test_bearer_prefix_is_not_stripped() {
        // The header value is the token itself; a Bearer-prefixed value is
        // simply a token that won't resolve.
        let parts = parts_with_auth(Some("Bearer abc"));
        assert_eq!(extract_token(&parts).unwrap(), "Bearer abc");
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let parts = parts_with_auth(None);
        assert!(extract_token(&parts).is_err());
    }

    #[test]
    fn test_blank_header_is_rejected() {
        let parts = parts_with_auth(Some("   "));
        assert!(extract_token(&parts).is_err());
    }
}

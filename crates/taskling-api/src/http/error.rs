//! Application error type mapping to HTTP status codes and a JSON body.
//!
//! Ownership mismatches arrive here already folded into `NotFound` by the
//! lower layers, so a non-owner can never distinguish "exists under
//! someone else" from "does not exist".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use taskling_types::error::{AccountError, AuthError, TodoError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Authentication gate errors.
    Auth(AuthError),
    /// Account/profile errors.
    Account(AccountError),
    /// Todo errors.
    Todo(TodoError),
    /// Header-level authentication failure (missing/empty token).
    Unauthorized(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<TodoError> for AppError {
    fn from(e: TodoError) -> Self {
        AppError::Todo(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid username or password".to_string(),
            ),
            AppError::Auth(AuthError::UnknownKey) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid API key".to_string(),
            ),
            AppError::Auth(AuthError::KeyNotFound) => (
                StatusCode::NOT_FOUND,
                "KEY_NOT_FOUND",
                "No API key record for this account".to_string(),
            ),
            AppError::Auth(AuthError::Storage(msg)) => {
                tracing::error!("auth storage error: {msg}");
                internal()
            }
            AppError::Account(AccountError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Account not found".to_string(),
            ),
            AppError::Account(AccountError::UsernameTaken(name)) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Username '{name}' already exists"),
            ),
            AppError::Account(AccountError::InvalidUsername(msg)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::Account(AccountError::HashingFailed) => {
                tracing::error!("password hashing failed");
                internal()
            }
            AppError::Account(AccountError::Storage(msg)) => {
                tracing::error!("account storage error: {msg}");
                internal()
            }
            AppError::Todo(TodoError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Todo not found".to_string(),
            ),
            AppError::Todo(TodoError::Storage(msg)) => {
                tracing::error!("todo storage error: {msg}");
                internal()
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
        };

        let body = json!({
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account.
///
/// Accounts are provisioned out of band (CLI); the REST API only
/// authenticates against them and edits their profile fields. The password
/// is stored as an argon2 hash and never leaves the backend.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC-format hash of the password.
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

/// Account data before the store has assigned an id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

/// The API key credential of an account (at most one per account).
///
/// The token is an opaque random string presented verbatim in the
/// `Authorization` header. It is stored as issued: `login` idempotence and
/// the profile endpoint both return the live value, so a digest-at-rest
/// scheme cannot satisfy the contract.
#[derive(Debug, Clone)]
pub struct ApiKey {
    pub id: i64,
    pub account_id: i64,
    pub key: String,
    pub created_at: DateTime<Utc>,
}

/// Generate a fresh API key token (random UUID v4, hyphenated form).
pub fn new_api_key_token() -> String {
    Uuid::new_v4().to_string()
}

/// Credentials presented to `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body carrying an API key token (`POST /token`,
/// `POST /me/regenerate-key`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyOut {
    pub api_key: String,
}

/// Profile view returned by `GET /me` and `PUT /me`: identity fields plus
/// the account's current API key token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOut {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
    pub api_key: String,
}

/// Partial profile update (`PUT /me`).
///
/// Only fields present in the request body are applied; absent fields keep
/// their stored values. Username and password are not updatable through
/// this path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_token_is_unique() {
        let a = new_api_key_token();
        let b = new_api_key_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_api_key_token_parses_as_uuid() {
        let token = new_api_key_token();
        assert!(Uuid::parse_str(&token).is_ok());
    }

    #[test]
    fn test_profile_update_absent_fields_deserialize_to_none() {
        let upd: ProfileUpdate = serde_json::from_str(r#"{"email":"a@b.se"}"#).unwrap();
        assert_eq!(upd.email.as_deref(), Some("a@b.se"));
        assert!(upd.first_name.is_none());
        assert!(upd.last_name.is_none());
    }

    #[test]
    fn test_profile_out_serializes_date_joined_as_rfc3339() {
        let profile = ProfileOut {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Lidell".to_string(),
            date_joined: "2024-03-01T12:00:00Z".parse().unwrap(),
            api_key: new_api_key_token(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["date_joined"], "2024-03-01T12:00:00Z");
        assert_eq!(json["username"], "alice");
    }
}

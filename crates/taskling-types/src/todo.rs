use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo item owned by exactly one account.
///
/// `created_at` is assigned by the server at creation and never changes.
/// `id` is the store-assigned numeric identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub account_id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Todo data before the store has assigned an id.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub account_id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Request body shared by `POST /todos` and `PUT /todos/{id}`.
///
/// The serde defaults make updates a full replace: a PUT that omits
/// `completed` or `due_date` resets them to `false`/`null` rather than
/// keeping the stored values. This is deliberate and differs from the
/// partial semantics of the profile update.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Wire representation of a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoOut {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<Todo> for TodoOut {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            completed: todo.completed,
            due_date: todo.due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omitted_fields_take_defaults() {
        let payload: TodoPayload = serde_json::from_str(r#"{"title":"buy milk"}"#).unwrap();
        assert_eq!(payload.title, "buy milk");
        assert!(!payload.completed);
        assert!(payload.due_date.is_none());
    }

    #[test]
    fn test_payload_explicit_fields_win() {
        let payload: TodoPayload = serde_json::from_str(
            r#"{"title":"water plants","completed":true,"due_date":"2025-06-01T08:00:00Z"}"#,
        )
        .unwrap();
        assert!(payload.completed);
        assert_eq!(
            payload.due_date,
            Some("2025-06-01T08:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_payload_missing_title_is_rejected() {
        let result = serde_json::from_str::<TodoPayload>(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_todo_out_null_due_date() {
        let todo = Todo {
            id: 7,
            account_id: 1,
            title: "buy milk".to_string(),
            completed: false,
            created_at: Utc::now(),
            due_date: None,
        };
        let json = serde_json::to_value(TodoOut::from(todo)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["due_date"], serde_json::Value::Null);
        // created_at and owner are internal and never serialized
        assert!(json.get("created_at").is_none());
        assert!(json.get("account_id").is_none());
    }
}

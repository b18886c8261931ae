//! Row shapes of the tables the server uses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A row of the `todos` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

/// Writable columns of the `todos` table
#[derive(Debug, Clone, Serialize)]
pub struct TodoWrite<'a> {
    pub title: &'a str,
    pub is_complete: bool,
}

/// A row of the `user_api_keys` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiKeyRow {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub user_id: String,
    pub api_key: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Writable columns of the `user_api_keys` table
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyWrite<'a> {
    pub user_id: &'a str,
    pub api_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
        }
    }
}

/// Ids may be `uuid` or `bigint` columns
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    RawId::deserialize(de).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(de).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_row_accepts_numeric_id() {
        let row: TodoRow = serde_json::from_str(
            r#"{"id": 42, "title": "t", "is_complete": false, "created_at": "2024-01-01T00:00:00+00:00"}"#,
        )
        .unwrap();
        assert_eq!(row.id, "42");
    }

    #[test]
    fn todo_row_accepts_uuid_id() {
        let row: TodoRow = serde_json::from_str(
            r#"{"id": "6f1c2b1e-0000-4000-8000-000000000000", "title": "t", "is_complete": true, "created_at": "2024-01-01T00:00:00.5Z"}"#,
        )
        .unwrap();
        assert!(row.id.starts_with("6f1c"));
    }

    #[test]
    fn api_key_row_optional_columns() {
        let row: ApiKeyRow =
            serde_json::from_str(r#"{"user_id": "u", "api_key": "k"}"#).unwrap();
        assert!(row.id.is_none());
        assert!(row.provider.is_none());

        let row: ApiKeyRow =
            serde_json::from_str(r#"{"id": 7, "user_id": "u", "api_key": "k", "provider": "openai"}"#)
                .unwrap();
        assert_eq!(row.id.as_deref(), Some("7"));
    }

    #[test]
    fn api_key_write_omits_missing_provider() {
        let json = serde_json::to_value(ApiKeyWrite {
            user_id: "u",
            api_key: "k",
            provider: None,
        })
        .unwrap();
        assert!(json.get("provider").is_none());
    }
}

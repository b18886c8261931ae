//! Supabase HTTP client
//!
//! PostgREST requests carry the service key twice, as `apikey` and as a
//! bearer token. Writes ask for `Prefer: return=representation` so every
//! mutation answers with the affected rows; an empty array means no row
//! matched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiKeyRow, ApiKeyWrite, TodoRow, TodoWrite};

/// PostgreSQL `invalid_text_representation`, e.g. a non-numeric id for a
/// `bigint` column
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// Supabase client errors
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Connection to Supabase failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request failed in transport
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// PostgREST or GoTrue answered with an error; `message` is theirs
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Missing or invalid project settings
    #[error("Supabase is not configured: {0}")]
    Configuration(String),
}

impl SupabaseError {
    /// Whether the filter value could not be cast to the column type
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::Api { code: Some(code), .. } if code == INVALID_TEXT_REPRESENTATION)
    }
}

impl From<reqwest::Error> for SupabaseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Supabase project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Service role key
    #[serde(default)]
    pub service_role_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_todos_table")]
    pub todos_table: String,

    #[serde(default = "default_sessions_table")]
    pub sessions_table: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_todos_table() -> String {
    "todos".to_string()
}

fn default_sessions_table() -> String {
    "user_api_keys".to_string()
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_role_key: None,
            timeout_secs: default_timeout(),
            todos_table: default_todos_table(),
            sessions_table: default_sessions_table(),
        }
    }
}

/// A PostgREST equality filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: String,
    value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self {
            column: column.into(),
            value: format!("eq.{value}"),
        }
    }

    fn as_pair(&self) -> (&str, &str) {
        (&self.column, &self.value)
    }
}

/// Typed operations the server needs from Supabase
#[async_trait]
pub trait SupabaseClient: Send + Sync {
    async fn list_todos(&self) -> Result<Vec<TodoRow>, SupabaseError>;

    async fn get_todo(&self, id: &str) -> Result<Option<TodoRow>, SupabaseError>;

    async fn insert_todo(&self, todo: &TodoWrite<'_>) -> Result<TodoRow, SupabaseError>;

    async fn update_todo(
        &self,
        id: &str,
        todo: &TodoWrite<'_>,
    ) -> Result<Option<TodoRow>, SupabaseError>;

    /// Returns whether a row was deleted
    async fn delete_todo(&self, id: &str) -> Result<bool, SupabaseError>;

    async fn insert_api_key(&self, row: &ApiKeyWrite<'_>) -> Result<ApiKeyRow, SupabaseError>;

    async fn find_api_key(&self, user_id: &str) -> Result<Option<ApiKeyRow>, SupabaseError>;

    /// GoTrue authorize URL for an OAuth provider
    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, SupabaseError>;

    /// Whether PostgREST answers a minimal query
    async fn is_healthy(&self) -> bool;
}

/// PostgREST/GoTrue client over reqwest
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    client: Client,
    config: SupabaseConfig,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl PostgrestClient {
    /// Create a new client
    ///
    /// An empty project URL is accepted; requests then fail with
    /// [`SupabaseError::Configuration`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SupabaseError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    fn base_url(&self) -> Result<&str, SupabaseError> {
        let url = self.config.url.trim_end_matches('/');
        if url.is_empty() {
            return Err(SupabaseError::Configuration(
                "SUPABASE_URL is not set".to_string(),
            ));
        }
        Ok(url)
    }

    fn table_url(&self, table: &str) -> Result<String, SupabaseError> {
        Ok(format!("{}/rest/v1/{table}", self.base_url()?))
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, SupabaseError> {
        let key = self
            .config
            .service_role_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SupabaseError::Configuration("SUPABASE_SERVICE_ROLE_KEY is not set".to_string())
            })?;
        Ok(request.header("apikey", key).bearer_auth(key))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, SupabaseError> {
        let response = self.authorized(request)?.send().await?;
        let response = Self::check(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SupabaseError::ParseError(e.to_string()))
    }

    async fn check(response: Response) -> Result<Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (message, code) = match serde_json::from_str::<PostgrestError>(&body) {
            Ok(err) => (err.message, err.code),
            Err(_) if body.trim().is_empty() => (format!("HTTP {status}"), None),
            Err(_) => (body, None),
        };
        warn!(status = status.as_u16(), code = ?code, message = %message, "Supabase request failed");
        Err(SupabaseError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    /// `GET /rest/v1/<table>?select=*&<filters>`
    #[instrument(skip(self, filters))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
        limit: Option<usize>,
    ) -> Result<Vec<T>, SupabaseError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().map(|f| {
            let (k, v) = f.as_pair();
            (k, v.to_string())
        }));
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let request = self.client.get(self.table_url(table)?).query(&query);
        self.execute(request).await
    }

    /// `POST /rest/v1/<table>` returning inserted rows
    #[instrument(skip(self, body))]
    pub async fn insert<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<Vec<T>, SupabaseError> {
        let request = self
            .client
            .post(self.table_url(table)?)
            .header("Prefer", "return=representation")
            .json(body);
        self.execute(request).await
    }

    /// `PATCH /rest/v1/<table>?<filters>` returning updated rows
    #[instrument(skip(self, filters, body))]
    pub async fn update<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
        body: &B,
    ) -> Result<Vec<T>, SupabaseError> {
        let query: Vec<(&str, &str)> = filters.iter().map(Filter::as_pair).collect();
        let request = self
            .client
            .patch(self.table_url(table)?)
            .query(&query)
            .header("Prefer", "return=representation")
            .json(body);
        self.execute(request).await
    }

    /// `DELETE /rest/v1/<table>?<filters>` returning deleted rows
    #[instrument(skip(self, filters))]
    pub async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> Result<Vec<T>, SupabaseError> {
        let query: Vec<(&str, &str)> = filters.iter().map(Filter::as_pair).collect();
        let request = self
            .client
            .delete(self.table_url(table)?)
            .query(&query)
            .header("Prefer", "return=representation");
        self.execute(request).await
    }
}

/// Treat an uncastable id as "no such row"
fn absent_on_invalid_id<T>(result: Result<Vec<T>, SupabaseError>) -> Result<Vec<T>, SupabaseError> {
    match result {
        Err(e) if e.is_invalid_id() => {
            debug!("Id does not fit the column type; treating as absent");
            Ok(Vec::new())
        },
        other => other,
    }
}

fn single<T>(rows: Vec<T>) -> Result<T, SupabaseError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| SupabaseError::ParseError("insert returned no rows".to_string()))
}

#[async_trait]
impl SupabaseClient for PostgrestClient {
    async fn list_todos(&self) -> Result<Vec<TodoRow>, SupabaseError> {
        self.select(&self.config.todos_table, &[], None).await
    }

    async fn get_todo(&self, id: &str) -> Result<Option<TodoRow>, SupabaseError> {
        let rows = self
            .select(&self.config.todos_table, &[Filter::eq("id", id)], Some(1))
            .await;
        Ok(absent_on_invalid_id(rows)?.into_iter().next())
    }

    async fn insert_todo(&self, todo: &TodoWrite<'_>) -> Result<TodoRow, SupabaseError> {
        single(self.insert(&self.config.todos_table, &[todo]).await?)
    }

    async fn update_todo(
        &self,
        id: &str,
        todo: &TodoWrite<'_>,
    ) -> Result<Option<TodoRow>, SupabaseError> {
        let rows = self
            .update(&self.config.todos_table, &[Filter::eq("id", id)], todo)
            .await;
        Ok(absent_on_invalid_id(rows)?.into_iter().next())
    }

    async fn delete_todo(&self, id: &str) -> Result<bool, SupabaseError> {
        let rows: Vec<serde_json::Value> = absent_on_invalid_id(
            self.delete(&self.config.todos_table, &[Filter::eq("id", id)])
                .await,
        )?;
        Ok(!rows.is_empty())
    }

    async fn insert_api_key(&self, row: &ApiKeyWrite<'_>) -> Result<ApiKeyRow, SupabaseError> {
        single(self.insert(&self.config.sessions_table, &[row]).await?)
    }

    async fn find_api_key(&self, user_id: &str) -> Result<Option<ApiKeyRow>, SupabaseError> {
        let rows = self
            .select(
                &self.config.sessions_table,
                &[Filter::eq("user_id", user_id)],
                Some(1),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, SupabaseError> {
        let endpoint = format!("{}/auth/v1/authorize", self.base_url()?);
        let url = Url::parse_with_params(
            &endpoint,
            &[("provider", provider), ("redirect_to", redirect_to)],
        )
        .map_err(|e| SupabaseError::Configuration(format!("invalid SUPABASE_URL: {e}")))?;
        Ok(url.into())
    }

    async fn is_healthy(&self) -> bool {
        match self
            .select::<serde_json::Value>(&self.config.todos_table, &[], Some(1))
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Supabase health check failed");
                false
            },
        }
    }
}

//! HTTP client for the mock item API.
//!
//! [`ApiClient`] is a thin typed wrapper over the REST routes. [`ApiSession`]
//! adds the state a test scenario carries between steps: the bearer token
//! from `login` and the last fetched item list, which criteria are then
//! verified against.

use crate::api::Envelope;
use itemcheck_criteria::{CriterionRow, Matcher, NoMatchError, Record, RowMatch, VerificationReport};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Default base URL when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Errors that can occur when talking to the item API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("API returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("No session token; log in first")]
    NotAuthenticated,
    #[error("Items have not been fetched yet")]
    ItemsNotFetched,
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),
}

impl ClientError {
    /// HTTP status for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Token to reuse instead of calling `login`.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL from `API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        match std::env::var("API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Typed access to the REST routes
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        request.send().await.map_err(|e| {
            if e.is_connect() {
                ClientError::Connection(format!("Cannot connect to {}", self.base_url))
            } else {
                ClientError::Request(e)
            }
        })
    }

    /// Check the server is up
    pub async fn health_check(&self) -> Result<bool, ClientError> {
        let resp = self.send(self.client.get(self.url("/health"))).await?;
        Ok(resp.status().is_success())
    }

    /// Obtain the session token
    pub async fn login(&self) -> Result<String, ClientError> {
        let resp = self
            .send(self.client.post(self.url("/login")).json(&serde_json::json!({})))
            .await?;
        let envelope: Envelope<()> = read_envelope(resp, StatusCode::OK).await?;
        envelope
            .token
            .ok_or_else(|| ClientError::Parse("login response has no token".to_string()))
    }

    /// List all items
    pub async fn list_items(&self, token: &str) -> Result<Vec<Record>, ClientError> {
        let resp = self
            .send(self.client.get(self.url("/items")).bearer_auth(token))
            .await?;
        data(read_envelope(resp, StatusCode::OK).await?)
    }

    /// Get a single item
    pub async fn get_item(&self, token: &str, id: i64) -> Result<Record, ClientError> {
        let resp = self
            .send(
                self.client
                    .get(self.url(&format!("/items/{id}")))
                    .bearer_auth(token),
            )
            .await?;
        data(read_envelope(resp, StatusCode::OK).await?)
    }

    /// Create an item
    pub async fn create_item(&self, token: &str, item: &Record) -> Result<Record, ClientError> {
        let resp = self
            .send(
                self.client
                    .post(self.url("/items"))
                    .bearer_auth(token)
                    .json(item),
            )
            .await?;
        data(read_envelope(resp, StatusCode::CREATED).await?)
    }

    /// Merge fields onto an item
    pub async fn update_item(
        &self,
        token: &str,
        id: i64,
        fields: &Record,
    ) -> Result<Record, ClientError> {
        let resp = self
            .send(
                self.client
                    .put(self.url(&format!("/items/{id}")))
                    .bearer_auth(token)
                    .json(fields),
            )
            .await?;
        data(read_envelope(resp, StatusCode::OK).await?)
    }

    /// Delete an item, returning the server's confirmation message
    pub async fn delete_item(&self, token: &str, id: i64) -> Result<String, ClientError> {
        let resp = self
            .send(
                self.client
                    .delete(self.url(&format!("/items/{id}")))
                    .bearer_auth(token),
            )
            .await?;
        let envelope: Envelope<()> = read_envelope(resp, StatusCode::OK).await?;
        Ok(envelope.message.unwrap_or_default())
    }
}

async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
    expected: StatusCode,
) -> Result<Envelope<T>, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;
    let envelope = serde_json::from_str::<Envelope<T>>(&text);

    if status != expected {
        let message = envelope
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let envelope = envelope.map_err(|e| ClientError::Parse(e.to_string()))?;
    if !envelope.success {
        return Err(ClientError::Server {
            status: status.as_u16(),
            message: envelope.message.unwrap_or_default(),
        });
    }
    Ok(envelope)
}

fn data<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
    envelope
        .data
        .ok_or_else(|| ClientError::Parse("response has no data".to_string()))
}

/// Per-scenario API state
#[derive(Debug, Clone)]
pub struct ApiSession {
    client: ApiClient,
    token: Option<String>,
    items: Option<Vec<Record>>,
}

impl ApiSession {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: ApiClient::new(&config)?,
            token: config.token,
            items: None,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Items from the last successful `fetch_items`.
    pub fn items(&self) -> Option<&[Record]> {
        self.items.as_deref()
    }

    /// Replace the fetched items, e.g. with a fixture.
    pub fn set_items(&mut self, items: Vec<Record>) {
        self.items = Some(items);
    }

    fn require_token(&self) -> Result<&str, ClientError> {
        self.token().ok_or(ClientError::NotAuthenticated)
    }

    pub async fn login(&mut self) -> Result<&str, ClientError> {
        let token = self.client.login().await?;
        info!("Logged in to {}", self.client.base_url());
        Ok(self.token.insert(token).as_str())
    }

    pub async fn fetch_items(&mut self) -> Result<&[Record], ClientError> {
        let items = self.client.list_items(self.require_token()?).await?;
        debug!("Fetched {} items", items.len());
        Ok(self.items.insert(items).as_slice())
    }

    pub async fn get_item(&self, id: i64) -> Result<Record, ClientError> {
        self.client.get_item(self.require_token()?, id).await
    }

    pub async fn create_item(&self, item: &Record) -> Result<Record, ClientError> {
        self.client.create_item(self.require_token()?, item).await
    }

    pub async fn update_item(&self, id: i64, fields: &Record) -> Result<Record, ClientError> {
        self.client.update_item(self.require_token()?, id, fields).await
    }

    pub async fn delete_item(&self, id: i64) -> Result<String, ClientError> {
        self.client.delete_item(self.require_token()?, id).await
    }

    fn fetched(&self) -> Result<&[Record], ClientError> {
        self.items().ok_or(ClientError::ItemsNotFetched)
    }

    /// Fail-fast verification of the fetched items with default strategies.
    pub fn verify_items(&self, criteria: &[CriterionRow]) -> Result<Vec<RowMatch>, ClientError> {
        self.verify_items_with(&Matcher::default(), criteria)
    }

    pub fn verify_items_with(
        &self,
        matcher: &Matcher,
        criteria: &[CriterionRow],
    ) -> Result<Vec<RowMatch>, ClientError> {
        Ok(matcher.match_rows(self.fetched()?, criteria)?)
    }

    /// Evaluate every row against the fetched items.
    pub fn evaluate_items(
        &self,
        matcher: &Matcher,
        criteria: &[CriterionRow],
    ) -> Result<VerificationReport, ClientError> {
        Ok(matcher.evaluate_rows(self.fetched()?, criteria))
    }
}

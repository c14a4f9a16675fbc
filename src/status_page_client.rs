use crate::domain::{Credential, PageQuery};
use reqwest::{Client, StatusCode, header};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{Span, field::display};

#[derive(Clone, Debug)]
pub struct StatusPageClient {
    base_url: String,
    http_client: Client,
    request_interval: Duration,
    // Calls through clones of the same client share one slot.
    last_request: Arc<Mutex<Option<Instant>>>,
}

/// A GET request against the API, relative to the client's base url.
#[derive(Debug)]
pub struct ApiRequest<'a> {
    path: String,
    credential: &'a Credential,
    query: PageQuery,
    content_type: Option<&'a str>,
}

impl<'a> ApiRequest<'a> {
    pub fn get(path: impl Into<String>, credential: &'a Credential) -> Self {
        Self {
            path: path.into(),
            credential,
            query: PageQuery::new(),
            content_type: None,
        }
    }

    pub fn query(mut self, query: PageQuery) -> Self {
        self.query = query;
        self
    }

    /// Sends a `Content-Type` header even though the request has no body.
    pub fn content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

/// What the assertions get to look at.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    /// `None` when the body is empty or not JSON.
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains("application/json"))
    }

    /// The body as a collection, if it is a JSON array.
    pub fn records(&self) -> Option<&[Value]> {
        self.body.as_ref()?.as_array().map(Vec::as_slice)
    }

    /// `id` of every record that has a string one.
    pub fn ids(&self) -> Vec<&str> {
        self.records()
            .unwrap_or_default()
            .iter()
            .filter_map(|record| record.get("id").and_then(Value::as_str))
            .collect()
    }
}

impl StatusPageClient {
    pub fn new(
        base_url: String,
        timeout: Duration,
        request_interval: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            http_client,
            request_interval,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(
        name = "Calling status page API",
        skip_all,
        fields(
            path = %request.path,
            query = %request.query,
            credential = request.credential.kind(),
            http.status = tracing::field::Empty
        )
    )]
    pub async fn send(&self, request: ApiRequest<'_>) -> Result<ApiResponse, reqwest::Error> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut builder = self.http_client.get(&url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query.to_pairs());
        }
        if let Some(token) = request.credential.bearer_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        self.wait_for_request_slot().await;
        let response = builder.send().await.map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Request did not complete");
            e
        })?;
        let status = response.status();
        Span::current().record("http.status", display(status.as_u16()));

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).ok();

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }

    // Holds the lock until the slot is taken so concurrent callers queue up.
    async fn wait_for_request_slot(&self) {
        if self.request_interval.is_zero() {
            return;
        }
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.request_interval {
                tokio::time::sleep(self.request_interval - elapsed).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}

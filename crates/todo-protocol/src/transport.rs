//! Transport client for the todo GraphQL endpoint

use crate::error::{ProtocolError, Result};
use crate::model::{Payload, TodoRecord};
use crate::query::Intent;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Something that can carry a query string to a GraphQL endpoint
///
/// Implementations return the decoded JSON body. Envelope handling lives in
/// [`TodoClient`], so a stub only has to hand back a canned response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request for `query` and return the JSON body
    async fn execute(&self, query: &str) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, query: &str) -> Result<Value> {
        (**self).execute(query).await
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g. "http://localhost:8080")
    pub base_url: String,
    /// Path of the GraphQL endpoint below the base URL
    pub graphql_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            graphql_path: "/graphql".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP transport issuing `GET <endpoint>?query=<query>`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for `base_url` with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ProtocolError::Configuration(format!("Invalid base URL: {}", e)))?;
        let endpoint = endpoint_url(&base_url, &config.graphql_path)?;

        if config.timeout_secs == 0 {
            return Err(ProtocolError::Configuration(
                "timeout must be at least one second".to_string(),
            ));
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("todo-protocol/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Full URL of the GraphQL endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Append `graphql_path` below the path of `base`, keeping any prefix
fn endpoint_url(base: &Url, graphql_path: &str) -> Result<Url> {
    if base.cannot_be_a_base() {
        return Err(ProtocolError::Configuration(format!(
            "Invalid base URL: {} cannot carry a path",
            base
        )));
    }

    let mut endpoint = base.clone();
    endpoint.set_path(&format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        graphql_path.trim_start_matches('/')
    ));
    Ok(endpoint)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, query: &str) -> Result<Value> {
        debug!(endpoint = %self.endpoint, query, "sending todo query");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProtocolError::Api {
                message,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Extract the payload stored under `data.<field>`
pub fn decode_payload(field: &str, body: Value) -> Result<Payload> {
    let Value::Object(mut envelope) = body else {
        return Err(ProtocolError::Decode(
            "response body is not a JSON object".to_string(),
        ));
    };

    let errors = graphql_errors(envelope.get("errors"));
    let value = match envelope.remove("data") {
        Some(Value::Object(mut data)) => data.remove(field),
        _ => None,
    };

    match value {
        Some(Value::Array(items)) => {
            let records = items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<TodoRecord>, _>>()?;
            Ok(Payload::List(records))
        }
        Some(record @ Value::Object(_)) => Ok(Payload::Record(serde_json::from_value(record)?)),
        Some(Value::Null) if errors.is_empty() => Ok(Payload::Null),
        Some(Value::Null) | None if !errors.is_empty() => Err(ProtocolError::GraphQl(errors)),
        Some(other) => Err(ProtocolError::Decode(format!(
            "unexpected value for `{}`: {}",
            field, other
        ))),
        None => Err(ProtocolError::Decode(format!(
            "response lacks `data.{}`",
            field
        ))),
    }
}

fn graphql_errors(errors: Option<&Value>) -> Vec<String> {
    match errors {
        Some(Value::Array(items)) => items
            .iter()
            .map(|e| {
                e.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string())
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Typed todo operations over any [`Transport`]
#[derive(Debug, Clone)]
pub struct TodoClient<T> {
    transport: T,
}

impl<T: Transport> TodoClient<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the query for `intent`, send it and decode the payload.
    ///
    /// Validation failures return before the transport is touched.
    pub async fn send(&self, intent: &Intent) -> Result<Payload> {
        let query = intent.to_query()?;
        let body = self.transport.execute(&query).await?;
        decode_payload(intent.field(), body)
    }

    /// Fetch every todo
    pub async fn list(&self) -> Result<Vec<TodoRecord>> {
        match self.send(&Intent::List).await? {
            Payload::List(records) => Ok(records),
            Payload::Null => Ok(Vec::new()),
            Payload::Record(_) => Err(ProtocolError::Decode(
                "`todoList` returned a single record".to_string(),
            )),
        }
    }

    /// Create a todo with `text`
    pub async fn create(&self, text: &str) -> Result<TodoRecord> {
        let intent = Intent::create(text)?;
        self.expect_record(&intent).await
    }

    /// Set the done flag of todo `id`
    pub async fn update(&self, id: &str, done: bool) -> Result<TodoRecord> {
        self.expect_record(&Intent::update(id, done)).await
    }

    /// Fetch one todo; `None` when the id is unknown
    pub async fn get(&self, id: &str) -> Result<Option<TodoRecord>> {
        self.optional_record(&Intent::get(id)).await
    }

    /// Fetch the most recently added todo
    pub async fn last(&self) -> Result<Option<TodoRecord>> {
        self.optional_record(&Intent::Last).await
    }

    async fn expect_record(&self, intent: &Intent) -> Result<TodoRecord> {
        self.optional_record(intent).await?.ok_or_else(|| {
            ProtocolError::Decode(format!("`{}` returned null", intent.field()))
        })
    }

    async fn optional_record(&self, intent: &Intent) -> Result<Option<TodoRecord>> {
        match self.send(intent).await? {
            Payload::Record(record) => Ok(Some(record)),
            Payload::Null => Ok(None),
            Payload::List(_) => Err(ProtocolError::Decode(format!(
                "`{}` returned a list",
                intent.field()
            ))),
        }
    }
}

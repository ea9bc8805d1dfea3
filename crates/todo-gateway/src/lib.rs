//! Todo Gateway - GraphQL endpoint plus POST-to-GET relay
//!
//! Provides:
//! - GET /graphql - Execute queries against the embedded todo schema
//!   (GraphiQL console when no `query` parameter is given)
//! - POST /graphql, POST /, POST /{*path} - Relay the JSON body as query
//!   parameters of a GET to the configured upstream

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod config;

use api::graphql::{TodoSchema, TodoStore, create_schema};
use config::GatewayConfig;

/// Gateway state shared by all handlers
#[derive(Clone)]
pub struct GatewayState {
    /// Embedded todo schema served on GET /graphql
    pub schema: TodoSchema,
    /// Outbound HTTP client for the relay
    pub client: reqwest::Client,
    /// Base URL the relay appends inbound paths to
    pub upstream_base: String,
}

impl GatewayState {
    /// Build state from configuration with a freshly seeded todo store
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        Self::with_store(config, Arc::new(TodoStore::seeded()))
    }

    /// Build state around an existing todo store
    pub fn with_store(config: &GatewayConfig, store: Arc<TodoStore>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .user_agent(concat!("todo-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            schema: create_schema(store),
            client,
            upstream_base: config.upstream.base_url.clone(),
        })
    }
}

/// Build the gateway router
pub fn build_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route(
            "/graphql",
            get(api::graphql::graphql_get).post(api::relay::relay),
        )
        .route("/", post(api::relay::relay))
        .route("/{*path}", post(api::relay::relay))
        .with_state(state)
        // CORS support
        .layer(CorsLayer::permissive())
        // Request/response tracing
        .layer(TraceLayer::new_for_http())
}

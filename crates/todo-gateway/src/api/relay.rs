//! POST-to-GET upstream relay
//!
//! `POST /<path>` with a flat JSON object body becomes
//! `GET <upstream_base>/<path>?<key>=<value>&...`. The upstream status,
//! content type and body are handed back unchanged; the body is streamed.

use crate::GatewayState;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Relay failures, each mapped to a response for the original caller
#[derive(Debug, Error)]
pub enum RelayError {
    /// Body is not a flat JSON object
    #[error("invalid relay body: {0}")]
    BadRequest(String),

    /// Upstream did not answer within the configured timeout
    #[error("upstream request to {url} timed out")]
    Timeout { url: String },

    /// Upstream could not be reached or the exchange failed
    #[error("upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl RelayError {
    fn from_reqwest(source: reqwest::Error, url: String) -> Self {
        if source.is_timeout() {
            RelayError::Timeout { url }
        } else {
            RelayError::Upstream { url, source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = match &self {
            RelayError::BadRequest(_) => json!({ "error": self.to_string() }),
            RelayError::Timeout { url } | RelayError::Upstream { url, .. } => {
                json!({ "error": self.to_string(), "upstream": url })
            }
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Join the upstream base and an inbound path
pub fn upstream_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Reject inbound paths with `.` or `..` segments, plain or percent-encoded.
///
/// The URL parser resolves those segments, which would let a request climb
/// out of the configured upstream prefix.
pub fn check_path(path: &str) -> Result<(), RelayError> {
    let dot_segment = path.split('/').any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    });
    if dot_segment {
        return Err(RelayError::BadRequest(format!(
            "path `{}` must not contain dot segments",
            path
        )));
    }
    Ok(())
}

/// Flatten a JSON object body into query parameters.
///
/// Strings pass through, numbers and booleans use their JSON text, `null`
/// is dropped. An empty body means no parameters.
pub fn parse_params(body: &[u8]) -> Result<Vec<(String, String)>, RelayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::BadRequest(format!("body is not valid JSON: {}", e)))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(RelayError::BadRequest(
                "body must be a JSON object".to_string(),
            ));
        }
    };

    let mut params = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                return Err(RelayError::BadRequest(format!(
                    "parameter `{}` must be a string, number or boolean",
                    key
                )));
            }
        };
        params.push((key, value));
    }
    Ok(params)
}

/// Build the outbound GET for an inbound path and parameters
pub fn build_upstream_request(
    client: &reqwest::Client,
    base: &str,
    path: &str,
    params: &[(String, String)],
) -> reqwest::RequestBuilder {
    client.get(upstream_url(base, path)).query(params)
}

/// POST /{*path}
pub async fn relay(
    State(state): State<Arc<GatewayState>>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, RelayError> {
    check_path(uri.path())?;
    let params = parse_params(&body)?;
    let url = upstream_url(&state.upstream_base, uri.path());
    debug!(url = %url, params = params.len(), "relaying POST as GET");

    let upstream = build_upstream_request(&state.client, &state.upstream_base, uri.path(), &params)
        .send()
        .await
        .map_err(|e| {
            let err = RelayError::from_reqwest(e, url.clone());
            warn!(error = %err, "upstream relay failed");
            err
        })?;

    let status = upstream.status();
    if !status.is_success() {
        debug!(url = %url, status = status.as_u16(), "relaying upstream error status");
    }

    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url_joins_paths() {
        assert_eq!(upstream_url("http://up:9", "/todos"), "http://up:9/todos");
        assert_eq!(upstream_url("http://up:9/", "/todos"), "http://up:9/todos");
        assert_eq!(upstream_url("http://up:9/api", "todos"), "http://up:9/api/todos");
        assert_eq!(upstream_url("http://up:9", "/"), "http://up:9/");
    }

    #[test]
    fn test_check_path_rejects_dot_segments() {
        assert!(check_path("/todos").is_ok());
        assert!(check_path("/todos/v1.2/..list").is_ok());
        for path in ["/../x", "/a/./b", "/a/..", "/%2e%2e/x", "/%2E./x", "/.%2e"] {
            assert!(
                matches!(check_path(path), Err(RelayError::BadRequest(_))),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_outbound_request_shape() {
        let client = reqwest::Client::new();
        let params = parse_params(br#"{"filter":"done"}"#).unwrap();
        let request = build_upstream_request(&client, "http://up:9", "/todos", &params)
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "http://up:9/todos?filter=done");
    }

    #[test]
    fn test_params_are_url_encoded() {
        let client = reqwest::Client::new();
        let params = parse_params(br#"{"query":"{todoList{id}}"}"#).unwrap();
        let request = build_upstream_request(&client, "http://up:9", "/graphql", &params)
            .build()
            .unwrap();

        assert_eq!(
            request.url().query(),
            Some("query=%7BtodoList%7Bid%7D%7D")
        );
    }

    #[test]
    fn test_parse_params_scalars() {
        let mut params = parse_params(br#"{"a":"x","n":3,"b":true,"skip":null}"#).unwrap();
        params.sort();
        assert_eq!(
            params,
            vec![
                ("a".to_string(), "x".to_string()),
                ("b".to_string(), "true".to_string()),
                ("n".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_params_empty_body() {
        assert!(parse_params(b"").unwrap().is_empty());
        assert!(parse_params(b"  \n").unwrap().is_empty());
        assert!(parse_params(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_params_rejects_nested_and_invalid() {
        assert!(matches!(
            parse_params(br#"{"a":{"b":1}}"#),
            Err(RelayError::BadRequest(_))
        ));
        assert!(matches!(
            parse_params(br#"["a"]"#),
            Err(RelayError::BadRequest(_))
        ));
        assert!(matches!(
            parse_params(b"{oops"),
            Err(RelayError::BadRequest(_))
        ));
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            RelayError::BadRequest(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::Timeout { url: String::new() }.status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}

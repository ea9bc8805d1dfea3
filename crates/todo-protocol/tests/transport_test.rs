//! HttpTransport tests against a local axum endpoint

use axum::{
    Router,
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use std::collections::HashMap;
use todo_protocol::{HttpTransport, ProtocolError, TodoClient, TodoRecord, Transport};
use tokio::net::TcpListener;

/// Spawn `app` on an ephemeral port and return its base URL
async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Echoes the received query back inside a todo record
async fn echo_query(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let query = params.get("query").cloned().unwrap_or_default();
    axum::Json(json!({
        "data": {
            "createTodo": {"id": "q", "text": query, "done": false}
        }
    }))
}

#[tokio::test]
async fn test_query_travels_as_url_parameter() {
    let base = spawn(Router::new().route("/graphql", get(echo_query))).await;
    let client = TodoClient::new(HttpTransport::new(&base).unwrap());

    let record = client.create("milk & \"eggs\"").await.unwrap();

    assert_eq!(
        record.text,
        r#"mutation _{createTodo(text:"milk & \"eggs\""){id,text,done}}"#
    );
}

#[tokio::test]
async fn test_base_url_prefix_is_kept() {
    let base = spawn(Router::new().route("/api/graphql", get(echo_query))).await;
    let client = TodoClient::new(HttpTransport::new(&format!("{}/api", base)).unwrap());

    let record = client.create("prefixed").await.unwrap();

    assert_eq!(record.id, "q");
}

#[tokio::test]
async fn test_list_decodes_records() {
    let app = Router::new().route(
        "/graphql",
        get(|| async {
            axum::Json(json!({
                "data": {"todoList": [
                    {"id": "a", "text": "first", "done": false},
                    {"id": "b", "text": "second", "done": true}
                ]}
            }))
        }),
    );
    let base = spawn(app).await;
    let client = TodoClient::new(HttpTransport::new(&base).unwrap());

    let todos = client.list().await.unwrap();

    assert_eq!(
        todos,
        vec![
            TodoRecord::new("a", "first", false),
            TodoRecord::new("b", "second", true)
        ]
    );
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let app = Router::new().route(
        "/graphql",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn(app).await;
    let transport = HttpTransport::new(&base).unwrap();

    match transport.execute("{todoList{id,text,done}}").await.unwrap_err() {
        ProtocolError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let app = Router::new().route("/graphql", get(|| async { "{\"data\": " }));
    let base = spawn(app).await;
    let client = TodoClient::new(HttpTransport::new(&base).unwrap());

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ProtocolError::Decode(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TodoClient::new(HttpTransport::new(&format!("http://{}", addr)).unwrap());
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ProtocolError::Http(_)));
}

#[tokio::test]
async fn test_blank_text_never_reaches_the_network() {
    // Unroutable endpoint: any request attempt would fail with Http, not Validation
    let client = TodoClient::new(HttpTransport::new("http://127.0.0.1:9").unwrap());
    let err = client.create("   ").await.unwrap_err();
    assert!(err.is_validation());
}

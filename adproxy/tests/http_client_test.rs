//! HttpClusterClient against a stub cluster.
//!
//! Each test starts an axum server on a random port that records every
//! request it receives and answers with canned cluster responses.

use adproxy::cluster::{ClusterAction, ClusterClient, HttpClusterClient, RequestContext};
use adproxy::config::ClusterConfig;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: String,
}

type Log = Arc<Mutex<Vec<Captured>>>;

async fn stub(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let path = uri.path().to_string();
    log.lock().unwrap().push(Captured {
        method,
        path: path.clone(),
        query: uri.query().map(String::from),
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    match path.as_str() {
        "/_cat/indices/missing-*" | "/missing" => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": {
                    "root_cause": [],
                    "type": "index_not_found_exception",
                    "reason": "no such index [missing]"
                },
                "status": 404
            })),
        )
            .into_response(),
        "/exists" => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": {
                    "type": "resource_already_exists_exception",
                    "reason": "index [exists/abc] already exists"
                },
                "status": 400
            })),
        )
            .into_response(),
        "/garbage/_search" => (StatusCode::OK, "not json").into_response(),
        p if p.starts_with("/_cat/indices") => {
            axum::Json(json!([{"health": "green", "index": "logs-1"}])).into_response()
        }
        p if p.starts_with("/_cat/aliases") => {
            axum::Json(json!([{"alias": "logs", "index": "logs-1"}])).into_response()
        }
        p if p.ends_with("/_mapping") => {
            axum::Json(json!({"logs-1": {"mappings": {"properties": {}}}})).into_response()
        }
        p if p.ends_with("/_search") => axum::Json(json!({
            "took": 1,
            "timed_out": false,
            "hits": {"total": {"value": 0, "relation": "eq"}, "hits": []}
        }))
        .into_response(),
        "/_bulk" => axum::Json(json!({"took": 3, "errors": false, "items": []})).into_response(),
        _ => axum::Json(json!({"acknowledged": true})).into_response(),
    }
}

async fn start_stub() -> (String, Log, tokio::task::JoinHandle<()>) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new().fallback(stub).with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), log, handle)
}

fn client_for(url: &str) -> HttpClusterClient {
    let config = ClusterConfig {
        url: url.to_string(),
        ..Default::default()
    };
    HttpClusterClient::new(&config).unwrap()
}

fn last(log: &Log) -> Captured {
    log.lock().unwrap().last().cloned().expect("no request captured")
}

#[tokio::test]
async fn test_cat_indices_request_shape() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);

    let result = client
        .call(
            &RequestContext::default(),
            ClusterAction::CatIndices {
                index: Some("logs-*".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(result, json!([{"health": "green", "index": "logs-1"}]));
    let req = last(&log);
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/_cat/indices/logs-*");
    assert_eq!(req.query.as_deref(), Some("format=json&h=health%2Cindex"));
}

#[tokio::test]
async fn test_cat_aliases_without_pattern() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);

    client
        .call(
            &RequestContext::default(),
            ClusterAction::CatAliases { alias: None },
        )
        .await
        .unwrap();

    let req = last(&log);
    assert_eq!(req.path, "/_cat/aliases");
    assert_eq!(req.query.as_deref(), Some("format=json&h=alias%2Cindex"));
}

#[tokio::test]
async fn test_search_posts_body_with_size() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);

    let body = json!({"query": {"term": {"a": 1}}, "sort": {"b": "asc"}});
    let result = client
        .call(
            &RequestContext::default(),
            ClusterAction::Search {
                index: "logs-1".to_string(),
                size: 25,
                body: body.clone(),
            },
        )
        .await
        .unwrap();

    assert_eq!(result["timed_out"], false);
    let req = last(&log);
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/logs-1/_search");
    assert_eq!(req.query.as_deref(), Some("size=25"));
    let sent: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent, body);
}

#[tokio::test]
async fn test_create_and_delete_index() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);
    let ctx = RequestContext::default();

    client
        .call(
            &ctx,
            ClusterAction::CreateIndex {
                index: "new-index".to_string(),
                body: Some(json!({"settings": {"number_of_shards": 1}})),
            },
        )
        .await
        .unwrap();
    let req = last(&log);
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.path, "/new-index");
    let sent: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent, json!({"settings": {"number_of_shards": 1}}));

    client
        .call(
            &ctx,
            ClusterAction::DeleteIndex {
                index: "new-index".to_string(),
            },
        )
        .await
        .unwrap();
    let req = last(&log);
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.path, "/new-index");
}

#[tokio::test]
async fn test_create_index_without_body_sends_empty_object() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);

    client
        .call(
            &RequestContext::default(),
            ClusterAction::CreateIndex {
                index: "bare".to_string(),
                body: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(last(&log).body, "{}");
}

#[tokio::test]
async fn test_get_mapping_paths() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);
    let ctx = RequestContext::default();

    let result = client
        .call(
            &ctx,
            ClusterAction::GetMapping {
                index: Some("logs-1".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(result.get("logs-1").is_some());
    assert_eq!(last(&log).path, "/logs-1/_mapping");

    client
        .call(&ctx, ClusterAction::GetMapping { index: None })
        .await
        .unwrap();
    assert_eq!(last(&log).path, "/_mapping");
}

#[tokio::test]
async fn test_bulk_sends_ndjson() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);

    let result = client
        .call(
            &RequestContext::default(),
            ClusterAction::Bulk {
                body: json!([
                    {"index": {"_index": "logs-1", "_id": "1"}},
                    {"message": "hello"}
                ]),
            },
        )
        .await
        .unwrap();

    assert_eq!(result["errors"], false);
    let req = last(&log);
    assert_eq!(req.path, "/_bulk");
    assert_eq!(
        req.headers.get("content-type").unwrap(),
        "application/x-ndjson"
    );
    assert_eq!(
        req.body,
        "{\"index\":{\"_index\":\"logs-1\",\"_id\":\"1\"}}\n{\"message\":\"hello\"}\n"
    );
}

#[tokio::test]
async fn test_index_not_found_error_is_structured() {
    let (url, _log, _h) = start_stub().await;
    let client = client_for(&url);

    let err = client
        .call(
            &RequestContext::default(),
            ClusterAction::CatIndices {
                index: Some("missing-*".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(404));
    assert!(err.is_index_not_found());
    assert_eq!(
        err.message,
        "[index_not_found_exception] no such index [missing]"
    );
}

#[tokio::test]
async fn test_other_cluster_error() {
    let (url, _log, _h) = start_stub().await;
    let client = client_for(&url);

    let err = client
        .call(
            &RequestContext::default(),
            ClusterAction::CreateIndex {
                index: "exists".to_string(),
                body: None,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(400));
    assert!(!err.is_index_not_found());
    assert!(err.message.contains("already exists"));
}

#[tokio::test]
async fn test_invalid_json_response() {
    let (url, _log, _h) = start_stub().await;
    let client = client_for(&url);

    let err = client
        .call(
            &RequestContext::default(),
            ClusterAction::Search {
                index: "garbage".to_string(),
                size: 0,
                body: json!({}),
            },
        )
        .await
        .unwrap_err();

    assert!(err.message.contains("Invalid JSON"));
}

#[tokio::test]
async fn test_forwards_configured_headers_only() {
    let (url, log, _h) = start_stub().await;
    let client = client_for(&url);

    let mut headers = HeaderMap::new();
    headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
    headers.insert("securitytenant", HeaderValue::from_static("global"));
    headers.insert("x-not-forwarded", HeaderValue::from_static("nope"));
    let ctx = RequestContext::new(headers);

    client
        .call(&ctx, ClusterAction::CatIndices { index: None })
        .await
        .unwrap();

    let req = last(&log);
    assert_eq!(req.headers.get("authorization").unwrap(), "Bearer abc");
    assert_eq!(req.headers.get("securitytenant").unwrap(), "global");
    assert!(req.headers.get("x-not-forwarded").is_none());
}

#[tokio::test]
async fn test_basic_auth_fallback() {
    let (url, log, _h) = start_stub().await;
    let config = ClusterConfig {
        url,
        username: Some("admin".to_string()),
        password: Some("secret".to_string()),
        ..Default::default()
    };
    let client = HttpClusterClient::new(&config).unwrap();

    client
        .call(
            &RequestContext::default(),
            ClusterAction::CatIndices { index: None },
        )
        .await
        .unwrap();

    // base64("admin:secret")
    assert_eq!(
        last(&log).headers.get("authorization").unwrap(),
        "Basic YWRtaW46c2VjcmV0"
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = client
        .call(
            &RequestContext::default(),
            ClusterAction::CatIndices { index: None },
        )
        .await
        .unwrap_err();

    assert!(err.status.is_none());
    assert!(!err.is_index_not_found());
}

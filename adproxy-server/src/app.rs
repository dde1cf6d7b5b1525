//! HTTP application assembly

use adproxy::config::{CorsConfig, ServerConfig};
use adproxy::ClusterClient;
use adproxy_routes::proxy_router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Mount the proxy routes under `base_path` and add the server-level routes
/// and layers.
pub fn build_app(
    server: &ServerConfig,
    client: Arc<dyn ClusterClient>,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let proxy = proxy_router(client);

    let base_path = server.base_path.trim_end_matches('/');
    let mut app = Router::new().route("/health", get(health));
    app = if base_path.is_empty() {
        app.merge(proxy)
    } else {
        app.nest(base_path, proxy)
    };

    if let Some(handle) = metrics {
        app = app.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    app.layer(DefaultBodyLimit::max(server.max_body_size))
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter(|o| *o != "*")
        .filter_map(|o| o.parse().ok())
        .collect();

    let has_wildcard = config.origins.iter().any(|o| o == "*");

    let cors = if has_wildcard {
        CorsLayer::new().allow_origin(tower_http::cors::Any)
    } else if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new().allow_origin(origins)
    };

    cors.allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}
